//! Check configured assets and storage.

use std::path::Path;

use photobooth_common::config::AppConfig;
use photobooth_render_engine::text::StampFont;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Photobooth Check");
    println!("{}", "=".repeat(50));

    let mut all_ok = true;

    // Frames
    match list_frames(&config.assets.frames_dir) {
        Ok(frames) if !frames.is_empty() => {
            println!(
                "[OK] Frames dir: {} ({} frames)",
                config.assets.frames_dir.display(),
                frames.len()
            );
            for name in &frames {
                println!("     {name}");
            }
        }
        Ok(_) => println!(
            "[WARN] Frames dir: {} contains no images",
            config.assets.frames_dir.display()
        ),
        Err(e) => {
            all_ok = false;
            println!(
                "[FAIL] Frames dir: {} ({e})",
                config.assets.frames_dir.display()
            );
        }
    }

    // Font
    match StampFont::load(&config.assets.font_path, config.assets.date_font_px) {
        Ok(_) => println!("[OK] Font: {}", config.assets.font_path.display()),
        Err(e) => {
            all_ok = false;
            println!("[FAIL] Font: {} ({e})", config.assets.font_path.display());
        }
    }

    // Storage root
    match std::fs::create_dir_all(&config.storage.root) {
        Ok(()) if !is_read_only(&config.storage.root) => {
            println!("[OK] Storage root: {}", config.storage.root.display())
        }
        Ok(()) => {
            all_ok = false;
            println!("[FAIL] Storage root: {} is read-only", config.storage.root.display());
        }
        Err(e) => {
            all_ok = false;
            println!("[FAIL] Storage root: {} ({e})", config.storage.root.display());
        }
    }

    println!("[OK] Public URL base: {}", config.storage.public_base_url);

    println!();
    if all_ok {
        println!("All checks passed. Photobooth is ready.");
        Ok(())
    } else {
        anyhow::bail!("Some checks failed. See above for details.")
    }
}

fn list_frames(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

fn is_read_only(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.permissions().readonly())
        .unwrap_or(true)
}
