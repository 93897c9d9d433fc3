//! Write a standalone QR code.

use std::path::PathBuf;

use photobooth_common::fs::write_atomic;
use photobooth_render_engine::qr::encode_qr_png;

pub fn run(text: String, output: PathBuf) -> anyhow::Result<()> {
    let png = encode_qr_png(&text)?;
    write_atomic(&output, &png)?;
    println!("Wrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}
