//! Composite naming and persistence.
//!
//! [`CompositeExporter::compose_and_store`] validates a selection, loads
//! the referenced captures and frame, composes them, and writes the
//! result under a fresh collision-resistant name:
//!
//! ```text
//! <root>/composite/<session_id>_<token>_composite.jpg
//! ```
//!
//! The public URL is computed before composing because the QR code in the
//! composite links to the composite itself.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbImage};
use serde::{Deserialize, Serialize};

use photobooth_common::clock::DateClock;
use photobooth_common::config::{AppConfig, AssetConfig, StorageConfig};
use photobooth_common::error::{PhotoboothError, PhotoboothResult};
use photobooth_common::fs::write_atomic;
use photobooth_session_store::{SessionId, SessionStore};

use crate::compositor::Compositor;
use crate::layout::PHOTO_COUNT;
use crate::text::StampFont;

/// File extension of stored composites.
pub const COMPOSITE_EXTENSION: &str = "jpg";

/// Length of the random token in composite names.
pub const TOKEN_LEN: usize = 8;

/// A request to compose one artifact. Consumed once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Capture indices in slot order.
    pub photo_indices: Vec<u32>,

    /// Frame file name under the frames directory.
    pub frame_file: String,
}

impl Selection {
    pub fn new(photo_indices: Vec<u32>, frame_file: impl Into<String>) -> Self {
        Self {
            photo_indices,
            frame_file: frame_file.into(),
        }
    }

    /// Cheap structural checks that need no filesystem access.
    pub fn validate(&self) -> PhotoboothResult<()> {
        if self.photo_indices.len() != PHOTO_COUNT {
            return Err(PhotoboothError::invalid_input(format!(
                "Select exactly {PHOTO_COUNT} photos"
            )));
        }
        validate_frame_file(&self.frame_file)
    }
}

/// A stored composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub public_url: String,
}

/// Random token for a composite name: the first hex digits of a UUID v4.
///
/// Collisions are not checked for.
pub fn random_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

/// `<session>_<token>_composite.jpg`
pub fn composite_file_name(session: &SessionId, token: &str) -> String {
    format!("{session}_{token}_composite.{COMPOSITE_EXTENSION}")
}

/// Frame names must be a single plain path component.
fn validate_frame_file(frame_file: &str) -> PhotoboothResult<()> {
    if frame_file.is_empty() {
        return Err(PhotoboothError::invalid_input("Missing frame"));
    }
    if frame_file == "."
        || frame_file == ".."
        || frame_file.contains(['/', '\\'])
        || frame_file.contains('\0')
    {
        return Err(PhotoboothError::invalid_input("Invalid frame name"));
    }
    Ok(())
}

/// Orchestrates loading, composing, naming and writing composites.
pub struct CompositeExporter {
    store: SessionStore,
    storage: StorageConfig,
    assets: AssetConfig,
    clock: Arc<dyn DateClock>,
}

impl CompositeExporter {
    pub fn new(config: &AppConfig, clock: Arc<dyn DateClock>) -> Self {
        Self {
            store: SessionStore::new(config.storage.clone()),
            storage: config.storage.clone(),
            assets: config.assets.clone(),
            clock,
        }
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Path of a frame asset after validating its name.
    pub fn frame_path(&self, frame_file: &str) -> PhotoboothResult<PathBuf> {
        validate_frame_file(frame_file)?;
        Ok(self.assets.frames_dir.join(frame_file))
    }

    /// Compose the selected captures under the selected frame and store
    /// the result. Nothing is written unless composition succeeds.
    pub fn compose_and_store(
        &self,
        session: &SessionId,
        selection: &Selection,
    ) -> PhotoboothResult<StoredArtifact> {
        selection.validate()?;

        if !self.store.session_exists(session) {
            return Err(PhotoboothError::not_found("Session not found"));
        }

        let frame_path = self.frame_path(&selection.frame_file)?;
        if !frame_path.is_file() {
            tracing::warn!(frame = %selection.frame_file, "Frame asset missing");
            return Err(PhotoboothError::not_found("Frame image not found"));
        }

        let photos = selection
            .photo_indices
            .iter()
            .map(|&index| {
                load_image(
                    &self.store.photo_path(session, index),
                    &format!("Photo {index}"),
                )
            })
            .collect::<PhotoboothResult<Vec<_>>>()?;
        let frame = load_image(&frame_path, "Frame image")?;

        let file_name = composite_file_name(session, &random_token());
        let public_url = self.storage.composite_url(&file_name);

        let font = StampFont::load(&self.assets.font_path, self.assets.date_font_px)?;
        let composite =
            Compositor::new(font).compose(&photos, &frame, &public_url, self.clock.today())?;

        let path = self.write_composite(&file_name, composite)?;
        tracing::info!(session = %session, file = %file_name, "Stored composite");

        Ok(StoredArtifact {
            file_name,
            path,
            public_url,
        })
    }

    fn write_composite(&self, file_name: &str, composite: RgbImage) -> PhotoboothResult<PathBuf> {
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(composite)
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(|e| PhotoboothError::storage_msg(format!("Failed to encode composite: {e}")))?;

        let dir = self.storage.composite_dir();
        std::fs::create_dir_all(&dir).map_err(|e| {
            PhotoboothError::storage(format!("failed to create {}", dir.display()), e)
        })?;

        let path = dir.join(file_name);
        write_atomic(&path, &jpeg)?;
        Ok(path)
    }
}

/// Open and decode an image, mapping failures onto the error taxonomy.
fn load_image(path: &Path, label: &str) -> PhotoboothResult<DynamicImage> {
    if !path.is_file() {
        return Err(PhotoboothError::not_found(format!("{label} not found")));
    }
    let read_failed =
        |io: std::io::Error| PhotoboothError::storage(format!("failed to read {}", path.display()), io);

    // Sniff the content so extensionless frame names still decode.
    let reader = ImageReader::open(path)
        .map_err(read_failed)?
        .with_guessed_format()
        .map_err(read_failed)?;
    reader.decode().map_err(|e| match e {
        ImageError::IoError(io) => read_failed(io),
        other => PhotoboothError::invalid_input(format!("{label} could not be decoded: {other}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobooth_common::error::ErrorKind;

    #[test]
    fn test_token_shape() {
        let token = random_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(random_token(), random_token());
    }

    #[test]
    fn test_composite_file_name_layout() {
        let session = SessionId::parse("abc123").unwrap();
        assert_eq!(
            composite_file_name(&session, "0a1b2c3d"),
            "abc123_0a1b2c3d_composite.jpg"
        );
    }

    #[test]
    fn test_selection_cardinality() {
        for n in [0usize, 3, 5] {
            let selection = Selection::new((0..n as u32).collect(), "frameA.png");
            assert_eq!(selection.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
        }
        assert!(Selection::new(vec![0, 1, 2, 3], "frameA.png").validate().is_ok());
    }

    #[test]
    fn test_frame_names_must_be_plain() {
        for bad in ["", ".", "..", "../secret.png", "a/b.png", "a\\b.png"] {
            let err = validate_frame_file(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{bad:?}");
        }
        assert!(validate_frame_file("frame 1.png").is_ok());
    }

    #[test]
    fn test_repeated_indices_allowed() {
        assert!(Selection::new(vec![0, 0, 1, 1], "f.png").validate().is_ok());
    }
}
