//! Raw capture storage, one directory per session.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Serialize;

use photobooth_common::config::StorageConfig;
use photobooth_common::error::{PhotoboothError, PhotoboothResult};
use photobooth_common::fs::write_atomic;

use crate::session::{photo_file_name, SessionId};

/// Extensions recognised as captures when listing a session.
const LISTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Result of listing a session's captures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoListing {
    /// Whether the session directory exists.
    pub session_found: bool,

    /// Public URLs of the captures, sorted by file name.
    pub photos: Vec<String>,
}

/// Filesystem-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: StorageConfig,
}

impl SessionStore {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Directory for a session (may not exist yet).
    pub fn session_dir(&self, session: &SessionId) -> PathBuf {
        self.storage.raw_dir().join(session.as_str())
    }

    /// Path of the capture stored at `index` (may not exist yet).
    pub fn photo_path(&self, session: &SessionId, index: u32) -> PathBuf {
        self.session_dir(session).join(photo_file_name(index))
    }

    /// Whether the session directory exists.
    pub fn session_exists(&self, session: &SessionId) -> bool {
        self.session_dir(session).is_dir()
    }

    /// Create the session directory if absent.
    pub fn ensure_session_dir(&self, session: &SessionId) -> PhotoboothResult<PathBuf> {
        let dir = self.session_dir(session);
        std::fs::create_dir_all(&dir).map_err(|e| {
            PhotoboothError::storage(format!("failed to create {}", dir.display()), e)
        })?;
        Ok(dir)
    }

    /// Store a capture at `index`, replacing any previous capture there.
    ///
    /// The bytes must decode as an image. PNG input is stored verbatim;
    /// other formats are re-encoded to PNG. Returns the stored file name.
    pub fn save_photo(
        &self,
        session: &SessionId,
        index: u32,
        bytes: &[u8],
    ) -> PhotoboothResult<String> {
        if bytes.is_empty() {
            return Err(PhotoboothError::invalid_input("Missing image data"));
        }

        let png = to_png_bytes(bytes)?;
        let dir = self.ensure_session_dir(session)?;
        let file_name = photo_file_name(index);
        write_atomic(&dir.join(&file_name), &png)?;

        tracing::info!(session = %session, index, bytes = png.len(), "Saved capture");
        Ok(file_name)
    }

    /// List a session's captures as public URLs, sorted by file name.
    ///
    /// A missing session is not an error: the listing is empty and
    /// `session_found` is false.
    pub fn list_photos(&self, session: &SessionId) -> PhotoboothResult<PhotoListing> {
        let dir = self.session_dir(session);
        if !dir.is_dir() {
            tracing::debug!(session = %session, "Listing unknown session");
            return Ok(PhotoListing {
                session_found: false,
                photos: vec![],
            });
        }

        let mut names = capture_file_names(&dir)?;
        names.sort();

        Ok(PhotoListing {
            session_found: true,
            photos: names
                .iter()
                .map(|name| self.storage.raw_url(session.as_str(), name))
                .collect(),
        })
    }
}

/// Validate that `bytes` decode as an image and return PNG bytes.
fn to_png_bytes(bytes: &[u8]) -> PhotoboothResult<Vec<u8>> {
    let format = image::guess_format(bytes)
        .map_err(|e| PhotoboothError::invalid_input(format!("Unrecognised image data: {e}")))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PhotoboothError::invalid_input(format!("Undecodable image data: {e}")))?;

    if format == ImageFormat::Png {
        return Ok(bytes.to_vec());
    }

    let mut out = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| PhotoboothError::storage_msg(format!("Failed to encode capture: {e}")))?;
    Ok(out)
}

fn capture_file_names(dir: &Path) -> PhotoboothResult<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| PhotoboothError::storage(format!("failed to read {}", dir.display()), e))?;

    let mut names = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| {
            PhotoboothError::storage(format!("failed to read {}", dir.display()), e)
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') && has_listed_extension(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

fn has_listed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            LISTED_EXTENSIONS
                .iter()
                .any(|listed| ext.eq_ignore_ascii_case(listed))
        })
        .unwrap_or(false)
}
