//! Request and response bodies.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use photobooth_common::error::{PhotoboothError, PhotoboothResult};

/// Failure response
#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// New session response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: String,
}

/// Capture upload. Fields are optional so missing ones surface as a
/// 400 with a readable message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SavePhotoRequest {
    pub session_id: Option<String>,
    pub index: Option<u32>,
    /// Base64 image, optionally wrapped in a `data:` URL.
    pub image_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SavePhotoResponse {
    pub success: bool,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ListPhotosResponse {
    pub success: bool,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Composite request
#[derive(Debug, Deserialize)]
pub struct SaveSelectionRequest {
    pub session_id: Option<String>,
    pub selected_photos: Option<Vec<u32>>,
    pub frame_file: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveSelectionResponse {
    pub success: bool,
    pub public_url: String,
    pub redirect_url: String,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub url: Option<String>,
}

/// Decode an uploaded image: plain base64 or a `data:<mime>;base64,` URL.
pub fn decode_image_data(data: &str) -> PhotoboothResult<Vec<u8>> {
    let encoded = match data.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, body)| body)
            .ok_or_else(|| PhotoboothError::invalid_input("Malformed data URL"))?,
        None => data,
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| PhotoboothError::invalid_input(format!("Image data is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(PhotoboothError::invalid_input("Image data is empty"));
    }
    Ok(bytes)
}

/// `/download?img_url=<percent-encoded public url>`
pub fn download_redirect(public_url: &str) -> Result<String, serde_urlencoded::ser::Error> {
    let query = serde_urlencoded::to_string(&[("img_url", public_url)][..])?;
    Ok(format!("/download?{query}"))
}
