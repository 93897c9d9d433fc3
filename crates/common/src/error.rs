//! Error types shared across Photobooth crates.
//!
//! Every failure that crosses a component boundary is one of four kinds.
//! Codec and filesystem errors are folded into these kinds at the point
//! where they occur, keeping the library message for diagnostics.

use std::fmt;

/// Machine-checkable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed request fields, undecodable image bytes,
    /// wrong selection cardinality.
    InvalidInput,
    /// Missing session directory, frame asset, or referenced photo.
    NotFound,
    /// Filesystem write failure.
    Storage,
    /// A required static asset (font) could not be loaded.
    ResourceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Storage => "storage_error",
            Self::ResourceUnavailable => "resource_unavailable",
        };
        f.write_str(s)
    }
}

/// Top-level error type for Photobooth operations.
#[derive(Debug, thiserror::Error)]
pub enum PhotoboothError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Resource unavailable: {message}")]
    ResourceUnavailable { message: String },
}

/// Result type alias using PhotoboothError.
pub type PhotoboothResult<T> = Result<T, PhotoboothError>;

impl PhotoboothError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    pub fn storage(msg: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            message: msg.into(),
            source: Some(source),
        }
    }

    pub fn storage_msg(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
            source: None,
        }
    }

    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            message: msg.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::ResourceUnavailable { .. } => ErrorKind::ResourceUnavailable,
        }
    }

    /// Short message suitable for showing to an end user.
    ///
    /// `InvalidInput` and `NotFound` messages are written by this crate
    /// family and never contain filesystem paths, so they are passed
    /// through. Storage and resource failures are summarised.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } | Self::NotFound { message } => message.clone(),
            Self::Storage { .. } => "The photo could not be saved. Please try again.".to_string(),
            Self::ResourceUnavailable { .. } => {
                "The photobooth is temporarily unavailable.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            PhotoboothError::invalid_input("bad").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(PhotoboothError::not_found("gone").kind(), ErrorKind::NotFound);
        assert_eq!(
            PhotoboothError::storage_msg("disk").kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            PhotoboothError::resource_unavailable("font").kind(),
            ErrorKind::ResourceUnavailable
        );
    }

    #[test]
    fn test_user_message_hides_storage_details() {
        let err = PhotoboothError::storage(
            "failed to write /srv/booth/raw/abc/photo_0.png",
            std::io::Error::other("disk full"),
        );
        assert!(!err.user_message().contains("/srv"));
        assert!(err.to_string().contains("/srv/booth"));
    }

    #[test]
    fn test_storage_keeps_io_source() {
        use std::error::Error;
        let err = PhotoboothError::storage("write", std::io::Error::other("disk full"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".into()));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
