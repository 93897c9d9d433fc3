//! Session identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use photobooth_common::error::{PhotoboothError, PhotoboothResult};

/// Longest accepted session identifier, in bytes.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// A validated session identifier.
///
/// Identifiers are issued by the transport layer. The store only checks
/// that an identifier is safe to use as a single path component; it does
/// not verify uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Validate and wrap a raw identifier.
    pub fn parse(raw: impl Into<String>) -> PhotoboothResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PhotoboothError::invalid_input("Missing session id"));
        }
        if raw.len() > MAX_SESSION_ID_LEN {
            return Err(PhotoboothError::invalid_input("Session id is too long"));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(PhotoboothError::invalid_input(
                "Session id contains invalid characters",
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = PhotoboothError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// File name of the capture stored at `index`.
pub fn photo_file_name(index: u32) -> String {
    format!("photo_{index}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobooth_common::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_uuid() {
        let id = SessionId::parse("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
        assert_eq!(id.as_str(), "0f8fad5b-d9cb-469f-a165-70867728950e");
    }

    #[test]
    fn test_rejects_empty() {
        let err = SessionId::parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rejects_path_traversal() {
        for raw in ["..", "../etc", "a/b", "a\\b", "."] {
            assert!(SessionId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_rejects_overlong() {
        let raw = "a".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(SessionId::parse(raw).is_err());
        assert!(SessionId::parse("a".repeat(MAX_SESSION_ID_LEN)).is_ok());
    }

    #[test]
    fn test_photo_file_name() {
        assert_eq!(photo_file_name(0), "photo_0.png");
        assert_eq!(photo_file_name(12), "photo_12.png");
    }

    proptest! {
        #[test]
        fn prop_accepted_ids_are_single_path_components(raw in "[A-Za-z0-9_-]{1,64}") {
            let id = SessionId::parse(raw.clone()).unwrap();
            let path = std::path::Path::new("root").join(id.as_str());
            prop_assert_eq!(path.components().count(), 2);
            prop_assert_eq!(id.to_string(), raw);
        }

        #[test]
        fn prop_ids_with_separators_are_rejected(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
            let raw = format!("{prefix}/{suffix}");
            prop_assert!(SessionId::parse(raw).is_err());
        }
    }
}
