//! Mapping of core errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use photobooth_common::error::{ErrorKind, PhotoboothError};

use crate::payload::Failure;

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A classified failure from the core crates.
    Core(PhotoboothError),
    /// Anything else (worker panics, serialisation bugs).
    Internal(String),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Core(PhotoboothError::invalid_input(message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(e) => match e.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Storage | ErrorKind::ResourceUnavailable => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PhotoboothError> for ApiError {
    fn from(e: PhotoboothError) -> Self {
        Self::Core(e)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(format!("worker task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Core(e) => {
                if status.is_server_error() {
                    tracing::error!(error = %e, kind = %e.kind(), "Request failed");
                } else {
                    tracing::warn!(error = %e, kind = %e.kind(), "Request rejected");
                }
                e.user_message()
            }
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                "Something went wrong. Please try again.".to_string()
            }
        };
        (status, Json(Failure::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PhotoboothError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (PhotoboothError::not_found("x"), StatusCode::NOT_FOUND),
            (
                PhotoboothError::storage_msg("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                PhotoboothError::resource_unavailable("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
