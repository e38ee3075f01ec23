//! Application error type mapping to HTTP status codes and `{error}` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tutor_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the chat service.
    Chat(ChatError),
    /// No route matched the request.
    NotFound,
    /// A handler panicked.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::InvalidRequest(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Chat(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = AppError::from(ChatError::InvalidRequest("Missing userId".into()));
        assert_eq!(invalid.status_and_message(), (StatusCode::BAD_REQUEST, "Missing userId".to_string()));

        let storage = AppError::from(ChatError::StorageUnavailable("disk full".into()));
        assert_eq!(storage.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);

        let session = AppError::from(ChatError::SessionUnavailable("alice".into()));
        assert_eq!(session.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(AppError::NotFound.status_and_message().0, StatusCode::NOT_FOUND);

        let internal = AppError::Internal("handler panicked: boom".into());
        assert_eq!(
            internal.status_and_message(),
            (StatusCode::INTERNAL_SERVER_ERROR, "handler panicked: boom".to_string())
        );
    }
}
