//! Error handling for the Libris HTTP layer

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::{Timestamp, Uuid};

/// Error returned by every Libris handler.
///
/// The catalog API does not distinguish failures by status code: decode
/// errors, validation errors, missing rows and database errors are all
/// reported as `400 Bad Request` with the raw message as a plain-text body.
/// The `code` only travels to the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Create a bad request error with a machine-readable code
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an error for a request body that could not be decoded
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::bad_request("malformed_body", message)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let status = self.status();

        tracing::warn!(
            error_id = %error_id,
            error_code = %self.code,
            status_code = %status.as_u16(),
            message = %self.message,
            "request failed"
        );

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_error() {
        let error = ApiError::bad_request("invalid_id", "invalid id");
        assert_eq!(error.code, "invalid_id");
        assert_eq!(error.message, "invalid id");
        assert_eq!(error.to_string(), "invalid id");
    }

    #[test]
    fn test_error_response_mapping() {
        let response = ApiError::bad_request("not_found", "book with id 11 not found").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_error_response_body_is_raw_message() {
        let response = ApiError::malformed_body("EOF while parsing an object").into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"EOF while parsing an object");
    }
}
