//! Status-coded errors returned by typed application handlers.
//!
//! A [`CodeError`] pairs an HTTP status code with a human-readable message and
//! is what a typed handler returns on failure. The dispatch adapter turns it
//! into the JSON error body of the response.

use http::StatusCode;
use serde_json::{json, Value};
use std::fmt::Display;
use thiserror::Error;

/// An error carrying the HTTP status code it should be reported with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} {message}")]
pub struct CodeError {
    pub code: u16,
    pub message: String,
}

impl CodeError {
    /// Build an error with an explicit status code. A zero code falls back to
    /// 500.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        let code = if code == 0 {
            StatusCode::INTERNAL_SERVER_ERROR.as_u16()
        } else {
            code
        };
        CodeError {
            code,
            message: message.into(),
        }
    }

    /// 400: the request parameters could not be understood.
    pub fn bad_request(detail: impl Display) -> Self {
        CodeError {
            code: StatusCode::BAD_REQUEST.as_u16(),
            message: format!("invalid parameter: {detail}"),
        }
    }

    /// 401: the request requires authentication.
    pub fn unauthorized(detail: impl Display) -> Self {
        CodeError {
            code: StatusCode::UNAUTHORIZED.as_u16(),
            message: detail.to_string(),
        }
    }

    /// 403: access refused even with valid credentials.
    pub fn forbidden(detail: impl Display) -> Self {
        CodeError {
            code: StatusCode::FORBIDDEN.as_u16(),
            message: detail.to_string(),
        }
    }

    /// 404: no such resource on the server.
    pub fn not_found(detail: impl Display) -> Self {
        CodeError {
            code: StatusCode::NOT_FOUND.as_u16(),
            message: detail.to_string(),
        }
    }

    /// JSON error body for the response this error turns into.
    pub fn body(&self) -> Value {
        json!({
            "code": self.code,
            "error": self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CodeError;

    #[test]
    fn test_display_is_code_then_message() {
        let err = CodeError::new(404, "no such pet");
        assert_eq!(err.to_string(), "404 no such pet");
    }

    #[test]
    fn test_zero_code_defaults_to_500() {
        assert_eq!(CodeError::new(0, "boom").code, 500);
    }

    #[test]
    fn test_constructor_codes() {
        assert_eq!(CodeError::bad_request("x").code, 400);
        assert_eq!(CodeError::unauthorized("x").code, 401);
        assert_eq!(CodeError::forbidden("x").code, 403);
        assert_eq!(CodeError::not_found("x").code, 404);
    }
}
