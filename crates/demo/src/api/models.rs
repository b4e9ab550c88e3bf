//! API request/response models

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// Query string of the echo endpoint
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EchoParams {
    pub message: Option<String>,
}

impl EchoParams {
    /// Repeated `message` values are joined with `,`; other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "message")
            .map(|(_, value)| value)
            .collect();

        Self {
            message: (!values.is_empty()).then(|| values.join(",")),
        }
    }
}

/// Error detail
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Generic error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl From<&DemoError> for ErrorResponse {
    fn from(e: &DemoError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

// Every collaborator fault is a server-side failure
impl IntoResponse for DemoError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::from(&self)),
        )
            .into_response()
    }
}
