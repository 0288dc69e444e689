//! Success response envelope.
//!
//! All responses are shaped `{success, data?, message?}`; error responses
//! are produced by the error translator in `error.rs`.

use serde::Serialize;

/// JSON success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying a payload.
    #[must_use]
    pub const fn with_data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// A successful response carrying only a message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}
