//! Client error types

use http::StatusCode;
use shared::ApiErrorResponse;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session expired or missing; the operator has to sign in again
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// 5xx from the backend, carrying the status text
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Structured error body from the backend
    #[error("API error: {message}")]
    Api {
        code: Option<String>,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file access (image reads, session store)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// A coupon operation needs an active location
    #[error("No location selected")]
    NoLocationSelected,

    /// Location id is not in the loaded set
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Coupon id is not in the local list
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),
}

impl ClientError {
    /// Map a non-2xx response to an error.
    ///
    /// 401 and 5xx are classified by status alone; other statuses prefer the
    /// structured error body when the backend sent one.
    pub fn from_status(status: StatusCode, text: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }
        if status.is_server_error() {
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Server error").to_string()
            } else {
                text
            };
            return ClientError::Server {
                status: status.as_u16(),
                message,
            };
        }
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            };
        }
        match status {
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Internal(format!("{}: {}", status, text)),
        }
    }

    /// Whether the operator has to sign in again
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Decode a successful response body. An empty body decodes as JSON `null`.
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}
