//! API Response types
//!
//! Successful partner API calls return the resource as bare JSON. Failed
//! calls may carry a structured error body:
//! ```json
//! {
//!     "code": "COUPON_CODE_TAKEN",
//!     "message": "Coupon code already exists",
//!     "details": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Error body returned by the partner backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
