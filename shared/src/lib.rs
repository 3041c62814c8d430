//! Shared types for the BOGO Ninja partner dashboard
//!
//! Wire models and response bodies used by the dashboard client and by
//! anything else that speaks to the partner backend.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use response::ApiErrorResponse;
pub use serde::{Deserialize, Serialize};
