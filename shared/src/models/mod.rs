//! Data models
//!
//! Shared between the dashboard client and the partner backend (via API).
//! All IDs are backend-assigned strings; JSON field names are camelCase.

pub mod coupon;
pub mod location;
pub mod menu_item;

// Re-exports
pub use coupon::*;
pub use location::*;
pub use menu_item::*;
