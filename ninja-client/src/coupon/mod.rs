//! Coupon management
//!
//! - `board` - CRUD orchestration and page state
//! - `display` - card rendering
//! - `filter` - active/inactive selector

pub mod board;
pub mod display;
pub mod filter;

pub use board::CouponBoard;
pub use display::{CouponCard, DisplayField, PLACEHOLDER_IMAGE, UNKNOWN_ITEM, render_fields};
pub use filter::{CouponFilter, ParseFilterError};
