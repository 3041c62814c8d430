//! Ninja Client - coupon management client for the BOGO Ninja partner API
//!
//! Provides the HTTP transports, the operator session, and the coupon board
//! that keeps a location's coupon list in step with the backend.

pub mod client;
pub mod config;
pub mod coupon;
pub mod error;
pub mod logger;
pub mod session;
pub mod upload;

pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use coupon::{CouponBoard, CouponCard, CouponFilter, DisplayField};
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore};
pub use upload::ImageUpload;

// Re-export shared types for convenience
pub use shared::models::{Coupon, CouponType, Location, MenuItem, MutationResponse, NewCoupon};
