//! HTTP transports
//!
//! `NetworkHttpClient` talks to the partner backend over reqwest;
//! `OneshotHttpClient` drives an in-process axum Router.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use self::http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use self::http_oneshot::OneshotHttpClient;
