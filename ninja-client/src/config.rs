//! Client configuration

use std::path::PathBuf;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the partner backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | NINJA_API_URL | http://localhost:8080 | Backend base URL |
/// | NINJA_API_TOKEN | - | Bearer token |
/// | NINJA_TIMEOUT_SECS | 30 | Request timeout |
/// | NINJA_OPERATOR_ID | - | Operator owning the locations |
/// | NINJA_SESSION_PATH | - | Persisted session file |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Operator whose locations the dashboard manages
    pub operator_id: Option<String>,

    /// Where the signed-in session is persisted
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            operator_id: None,
            session_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            base_url: non_empty("NINJA_API_URL").unwrap_or_else(|| "http://localhost:8080".into()),
            token: non_empty("NINJA_API_TOKEN"),
            timeout: non_empty("NINJA_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            operator_id: non_empty("NINJA_OPERATOR_ID"),
            session_path: non_empty("NINJA_SESSION_PATH").map(PathBuf::from),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the operator id
    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = Some(operator_id.into());
        self
    }

    /// Set the session file path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::default()
            .with_token("tok")
            .with_operator("op-1")
            .with_timeout(5)
            .with_session_path("/tmp/ninja/session.json");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.operator_id.as_deref(), Some("op-1"));
        assert_eq!(config.timeout, 5);
        assert_eq!(
            config.session_path,
            Some(PathBuf::from("/tmp/ninja/session.json"))
        );
    }
}
