// ninja-client/src/session.rs
// Session data and its JSON file store

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ClientConfig;

/// Signed-in operator session
///
/// Passed explicitly to the coupon board, which applies the token to every
/// request it makes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token for the partner API
    pub token: Option<String>,
    /// Operator owning the managed locations
    pub operator_id: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, operator_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            operator_id: Some(operator_id.into()),
        }
    }

    /// Session seeded from configuration values
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            token: config.token.clone(),
            operator_id: config.operator_id.clone(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn operator_id(&self) -> Option<&str> {
        self.operator_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Drop the token; the operator id is kept so sign-in can be prefilled
    pub fn sign_out(&mut self) {
        self.token = None;
    }
}

/// Session persisted as a JSON file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Make sure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Load the stored session; a missing or unreadable file yields `None`
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_store_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("nested").join("session.json"));
        assert!(!store.exists());
        assert!(store.load().is_none());

        let session = Session::new("token-1", "op-1");
        store.save(&session).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), Some(session));

        store.delete().unwrap();
        assert!(!store.exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_session_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_sign_out_keeps_operator() {
        let mut session = Session::new("token-1", "op-1");
        assert!(session.is_authenticated());

        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(session.operator_id(), Some("op-1"));
    }

    #[test]
    fn test_session_from_config() {
        let config = ClientConfig::default().with_token("t").with_operator("op-9");
        let session = Session::from_config(&config);

        assert_eq!(session.token(), Some("t"));
        assert_eq!(session.operator_id(), Some("op-9"));
    }
}
