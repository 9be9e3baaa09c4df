//! Auth token store.
//!
//! A single bearer token shared by every page: set on login success, cleared
//! on logout, read by the transport when signing requests. The store is an
//! explicitly constructed value handed to the transport, never an ambient
//! singleton, so tests build an isolated in-memory instance per case.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage file name under the config directory, the fixed persistence key.
pub const TOKEN_FILE_NAME: &str = "token";

/// Process-wide auth token with optional persistence across sessions.
/// An empty token means unauthenticated.
#[derive(Debug)]
pub struct AuthStore {
    token: RwLock<String>,
    path: Option<PathBuf>,
}

impl AuthStore {
    /// Store with no persistence; starts unauthenticated.
    pub fn in_memory() -> Self {
        Self { token: RwLock::new(String::new()), path: None }
    }

    /// Store backed by a token file. An existing file seeds the initial
    /// token; a missing file means the unauthenticated state.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => contents.trim().to_string(),
            Err(_) => String::new(),
        };
        Self { token: RwLock::new(token), path: Some(path) }
    }

    /// Default token file location: `<config_dir>/dc-admin/token`.
    pub fn default_token_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dc-admin").join(TOKEN_FILE_NAME))
    }

    /// Current token; empty when unauthenticated.
    pub fn token(&self) -> String {
        self.token.read().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token().is_empty()
    }

    /// Record a token (login/registration success).
    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.to_string();
        }
        self.persist(token);
    }

    /// Drop the token (logout).
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            slot.clear();
        }
        self.persist("");
    }

    fn persist(&self, token: &str) {
        let Some(path) = &self.path else { return };
        if let Err(e) = write_token_file(path, token) {
            tracing::warn!(path = %path.display(), error = %e, "failed to persist auth token");
        }
    }
}

fn write_token_file(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)
}
