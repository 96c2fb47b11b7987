//! Bearer-token persistence between CLI invocations.
//!
//! The browser client keeps its token in local storage; the CLI equivalent
//! is a plain file under the platform state directory. The token is opaque
//! to us and never logged.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store at the given path. Nothing is touched until a token
    /// is saved or loaded.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the token lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token, if any.
    pub fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok((!token.is_empty()).then_some(token))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read token from {}", self.path.display())),
        }
    }

    /// Persists a token, creating parent directories as needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("failed to write token to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Removes the stored token. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove token at {}", self.path.display())),
        }
    }
}
