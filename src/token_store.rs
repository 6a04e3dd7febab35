// ABOUTME: Durable single-value persistence of the Withings refresh token
// ABOUTME: Newline-trimmed raw token string at a fixed path, written atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Token Store
//!
//! The refresh token is the only state that survives a restart. It lives in
//! one file holding exactly the raw token string. Writes go through a
//! temporary file plus rename so a concurrent load never observes a partial
//! write. There is no retry logic here: persistence failures are surfaced to
//! the caller, which logs them and keeps using the in-memory token for the
//! rest of the process lifetime.

use crate::errors::PersistenceError;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File-backed refresh-token storage.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted refresh token.
    ///
    /// Returns the empty string when the file is absent or unreadable,
    /// which is a valid (if useless) starting state, not an error. A
    /// trailing newline from hand-edited files is trimmed.
    pub async fn load(&self) -> String {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents.trim_end_matches('\n').to_owned(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                warn!("failed to read token file {}: {e}", self.path.display());
                String::new()
            }
        }
    }

    /// Overwrite the persisted refresh token.
    ///
    /// The value is written to a sibling temporary file and renamed into
    /// place, so `load` sees either the old or the new token, never a
    /// partial write.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the write or rename fails.
    pub async fn save(&self, token: &str) -> Result<(), PersistenceError> {
        let tmp = self.path.with_extension("tmp");

        let result = async {
            tokio::fs::write(&tmp, token.as_bytes()).await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        result.map_err(|source| PersistenceError {
            path: self.path.clone(),
            source,
        })
    }
}
