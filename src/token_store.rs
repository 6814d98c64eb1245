//! Durable bearer-token storage.
//!
//! The token file is the only cross-component mutable shared resource: read
//! at request-send time, written only by login/logout/refresh. A token that
//! fails structural inspection is treated exactly like a missing token —
//! cleared and never propagated as a crash.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config;

/// Errors from token storage and inspection.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Token file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored token is malformed")]
    Malformed,
}

/// Claims the backend embeds in the bearer token payload.
///
/// Only inspected structurally — the backend remains the authority on
/// validity. `sub` carries the account email, `exp` a unix timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub role: Option<String>,
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Whether the embedded expiry has passed. Tokens without `exp` are
    /// left to the backend to judge.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.exp, Some(exp) if exp <= now.timestamp())
    }
}

/// Decode the payload segment of a JWT without verifying the signature.
///
/// Signature verification belongs to the backend; the client only needs to
/// know the token is structurally sound before attaching it to requests.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenStoreError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenStoreError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenStoreError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenStoreError::Malformed)
}

// ═══════════════════════════════════════════════════════════
// TokenStore
// ═══════════════════════════════════════════════════════════

/// File-backed bearer-token store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at an explicit path (tests use a temp dir).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the app's durable location (`~/Careflow/session.token`).
    pub fn at_default_location() -> Self {
        Self::new(config::token_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, creating the parent directory if needed.
    pub fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    /// Load the stored token. Missing file or blank content is `None`.
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the stored token. Removing an absent file is a no-op.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
