//! Account identities.
//!
//! Callers are authenticated by the host runtime; the registry only ever sees
//! an already-verified `AccountId`. Identities are opaque 32-byte keys, either
//! supplied raw by the host or derived from a stable label (an address, a
//! key fingerprint) via SHA-256.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Domain separator mixed into label-derived identities.
const LABEL_DOMAIN: &[u8] = b"flightsure-account-v1";

/// Unique account identity (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive an identity from a stable label.
    ///
    /// Deterministic: the same label always yields the same identity.
    pub fn from_label(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(LABEL_DOMAIN);
        hasher.update(label.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Truncated hex form for log lines and operator output.
    pub fn short(&self) -> String {
        let hex = hex::encode(self.0);
        format!("{}...{}", &hex[..8], &hex[hex.len() - 8..])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Errors parsing a hex-encoded identity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseAccountIdError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for AccountId {
    type Err = ParseAccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| ParseAccountIdError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseAccountIdError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }
}
