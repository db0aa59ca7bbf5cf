//! GitHub API v3 payload types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Repository public key used to encrypt Actions secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPublicKey {
    /// Identifier GitHub needs back alongside the encrypted value.
    pub key_id: String,
    /// Base64-encoded Curve25519 public key.
    pub key: String,
}

/// Body of a create-or-update secret request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub key_id: String,
    /// Base64 sealed box.
    pub encrypted_value: String,
}

/// Outcome of a successful secret write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretWrite {
    /// 201: the secret did not exist before.
    Created,
    /// 204: an existing secret was replaced.
    Updated,
}

impl fmt::Display for SecretWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Updated => f.write_str("updated"),
        }
    }
}
