//! Crypto error types.

/// Errors from sealing a secret for a recipient.
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    /// The recipient key is not valid standard base64.
    #[error(transparent)]
    Decode(#[from] base64::DecodeError),

    #[error("recipient public key has invalid length ({0} bytes)")]
    InvalidKeyLength(usize),

    /// The randomness source could not produce an ephemeral key.
    #[error(transparent)]
    KeyGeneration(#[from] rand::Error),

    #[error("internal crypto error: {0}")]
    Internal(String),

    #[error("sealing failed")]
    Seal,
}

impl SealError {
    /// Whether retrying the same call might succeed.
    ///
    /// Only randomness-source faults are transient; every other kind is
    /// caused by the inputs or by a broken primitive.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::KeyGeneration(_))
    }
}
