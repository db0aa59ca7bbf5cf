//! Fixed-size key and nonce types.
//!
//! Keys cross the library boundary as base64 text and are validated into
//! sized arrays before any cryptographic operation touches them.

use base64::engine::general_purpose::STANDARD;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};
use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};
use rand::RngCore;
use rand::rngs::OsRng;
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SealError;

/// X25519 public and private key size.
pub const KEY_SIZE: usize = 32;

/// XSalsa20-Poly1305 nonce size.
pub const NONCE_SIZE: usize = 24;

/// Standard padded alphabet, decoding the way Go's `StdEncoding` does:
/// non-zero bits after the last full byte are ignored.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A Curve25519 public key, exactly 32 bytes.
///
/// Only the length is checked; the bytes are not validated as a curve point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; KEY_SIZE]);

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_base64()).finish()
    }
}

impl PublicKey {
    /// Decode a standard (padded) base64 key and check its length.
    ///
    /// Line breaks are skipped, so PEM-style wrapped input is accepted.
    pub fn from_base64(encoded: &str) -> Result<Self, SealError> {
        let bytes = if encoded.contains(['\r', '\n']) {
            let joined: String = encoded.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
            LENIENT_STANDARD.decode(joined)?
        } else {
            LENIENT_STANDARD.decode(encoded)?
        };
        Self::try_from(bytes.as_slice())
    }

    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = SealError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| SealError::InvalidKeyLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

/// A Curve25519 private key. Wiped from memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_SIZE]);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

impl PrivateKey {
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw scalar bytes. Handle with care.
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// A 24-byte box nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// BLAKE2b-192 over `ephemeral || recipient`.
    ///
    /// Deterministic for a given pair of keys. Safe only because the
    /// ephemeral key is never used for more than one message.
    pub fn derive(ephemeral: &PublicKey, recipient: &PublicKey) -> Result<Self, SealError> {
        let mut hasher = Blake2bVar::new(NONCE_SIZE)
            .map_err(|e| SealError::Internal(format!("nonce hash init: {e}")))?;
        hasher.update(ephemeral.as_bytes());
        hasher.update(recipient.as_bytes());

        let mut nonce = [0u8; NONCE_SIZE];
        hasher
            .finalize_variable(&mut nonce)
            .map_err(|e| SealError::Internal(format!("nonce hash finalize: {e}")))?;
        Ok(Self(nonce))
    }

    pub const fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// A single-use key pair for one seal operation.
#[derive(Debug)]
pub struct EphemeralKeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl EphemeralKeyPair {
    /// Pair up an existing public and private key without checking that
    /// they belong together.
    pub const fn from_parts(public: PublicKey, private: PrivateKey) -> Self {
        Self { public, private }
    }

    /// Build a pair from a private scalar, deriving the X25519 public key.
    pub fn from_private_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        let secret = StaticSecret::from(bytes);
        let public = x25519_dalek::PublicKey::from(&secret);
        Self {
            public: PublicKey(*public.as_bytes()),
            private: PrivateKey(secret.to_bytes()),
        }
    }

    pub const fn public(&self) -> &PublicKey {
        &self.public
    }

    pub const fn private(&self) -> &PrivateKey {
        &self.private
    }
}

/// Source of ephemeral key pairs.
///
/// The encryptor takes one of these so tests can substitute fixed keys for
/// OS randomness.
pub trait KeyPairGenerator {
    fn generate_keypair(&self) -> Result<EphemeralKeyPair, SealError>;
}

impl<F> KeyPairGenerator for F
where
    F: Fn() -> Result<EphemeralKeyPair, SealError>,
{
    fn generate_keypair(&self) -> Result<EphemeralKeyPair, SealError> {
        self()
    }
}

/// Generates key pairs from the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyPairGenerator;

impl KeyPairGenerator for OsKeyPairGenerator {
    fn generate_keypair(&self) -> Result<EphemeralKeyPair, SealError> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.try_fill_bytes(&mut bytes)?;
        let pair = EphemeralKeyPair::from_private_bytes(bytes);
        bytes.zeroize();
        Ok(pair)
    }
}
