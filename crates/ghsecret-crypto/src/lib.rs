//! Sealed-box encryption for GitHub secrets.
//!
//! Encrypts a secret so that only the holder of the recipient's private key
//! can read it, in the anonymous "sealed box" format used by NaCl/libsodium
//! and accepted by the GitHub Actions secrets API.
//!
//! ## Crypto primitives
//!
//! - **Ephemeral key**: fresh X25519 keypair per message, never reused
//! - **Nonce**: BLAKE2b-192 of `ephemeral_pk || recipient_pk`
//! - **Encryption**: XSalsa20-Poly1305 box, 16-byte tag
//!
//! ```no_run
//! let sealed = ghsecret_crypto::encrypt(
//!     "hel9i9lSE4Cu103BBICvKhmLi8LLnVO7BDdqANPOlEw=",
//!     "a valid secret value",
//! )?;
//! # Ok::<(), ghsecret_crypto::SealError>(())
//! ```

pub mod error;
pub mod keys;
pub mod sealed;

pub use error::SealError;
pub use keys::{
    EphemeralKeyPair, KEY_SIZE, KeyPairGenerator, NONCE_SIZE, Nonce, OsKeyPairGenerator,
    PrivateKey, PublicKey,
};
pub use sealed::{SEAL_OVERHEAD, SealedBoxEncryptor, SealedMessage, TAG_SIZE, encrypt};
