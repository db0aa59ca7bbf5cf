//! Anonymous sealed-box encryption.
//!
//! A fresh X25519 key pair is generated for every message. The box nonce is
//! BLAKE2b-192 of the ephemeral and recipient public keys, so it never has
//! to be transmitted: the recipient recomputes it from the ephemeral key
//! carried at the front of the output.
//!
//! Output layout: `[ephemeral_pubkey:32][tag:16][ciphertext]`, the same
//! bytes libsodium's `crypto_box_seal` produces.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crypto_secretbox::XSalsa20Poly1305;
use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use salsa20::cipher::consts::{U10, U32};
use tracing::debug;
use x25519_dalek::StaticSecret;
use zeroize::Zeroize;

use crate::error::SealError;
use crate::keys::{KEY_SIZE, KeyPairGenerator, Nonce, OsKeyPairGenerator, PrivateKey, PublicKey};

/// Poly1305 authentication tag size.
pub const TAG_SIZE: usize = 16;

/// Bytes a sealed message adds on top of the plaintext.
pub const SEAL_OVERHEAD: usize = KEY_SIZE + TAG_SIZE;

/// NaCl `crypto_box_beforenm`: HSalsa20 over the raw X25519 shared point.
///
/// The recipient bytes go through the Montgomery ladder as given, with no
/// subgroup check or scalar reduction, so any 32-byte key yields the same
/// box key as NaCl.
fn box_key(private: &PrivateKey, recipient: &PublicKey) -> GenericArray<u8, U32> {
    let secret = StaticSecret::from(*private.as_bytes());
    let shared = secret.diffie_hellman(&x25519_dalek::PublicKey::from(*recipient.as_bytes()));
    let mut shared_bytes = *shared.as_bytes();
    let key = salsa20::hsalsa::<U10>(
        GenericArray::from_slice(&shared_bytes),
        &GenericArray::default(),
    );
    shared_bytes.zeroize();
    key
}

/// Ephemeral public key plus authenticated ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    ephemeral_public: PublicKey,
    /// Box output, tag included.
    ciphertext: Vec<u8>,
}

impl SealedMessage {
    pub const fn ephemeral_public(&self) -> &PublicKey {
        &self.ephemeral_public
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Wire form: ephemeral public key followed by the ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(KEY_SIZE + self.ciphertext.len());
        out.extend_from_slice(self.ephemeral_public.as_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }
}

/// Seals plaintexts for a recipient public key.
///
/// Holds no state besides its key-pair source, so a single instance can be
/// shared across threads when the generator allows it.
#[derive(Debug, Clone, Default)]
pub struct SealedBoxEncryptor<G = OsKeyPairGenerator> {
    generator: G,
}

impl SealedBoxEncryptor {
    /// An encryptor drawing ephemeral keys from OS randomness.
    pub const fn new() -> Self {
        Self {
            generator: OsKeyPairGenerator,
        }
    }
}

impl<G: KeyPairGenerator> SealedBoxEncryptor<G> {
    pub const fn with_generator(generator: G) -> Self {
        Self { generator }
    }

    /// Encrypt `plaintext` for a base64-encoded recipient public key and
    /// return the sealed message as base64.
    ///
    /// The key is decoded and length-checked before any randomness is drawn.
    pub fn encrypt(&self, recipient_public_key: &str, plaintext: &str) -> Result<String, SealError> {
        let recipient = PublicKey::from_base64(recipient_public_key)?;
        let sealed = self.seal(&recipient, plaintext.as_bytes())?;
        Ok(sealed.to_base64())
    }

    /// Seal raw bytes for an already-validated recipient key.
    pub fn seal(&self, recipient: &PublicKey, plaintext: &[u8]) -> Result<SealedMessage, SealError> {
        let ephemeral = self.generator.generate_keypair()?;
        let nonce = Nonce::derive(ephemeral.public(), recipient)?;

        let mut key = box_key(ephemeral.private(), recipient);
        let cipher = XSalsa20Poly1305::new(&key);
        key.as_mut_slice().zeroize();

        // Tag-first output, as NaCl `box.Seal` lays it out.
        let ciphertext = cipher
            .encrypt(GenericArray::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|_| SealError::Seal)?;

        debug!(
            ephemeral = %ephemeral.public().to_base64(),
            plaintext_len = plaintext.len(),
            "sealed message"
        );

        Ok(SealedMessage {
            ephemeral_public: *ephemeral.public(),
            ciphertext,
        })
    }
}

/// Encrypt a secret for a base64 recipient public key using OS randomness.
///
/// Returns the base64 sealed box expected by the GitHub secrets API.
pub fn encrypt(recipient_public_key: &str, plaintext: &str) -> Result<String, SealError> {
    SealedBoxEncryptor::new().encrypt(recipient_public_key, plaintext)
}
