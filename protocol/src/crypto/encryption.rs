//! # Symmetric Encryption
//!
//! Passphrase-based authenticated encryption. Encrypt-and-MAC with two
//! subkeys drawn from one KMAC call:
//!
//! ```text
//! z       <- 512 random bits
//! ke || ka = KMACXOF256(z || pw, "", 1024, "S")
//! c        = KMACXOF256(ke, "", |m|, "SKE") xor m
//! t        = KMACXOF256(ka, m, 512, "SKA")
//! ```
//!
//! The fresh salt `z` makes every cryptogram's keystream unique even under
//! the same passphrase, so there is no nonce for callers to manage.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::{CUSTOM_SYM_AUTH, CUSTOM_SYM_ENC, CUSTOM_SYM_KDF, SALT_BYTES, TAG_BYTES};
use crate::error::{CryptoError, Result};

use super::{tags_match, SessionKeys};

/// `(z, c, t)`: salt, ciphertext, tag.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricCryptogram {
    pub z: [u8; SALT_BYTES],
    pub c: Vec<u8>,
    pub t: [u8; TAG_BYTES],
}

impl fmt::Debug for SymmetricCryptogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricCryptogram")
            .field("z", &hex::encode(&self.z[..8]))
            .field("c_len", &self.c.len())
            .field("t", &hex::encode(&self.t[..8]))
            .finish()
    }
}

fn session_keys(salt: &[u8; SALT_BYTES], passphrase: &[u8]) -> SessionKeys {
    let mut material = Zeroizing::new(Vec::with_capacity(SALT_BYTES + passphrase.len()));
    material.extend_from_slice(salt);
    material.extend_from_slice(passphrase);
    SessionKeys::derive(&material, CUSTOM_SYM_KDF)
}

/// Encrypt `message` under `passphrase` with a fresh random salt.
///
/// # Example
///
/// ```
/// use e521_crypto::crypto::encryption::{decrypt, encrypt};
///
/// let cg = encrypt(b"test", b"hello");
/// assert_eq!(decrypt(b"test", &cg).unwrap(), b"hello");
/// assert!(decrypt(b"wrong", &cg).is_err());
/// ```
pub fn encrypt(passphrase: &[u8], message: &[u8]) -> SymmetricCryptogram {
    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    encrypt_with_salt(passphrase, message, salt)
}

/// Encrypt with a caller-chosen salt.
///
/// Reusing a salt under the same passphrase reuses the keystream. This
/// exists for reproducible tests and vectors; production code wants
/// [`encrypt`].
pub fn encrypt_with_salt(
    passphrase: &[u8],
    message: &[u8],
    salt: [u8; SALT_BYTES],
) -> SymmetricCryptogram {
    let keys = session_keys(&salt, passphrase);
    let c = keys.apply_keystream(message, CUSTOM_SYM_ENC);
    let t = keys.tag(message, CUSTOM_SYM_AUTH);
    tracing::debug!(len = message.len(), "symmetric encrypt");
    SymmetricCryptogram { z: salt, c, t }
}

/// Decrypt and authenticate.
///
/// # Errors
///
/// [`CryptoError::AuthenticationFailure`] for a wrong passphrase or any
/// change to `z`, `c` or `t`. The two cases are indistinguishable.
pub fn decrypt(passphrase: &[u8], cryptogram: &SymmetricCryptogram) -> Result<Vec<u8>> {
    let keys = session_keys(&cryptogram.z, passphrase);
    let message = Zeroizing::new(keys.apply_keystream(&cryptogram.c, CUSTOM_SYM_ENC));
    let expected = keys.tag(&message, CUSTOM_SYM_AUTH);

    if !tags_match(&expected, &cryptogram.t) {
        tracing::debug!(len = cryptogram.c.len(), "symmetric tag mismatch");
        return Err(CryptoError::AuthenticationFailure);
    }
    Ok(message.to_vec())
}
