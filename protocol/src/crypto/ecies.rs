//! # Public-Key Encryption (ECDHIES)
//!
//! Diffie-Hellman on E521 with an ephemeral scalar, then the same
//! encrypt-and-MAC shape as the symmetric scheme, keyed by the shared
//! point's x-coordinate:
//!
//! ```text
//! k        = 4 · int(512 random bits)
//! W        = k · V          (shared secret)
//! Z        = k · G          (sent along)
//! ke || ka = KMACXOF256(Wx, "", 1024, "P")
//! c        = KMACXOF256(ke, "", |m|, "PKE") xor m
//! t        = KMACXOF256(ka, m, 512, "PKA")
//! ```
//!
//! The recipient recomputes `W = s · Z`, which equals `k · V` because both
//! are `k · s · G`.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::{
    COFACTOR, CUSTOM_PK_AUTH, CUSTOM_PK_ENC, CUSTOM_PK_KDF, NONCE_BYTES, TAG_BYTES,
};
use crate::curve::{scalar_mul, Point, BASE_POINT};
use crate::error::{CryptoError, Result};

use super::keys::{E521Keypair, PublicKey};
use super::{bytes_to_int, int_to_bytes, tags_match, SessionKeys};

/// `(Z, c, t)`: ephemeral point, ciphertext, tag.
#[derive(Clone, PartialEq, Eq)]
pub struct EllipticCryptogram {
    pub z: Point,
    pub c: Vec<u8>,
    pub t: [u8; TAG_BYTES],
}

impl fmt::Debug for EllipticCryptogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EllipticCryptogram")
            .field("z", &self.z)
            .field("c_len", &self.c.len())
            .field("t", &hex::encode(&self.t[..8]))
            .finish()
    }
}

fn session_keys(shared: &Point) -> SessionKeys {
    let wx = Zeroizing::new(int_to_bytes(shared.x()));
    SessionKeys::derive(&wx, CUSTOM_PK_KDF)
}

/// Encrypt `message` to `recipient` with a fresh ephemeral scalar.
///
/// # Example
///
/// ```
/// use e521_crypto::crypto::{ecies, E521Keypair};
///
/// let bob = E521Keypair::from_passphrase(b"bob's passphrase");
/// let cg = ecies::encrypt(bob.public_key(), b"hi bob");
/// assert_eq!(ecies::decrypt(b"bob's passphrase", &cg).unwrap(), b"hi bob");
/// ```
pub fn encrypt(recipient: &PublicKey, message: &[u8]) -> EllipticCryptogram {
    let mut nonce = Zeroizing::new([0u8; NONCE_BYTES]);
    OsRng.fill_bytes(&mut nonce[..]);
    encrypt_with_nonce(recipient, message, &nonce)
}

/// Encrypt with caller-supplied nonce bytes for `k`.
///
/// Reusing a nonce for the same recipient reuses the keystream. Tests only.
pub fn encrypt_with_nonce(
    recipient: &PublicKey,
    message: &[u8],
    nonce: &[u8; NONCE_BYTES],
) -> EllipticCryptogram {
    let k = bytes_to_int(nonce) * COFACTOR;
    let shared = scalar_mul(&k, recipient.point());
    let z = scalar_mul(&k, &BASE_POINT);

    let keys = session_keys(&shared);
    let c = keys.apply_keystream(message, CUSTOM_PK_ENC);
    let t = keys.tag(message, CUSTOM_PK_AUTH);
    tracing::debug!(len = message.len(), "public-key encrypt");
    EllipticCryptogram { z, c, t }
}

/// Decrypt with the key pair derived from `passphrase`.
pub fn decrypt(passphrase: &[u8], cryptogram: &EllipticCryptogram) -> Result<Vec<u8>> {
    decrypt_with_keypair(&E521Keypair::from_passphrase(passphrase), cryptogram)
}

/// Decrypt with an already-derived key pair.
///
/// # Errors
///
/// [`CryptoError::AuthenticationFailure`] if the tag does not verify.
pub fn decrypt_with_keypair(
    keypair: &E521Keypair,
    cryptogram: &EllipticCryptogram,
) -> Result<Vec<u8>> {
    let shared = scalar_mul(keypair.secret_scalar(), &cryptogram.z);
    let keys = session_keys(&shared);
    let message = Zeroizing::new(keys.apply_keystream(&cryptogram.c, CUSTOM_PK_ENC));
    let expected = keys.tag(&message, CUSTOM_PK_AUTH);

    if !tags_match(&expected, &cryptogram.t) {
        tracing::debug!(len = cryptogram.c.len(), "public-key tag mismatch");
        return Err(CryptoError::AuthenticationFailure);
    }
    Ok(message.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> E521Keypair {
        E521Keypair::from_passphrase(b"bob")
    }

    #[test]
    fn test_roundtrip() {
        let bob = bob();
        let cg = encrypt(bob.public_key(), b"hello");
        assert_eq!(decrypt(b"bob", &cg).unwrap(), b"hello");
        assert_eq!(decrypt_with_keypair(&bob, &cg).unwrap(), b"hello");
    }

    #[test]
    fn test_empty_message() {
        let cg = encrypt(bob().public_key(), b"");
        assert!(cg.c.is_empty());
        assert!(decrypt(b"bob", &cg).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let cg = encrypt(bob().public_key(), b"for bob only");
        assert_eq!(decrypt(b"eve", &cg), Err(CryptoError::AuthenticationFailure));
    }

    #[test]
    fn test_tampering_is_detected() {
        let cg = encrypt(bob().public_key(), b"payload");

        let mut bad = cg.clone();
        bad.c[3] ^= 0x10;
        assert_eq!(decrypt(b"bob", &bad), Err(CryptoError::AuthenticationFailure));

        let mut bad = cg.clone();
        bad.t[0] ^= 1;
        assert_eq!(decrypt(b"bob", &bad), Err(CryptoError::AuthenticationFailure));

        let mut bad = cg;
        bad.z = Point::base();
        assert_eq!(decrypt(b"bob", &bad), Err(CryptoError::AuthenticationFailure));
    }

    #[test]
    fn test_ephemeral_point_is_fresh() {
        let pk = bob().public_key().clone();
        let a = encrypt(&pk, b"same");
        let b = encrypt(&pk, b"same");
        assert_ne!(a.z, b.z);
        assert_ne!(a.t, b.t);
    }

    #[test]
    fn test_fixed_nonce_is_deterministic() {
        let pk = bob().public_key().clone();
        let nonce = [0x42u8; NONCE_BYTES];
        let a = encrypt_with_nonce(&pk, b"msg", &nonce);
        assert_eq!(a, encrypt_with_nonce(&pk, b"msg", &nonce));
        let k = bytes_to_int(&nonce) * COFACTOR;
        assert_eq!(a.z, scalar_mul(&k, &Point::base()));
    }

    #[test]
    fn test_ephemeral_point_on_curve() {
        let cg = encrypt(bob().public_key(), b"x");
        assert!(cg.z.is_on_curve());
    }
}
