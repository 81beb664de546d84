//! # Schnorr Signatures
//!
//! Deterministic Schnorr over E521. The nonce comes from KMAC keyed with the
//! private scalar, so signing needs no randomness and the same message under
//! the same key always yields the same signature.
//!
//! ```text
//! k = 4 · int(KMACXOF256(s, m, 512, "N"))
//! U = k · G
//! h = KMACXOF256(Ux, m, 512, "T")
//! z = (k - int(h) · s) mod r
//! ```
//!
//! Verification rebuilds `U = z·G + int(h)·V` and recomputes `h`. The
//! challenge `h` is kept as the raw 64 KMAC bytes, so the comparison is a
//! plain byte comparison with no integer round trip in between.

use std::fmt;

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::config::{COFACTOR, CUSTOM_NONCE, CUSTOM_TAG, TAG_BYTES};
use crate::curve::{point_add, scalar_mul, Point, BASE_POINT, SCALAR_FIELD};
use crate::error::{CryptoError, Result};

use super::keys::{E521Keypair, PublicKey};
use super::{bytes_to_int, int_to_bytes, kmac_tag, tags_match};

/// `(h, z)`: challenge bytes and response scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    pub h: [u8; TAG_BYTES],
    pub z: BigUint,
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let z = self.z.to_str_radix(16);
        write!(
            f,
            "Signature(h={}.., z={}..)",
            hex::encode(&self.h[..8]),
            &z[..z.len().min(16)]
        )
    }
}

fn challenge(u: &Point, message: &[u8]) -> [u8; TAG_BYTES] {
    kmac_tag(&int_to_bytes(u.x()), message, CUSTOM_TAG)
}

/// Sign `message` with the key pair derived from `passphrase`.
///
/// # Example
///
/// ```
/// use e521_crypto::crypto::{sign, verify, E521Keypair};
///
/// let sig = sign(b"my passphrase", b"I owe you 5 EUR");
/// let pk = E521Keypair::from_passphrase(b"my passphrase").public_key().clone();
/// assert!(verify(&pk, b"I owe you 5 EUR", &sig));
/// assert!(!verify(&pk, b"I owe you 500 EUR", &sig));
/// ```
pub fn sign(passphrase: &[u8], message: &[u8]) -> Signature {
    sign_with_keypair(&E521Keypair::from_passphrase(passphrase), message)
}

/// Sign with an already-derived key pair.
pub fn sign_with_keypair(keypair: &E521Keypair, message: &[u8]) -> Signature {
    let s = keypair.secret_scalar();
    let nonce = Zeroizing::new(kmac_tag(&keypair.secret_bytes(), message, CUSTOM_NONCE));
    let k = bytes_to_int(nonce.as_slice()) * COFACTOR;

    let u = scalar_mul(&k, &BASE_POINT);
    let h = challenge(&u, message);

    let field = &*SCALAR_FIELD;
    let hs = field.mul(&bytes_to_int(&h), s);
    let z = field.sub(&k, &hs);

    tracing::debug!(len = message.len(), "signed message");
    Signature { h, z }
}

/// Check `signature` on `message` against `public_key`.
///
/// A response `z` outside `[0, r)` never verifies.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    if signature.z >= *SCALAR_FIELD.modulus() {
        return false;
    }

    let zg = scalar_mul(&signature.z, &BASE_POINT);
    let hv = scalar_mul(&bytes_to_int(&signature.h), public_key.point());
    let u = point_add(&zg, &hv);

    tags_match(&challenge(&u, message), &signature.h)
}

/// [`verify`] as a `Result`.
///
/// # Errors
///
/// [`CryptoError::VerificationFailed`] if the signature does not check out.
pub fn verify_strict(public_key: &PublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    if verify(public_key, message, signature) {
        Ok(())
    } else {
        tracing::debug!(len = message.len(), "signature rejected");
        Err(CryptoError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> E521Keypair {
        E521Keypair::from_passphrase(b"alice")
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = alice();
        let sig = sign(b"alice", b"hello");
        assert!(verify(kp.public_key(), b"hello", &sig));
        assert!(verify_strict(kp.public_key(), b"hello", &sig).is_ok());
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let kp = alice();
        assert_eq!(sign_with_keypair(&kp, b"m"), sign_with_keypair(&kp, b"m"));
        assert_ne!(sign_with_keypair(&kp, b"m").h, sign_with_keypair(&kp, b"n").h);
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = alice();
        let sig = sign_with_keypair(&kp, b"original");
        assert!(!verify(kp.public_key(), b"0riginal", &sig));
        assert_eq!(
            verify_strict(kp.public_key(), b"0riginal", &sig),
            Err(CryptoError::VerificationFailed)
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let sig = sign(b"alice", b"msg");
        let mallory = E521Keypair::from_passphrase(b"mallory");
        assert!(!verify(mallory.public_key(), b"msg", &sig));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let kp = alice();
        let sig = sign_with_keypair(&kp, b"msg");

        let mut bad = sig.clone();
        bad.h[0] ^= 1;
        assert!(!verify(kp.public_key(), b"msg", &bad));

        let mut bad = sig;
        bad.z += 1u32;
        assert!(!verify(kp.public_key(), b"msg", &bad));
    }

    #[test]
    fn test_response_is_reduced() {
        let sig = sign(b"alice", b"reduce me");
        assert!(sig.z < *SCALAR_FIELD.modulus());
    }

    #[test]
    fn test_unreduced_response_rejected() {
        // z + r is the same scalar on the subgroup, but not canonical.
        let kp = alice();
        let mut sig = sign_with_keypair(&kp, b"msg");
        sig.z += SCALAR_FIELD.modulus();
        assert!(!verify(kp.public_key(), b"msg", &sig));
    }

    #[test]
    fn test_empty_message() {
        let kp = alice();
        let sig = sign_with_keypair(&kp, b"");
        assert!(verify(kp.public_key(), b"", &sig));
    }

    #[test]
    fn test_debug_is_short() {
        let debug = format!("{:?}", sign(b"alice", b"x"));
        assert!(debug.starts_with("Signature(h="));
        assert!(debug.len() < 80);
    }
}
