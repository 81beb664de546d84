//! # Protocols over KMACXOF256 and E521
//!
//! Everything in here is a composition of two primitives: KMACXOF256 calls
//! with distinct customization strings, and scalar multiplications on E521.
//! No other hash, cipher or curve library is involved.
//!
//! - **hash**: plain digests and passphrase MACs.
//! - **keys**: passphrase-derived key pairs.
//! - **encryption**: symmetric authenticated encryption under a passphrase.
//! - **ecies**: ECDHIES-style public-key encryption.
//! - **signatures**: deterministic Schnorr signatures.
//!
//! ## Integer/byte conventions
//!
//! Bytes become integers big-endian and are always non-negative. Integers
//! become bytes in minimal two's-complement form (see [`int_to_bytes`]).
//! That is the form fed to KMAC whenever a scalar or a coordinate is used as
//! a key, so it has to stay exactly as it is for old cryptograms to keep
//! decrypting.

pub mod ecies;
pub mod encryption;
pub mod hash;
pub mod keys;
pub mod signatures;

use num_bigint::BigUint;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::{KEY_PAIR_BITS, SUBKEY_BYTES, TAG_BYTES};
use crate::sha3::KmacXof256;

pub use ecies::EllipticCryptogram;
pub use encryption::SymmetricCryptogram;
pub use hash::{digest, digest_reader, mac};
pub use keys::{E521Keypair, PublicKey};
pub use signatures::{sign, verify, Signature};

/// Big-endian bytes to a non-negative integer.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian two's-complement bytes of a non-negative integer.
///
/// A `0x00` is prepended when the top bit of the magnitude is set, and zero
/// encodes as a single `0x00`.
///
/// ```
/// use e521_crypto::crypto::int_to_bytes;
/// use num_bigint::BigUint;
///
/// assert_eq!(int_to_bytes(&BigUint::from(0u32)), vec![0x00]);
/// assert_eq!(int_to_bytes(&BigUint::from(0x7Fu32)), vec![0x7F]);
/// assert_eq!(int_to_bytes(&BigUint::from(0x80u32)), vec![0x00, 0x80]);
/// ```
pub fn int_to_bytes(n: &BigUint) -> Vec<u8> {
    let magnitude = n.to_bytes_be();
    if magnitude[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(magnitude.len() + 1);
        out.push(0x00);
        out.extend_from_slice(&magnitude);
        out
    } else {
        magnitude
    }
}

/// KMACXOF256 with a 512-bit output, straight into an array.
pub(crate) fn kmac_tag(key: &[u8], data: &[u8], customization: &[u8]) -> [u8; TAG_BYTES] {
    let mut kmac = KmacXof256::new(key, customization);
    kmac.update(data);
    let mut tag = [0u8; TAG_BYTES];
    kmac.finalize_xof().squeeze_into(&mut tag);
    tag
}

/// Constant-time tag comparison. Different lengths compare unequal.
pub(crate) fn tags_match(expected: &[u8], actual: &[u8]) -> bool {
    expected.ct_eq(actual).into()
}

/// The `ke || ka` pair both encryption schemes derive.
pub(crate) struct SessionKeys {
    ke: Zeroizing<Vec<u8>>,
    ka: Zeroizing<Vec<u8>>,
}

impl SessionKeys {
    /// `ke || ka = KMACXOF256(key_material, "", 1024, customization)`.
    pub(crate) fn derive(key_material: &[u8], customization: &[u8]) -> Self {
        let mut reader = KmacXof256::new(key_material, customization).finalize_xof();
        let mut ke = Zeroizing::new(vec![0u8; SUBKEY_BYTES]);
        let mut ka = Zeroizing::new(vec![0u8; SUBKEY_BYTES]);
        reader.squeeze_into(&mut ke);
        reader.squeeze_into(&mut ka);
        debug_assert_eq!(ke.len() + ka.len(), KEY_PAIR_BITS / 8);
        Self { ke, ka }
    }

    /// `KMACXOF256(ke, "", 8·|data|, customization) ⊕ data`.
    ///
    /// Its own inverse.
    pub(crate) fn apply_keystream(&self, data: &[u8], customization: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; data.len()];
        KmacXof256::new(&self.ke, customization)
            .finalize_xof()
            .squeeze_into(&mut out);
        for (o, m) in out.iter_mut().zip(data) {
            *o ^= m;
        }
        out
    }

    /// `KMACXOF256(ka, message, 512, customization)`.
    pub(crate) fn tag(&self, message: &[u8], customization: &[u8]) -> [u8; TAG_BYTES] {
        kmac_tag(&self.ka, message, customization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CUSTOM_SYM_KDF;
    use crate::sha3::kmac_xof256;

    #[test]
    fn test_int_to_bytes_sign_byte() {
        assert_eq!(int_to_bytes(&BigUint::from(0u32)), vec![0]);
        assert_eq!(int_to_bytes(&BigUint::from(1u32)), vec![1]);
        assert_eq!(int_to_bytes(&BigUint::from(0xFFu32)), vec![0, 0xFF]);
        assert_eq!(int_to_bytes(&BigUint::from(0x0100u32)), vec![1, 0]);
        assert_eq!(int_to_bytes(&BigUint::from(0x8000u32)), vec![0, 0x80, 0]);
    }

    #[test]
    fn test_bytes_to_int_ignores_leading_zeros() {
        let n = BigUint::from(0xABCDu32);
        assert_eq!(bytes_to_int(&[0xAB, 0xCD]), n);
        assert_eq!(bytes_to_int(&[0, 0, 0xAB, 0xCD]), n);
        assert_eq!(bytes_to_int(&int_to_bytes(&n)), n);
        assert_eq!(bytes_to_int(&[]), BigUint::from(0u32));
    }

    #[test]
    fn test_session_keys_split_kdf_output() {
        let keys = SessionKeys::derive(b"material", CUSTOM_SYM_KDF);
        let full = kmac_xof256(b"material", b"", KEY_PAIR_BITS, CUSTOM_SYM_KDF);
        assert_eq!(keys.ke.as_slice(), &full[..SUBKEY_BYTES]);
        assert_eq!(keys.ka.as_slice(), &full[SUBKEY_BYTES..]);
    }

    #[test]
    fn test_keystream_is_an_involution() {
        let keys = SessionKeys::derive(b"k", b"S");
        let msg = b"attack at dawn".to_vec();
        let c = keys.apply_keystream(&msg, b"SKE");
        assert_ne!(c, msg);
        assert_eq!(keys.apply_keystream(&c, b"SKE"), msg);
        assert!(keys.apply_keystream(&[], b"SKE").is_empty());
    }

    #[test]
    fn test_keystream_matches_kmac() {
        let keys = SessionKeys::derive(b"k", b"S");
        let zeros = vec![0u8; 300];
        let stream = kmac_xof256(&keys.ke, b"", 300 * 8, b"SKE");
        assert_eq!(keys.apply_keystream(&zeros, b"SKE"), stream);
    }

    #[test]
    fn test_tags_match() {
        assert!(tags_match(&[1, 2, 3], &[1, 2, 3]));
        assert!(!tags_match(&[1, 2, 3], &[1, 2, 4]));
        assert!(!tags_match(&[1, 2, 3], &[1, 2]));
    }
}
