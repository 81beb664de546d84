//! # SHAKE256, cSHAKE256 and KMACXOF256
//!
//! The XOF family from FIPS 202 and NIST SP 800-185, all at the 136-byte
//! rate. [`kmac_xof256`] is the one everything else in the crate calls: key
//! derivation, keystreams, tags, signature challenges.
//!
//! ```text
//! KMACXOF256(K, X, L, S) =
//!     cSHAKE256(bytepad(encode_string(K), 136) || X || right_encode(0), L, "KMAC", S)
//! ```
//!
//! [`KmacXof256`] is the streaming form: the key and customization go in up
//! front, the message in as many pieces as you like.

use crate::config::{KMAC_FUNCTION_NAME, RATE_BYTES};

use super::encoding::{bytepad, encode_string_into, right_encode};
use super::sponge::{Absorbing, DomainSuffix, Sponge, Squeezing};

/// Convert an output length in bits to bytes.
///
/// # Panics
///
/// If `bits` is not a multiple of 8. Every length in this crate is.
fn output_bytes(bits: usize) -> usize {
    assert!(bits % 8 == 0, "output length must be a whole number of bytes, got {bits} bits");
    bits / 8
}

/// Absorb `bytepad(encode_string(N) || encode_string(S), 136)`.
fn absorb_cshake_prefix(sponge: &mut Sponge<Absorbing>, function_name: &[u8], customization: &[u8]) {
    let mut names = Vec::with_capacity(function_name.len() + customization.len() + 34);
    encode_string_into(&mut names, function_name);
    encode_string_into(&mut names, customization);
    sponge.absorb(&bytepad(&names, RATE_BYTES));
}

/// SHAKE256 with `output_bits` of output.
pub fn shake256(data: &[u8], output_bits: usize) -> Vec<u8> {
    let len = output_bytes(output_bits);
    let mut sponge = Sponge::shake256();
    sponge.absorb(data);
    sponge.finalize(DomainSuffix::Shake).squeeze(len)
}

/// cSHAKE256(X, L, N, S).
///
/// With both `N` and `S` empty this is exactly SHAKE256, as SP 800-185
/// requires.
pub fn cshake256(
    data: &[u8],
    output_bits: usize,
    function_name: &[u8],
    customization: &[u8],
) -> Vec<u8> {
    if function_name.is_empty() && customization.is_empty() {
        return shake256(data, output_bits);
    }
    let len = output_bytes(output_bits);
    let mut sponge = Sponge::shake256();
    absorb_cshake_prefix(&mut sponge, function_name, customization);
    sponge.absorb(data);
    sponge.finalize(DomainSuffix::CShake).squeeze(len)
}

/// KMACXOF256(K, X, L, S), returning exactly `output_bits / 8` bytes.
///
/// # Example
///
/// ```
/// use e521_crypto::sha3::kmac_xof256;
///
/// let tag = kmac_xof256(b"key", b"message", 512, b"T");
/// assert_eq!(tag.len(), 64);
/// assert_eq!(tag, kmac_xof256(b"key", b"message", 512, b"T"));
/// ```
pub fn kmac_xof256(key: &[u8], data: &[u8], output_bits: usize, customization: &[u8]) -> Vec<u8> {
    let len = output_bytes(output_bits);
    let mut kmac = KmacXof256::new(key, customization);
    kmac.update(data);
    kmac.finalize_xof().squeeze(len)
}

/// Streaming KMACXOF256.
///
/// ```
/// use e521_crypto::sha3::{kmac_xof256, KmacXof256};
///
/// let mut kmac = KmacXof256::new(b"key", b"D");
/// kmac.update(b"hello ");
/// kmac.update(b"world");
/// let out = kmac.finalize(256);
/// assert_eq!(out, kmac_xof256(b"key", b"hello world", 256, b"D"));
/// ```
#[derive(Debug, Clone)]
pub struct KmacXof256 {
    sponge: Sponge<Absorbing>,
}

impl KmacXof256 {
    /// Start a KMAC computation keyed with `key` under `customization`.
    pub fn new(key: &[u8], customization: &[u8]) -> Self {
        let mut sponge = Sponge::shake256();
        absorb_cshake_prefix(&mut sponge, KMAC_FUNCTION_NAME, customization);

        let mut encoded_key = Vec::with_capacity(key.len() + 17);
        encode_string_into(&mut encoded_key, key);
        sponge.absorb(&bytepad(&encoded_key, RATE_BYTES));

        Self { sponge }
    }

    /// Absorb the next piece of the message `X`.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Close the message with `right_encode(0)` and pad; returns the reader.
    pub fn finalize_xof(mut self) -> Sponge<Squeezing> {
        self.sponge.absorb(&right_encode(0));
        self.sponge.finalize(DomainSuffix::CShake)
    }

    /// Finish and squeeze `output_bits / 8` bytes.
    pub fn finalize(self, output_bits: usize) -> Vec<u8> {
        let len = output_bytes(output_bits);
        self.finalize_xof().squeeze(len)
    }
}
