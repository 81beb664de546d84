//! # NIST SP 800-185 Encodings
//!
//! `left_encode`, `right_encode`, `encode_string` and `bytepad`: the
//! length-prefixed framings that make cSHAKE and KMAC inputs unambiguous.
//!
//! Integers are `u128`. A bit length `8 * len` of any slice that fits in
//! memory fits in a `u128`, so the SP 800-185 bound of `x < 2^2040` holds for
//! every input these functions can receive.
//!
//! The `*_into` variants append to an existing buffer. The owned variants are
//! thin wrappers for callers that want a fresh `Vec`.

/// Minimal big-endian bytes of `x`, at least one byte (`0` encodes as `00`).
fn base256(x: u128) -> Vec<u8> {
    let bytes = x.to_be_bytes();
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[first..].to_vec()
}

/// Append `left_encode(x)` to `out`.
pub fn left_encode_into(out: &mut Vec<u8>, x: u128) {
    let digits = base256(x);
    out.push(digits.len() as u8);
    out.extend_from_slice(&digits);
}

/// `left_encode(x) = enc8(n) || x_1 || ... || x_n`.
///
/// # Example
///
/// ```
/// use e521_crypto::sha3::encoding::left_encode;
///
/// assert_eq!(left_encode(0), vec![0x01, 0x00]);
/// assert_eq!(left_encode(136), vec![0x01, 0x88]);
/// ```
pub fn left_encode(x: u128) -> Vec<u8> {
    let mut out = Vec::with_capacity(17);
    left_encode_into(&mut out, x);
    out
}

/// `right_encode(x) = x_1 || ... || x_n || enc8(n)`.
pub fn right_encode(x: u128) -> Vec<u8> {
    let mut out = base256(x);
    let n = out.len() as u8;
    out.push(n);
    out
}

/// Append `encode_string(s)` to `out`.
pub fn encode_string_into(out: &mut Vec<u8>, s: &[u8]) {
    left_encode_into(out, bit_length(s));
    out.extend_from_slice(s);
}

/// `encode_string(S) = left_encode(len(S) in bits) || S`.
///
/// For an empty `S` this is just `left_encode(0)`.
pub fn encode_string(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 17);
    encode_string_into(&mut out, s);
    out
}

/// `bytepad(X, w)`: prefix `left_encode(w)`, then zero-fill to a multiple of `w`.
///
/// # Panics
///
/// If `w == 0`.
pub fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
    assert!(w > 0, "bytepad width must be positive");
    let mut out = left_encode(w as u128);
    out.extend_from_slice(x);
    let remainder = out.len() % w;
    if remainder != 0 {
        out.resize(out.len() + (w - remainder), 0);
    }
    out
}

/// Bit length of a byte string as an encoder input.
pub fn bit_length(s: &[u8]) -> u128 {
    (s.len() as u128) * 8
}
