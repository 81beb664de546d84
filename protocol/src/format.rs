//! # Persisted Layout
//!
//! How keys, cryptograms and signatures look on disk: one upper-case hex
//! component per line, in a fixed order.
//!
//! | Object                 | Lines              |
//! |------------------------|--------------------|
//! | [`PublicKey`]          | `Vx`, `Vy`         |
//! | [`SymmetricCryptogram`]| `z`, `c`, `t`      |
//! | [`EllipticCryptogram`] | `Zx`, `Zy`, `c`, `t` |
//! | [`Signature`]          | `h`, `z`           |
//! | digest / MAC           | one line           |
//!
//! Integers (coordinates, the signature challenge and response) use the
//! two's-complement byte form of [`int_to_bytes`], so the challenge line may
//! carry a `00` sign byte or drop leading zero bytes. Parsing takes either hex case, trims each
//! line, tolerates a trailing newline and insists on the exact line count.
//! An empty ciphertext is an empty line.

use num_bigint::BigUint;

use crate::config::{SALT_BYTES, TAG_BITS, TAG_BYTES};
use crate::crypto::{
    bytes_to_int, int_to_bytes, EllipticCryptogram, PublicKey, Signature, SymmetricCryptogram,
};
use crate::curve::Point;
use crate::error::{CryptoError, Result};

/// Text form with one hex component per line.
pub trait HexLines: Sized {
    /// Render, newline-terminated.
    fn to_hex_lines(&self) -> String;

    /// Parse, rejecting anything that doesn't fit the layout.
    fn from_hex_lines(text: &str) -> Result<Self>;
}

fn join(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn split_lines<'a>(text: &'a str, expected: usize, what: &str) -> Result<Vec<&'a str>> {
    let lines: Vec<&str> = text.trim_end().lines().map(str::trim).collect();
    if lines.len() != expected {
        return Err(CryptoError::malformed(format!(
            "{what}: expected {expected} lines, found {}",
            lines.len()
        )));
    }
    Ok(lines)
}

fn decode(line: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(line).map_err(|e| CryptoError::malformed(format!("{what}: {e}")))
}

fn decode_fixed<const N: usize>(line: &str, what: &str) -> Result<[u8; N]> {
    let bytes = decode(line, what)?;
    bytes.as_slice().try_into().map_err(|_| {
        CryptoError::malformed(format!("{what}: expected {N} bytes, found {}", bytes.len()))
    })
}

fn encode_int(n: &BigUint) -> String {
    hex::encode_upper(int_to_bytes(n))
}

fn decode_int(line: &str, what: &str) -> Result<BigUint> {
    if line.is_empty() {
        return Err(CryptoError::malformed(format!("{what}: empty")));
    }
    Ok(bytes_to_int(&decode(line, what)?))
}

/// An integer line holding a 512-bit tag, left-padded back to 64 bytes.
fn decode_tag_int(line: &str, what: &str) -> Result<[u8; TAG_BYTES]> {
    let n = decode_int(line, what)?;
    if n.bits() > TAG_BITS as u64 {
        return Err(CryptoError::malformed(format!(
            "{what}: {} bits, at most {TAG_BITS} allowed",
            n.bits()
        )));
    }
    let bytes = n.to_bytes_be();
    let mut out = [0u8; TAG_BYTES];
    out[TAG_BYTES - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

fn decode_point(x: &str, y: &str, what: &str) -> Result<Point> {
    Point::new(decode_int(x, what)?, decode_int(y, what)?)
}

/// One-line form of a digest or MAC tag.
pub fn tag_to_hex(tag: &[u8; TAG_BYTES]) -> String {
    let mut out = hex::encode_upper(tag);
    out.push('\n');
    out
}

/// Parse a one-line digest or MAC tag.
pub fn tag_from_hex(text: &str) -> Result<[u8; TAG_BYTES]> {
    let lines = split_lines(text, 1, "tag")?;
    decode_fixed(lines[0], "tag")
}

impl HexLines for PublicKey {
    fn to_hex_lines(&self) -> String {
        let p = self.point();
        join(&[encode_int(p.x()), encode_int(p.y())])
    }

    fn from_hex_lines(text: &str) -> Result<Self> {
        let lines = split_lines(text, 2, "public key")?;
        decode_point(lines[0], lines[1], "public key").map(PublicKey::from_point)
    }
}

impl HexLines for SymmetricCryptogram {
    fn to_hex_lines(&self) -> String {
        join(&[
            hex::encode_upper(self.z),
            hex::encode_upper(&self.c),
            hex::encode_upper(self.t),
        ])
    }

    fn from_hex_lines(text: &str) -> Result<Self> {
        let lines = split_lines(text, 3, "symmetric cryptogram")?;
        Ok(Self {
            z: decode_fixed::<SALT_BYTES>(lines[0], "salt")?,
            c: decode(lines[1], "ciphertext")?,
            t: decode_fixed::<TAG_BYTES>(lines[2], "tag")?,
        })
    }
}

impl HexLines for EllipticCryptogram {
    fn to_hex_lines(&self) -> String {
        join(&[
            encode_int(self.z.x()),
            encode_int(self.z.y()),
            hex::encode_upper(&self.c),
            hex::encode_upper(self.t),
        ])
    }

    fn from_hex_lines(text: &str) -> Result<Self> {
        let lines = split_lines(text, 4, "elliptic cryptogram")?;
        Ok(Self {
            z: decode_point(lines[0], lines[1], "ephemeral point")?,
            c: decode(lines[2], "ciphertext")?,
            t: decode_fixed::<TAG_BYTES>(lines[3], "tag")?,
        })
    }
}

impl HexLines for Signature {
    fn to_hex_lines(&self) -> String {
        join(&[encode_int(&bytes_to_int(&self.h)), encode_int(&self.z)])
    }

    fn from_hex_lines(text: &str) -> Result<Self> {
        let lines = split_lines(text, 2, "signature")?;
        Ok(Self {
            h: decode_tag_int(lines[0], "challenge")?,
            z: decode_int(lines[1], "response")?,
        })
    }
}
