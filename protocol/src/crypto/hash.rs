//! # Hashing and MACs
//!
//! Both are single KMACXOF256 calls with a 512-bit output:
//!
//! - **digest**: `KMACXOF256("", m, 512, "D")`, an unkeyed hash.
//! - **mac**: `KMACXOF256(pw, m, 512, "T")`, a tag under a passphrase.
//!
//! [`digest_reader`] hashes a stream without buffering it, for files larger
//! than you'd want in memory.

use std::io::{self, Read};

use crate::config::{CUSTOM_DIGEST, CUSTOM_TAG, TAG_BYTES};
use crate::sha3::KmacXof256;

use super::kmac_tag;

const READ_CHUNK: usize = 64 * 1024;

/// 512-bit hash of `message`.
///
/// # Example
///
/// ```
/// use e521_crypto::crypto::digest;
///
/// let h = digest(b"hello");
/// assert_eq!(h.len(), 64);
/// assert_ne!(h, digest(b"hello!"));
/// ```
pub fn digest(message: &[u8]) -> [u8; TAG_BYTES] {
    kmac_tag(b"", message, CUSTOM_DIGEST)
}

/// [`digest`] over everything `reader` yields.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<[u8; TAG_BYTES]> {
    let mut kmac = KmacXof256::new(b"", CUSTOM_DIGEST);
    let mut buf = vec![0u8; READ_CHUNK];
    let mut total = 0usize;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        kmac.update(&buf[..n]);
        total += n;
    }
    tracing::trace!(bytes = total, "hashed stream");

    let mut out = [0u8; TAG_BYTES];
    kmac.finalize_xof().squeeze_into(&mut out);
    Ok(out)
}

/// 512-bit authentication tag of `message` under `passphrase`.
pub fn mac(passphrase: &[u8], message: &[u8]) -> [u8; TAG_BYTES] {
    kmac_tag(passphrase, message, CUSTOM_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha3::kmac_xof256;
    use std::io::Cursor;

    #[test]
    fn test_digest_is_kmac_with_empty_key() {
        let expected = kmac_xof256(b"", b"abc", 512, b"D");
        assert_eq!(digest(b"abc").to_vec(), expected);
    }

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(digest(b""), digest(b""));
        assert_ne!(digest(b""), digest(b"\0"));
    }

    #[test]
    fn test_digest_reader_matches_digest() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();
        let streamed = digest_reader(Cursor::new(&data)).unwrap();
        assert_eq!(streamed, digest(&data));
        assert_eq!(digest_reader(io::empty()).unwrap(), digest(b""));
    }

    #[test]
    fn test_mac_depends_on_key_and_message() {
        let t = mac(b"pw", b"msg");
        assert_eq!(t.to_vec(), kmac_xof256(b"pw", b"msg", 512, b"T"));
        assert_ne!(t, mac(b"pw2", b"msg"));
        assert_ne!(t, mac(b"pw", b"msg2"));
    }

    #[test]
    fn test_mac_differs_from_digest() {
        // Same empty key, different customization.
        assert_ne!(mac(b"", b"m"), digest(b"m"));
    }
}
