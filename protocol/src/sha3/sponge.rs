//! # Sponge Construction
//!
//! Absorb, pad, squeeze: the sponge over [`keccak_p1600`].
//!
//! The phase lives in the type. A fresh [`Sponge<Absorbing>`] takes input;
//! [`Sponge::finalize`] consumes it, applies the domain suffix and padding,
//! and hands back a [`Sponge<Squeezing>`] that can only produce output. You
//! cannot absorb after padding or pad twice, because the methods to do so
//! don't exist on the type you're holding.
//!
//! A sponge is single-use. Every KMAC or SHAKE call builds its own, and the
//! state is wiped on drop since KMAC sponges hold key material.

use std::fmt;
use std::marker::PhantomData;

use zeroize::Zeroize;

use crate::config::{CSHAKE_SUFFIX, PAD_FINAL_BIT, RATE_BYTES, SHAKE_SUFFIX, STATE_BYTES};

use super::keccak::keccak_p1600;

/// Marker for a sponge that still accepts input.
#[derive(Debug, Clone, Copy)]
pub enum Absorbing {}

/// Marker for a padded sponge that only emits output.
#[derive(Debug, Clone, Copy)]
pub enum Squeezing {}

/// Domain separation byte XORed in at the cursor during finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSuffix {
    /// Plain SHAKE (`0x1F`).
    Shake,
    /// cSHAKE and everything built on it, including KMAC (`0x04`).
    CShake,
}

impl DomainSuffix {
    /// The byte value XORed into the state.
    pub fn byte(self) -> u8 {
        match self {
            DomainSuffix::Shake => SHAKE_SUFFIX,
            DomainSuffix::CShake => CSHAKE_SUFFIX,
        }
    }
}

/// Keccak sponge state: 200 bytes, a rate, and a cursor into the rate window.
///
/// Invariant: `cursor < rate` between calls.
#[derive(Clone)]
pub struct Sponge<Phase> {
    state: [u8; STATE_BYTES],
    rate: usize,
    cursor: usize,
    _phase: PhantomData<Phase>,
}

impl Sponge<Absorbing> {
    /// Create an empty sponge with the given rate in bytes.
    ///
    /// # Panics
    ///
    /// If `rate` is 0 or leaves no capacity (`rate >= 200`).
    pub fn new(rate: usize) -> Self {
        assert!(
            rate > 0 && rate < STATE_BYTES,
            "sponge rate must be in 1..{STATE_BYTES}, got {rate}"
        );
        Self {
            state: [0u8; STATE_BYTES],
            rate,
            cursor: 0,
            _phase: PhantomData,
        }
    }

    /// Sponge at the SHAKE256 rate (136 bytes). Everything in this crate uses it.
    pub fn shake256() -> Self {
        Self::new(RATE_BYTES)
    }

    /// XOR `data` into the state, permuting each time the rate window fills.
    ///
    /// Streaming: absorbing `a` then `b` is identical to absorbing `a || b`.
    pub fn absorb(&mut self, data: &[u8]) {
        let mut input = data;
        while !input.is_empty() {
            let take = usize::min(self.rate - self.cursor, input.len());
            for (dst, src) in self.state[self.cursor..self.cursor + take]
                .iter_mut()
                .zip(&input[..take])
            {
                *dst ^= src;
            }
            self.cursor += take;
            input = &input[take..];

            if self.cursor == self.rate {
                keccak_p1600(&mut self.state);
                self.cursor = 0;
            }
        }
    }

    /// Pad and switch to the squeezing phase.
    ///
    /// XORs the domain suffix at the cursor and `0x80` into the last byte of
    /// the rate window, then permutes once.
    pub fn finalize(mut self, suffix: DomainSuffix) -> Sponge<Squeezing> {
        self.state[self.cursor] ^= suffix.byte();
        self.state[self.rate - 1] ^= PAD_FINAL_BIT;
        keccak_p1600(&mut self.state);

        Sponge {
            state: self.state,
            rate: self.rate,
            cursor: 0,
            _phase: PhantomData,
        }
    }
}

impl Sponge<Squeezing> {
    /// Fill `out` with the next `out.len()` bytes of output, permuting each
    /// time the rate window is used up.
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        let mut filled = 0;
        while filled < out.len() {
            let take = usize::min(self.rate - self.cursor, out.len() - filled);
            out[filled..filled + take]
                .copy_from_slice(&self.state[self.cursor..self.cursor + take]);
            self.cursor += take;
            filled += take;

            if self.cursor == self.rate {
                keccak_p1600(&mut self.state);
                self.cursor = 0;
            }
        }
    }

    /// Squeeze `len` bytes into a fresh vector.
    pub fn squeeze(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.squeeze_into(&mut out);
        out
    }
}

impl<Phase> Drop for Sponge<Phase> {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

impl<Phase> fmt::Debug for Sponge<Phase> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The state may be keyed (KMAC); don't print it.
        f.debug_struct("Sponge")
            .field("rate", &self.rate)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shake256(data: &[u8], len: usize) -> Vec<u8> {
        let mut sponge = Sponge::shake256();
        sponge.absorb(data);
        sponge.finalize(DomainSuffix::Shake).squeeze(len)
    }

    #[test]
    fn test_shake256_empty_known_vector() {
        // FIPS 202 SHAKE256("") first 32 bytes.
        let expected =
            hex::decode("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f")
                .unwrap();
        assert_eq!(shake256(b"", 32), expected);
    }

    #[test]
    fn test_chunked_absorb_matches_one_shot() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 251) as u8).collect();
        let one_shot = shake256(&data, 64);

        for chunk_size in [1, 7, 135, 136, 137, 500] {
            let mut sponge = Sponge::shake256();
            for chunk in data.chunks(chunk_size) {
                sponge.absorb(chunk);
            }
            assert_eq!(sponge.finalize(DomainSuffix::Shake).squeeze(64), one_shot);
        }
    }

    #[test]
    fn test_chunked_squeeze_matches_one_shot() {
        let mut whole = Sponge::shake256();
        whole.absorb(b"squeeze me");
        let expected = whole.finalize(DomainSuffix::Shake).squeeze(500);

        let mut pieces = Sponge::shake256();
        pieces.absorb(b"squeeze me");
        let mut reader = pieces.finalize(DomainSuffix::Shake);
        let mut got = Vec::new();
        for len in [1, 135, 136, 100, 128] {
            got.extend(reader.squeeze(len));
        }
        assert_eq!(got, expected);
    }

    #[test]
    fn test_output_is_prefix_consistent() {
        // An XOF's shorter output is a prefix of its longer output.
        let short = shake256(b"prefix", 10);
        let long = shake256(b"prefix", 300);
        assert_eq!(&long[..10], short.as_slice());
    }

    #[test]
    fn test_suffixes_separate_domains() {
        let mut a = Sponge::shake256();
        a.absorb(b"same input");
        let mut b = a.clone();
        let out_a = a.finalize(DomainSuffix::Shake).squeeze(32);
        b.absorb(&[]);
        let out_b = b.finalize(DomainSuffix::CShake).squeeze(32);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_exact_rate_input_pads_into_next_block() {
        // Absorbing exactly one block leaves the cursor at 0 of a fresh block.
        let block = [0xA5u8; RATE_BYTES];
        let mut sponge = Sponge::shake256();
        sponge.absorb(&block);
        assert_eq!(sponge.cursor, 0);
        let out = sponge.finalize(DomainSuffix::Shake).squeeze(32);
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn test_exact_rate_squeeze_leaves_cursor_in_window() {
        let mut reader = Sponge::shake256().finalize(DomainSuffix::Shake);
        let first = reader.squeeze(RATE_BYTES);
        assert!(reader.cursor < reader.rate);
        assert_eq!(reader.cursor, 0);

        let second = reader.squeeze(RATE_BYTES);
        assert!(reader.cursor < reader.rate);

        let mut expected = first;
        expected.extend(second);
        assert_eq!(shake256(b"", 2 * RATE_BYTES), expected);
    }

    #[test]
    #[should_panic(expected = "sponge rate")]
    fn test_rate_without_capacity_panics() {
        let _ = Sponge::new(STATE_BYTES);
    }

    #[test]
    fn test_debug_hides_state() {
        let mut sponge = Sponge::shake256();
        sponge.absorb(b"secret key material");
        let debug = format!("{:?}", sponge);
        assert!(debug.contains("rate: 136"));
        assert!(!debug.contains("state"));
    }
}
