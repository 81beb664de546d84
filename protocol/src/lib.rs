// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # e521-crypto: Core Library
//!
//! A complete little cryptosystem grown from one permutation. Keccak-p[1600]
//! gives a sponge, the sponge gives KMACXOF256, and KMACXOF256 plus the E521
//! Edwards curve gives everything else: hashing, MACs, passphrase
//! encryption, public-key encryption and Schnorr signatures.
//!
//! ## Architecture
//!
//! Leaf-first, each layer only talks to the ones below it:
//!
//! - **sha3**: Keccak permutation, typed-phase sponge, SP 800-185
//!   encoders, SHAKE256 / cSHAKE256 / KMACXOF256.
//! - **curve**: prime-field arithmetic and E521 point operations.
//! - **crypto**: the protocols, each a handful of KMAC calls and scalar
//!   multiplications.
//! - **format**: the one-hex-component-per-line text layout.
//! - **error**: the crate's single error enum.
//! - **config**: every constant: Keccak sizes, customization strings,
//!   curve parameters.
//!
//! ## Ground rules
//!
//! 1. No external hash or curve crates in the core. `sha3` shows up only as
//!    a test oracle.
//! 2. Randomness comes from `OsRng`, and only where the protocol asks for it.
//! 3. Not constant time. Tag comparisons are, because that's free; scalar
//!    multiplication over `BigUint` is not, and pretending otherwise would be
//!    a lie.
//!
//! ## Example
//!
//! ```
//! use e521_crypto::crypto::{ecies, encryption, sign, verify, E521Keypair};
//!
//! let cg = encryption::encrypt(b"pw", b"hello");
//! assert_eq!(encryption::decrypt(b"pw", &cg).unwrap(), b"hello");
//!
//! let bob = E521Keypair::from_passphrase(b"bob");
//! let cg = ecies::encrypt(bob.public_key(), b"hi");
//! assert_eq!(ecies::decrypt_with_keypair(&bob, &cg).unwrap(), b"hi");
//!
//! let sig = sign(b"bob", b"contract");
//! assert!(verify(bob.public_key(), b"contract", &sig));
//! ```

pub mod config;
pub mod crypto;
pub mod curve;
pub mod error;
pub mod format;
pub mod sha3;

pub use error::{CryptoError, Result};
