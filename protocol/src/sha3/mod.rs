//! # Keccak Sponge Stack
//!
//! Hand-rolled Keccak: the permutation, the sponge, the SP 800-185 encoders
//! and the XOFs built from them. No external hash crate is involved.
//!
//! Leaf-first:
//!
//! - **keccak**: Keccak-p[1600, 24] on bytes or lanes.
//! - **sponge**: absorb/pad/squeeze with the phase in the type.
//! - **encoding**: `left_encode`, `right_encode`, `encode_string`, `bytepad`.
//! - **kmac**: SHAKE256, cSHAKE256, KMACXOF256 (one-shot and streaming).

pub mod encoding;
pub mod keccak;
pub mod kmac;
pub mod sponge;

pub use encoding::{bytepad, encode_string, left_encode, right_encode};
pub use keccak::{keccak_f1600, keccak_p1600};
pub use kmac::{cshake256, kmac_xof256, shake256, KmacXof256};
pub use sponge::{Absorbing, DomainSuffix, Sponge, Squeezing};
