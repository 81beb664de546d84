//! # Key Management
//!
//! E521 key pairs derived from a passphrase. There is no key file: the
//! passphrase *is* the private key, and the same passphrase always yields
//! the same pair.
//!
//! ```text
//! s = 4 · int(KMACXOF256(pw, "", 512, "K"))
//! V = s · G
//! ```
//!
//! The factor 4 clears the cofactor. `s` is not reduced modulo `r`.
//!
//! Key bytes are never logged, and `Debug` on a key pair only shows the
//! public half.

use std::fmt;

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::config::{COFACTOR, CUSTOM_KEYGEN};
use crate::curve::{scalar_mul, Point, BASE_POINT};
use crate::error::Result;

use super::{bytes_to_int, int_to_bytes, kmac_tag};

/// A passphrase-derived key pair `(s, V)`.
///
/// Not `Serialize`. The only way to persist one is to persist
/// its public half (see [`crate::format`]) and remember the passphrase.
///
/// # Example
///
/// ```
/// use e521_crypto::crypto::keys::E521Keypair;
///
/// let a = E521Keypair::from_passphrase(b"correct horse");
/// let b = E521Keypair::from_passphrase(b"correct horse");
/// assert_eq!(a.public_key(), b.public_key());
/// ```
#[derive(Clone)]
pub struct E521Keypair {
    secret: BigUint,
    public: PublicKey,
}

/// The public half of a key pair: a point on E521.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: Point,
}

impl E521Keypair {
    /// Derive `(s, V)` from a passphrase.
    pub fn from_passphrase(passphrase: &[u8]) -> Self {
        let digest = Zeroizing::new(kmac_tag(passphrase, b"", CUSTOM_KEYGEN));
        let secret = bytes_to_int(digest.as_slice()) * COFACTOR;
        let public = PublicKey {
            point: scalar_mul(&secret, &BASE_POINT),
        };
        tracing::debug!("derived key pair from passphrase");
        Self { secret, public }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The private scalar `s`. Handle with care.
    pub fn secret_scalar(&self) -> &BigUint {
        &self.secret
    }

    /// `s` in the byte form used as a KMAC key, wiped on drop.
    pub(crate) fn secret_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(int_to_bytes(&self.secret))
    }
}

impl fmt::Debug for E521Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E521Keypair(pub={:?})", self.public.point)
    }
}

impl PartialEq for E521Keypair {
    /// Compared by public key only.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for E521Keypair {}

impl PublicKey {
    /// Wrap a curve point.
    pub fn from_point(point: Point) -> Self {
        Self { point }
    }

    /// Build from raw coordinates, rejecting anything off the curve.
    pub fn from_coordinates(x: BigUint, y: BigUint) -> Result<Self> {
        Point::new(x, y).map(Self::from_point)
    }

    pub fn point(&self) -> &Point {
        &self.point
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({:?})", self.point)
    }
}
