//! # Prime Field Arithmetic
//!
//! One implementation of modular arithmetic, instantiated twice: over
//! `p = 2^521 - 1` for point coordinates and over the subgroup order `r` for
//! scalars. Values are plain [`BigUint`]s; every method returns a fully
//! reduced representative in `[0, modulus)`.
//!
//! Nothing here is constant time. See the crate docs.

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::config::{CURVE_D_MAGNITUDE, P_EXPONENT, R_EXPONENT, R_OFFSET_DECIMAL};

/// Arithmetic modulo a fixed prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Field of integers modulo `modulus`, which must be an odd prime.
    pub fn new(modulus: BigUint) -> Self {
        debug_assert!(modulus > BigUint::from(2u32));
        Self { modulus }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `a mod m`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// `a - b mod m`. Works for unreduced inputs too.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let b = self.reduce(b);
        (a + &self.modulus - b) % &self.modulus
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        self.sub(&BigUint::zero(), a)
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Multiplicative inverse by Fermat: `a^(m-2)`.
    ///
    /// `inv(0)` comes back as 0; callers that can hit zero must check first.
    pub fn inv(&self, a: &BigUint) -> BigUint {
        let exponent = &self.modulus - BigUint::from(2u32);
        self.pow(a, &exponent)
    }

    /// `a / b`, i.e. `a * inv(b)`.
    pub fn div(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.mul(a, &self.inv(b))
    }

    /// Square root of `v` whose least significant bit equals `lsb`.
    ///
    /// Uses `v^((m+1)/4)`, which is only a square root for `m ≡ 3 (mod 4)`.
    /// Returns `None` when `v` is not a quadratic residue. `sqrt(0, _)` is 0.
    pub fn sqrt(&self, v: &BigUint, lsb: bool) -> Option<BigUint> {
        debug_assert!(self.modulus.bit(0) && self.modulus.bit(1));
        let v = self.reduce(v);
        if v.is_zero() {
            return Some(BigUint::zero());
        }

        let exponent = (&self.modulus >> 2u32) + BigUint::one();
        let mut root = self.pow(&v, &exponent);
        if root.bit(0) != lsb {
            root = &self.modulus - root;
        }

        (self.square(&root) == v).then_some(root)
    }
}

/// `2^bits - offset`.
fn power_of_two_minus(bits: usize, offset: &BigUint) -> BigUint {
    (BigUint::one() << bits) - offset
}

lazy_static! {
    /// `p = 2^521 - 1`.
    pub static ref P: BigUint = power_of_two_minus(P_EXPONENT, &BigUint::one());

    /// Order of the base point, `r = 2^519 - 3375547...655765`.
    pub static ref R: BigUint = power_of_two_minus(
        R_EXPONENT,
        &R_OFFSET_DECIMAL
            .parse::<BigUint>()
            .expect("R_OFFSET_DECIMAL is a valid decimal integer"),
    );

    /// `d = -376014 mod p`.
    pub static ref CURVE_D: BigUint = &*P - BigUint::from(CURVE_D_MAGNITUDE);

    /// Coordinates live here.
    pub static ref BASE_FIELD: PrimeField = PrimeField::new(P.clone());

    /// Scalars live here.
    pub static ref SCALAR_FIELD: PrimeField = PrimeField::new(R.clone());
}
