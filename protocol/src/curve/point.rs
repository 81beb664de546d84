//! # E521 Points
//!
//! Affine points on the Edwards curve `x² + y² = 1 + d·x²·y²` over
//! `p = 2^521 - 1`, `d = -376014`. The addition law is complete: it works
//! for every pair of curve points, doubling and the neutral element
//! included, so there are no special cases anywhere in this file.
//!
//! [`scalar_mul`] runs its double-and-add ladder in projective coordinates
//! `(X : Y : Z)` and converts back once at the end. The affine [`point_add`]
//! would need two field inversions per step, which at 521 bits is the
//! difference between microseconds and seconds per signature.

use std::fmt;
use std::ops::{Add, Neg};

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::config::BASE_POINT_X;
use crate::error::{CryptoError, Result};

use super::field::{BASE_FIELD, CURVE_D, P};

lazy_static! {
    /// The generator `G = (4, y)` with `y` even.
    pub static ref BASE_POINT: Point = Point::from_x(&BigUint::from(BASE_POINT_X), false)
        .expect("x = 4 lies on E521");
}

/// A point on E521 in affine coordinates, both in `[0, p)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Point {
    x: BigUint,
    y: BigUint,
}

impl Point {
    /// The neutral element `O = (0, 1)`.
    pub fn neutral() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
        }
    }

    /// The generator `G`.
    pub fn base() -> Self {
        BASE_POINT.clone()
    }

    /// Checked constructor for coordinates read from outside.
    pub fn new(x: BigUint, y: BigUint) -> Result<Self> {
        if x >= *P || y >= *P {
            return Err(CryptoError::malformed("point coordinate out of range"));
        }
        let point = Self { x, y };
        if !point.is_on_curve() {
            return Err(CryptoError::malformed("point is not on E521"));
        }
        Ok(point)
    }

    /// Recover `y` from `x` and the parity of `y`.
    ///
    /// `y = sqrt((1 - x²) / (1 - d·x²))`. Returns `None` for `x ≥ p` or when
    /// the radicand has no square root.
    pub fn from_x(x: &BigUint, lsb: bool) -> Option<Self> {
        if *x >= *P {
            return None;
        }
        let f = &*BASE_FIELD;
        let x_sq = f.square(x);
        let numerator = f.sub(&BigUint::one(), &x_sq);
        let denominator = f.sub(&BigUint::one(), &f.mul(&CURVE_D, &x_sq));
        let v = f.div(&numerator, &denominator);
        let y = f.sqrt(&v, lsb)?;
        Some(Self { x: x.clone(), y })
    }

    /// [`Point::from_x`] with `lsb = 0`, as an error.
    pub fn decompress(x: &BigUint) -> Result<Self> {
        Self::from_x(x, false).ok_or_else(|| {
            tracing::debug!("no curve point with the requested x-coordinate");
            CryptoError::InvalidPoint
        })
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn is_neutral(&self) -> bool {
        self.x.is_zero() && self.y.is_one()
    }

    /// Whether `x² + y² ≡ 1 + d·x²·y² (mod p)`.
    pub fn is_on_curve(&self) -> bool {
        let f = &*BASE_FIELD;
        let x_sq = f.square(&self.x);
        let y_sq = f.square(&self.y);
        let lhs = f.add(&x_sq, &y_sq);
        let rhs = f.add(&BigUint::one(), &f.mul(&CURVE_D, &f.mul(&x_sq, &y_sq)));
        lhs == rhs
    }

    /// `-(x, y) = (-x, y)`.
    pub fn negate(&self) -> Self {
        Self {
            x: BASE_FIELD.neg(&self.x),
            y: self.y.clone(),
        }
    }
}

impl Add for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        point_add(self, rhs)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        self.negate()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 521-bit coordinates are 131 hex digits; the head is enough to tell
        // points apart in test output.
        let x = self.x.to_str_radix(16);
        let y = self.y.to_str_radix(16);
        write!(f, "Point(x={}.., y={}..)", head(&x), head(&y))
    }
}

fn head(s: &str) -> &str {
    &s[..s.len().min(16)]
}

/// Affine Edwards addition.
///
/// ```text
/// x3 = (x1·y2 + y1·x2) / (1 + d·x1·x2·y1·y2)
/// y3 = (y1·y2 - x1·x2) / (1 - d·x1·x2·y1·y2)
/// ```
pub fn point_add(p1: &Point, p2: &Point) -> Point {
    let f = &*BASE_FIELD;
    let x1x2 = f.mul(&p1.x, &p2.x);
    let y1y2 = f.mul(&p1.y, &p2.y);
    let t = f.mul(&CURVE_D, &f.mul(&x1x2, &y1y2));

    let x_num = f.add(&f.mul(&p1.x, &p2.y), &f.mul(&p1.y, &p2.x));
    let x_den = f.add(&BigUint::one(), &t);
    let y_num = f.sub(&y1y2, &x1x2);
    let y_den = f.sub(&BigUint::one(), &t);

    Point {
        x: f.div(&x_num, &x_den),
        y: f.div(&y_num, &y_den),
    }
}

/// `k·P` by double-and-add from the second most significant bit down.
///
/// `0·P = O`. The scalar is used as given; it is not reduced modulo `r`,
/// since `P` need not lie in the prime-order subgroup.
pub fn scalar_mul(k: &BigUint, point: &Point) -> Point {
    let bits = k.bits();
    if bits == 0 {
        return Point::neutral();
    }

    let base = ProjectivePoint::from(point);
    let mut acc = base.clone();
    for i in (0..bits - 1).rev() {
        acc = acc.double();
        if k.bit(i) {
            acc = acc.add(&base);
        }
    }
    acc.to_affine()
}

/// `(X : Y : Z)` with `x = X/Z`, `y = Y/Z`.
#[derive(Clone)]
struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl From<&Point> for ProjectivePoint {
    fn from(p: &Point) -> Self {
        Self {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigUint::one(),
        }
    }
}

impl ProjectivePoint {
    /// Complete projective addition (a = 1).
    fn add(&self, other: &Self) -> Self {
        let f = &*BASE_FIELD;
        let a = f.mul(&self.z, &other.z);
        let b = f.square(&a);
        let c = f.mul(&self.x, &other.x);
        let d = f.mul(&self.y, &other.y);
        let e = f.mul(&CURVE_D, &f.mul(&c, &d));
        let ff = f.sub(&b, &e);
        let g = f.add(&b, &e);

        let cross = f.mul(&f.add(&self.x, &self.y), &f.add(&other.x, &other.y));
        let x3 = f.mul(&f.mul(&a, &ff), &f.sub(&f.sub(&cross, &c), &d));
        let y3 = f.mul(&f.mul(&a, &g), &f.sub(&d, &c));
        let z3 = f.mul(&ff, &g);

        Self { x: x3, y: y3, z: z3 }
    }

    /// Projective doubling (a = 1).
    fn double(&self) -> Self {
        let f = &*BASE_FIELD;
        let b = f.square(&f.add(&self.x, &self.y));
        let c = f.square(&self.x);
        let d = f.square(&self.y);
        let e = f.add(&c, &d);
        let h = f.square(&self.z);
        let j = f.sub(&e, &f.add(&h, &h));

        let x3 = f.mul(&f.sub(&b, &e), &j);
        let y3 = f.mul(&e, &f.sub(&c, &d));
        let z3 = f.mul(&e, &j);

        Self { x: x3, y: y3, z: z3 }
    }

    fn to_affine(&self) -> Point {
        let f = &*BASE_FIELD;
        let z_inv = f.inv(&self.z);
        Point {
            x: f.mul(&self.x, &z_inv),
            y: f.mul(&self.y, &z_inv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::field::R;

    fn g() -> Point {
        Point::base()
    }

    fn n(v: u64) -> BigUint {
        BigUint::from(v)
    }

    /// Affine double-and-add, the slow reference for the projective ladder.
    fn affine_scalar_mul(k: &BigUint, point: &Point) -> Point {
        let mut acc = Point::neutral();
        for i in (0..k.bits()).rev() {
            acc = point_add(&acc, &acc);
            if k.bit(i) {
                acc = point_add(&acc, point);
            }
        }
        acc
    }

    #[test]
    fn test_base_point_is_on_curve() {
        let g = g();
        assert_eq!(g.x(), &n(4));
        assert!(!g.y().bit(0));
        assert!(g.is_on_curve());
        assert!(!g.is_neutral());
    }

    #[test]
    fn test_neutral_element() {
        let o = Point::neutral();
        assert!(o.is_on_curve());
        assert_eq!(point_add(&g(), &o), g());
        assert_eq!(point_add(&o, &g()), g());
        assert_eq!(point_add(&o, &o), o);
    }

    #[test]
    fn test_small_multiples() {
        let g = g();
        assert_eq!(scalar_mul(&n(0), &g), Point::neutral());
        assert_eq!(scalar_mul(&n(1), &g), g);
        let two_g = point_add(&g, &g);
        assert_eq!(scalar_mul(&n(2), &g), two_g);
        assert_eq!(scalar_mul(&n(4), &g), point_add(&two_g, &two_g));
        assert_eq!(scalar_mul(&n(4), &g), scalar_mul(&n(2), &scalar_mul(&n(2), &g)));
        assert_ne!(scalar_mul(&n(4), &g), Point::neutral());
    }

    #[test]
    fn test_order_annihilates_base_point() {
        assert!(scalar_mul(&R, &g()).is_neutral());
        assert_eq!(scalar_mul(&(&*R + 1u32), &g()), g());
    }

    #[test]
    fn test_ladder_matches_repeated_addition() {
        let g = g();
        let mut expected = Point::neutral();
        for k in 0..40u64 {
            assert_eq!(scalar_mul(&n(k), &g), expected, "k = {k}");
            expected = point_add(&expected, &g);
        }
    }

    #[test]
    fn test_ladder_matches_affine_on_large_scalar() {
        let k = (BigUint::from(0x1234_5678_9ABC_DEF0u64) << 200) + 12_345u32;
        assert_eq!(scalar_mul(&k, &g()), affine_scalar_mul(&k, &g()));
    }

    #[test]
    fn test_scalar_mul_distributes() {
        // (a + b)·G = a·G + b·G
        let a = n(0xFFFF_FFFF_FFFF);
        let b = n(0x1234_5678);
        let lhs = scalar_mul(&(&a + &b), &g());
        let rhs = point_add(&scalar_mul(&a, &g()), &scalar_mul(&b, &g()));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_negate() {
        let g = g();
        assert!(point_add(&g, &g.negate()).is_neutral());
        assert!((&g + &(-&g)).is_neutral());
        assert!(g.negate().is_on_curve());
    }

    #[test]
    fn test_results_stay_on_curve() {
        let p = scalar_mul(&n(987_654_321), &g());
        assert!(p.is_on_curve());
        assert!(Point::new(p.x().clone(), p.y().clone()).is_ok());
    }

    #[test]
    fn test_from_x_recovers_base_point() {
        let p = Point::from_x(&n(4), false).unwrap();
        assert_eq!(p, g());
        let odd = Point::from_x(&n(4), true).unwrap();
        assert!(odd.y().bit(0));
        assert_eq!(BASE_FIELD.add(odd.y(), p.y()), BigUint::zero());
    }

    #[test]
    fn test_from_x_zero_radicand() {
        // x = 1 makes 1 - x² vanish, so y = 0.
        let p = Point::from_x(&n(1), false).unwrap();
        assert!(p.y().is_zero());
        assert!(p.is_on_curve());
    }

    #[test]
    fn test_from_x_rejects_out_of_range() {
        assert!(Point::from_x(&P, false).is_none());
        assert!(Point::decompress(&(&*P + 4u32)).is_err());
    }

    #[test]
    fn test_from_x_finds_non_residues() {
        // About half of all x have no point; every point found is valid.
        let mut misses = 0;
        for x in 0..64u64 {
            match Point::from_x(&n(x), false) {
                Some(p) => assert!(p.is_on_curve()),
                None => {
                    misses += 1;
                    assert_eq!(Point::decompress(&n(x)), Err(CryptoError::InvalidPoint));
                }
            }
        }
        assert!(misses > 0);
    }

    #[test]
    fn test_new_rejects_off_curve() {
        assert!(matches!(
            Point::new(n(1), n(1)),
            Err(CryptoError::MalformedInput(_))
        ));
        assert!(Point::new(P.clone(), n(1)).is_err());
        assert_eq!(Point::new(n(0), n(1)), Ok(Point::neutral()));
    }

    #[test]
    fn test_debug_is_short() {
        let debug = format!("{:?}", g());
        assert!(debug.starts_with("Point(x=4.., y="));
        assert!(debug.len() < 64);
    }
}
