//! # E521 Edwards Curve
//!
//! - **field**: modular arithmetic over `p` (coordinates) and `r` (scalars).
//! - **point**: affine points, complete addition, scalar multiplication,
//!   decompression.

pub mod field;
pub mod point;

pub use field::{PrimeField, BASE_FIELD, CURVE_D, P, R, SCALAR_FIELD};
pub use point::{point_add, scalar_mul, Point, BASE_POINT};
