#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "dev")]
pub mod dev;

mod field;
mod formulas;
mod projective;

pub use crate::{field::Field, projective::ProjectivePoint};
pub use subtle;
pub use zeroize;

use core::fmt::Debug;

/// Parameters of a prime-order elliptic curve in short Weierstrass form
/// with equation coefficient *a* = −3:
///
/// ```text
/// y² = x³ − 3x + b
/// ```
///
/// Implementing this trait for a marker type is what makes a curve usable
/// with [`ProjectivePoint`]. The *a*-coefficient is not part of the
/// parameters: the group-law formulas hardcode −3, so a curve with a
/// different *a* cannot be expressed at all. Dispatch over the curve is
/// resolved entirely at compile time; there are no trait objects and no
/// runtime curve registry.
pub trait CurveParams: Copy + Clone + Debug + Default + Eq + 'static {
    /// Base field element type.
    type FieldElement: Field;

    /// Coefficient `b` in the curve equation.
    const B: Self::FieldElement;

    /// Affine coordinates `(x, y)` of the curve's base point.
    const GENERATOR: (Self::FieldElement, Self::FieldElement);
}
