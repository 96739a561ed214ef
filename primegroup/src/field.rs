//! Contract between the group law and the base field.

use core::{
    fmt::Debug,
    ops::{Add, Mul, Neg, Sub},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// An element of the prime field underlying a supported curve.
///
/// The group-law formulas treat field elements as an opaque value type
/// supporting exactly the operations below. Every operation (including the
/// bounds' operators, equality and selection) MUST execute in time
/// independent of the operand values; the constant-time guarantees of
/// [`ProjectivePoint`](crate::ProjectivePoint) are void otherwise.
pub trait Field:
    Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
    + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Returns `self²`.
    fn square(&self) -> Self;

    /// Returns `2·self`.
    fn double(&self) -> Self {
        *self + *self
    }

    /// Returns the multiplicative inverse of `self`.
    ///
    /// This is a *total* function: `invert(0)` MUST return [`Field::ZERO`].
    /// Point normalization inverts the `Z` coordinate unconditionally and
    /// corrects the identity case afterwards with a constant-time select;
    /// an implementation that traps on zero or returns an out-of-range
    /// value would break that identity-hiding scheme. Fermat inversion
    /// (`a^(p−2) mod p`) satisfies the contract with no special casing.
    fn invert(&self) -> Self;

    /// Constant-time test for the additive identity.
    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }
}
