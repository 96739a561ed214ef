//! Projective curve points.

use crate::{CurveParams, Field, formulas};
use core::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::{DefaultIsZeroes, Zeroize};

/// Point on a short Weierstrass curve in homogeneous projective coordinates.
///
/// A triple `(X, Y, Z)` represents the affine point `(X/Z, Y/Z)` when
/// `Z ≠ 0` and the group identity (the point at infinity) when `Z = 0`;
/// the canonical identity encoding is `(0, 1, 0)`. The representation is
/// not unique: scaling all three coordinates by any nonzero field element
/// yields an equivalent point, and only [`ProjectivePoint::rescale`]
/// collapses the equivalence class.
///
/// All operations are pure, reentrant, and — given a conforming [`Field`]
/// implementation — execute in time independent of the coordinate values.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<C: CurveParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) z: C::FieldElement,
}

impl<C> ProjectivePoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ZERO,
        y: C::FieldElement::ONE,
        z: C::FieldElement::ZERO,
    };

    /// Base point of the curve, in normalized form (`Z = 1`).
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: C::FieldElement::ONE,
    };

    /// Constructs the normalized point `(x, y, 1)` from affine coordinates,
    /// checking that they satisfy the curve equation.
    ///
    /// Affine coordinates cannot encode the identity, so the result is
    /// always suitable as the second operand of
    /// [`ProjectivePoint::add_mixed`].
    pub fn from_affine(x: C::FieldElement, y: C::FieldElement) -> CtOption<Self> {
        let point = Self {
            x,
            y,
            z: C::FieldElement::ONE,
        };
        CtOption::new(point, point.is_on_curve())
    }

    /// Returns `self + other`.
    ///
    /// Complete: correct for every input pair, including the identity on
    /// either side, `self = other` and `self = -other`.
    pub fn add(&self, other: &Self) -> Self {
        formulas::add(self, other)
    }

    /// Returns `self + other` for a normalized `other`.
    ///
    /// `other` MUST have `Z = 1` (as produced by
    /// [`ProjectivePoint::rescale`] or [`ProjectivePoint::from_affine`])
    /// and MUST NOT be the identity: the formula reads only `other.x` and
    /// `other.y` and its output is undefined for an identity operand. This
    /// precondition is the caller's contract — typically upheld by adding
    /// entries of a precomputed, pre-normalized table — and is not checked
    /// in release builds.
    pub fn add_mixed(&self, other: &Self) -> Self {
        formulas::add_mixed(self, other)
    }

    /// Returns `2·self`.
    ///
    /// Complete: the identity doubles to the identity. Cheaper than
    /// `self.add(self)` while remaining branch-free.
    pub fn double(&self) -> Self {
        formulas::double(self)
    }

    /// Returns `-self`; the negated identity is the identity.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns the canonical representative of this point: `Z = 1` for a
    /// finite point, the canonical identity encoding `(0, 1, 0)` otherwise.
    ///
    /// The inverse of `Z` is computed unconditionally — the [`Field`]
    /// contract pins `invert(0)` to zero — and the identity case is then
    /// corrected with a constant-time select, so neither timing nor the
    /// output shape reveals whether the input was the identity.
    pub fn rescale(&self) -> Self {
        let mut zinv = self.z.invert();
        let normalized = Self {
            x: self.x * zinv,
            y: self.y * zinv,
            z: C::FieldElement::ONE,
        };
        zinv.zeroize();
        Self::conditional_select(&normalized, &Self::IDENTITY, self.is_identity())
    }

    /// Constant-time test for the identity: whether `Z` is the field zero.
    ///
    /// Callers whose control flow would depend on secret data must combine
    /// the returned [`Choice`] with [`ConditionallySelectable`] rather than
    /// branch on it.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Constant-time check of the projective curve equation
    /// `Y²Z = X³ − 3XZ² + bZ³`.
    ///
    /// Holds for every point produced by the operations of this type, and
    /// for every representative of the identity class.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square() * self.z;
        let xzz = self.x * self.z.square();
        let rhs = self.x.square() * self.x - (xzz.double() + xzz) + C::B * self.z.square() * self.z;
        lhs.ct_eq(&rhs)
    }

    /// The `X` coordinate of this representative.
    pub fn x(&self) -> C::FieldElement {
        self.x
    }

    /// The `Y` coordinate of this representative.
    pub fn y(&self) -> C::FieldElement {
        self.y
    }

    /// The `Z` coordinate of this representative.
    pub fn z(&self) -> C::FieldElement {
        self.z
    }
}

impl<C> ConditionallySelectable for ProjectivePoint<C>
where
    C: CurveParams,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            z: C::FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C> ConstantTimeEq for ProjectivePoint<C>
where
    C: CurveParams,
{
    /// Equality of the represented points, not of the representatives.
    fn ct_eq(&self, other: &Self) -> Choice {
        // Cross-multiplication covers finite points and both identity
        // cases: every identity representative reachable on the curve has
        // X = 0, Z = 0 and Y ≠ 0.
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl<C> Default for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for ProjectivePoint<C> where C: CurveParams {}

impl<C> Eq for ProjectivePoint<C> where C: CurveParams {}

impl<C> PartialEq for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

//
// Arithmetic trait impls
//

impl<C> Add<ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn add(self, other: ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(&self, &other)
    }
}

impl<C> Add<&ProjectivePoint<C>> for &ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn add(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(self, other)
    }
}

impl<C> Add<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn add(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(&self, other)
    }
}

impl<C> AddAssign<ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn add_assign(&mut self, rhs: ProjectivePoint<C>) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl<C> AddAssign<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn add_assign(&mut self, rhs: &ProjectivePoint<C>) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl<C> Sub<ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn sub(self, other: ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub(&self, &other)
    }
}

impl<C> Sub<&ProjectivePoint<C>> for &ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn sub(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub(self, other)
    }
}

impl<C> Sub<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn sub(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub(&self, other)
    }
}

impl<C> SubAssign<ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn sub_assign(&mut self, rhs: ProjectivePoint<C>) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl<C> SubAssign<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn sub_assign(&mut self, rhs: &ProjectivePoint<C>) {
        *self = ProjectivePoint::sub(self, rhs);
    }
}

impl<C> Sum for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ProjectivePoint::IDENTITY, |a, b| a + b)
    }
}

impl<'a, C> Sum<&'a ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn sum<I: Iterator<Item = &'a ProjectivePoint<C>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<C> Neg for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint::neg(&self)
    }
}

impl<C> Neg for &ProjectivePoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint::neg(self)
    }
}
