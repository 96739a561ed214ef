//! Complete group-law formulas for curves with `a = -3`.
//!
//! The implementations follow [Renes-Costello-Batina 2015], Algorithms 4
//! (projective addition), 5 (mixed addition) and 6 (doubling), all in the
//! `a = -3` specialization. The numbered comments refer to the algorithm
//! steps in the paper.
//!
//! Each formula is a fixed straight-line sequence of field operations: the
//! same multiplications, additions and subtractions are executed for every
//! input, so no branch, memory access or timing variation ever depends on
//! coordinate values. Intermediate values are kept in a scratch struct
//! wrapped in [`Zeroizing`], which overwrites them with zeros when the
//! formula returns, bounding the lifetime of secret-derived data on the
//! stack.
//!
//! [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060

use crate::{CurveParams, Field, ProjectivePoint};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Intermediate values of the general addition formula.
#[derive(Default)]
struct AddScratch<F: Field> {
    xx: F,
    yy: F,
    zz: F,
    xy_pairs: F,
    yz_pairs: F,
    xz_pairs: F,
    bzz: F,
    bzz3: F,
    yy_m_bzz3: F,
    yy_p_bzz3: F,
    zz3: F,
    bxz: F,
    bxz3: F,
    xx3_m_zz3: F,
}

impl<F: Field> Zeroize for AddScratch<F> {
    fn zeroize(&mut self) {
        self.xx.zeroize();
        self.yy.zeroize();
        self.zz.zeroize();
        self.xy_pairs.zeroize();
        self.yz_pairs.zeroize();
        self.xz_pairs.zeroize();
        self.bzz.zeroize();
        self.bzz3.zeroize();
        self.yy_m_bzz3.zeroize();
        self.yy_p_bzz3.zeroize();
        self.zz3.zeroize();
        self.bxz.zeroize();
        self.bxz3.zeroize();
        self.xx3_m_zz3.zeroize();
    }
}

/// Complete projective addition (Algorithm 4).
///
/// Valid for every input pair, including the identity on either side,
/// `lhs = rhs` and `lhs = -rhs`. Costs 12M + 2m_b + 29a.
pub(crate) fn add<C>(lhs: &ProjectivePoint<C>, rhs: &ProjectivePoint<C>) -> ProjectivePoint<C>
where
    C: CurveParams,
{
    let b = C::B;
    let mut v = Zeroizing::new(AddScratch::<C::FieldElement>::default());

    v.xx = lhs.x * rhs.x; // 1
    v.yy = lhs.y * rhs.y; // 2
    v.zz = lhs.z * rhs.z; // 3
    v.xy_pairs = (lhs.x + lhs.y) * (rhs.x + rhs.y) - (v.xx + v.yy); // 4, 5, 6, 7, 8
    v.yz_pairs = (lhs.y + lhs.z) * (rhs.y + rhs.z) - (v.yy + v.zz); // 9, 10, 11, 12, 13
    v.xz_pairs = (lhs.x + lhs.z) * (rhs.x + rhs.z) - (v.xx + v.zz); // 14, 15, 16, 17, 18

    v.bzz = v.xz_pairs - b * v.zz; // 19, 20
    v.bzz3 = v.bzz.double() + v.bzz; // 21, 22
    v.yy_m_bzz3 = v.yy - v.bzz3; // 23
    v.yy_p_bzz3 = v.yy + v.bzz3; // 24

    v.zz3 = v.zz.double() + v.zz; // 26, 27
    v.bxz = b * v.xz_pairs - (v.zz3 + v.xx); // 25, 28, 29
    v.bxz3 = v.bxz.double() + v.bxz; // 30, 31
    v.xx3_m_zz3 = v.xx.double() + v.xx - v.zz3; // 32, 33, 34

    ProjectivePoint {
        x: v.yy_p_bzz3 * v.xy_pairs - v.yz_pairs * v.bxz3, // 35, 39, 40
        y: v.yy_p_bzz3 * v.yy_m_bzz3 + v.xx3_m_zz3 * v.bxz3, // 36, 37, 38
        z: v.yy_m_bzz3 * v.yz_pairs + v.xy_pairs * v.xx3_m_zz3, // 41, 42, 43
    }
}

/// Intermediate values of the mixed addition formula.
#[derive(Default)]
struct MixedScratch<F: Field> {
    xx: F,
    yy: F,
    xy_pairs: F,
    yz_pairs: F,
    xz_pairs: F,
    bz: F,
    bz3: F,
    yy_m_bz3: F,
    yy_p_bz3: F,
    z3: F,
    bxz: F,
    bxz3: F,
    xx3_m_z3: F,
}

impl<F: Field> Zeroize for MixedScratch<F> {
    fn zeroize(&mut self) {
        self.xx.zeroize();
        self.yy.zeroize();
        self.xy_pairs.zeroize();
        self.yz_pairs.zeroize();
        self.xz_pairs.zeroize();
        self.bz.zeroize();
        self.bz3.zeroize();
        self.yy_m_bz3.zeroize();
        self.yy_p_bz3.zeroize();
        self.z3.zeroize();
        self.bxz.zeroize();
        self.bxz3.zeroize();
        self.xx3_m_z3.zeroize();
    }
}

/// Mixed addition (Algorithm 5): `rhs` must be normalized (`Z = 1`) and
/// must not be the identity.
///
/// Only `rhs.x` and `rhs.y` are read; the formula saves 1M + 6a over the
/// general addition. The precondition is the caller's contract and is
/// checked with a `debug_assert!` in development builds only.
pub(crate) fn add_mixed<C>(lhs: &ProjectivePoint<C>, rhs: &ProjectivePoint<C>) -> ProjectivePoint<C>
where
    C: CurveParams,
{
    debug_assert!(bool::from(rhs.z.ct_eq(&C::FieldElement::ONE)));

    let b = C::B;
    let mut v = Zeroizing::new(MixedScratch::<C::FieldElement>::default());

    v.xx = lhs.x * rhs.x; // 1
    v.yy = lhs.y * rhs.y; // 2
    v.xy_pairs = (lhs.x + lhs.y) * (rhs.x + rhs.y) - (v.xx + v.yy); // 3, 4, 5, 6, 7
    v.yz_pairs = rhs.y * lhs.z + lhs.y; // 8, 9
    v.xz_pairs = rhs.x * lhs.z + lhs.x; // 10, 11

    v.bz = v.xz_pairs - b * lhs.z; // 12, 13
    v.bz3 = v.bz.double() + v.bz; // 14, 15
    v.yy_m_bz3 = v.yy - v.bz3; // 16
    v.yy_p_bz3 = v.yy + v.bz3; // 17

    v.z3 = lhs.z.double() + lhs.z; // 19, 20
    v.bxz = b * v.xz_pairs - (v.z3 + v.xx); // 18, 21, 22
    v.bxz3 = v.bxz.double() + v.bxz; // 23, 24
    v.xx3_m_z3 = v.xx.double() + v.xx - v.z3; // 25, 26, 27

    ProjectivePoint {
        x: v.yy_p_bz3 * v.xy_pairs - v.yz_pairs * v.bxz3, // 28, 32, 33
        y: v.yy_p_bz3 * v.yy_m_bz3 + v.xx3_m_z3 * v.bxz3, // 29, 30, 31
        z: v.yy_m_bz3 * v.yz_pairs + v.xy_pairs * v.xx3_m_z3, // 34, 35, 36
    }
}

/// Intermediate values of the doubling formula.
#[derive(Default)]
struct DoubleScratch<F: Field> {
    xx: F,
    yy: F,
    zz: F,
    xy2: F,
    xz2: F,
    yz2: F,
    bzz: F,
    bzz3: F,
    yy_m_bzz3: F,
    yy_p_bzz3: F,
    x_frag: F,
    y_frag: F,
    zz3: F,
    bxz2: F,
    bxz6: F,
    xx3_m_zz3: F,
}

impl<F: Field> Zeroize for DoubleScratch<F> {
    fn zeroize(&mut self) {
        self.xx.zeroize();
        self.yy.zeroize();
        self.zz.zeroize();
        self.xy2.zeroize();
        self.xz2.zeroize();
        self.yz2.zeroize();
        self.bzz.zeroize();
        self.bzz3.zeroize();
        self.yy_m_bzz3.zeroize();
        self.yy_p_bzz3.zeroize();
        self.x_frag.zeroize();
        self.y_frag.zeroize();
        self.zz3.zeroize();
        self.bxz2.zeroize();
        self.bxz6.zeroize();
        self.xx3_m_zz3.zeroize();
    }
}

/// Exception-free doubling (Algorithm 6).
///
/// Valid for every input; doubling the identity yields the identity.
/// Costs 8M + 3S + 2m_b + 21a.
pub(crate) fn double<C>(point: &ProjectivePoint<C>) -> ProjectivePoint<C>
where
    C: CurveParams,
{
    let b = C::B;
    let mut v = Zeroizing::new(DoubleScratch::<C::FieldElement>::default());

    v.xx = point.x.square(); // 1
    v.yy = point.y.square(); // 2
    v.zz = point.z.square(); // 3
    v.xy2 = (point.x * point.y).double(); // 4, 5
    v.xz2 = (point.x * point.z).double(); // 6, 7

    v.bzz = b * v.zz - v.xz2; // 8, 9
    v.bzz3 = v.bzz.double() + v.bzz; // 10, 11
    v.yy_m_bzz3 = v.yy - v.bzz3; // 12
    v.yy_p_bzz3 = v.yy + v.bzz3; // 13
    v.y_frag = v.yy_p_bzz3 * v.yy_m_bzz3; // 14
    v.x_frag = v.yy_m_bzz3 * v.xy2; // 15

    v.zz3 = v.zz.double() + v.zz; // 16, 17
    v.bxz2 = b * v.xz2 - (v.zz3 + v.xx); // 18, 19, 20
    v.bxz6 = v.bxz2.double() + v.bxz2; // 21, 22
    v.xx3_m_zz3 = v.xx.double() + v.xx - v.zz3; // 23, 24, 25

    v.yz2 = (point.y * point.z).double(); // 28, 29

    ProjectivePoint {
        x: v.x_frag - v.bxz6 * v.yz2, // 30, 31
        y: v.y_frag + v.xx3_m_zz3 * v.bxz6, // 26, 27
        z: (v.yz2 * v.yy).double().double(), // 32, 33, 34
    }
}
