//! Field arithmetic modulo p = 2^{224}(2^{32} − 1) + 2^{192} + 2^{96} − 1.
//!
//! Elements are held in Montgomery form (`aR mod p`, `R = 2^256`) as four
//! 64-bit little-endian limbs. Every operation is a fixed carry chain: no
//! data-dependent branch, loop bound or memory access anywhere.

use crate::limb::{adc, mac, sbb};
use core::{
    fmt::{self, Debug},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use primegroup::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Constant representing the modulus, little-endian limbs.
/// p = 2^{224}(2^{32} − 1) + 2^{192} + 2^{96} − 1
const MODULUS: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0x0000_0000_ffff_ffff,
    0x0000_0000_0000_0000,
    0xffff_ffff_0000_0001,
];

/// R² = 2^512 mod p, the factor that brings a canonical value into
/// Montgomery form.
const R2: FieldElement = FieldElement([
    0x0000_0000_0000_0003,
    0xffff_fffb_ffff_ffff,
    0xffff_ffff_ffff_fffe,
    0x0000_0004_ffff_fffd,
]);

/// An element of the P-256 base field.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl FieldElement {
    /// Additive identity.
    pub const ZERO: Self = Self([0, 0, 0, 0]);

    /// Multiplicative identity (R in Montgomery form).
    pub const ONE: Self = Self::from_u64(1);

    /// Parses a 64-digit big-endian hex literal into Montgomery form.
    ///
    /// `const`-evaluable so curve constants can be written as readable hex;
    /// malformed input fails compilation. The value is NOT reduced — pass
    /// only canonical (below-modulus) literals.
    pub const fn from_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(
            bytes.len() == 64,
            "field element literals are 64 hex digits"
        );

        let mut words = [0u64; 4];
        let mut i = 0;
        while i < 64 {
            let digit = match bytes[i] {
                b @ b'0'..=b'9' => b - b'0',
                b @ b'a'..=b'f' => b - b'a' + 10,
                b @ b'A'..=b'F' => b - b'A' + 10,
                _ => panic!("invalid hex digit in field element literal"),
            };
            let limb = 3 - (i / 16);
            words[limb] = (words[limb] << 4) | digit as u64;
            i += 1;
        }

        Self(words).to_montgomery()
    }

    /// Montgomery form of a small integer.
    pub(crate) const fn from_u64(w: u64) -> Self {
        Self([w, 0, 0, 0]).to_montgomery()
    }

    /// Attempts to parse a big-endian byte encoding of a field element.
    ///
    /// Returns `None` if the bytes do not encode an integer in `[0, p)`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        #[allow(clippy::unwrap_used)]
        let words = [
            u64::from_be_bytes(bytes[24..32].try_into().unwrap()),
            u64::from_be_bytes(bytes[16..24].try_into().unwrap()),
            u64::from_be_bytes(bytes[8..16].try_into().unwrap()),
            u64::from_be_bytes(bytes[0..8].try_into().unwrap()),
        ];

        // The encoding is canonical iff subtracting p underflows.
        let (_, borrow) = sbb(words[0], MODULUS[0], 0);
        let (_, borrow) = sbb(words[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(words[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(words[3], MODULUS[3], borrow);
        let is_some = (borrow as u8) & 1;

        CtOption::new(Self(words).to_montgomery(), Choice::from(is_some))
    }

    /// Canonical big-endian byte encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let w = self.to_canonical().0;
        let mut out = [0u8; 32];
        out[0..8].copy_from_slice(&w[3].to_be_bytes());
        out[8..16].copy_from_slice(&w[2].to_be_bytes());
        out[16..24].copy_from_slice(&w[1].to_be_bytes());
        out[24..32].copy_from_slice(&w[0].to_be_bytes());
        out
    }

    /// Translates into the Montgomery domain.
    const fn to_montgomery(self) -> Self {
        Self::mul(&self, &R2)
    }

    /// Translates out of the Montgomery domain.
    const fn to_canonical(self) -> Self {
        Self::montgomery_reduce([self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0])
    }

    /// Returns `self + rhs mod p`.
    pub const fn add(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        // Bit 256 of p is set, so addition can result in five words.
        let (w0, carry) = adc(a[0], b[0], 0);
        let (w1, carry) = adc(a[1], b[1], carry);
        let (w2, carry) = adc(a[2], b[2], carry);
        let (w3, w4) = adc(a[3], b[3], carry);

        // Attempt to subtract the modulus, to ensure the result is in the
        // field.
        Self::sub_inner(
            [w0, w1, w2, w3, w4],
            [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
        )
        .0
    }

    /// Returns `2·self mod p`.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - rhs mod p`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;
        Self::sub_inner([a[0], a[1], a[2], a[3], 0], [b[0], b[1], b[2], b[3], 0]).0
    }

    /// Returns `-self mod p`.
    pub const fn neg(&self) -> Self {
        Self::sub(&Self::ZERO, self)
    }

    /// Returns `self * rhs mod p`.
    pub const fn mul(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        // Schoolbook multiplication.
        let (w0, carry) = mac(0, a[0], b[0], 0);
        let (w1, carry) = mac(0, a[0], b[1], carry);
        let (w2, carry) = mac(0, a[0], b[2], carry);
        let (w3, w4) = mac(0, a[0], b[3], carry);

        let (w1, carry) = mac(w1, a[1], b[0], 0);
        let (w2, carry) = mac(w2, a[1], b[1], carry);
        let (w3, carry) = mac(w3, a[1], b[2], carry);
        let (w4, w5) = mac(w4, a[1], b[3], carry);

        let (w2, carry) = mac(w2, a[2], b[0], 0);
        let (w3, carry) = mac(w3, a[2], b[1], carry);
        let (w4, carry) = mac(w4, a[2], b[2], carry);
        let (w5, w6) = mac(w5, a[2], b[3], carry);

        let (w3, carry) = mac(w3, a[3], b[0], 0);
        let (w4, carry) = mac(w4, a[3], b[1], carry);
        let (w5, carry) = mac(w5, a[3], b[2], carry);
        let (w6, w7) = mac(w6, a[3], b[3], carry);

        Self::montgomery_reduce([w0, w1, w2, w3, w4, w5, w6, w7])
    }

    /// Returns `self² mod p`.
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns `self^(2^n) mod p`.
    const fn sqn(&self, n: usize) -> Self {
        let mut x = *self;
        let mut i = 0;
        while i < n {
            x = x.square();
            i += 1;
        }
        x
    }

    /// Returns the multiplicative inverse of `self`, i.e. `self^(p-2)`.
    ///
    /// Total: the inverse of zero is zero (`0^(p-2) = 0`), as the group
    /// layer's normalization requires.
    pub const fn invert(&self) -> Self {
        // Fermat's Little Theorem: a^(p-2) * a ≡ 1 mod p, computed with a
        // fixed addition chain over the binary structure of p - 2.
        let t111 = self.mul(&self.mul(&self.square()).square());
        let t111111 = Self::mul(&t111, &t111.sqn(3));
        let x15 = Self::mul(&Self::mul(&t111111.sqn(6), &t111111).sqn(3), &t111);
        let x16 = Self::mul(&x15.square(), self);
        let i53 = Self::mul(&x16.sqn(16), &x16).sqn(15);
        let x47 = Self::mul(&x15, &i53);
        Self::mul(
            &Self::mul(
                &x47,
                &Self::mul(&Self::mul(&i53.sqn(17), self).sqn(143), &x47).sqn(47),
            )
            .sqn(2),
            self,
        )
    }

    /// Subtracts a five-word value, adding p back on underflow so the
    /// result stays in `[0, p)`.
    #[inline]
    const fn sub_inner(l: [u64; 5], r: [u64; 5]) -> (Self, u64) {
        let (w0, borrow) = sbb(l[0], r[0], 0);
        let (w1, borrow) = sbb(l[1], r[1], borrow);
        let (w2, borrow) = sbb(l[2], r[2], borrow);
        let (w3, borrow) = sbb(l[3], r[3], borrow);
        let (_, borrow) = sbb(l[4], r[4], borrow);

        // If underflow occurred on the final limb, borrow = 0xfff...fff,
        // otherwise borrow = 0x000...000. Thus, we use it as a mask to
        // conditionally add the modulus.
        let (w0, carry) = adc(w0, MODULUS[0] & borrow, 0);
        let (w1, carry) = adc(w1, MODULUS[1] & borrow, carry);
        let (w2, carry) = adc(w2, MODULUS[2] & borrow, carry);
        let (w3, _) = adc(w3, MODULUS[3] & borrow, carry);

        (Self([w0, w1, w2, w3]), borrow)
    }

    /// Montgomery word-by-word reduction (HAC 14.32), specialized to the
    /// P-256 prime: p' = 1, so the multiplicand is the running low limb;
    /// limb 0 of p is 2^64 − 1, so that partial product collapses into the
    /// initial carry; limb 2 of p is zero, so its step only propagates the
    /// carry.
    #[inline]
    const fn montgomery_reduce(r: [u64; 8]) -> Self {
        let (r1, carry) = mac(r[1], r[0], MODULUS[1], r[0]);
        let (r2, carry) = adc(r[2], 0, carry);
        let (r3, carry) = mac(r[3], r[0], MODULUS[3], carry);
        let (r4, carry2) = adc(r[4], 0, carry);

        let (r2, carry) = mac(r2, r1, MODULUS[1], r1);
        let (r3, carry) = adc(r3, 0, carry);
        let (r4, carry) = mac(r4, r1, MODULUS[3], carry);
        let (r5, carry2) = adc(r[5], carry2, carry);

        let (r3, carry) = mac(r3, r2, MODULUS[1], r2);
        let (r4, carry) = adc(r4, 0, carry);
        let (r5, carry) = mac(r5, r2, MODULUS[3], carry);
        let (r6, carry2) = adc(r[6], carry2, carry);

        let (r4, carry) = mac(r4, r3, MODULUS[1], r3);
        let (r5, carry) = adc(r5, 0, carry);
        let (r6, carry) = mac(r6, r3, MODULUS[3], carry);
        let (r7, r8) = adc(r[7], carry2, carry);

        // Result may be within p of the correct value.
        Self::sub_inner(
            [r4, r5, r6, r7, r8],
            [MODULUS[0], MODULUS[1], MODULUS[2], MODULUS[3], 0],
        )
        .0
    }
}

impl ConditionallySelectable for FieldElement {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.to_canonical().0;
        write!(
            f,
            "FieldElement(0x{:016x}{:016x}{:016x}{:016x})",
            w[3], w[2], w[1], w[0]
        )
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DefaultIsZeroes for FieldElement {}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        FieldElement::add(&self, &other)
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = FieldElement::add(self, &other);
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        FieldElement::sub(&self, &other)
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = FieldElement::sub(self, &other);
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        FieldElement::mul(&self, &other)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = FieldElement::mul(self, &other);
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldElement::neg(&self)
    }
}

impl Field for FieldElement {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn square(&self) -> Self {
        FieldElement::square(self)
    }

    fn invert(&self) -> Self {
        FieldElement::invert(self)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::Num;
    use primegroup::Field as _;
    use proptest::{num, prelude::*};

    const B_HEX: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";

    fn modulus() -> BigUint {
        BigUint::from_str_radix(
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            16,
        )
        .unwrap()
    }

    fn to_biguint(fe: &FieldElement) -> BigUint {
        BigUint::from_bytes_be(&fe.to_bytes())
    }

    #[test]
    fn zero_and_one() {
        assert_eq!(FieldElement::ZERO.to_bytes(), [0u8; 32]);

        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(FieldElement::ONE.to_bytes(), one);

        assert_ne!(FieldElement::ZERO, FieldElement::ONE);
        assert!(bool::from(FieldElement::ZERO.is_zero()));
        assert!(!bool::from(FieldElement::ONE.is_zero()));
    }

    #[test]
    fn hex_and_bytes_round_trip() {
        let b = FieldElement::from_hex(B_HEX);
        assert_eq!(b.to_bytes(), hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"));
        assert_eq!(
            FieldElement::from_bytes(&b.to_bytes()).unwrap(),
            b
        );
    }

    #[test]
    fn from_bytes_rejects_out_of_range() {
        assert!(bool::from(FieldElement::from_bytes(&[0xff; 32]).is_none()));

        let p = hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
        assert!(bool::from(FieldElement::from_bytes(&p).is_none()));

        let mut p_minus_one = p;
        p_minus_one[31] = 0xfe;
        assert!(bool::from(FieldElement::from_bytes(&p_minus_one).is_some()));
    }

    #[test]
    fn additive_identities() {
        let one = FieldElement::ONE;
        let two = one.add(&one);

        assert_eq!(one.double(), two);
        assert_eq!(two.sub(&one), one);
        assert_eq!(one.add(&FieldElement::ZERO), one);
        assert_eq!(one.neg().add(&one), FieldElement::ZERO);
        assert_eq!(one.neg().neg(), one);
        assert_eq!(FieldElement::ZERO.neg(), FieldElement::ZERO);
    }

    #[test]
    fn inversion() {
        assert_eq!(FieldElement::ONE.invert(), FieldElement::ONE);

        let two = FieldElement::ONE.double();
        assert_eq!(two.invert().mul(&two), FieldElement::ONE);

        let b = FieldElement::from_hex(B_HEX);
        assert_eq!(b.invert().mul(&b), FieldElement::ONE);
    }

    #[test]
    fn inverse_of_zero_is_zero() {
        // normalization relies on this being total
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    prop_compose! {
        /// Montgomery residues with a clear top limb, well within `[0, p)`.
        fn field_element()(
            w0 in num::u64::ANY,
            w1 in num::u64::ANY,
            w2 in num::u64::ANY,
        ) -> FieldElement {
            FieldElement([w0, w1, w2, 0])
        }
    }

    proptest! {
        #[test]
        fn add_then_sub(a in field_element(), b in field_element()) {
            prop_assert_eq!(a.add(&b).sub(&a), b);
        }

        #[test]
        fn addition_matches_reference(a in field_element(), b in field_element()) {
            let expected = (to_biguint(&a) + to_biguint(&b)) % modulus();
            prop_assert_eq!(to_biguint(&a.add(&b)), expected);
        }

        #[test]
        fn subtraction_matches_reference(a in field_element(), b in field_element()) {
            let expected = (to_biguint(&a) + modulus() - to_biguint(&b)) % modulus();
            prop_assert_eq!(to_biguint(&a.sub(&b)), expected);
        }

        #[test]
        fn multiplication_matches_reference(a in field_element(), b in field_element()) {
            let expected = (to_biguint(&a) * to_biguint(&b)) % modulus();
            prop_assert_eq!(to_biguint(&a.mul(&b)), expected);
        }

        #[test]
        fn inversion_round_trips(a in field_element()) {
            prop_assume!(bool::from(!a.is_zero()));
            prop_assert_eq!(a.invert().mul(&a), FieldElement::ONE);
        }
    }
}
