#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod field;
mod limb;

pub use crate::field::FieldElement;
pub use primegroup::{self, CurveParams};

/// NIST P-256 elliptic curve (a.k.a. secp256r1, prime256v1).
///
/// Defined in SP 800-186: `y² = x³ − 3x + b` over the prime field of
/// [`FieldElement`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP256;

impl CurveParams for NistP256 {
    type FieldElement = FieldElement;

    const B: FieldElement =
        FieldElement::from_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        FieldElement::from_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
    );
}

/// P-256 point in projective coordinates.
pub type ProjectivePoint = primegroup::ProjectivePoint<NistP256>;

#[cfg(test)]
mod tests {
    use crate::{FieldElement, NistP256, ProjectivePoint};
    use hex_literal::hex;
    use primegroup::impl_group_law_tests;

    impl_group_law_tests!(NistP256);

    /// Affine coordinates of kG for k = 1..=5, from the published P-256
    /// point multiplication vectors.
    const MULTIPLES_OF_G: [([u8; 32], [u8; 32]); 5] = [
        (
            hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
            hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        ),
        (
            hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"),
            hex!("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1"),
        ),
        (
            hex!("5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c"),
            hex!("8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032"),
        ),
        (
            hex!("e2534a3532d08fbba02dde659ee62bd0031fe2db785596ef509302446b030852"),
            hex!("e0f1575a4c633cc719dfee5fda862d764efc96c3f30ee0055c42c23f184ed8c6"),
        ),
        (
            hex!("51590b7a515140d2d784c85608668fdfef8c82fd1f5be52421554a0dc3d033ed"),
            hex!("e0c17da8904a727d8ae1bf36bf8a79260d012f00d4d80888d1d0bb44fda16da4"),
        ),
    ];

    fn assert_point_eq(actual: &ProjectivePoint, expected: &([u8; 32], [u8; 32])) {
        let normalized = actual.rescale();
        assert_eq!(normalized.x().to_bytes(), expected.0);
        assert_eq!(normalized.y().to_bytes(), expected.1);
    }

    #[test]
    fn generator_matches_published_base_point() {
        assert_point_eq(&ProjectivePoint::GENERATOR, &MULTIPLES_OF_G[0]);
        assert!(bool::from(ProjectivePoint::GENERATOR.is_on_curve()));
    }

    #[test]
    fn double_generator_matches_published_2g() {
        assert_point_eq(&ProjectivePoint::GENERATOR.double(), &MULTIPLES_OF_G[1]);
    }

    #[test]
    fn add_matches_published_3g() {
        let g = ProjectivePoint::GENERATOR;
        assert_point_eq(&g.add(&g.double()), &MULTIPLES_OF_G[2]);
    }

    #[test]
    fn repeated_add_walks_published_multiples() {
        let g = ProjectivePoint::GENERATOR;
        let mut p = g;

        for expected in &MULTIPLES_OF_G {
            assert_point_eq(&p, expected);
            p += &g;
        }
    }

    #[test]
    fn repeated_add_mixed_walks_published_multiples() {
        // the generator constant is already normalized, as add_mixed requires
        let g = ProjectivePoint::GENERATOR;
        let mut p = g;

        for expected in &MULTIPLES_OF_G {
            assert_point_eq(&p, expected);
            p = p.add_mixed(&g);
        }
    }

    #[test]
    fn adding_opposite_yields_canonical_identity() {
        let g = ProjectivePoint::GENERATOR;
        let id = g.add(&g.neg()).rescale();

        assert_eq!(id.x(), FieldElement::ZERO);
        assert_eq!(id.y(), FieldElement::ONE);
        assert_eq!(id.z(), FieldElement::ZERO);
    }

    #[test]
    fn from_affine_validates_coordinates() {
        let (gx, gy) = <NistP256 as crate::CurveParams>::GENERATOR;

        let g = ProjectivePoint::from_affine(gx, gy).unwrap();
        assert_eq!(g, ProjectivePoint::GENERATOR);

        // x as both coordinates is not a curve point
        assert!(bool::from(ProjectivePoint::from_affine(gx, gx).is_none()));
    }
}
