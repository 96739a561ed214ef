//! Development-related functionality: group-law test suites for concrete
//! curves.

/// Implements the group-law test suite for a concrete [`CurveParams`]
/// implementation.
///
/// Expands to tests for the algebraic laws every supported curve must
/// satisfy: identity and commutativity laws, doubling/addition consistency,
/// negation and subtraction, mixed-addition equivalence, normalization
/// canonicality, constant-time selection and the curve-equation closure of
/// every operation. Invoke it once inside a `#[cfg(test)]` module of the
/// curve crate; published-vector tests remain the curve crate's own
/// responsibility.
///
/// [`CurveParams`]: crate::CurveParams
#[macro_export]
macro_rules! impl_group_law_tests {
    ($curve:ty) => {
        /// First eight multiples of the generator, built by repeated
        /// addition so later tests exercise arbitrary `Z` representatives.
        fn small_multiples() -> [$crate::ProjectivePoint<$curve>; 8] {
            let g = $crate::ProjectivePoint::<$curve>::GENERATOR;
            let mut acc = [g; 8];
            for i in 1..acc.len() {
                acc[i] = acc[i - 1].add(&g);
            }
            acc
        }

        #[test]
        fn identity_laws() {
            let id = $crate::ProjectivePoint::<$curve>::IDENTITY;
            assert_eq!(id.add(&id), id);
            for p in small_multiples() {
                assert_eq!(p.add(&id), p);
                assert_eq!(id.add(&p), p);
            }
        }

        #[test]
        fn addition_is_commutative() {
            for p in small_multiples() {
                for q in small_multiples() {
                    assert_eq!(p.add(&q), q.add(&p));
                }
            }
        }

        #[test]
        fn double_matches_general_addition() {
            let id = $crate::ProjectivePoint::<$curve>::IDENTITY;
            assert_eq!(id.double(), id);
            for p in small_multiples() {
                assert_eq!(p.double(), p.add(&p));
            }
        }

        #[test]
        fn negation_and_subtraction() {
            for p in small_multiples() {
                let q = p.double();
                assert!(bool::from(p.add(&p.neg()).is_identity()));
                assert_eq!(p.sub(&q), p.add(&q.neg()));
                assert_eq!(q.sub(&p), p);
                assert_eq!(p.neg().neg(), p);
            }
        }

        #[test]
        fn mixed_addition_matches_general_addition() {
            let id = $crate::ProjectivePoint::<$curve>::IDENTITY;
            for p in small_multiples() {
                // rescale produces the normalized, non-identity operand
                // that add_mixed requires
                for q in small_multiples() {
                    let q = q.rescale();
                    assert_eq!(p.add_mixed(&q), p.add(&q));
                }
                assert_eq!(id.add_mixed(&p.rescale()), p);
            }
        }

        #[test]
        fn rescale_canonical_forms() {
            type F = <$curve as $crate::CurveParams>::FieldElement;
            let zero = <F as $crate::Field>::ZERO;
            let one = <F as $crate::Field>::ONE;

            for p in small_multiples() {
                let n = p.rescale();
                assert_eq!(n, p);
                assert_eq!(n.z(), one);

                let nn = n.rescale();
                assert_eq!(nn.x(), n.x());
                assert_eq!(nn.y(), n.y());
                assert_eq!(nn.z(), n.z());
            }

            let id = $crate::ProjectivePoint::<$curve>::IDENTITY.rescale();
            assert_eq!(id.x(), zero);
            assert_eq!(id.y(), one);
            assert_eq!(id.z(), zero);
        }

        #[test]
        fn conditional_select_is_coordinate_wise() {
            use $crate::subtle::{Choice, ConditionallySelectable};

            let a = $crate::ProjectivePoint::<$curve>::GENERATOR;
            let b = a.double();

            let sel = $crate::ProjectivePoint::<$curve>::conditional_select(
                &a,
                &b,
                Choice::from(0),
            );
            assert_eq!(sel.x(), a.x());
            assert_eq!(sel.y(), a.y());
            assert_eq!(sel.z(), a.z());

            let sel = $crate::ProjectivePoint::<$curve>::conditional_select(
                &a,
                &b,
                Choice::from(1),
            );
            assert_eq!(sel.x(), b.x());
            assert_eq!(sel.y(), b.y());
            assert_eq!(sel.z(), b.z());
        }

        #[test]
        fn identity_test_tracks_z_coordinate() {
            assert!(bool::from(
                $crate::ProjectivePoint::<$curve>::IDENTITY.is_identity()
            ));
            for p in small_multiples() {
                assert!(!bool::from(p.is_identity()));
                // non-canonical identity representative out of the
                // complete formulas
                assert!(bool::from(p.add(&p.neg()).is_identity()));
            }
        }

        #[test]
        fn every_operation_stays_on_curve() {
            assert!(bool::from(
                $crate::ProjectivePoint::<$curve>::IDENTITY.is_on_curve()
            ));
            for p in small_multiples() {
                assert!(bool::from(p.is_on_curve()));
                assert!(bool::from(p.neg().is_on_curve()));
                assert!(bool::from(p.double().is_on_curve()));
                assert!(bool::from(p.rescale().is_on_curve()));
                assert!(bool::from(p.add(&p.neg()).is_on_curve()));
                for q in small_multiples() {
                    assert!(bool::from(p.add(&q).is_on_curve()));
                    assert!(bool::from(p.sub(&q).is_on_curve()));
                }
            }
        }
    };
}
