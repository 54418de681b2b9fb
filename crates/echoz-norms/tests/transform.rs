use echoz_core::error::DomainError;
use echoz_norms::transform::normalize;
use proptest::prelude::*;

#[test]
fn indexes_by_bsa_power() {
    let bsa = 1.8256771247769754_f64;
    let z = normalize(4.2, bsa, 0.45, 3.89, 0.33).unwrap();
    let expected = (4.2 / bsa.powf(0.45) - 3.89) / 0.33;
    assert!((z - expected).abs() <= 1e-9 * expected.abs());
}

#[test]
fn zero_sd_is_checked_before_bsa() {
    assert_eq!(
        normalize(1.0, -1.0, 0.5, 1.0, 0.0),
        Err(DomainError::ZeroStandardDeviation)
    );
}

#[test]
fn nan_bsa_is_rejected() {
    assert!(matches!(
        normalize(1.0, f64::NAN, 0.5, 1.0, 0.2),
        Err(DomainError::NonPositiveBodySurfaceArea(_))
    ));
}

proptest! {
    #[test]
    fn zero_exponent_ignores_bsa(
        value in -1e3f64..1e3,
        bsa in 1e-3f64..10.0,
        mean in -1e3f64..1e3,
        sd in prop_oneof![-1e3f64..-1e-3, 1e-3f64..1e3],
    ) {
        let z = normalize(value, bsa, 0.0, mean, sd).unwrap();
        prop_assert_eq!(z, (value - mean) / sd);
    }

    #[test]
    fn zero_sd_always_fails(
        value in -1e3f64..1e3,
        bsa in -10.0f64..10.0,
        exponent in 0.0f64..2.0,
        mean in -1e3f64..1e3,
    ) {
        prop_assert_eq!(
            normalize(value, bsa, exponent, mean, 0.0),
            Err(DomainError::ZeroStandardDeviation)
        );
    }

    #[test]
    fn non_positive_bsa_always_fails(
        value in -1e3f64..1e3,
        bsa in -10.0f64..=0.0,
        exponent in 0.0f64..2.0,
        mean in -1e3f64..1e3,
        sd in 1e-3f64..1e3,
    ) {
        prop_assert_eq!(
            normalize(value, bsa, exponent, mean, sd),
            Err(DomainError::NonPositiveBodySurfaceArea(bsa))
        );
    }
}
