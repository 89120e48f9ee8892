/// Shielding effectiveness of a single rectangular aperture, in dB.
///
/// The aperture behaves as a slot whose attenuation is set by its larger
/// dimension relative to half a wavelength.
#[inline]
pub fn single_aperture(wavelength: f64, hole_height: f64) -> f64 {
    20.0 * (wavelength / (2.0 * hole_height)).log10()
}

/// Shielding effectiveness of an array of `hole_count` identical apertures, in dB.
///
/// Returns `f64::INFINITY` when there are no holes: with no transmission path the
/// value is a sentinel, not a usable score. Callers must guarantee positive
/// `wavelength` and `hole_height`; the logarithm is taken without validation.
#[inline]
pub fn shielding_effectiveness(hole_count: u64, wavelength: f64, hole_height: f64) -> f64 {
    if hole_count == 0 {
        return f64::INFINITY;
    }
    single_aperture(wavelength, hole_height) - 20.0 * (hole_count as f64).sqrt().log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WAVELENGTH: f64 = 3.0e8 / 3.26e9;

    #[test]
    fn zero_holes_yields_infinite_effectiveness() {
        assert_eq!(shielding_effectiveness(0, WAVELENGTH, 0.03), f64::INFINITY);
        assert_eq!(shielding_effectiveness(0, 1.0, 1e-6), f64::INFINITY);
    }

    #[test]
    fn single_hole_matches_single_aperture_formula() {
        let expected = 20.0 * (WAVELENGTH / 0.06).log10();
        assert_relative_eq!(
            shielding_effectiveness(1, WAVELENGTH, 0.03),
            expected,
            epsilon = 1e-12
        );
        assert_relative_eq!(expected, 3.71505, epsilon = 1e-5);
    }

    #[test]
    fn array_reduction_equals_ten_log_of_hole_count() {
        let single = single_aperture(WAVELENGTH, 0.02);
        for n in [2_u64, 4, 10, 132, 625] {
            let total = shielding_effectiveness(n, WAVELENGTH, 0.02);
            assert_relative_eq!(single - total, 10.0 * (n as f64).log10(), epsilon = 1e-9);
        }
    }

    #[test]
    fn effectiveness_decreases_as_hole_count_grows() {
        let one = shielding_effectiveness(1, WAVELENGTH, 0.015);
        let four = shielding_effectiveness(4, WAVELENGTH, 0.015);
        assert!(four.is_finite());
        assert!(four < one);
        assert_relative_eq!(one - four, 20.0 * 2.0_f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn smaller_holes_shield_better() {
        assert!(single_aperture(WAVELENGTH, 0.015) > single_aperture(WAVELENGTH, 0.025));
    }

    #[test]
    fn non_positive_height_produces_non_finite_value() {
        assert!(!shielding_effectiveness(1, WAVELENGTH, 0.0).is_finite());
        assert!(shielding_effectiveness(1, WAVELENGTH, -0.01).is_nan());
    }
}
