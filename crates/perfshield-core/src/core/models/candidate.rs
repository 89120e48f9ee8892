use super::layout::HoleLayout;
use super::plate::PlateDimensions;
use crate::core::constants::HOLE_ASPECT_RATIO;
use crate::core::effectiveness::shielding_effectiveness;

/// One evaluated point of the search space.
///
/// All lengths are in metres. `hole_width` is always `HOLE_ASPECT_RATIO * hole_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub hole_height: f64,
    pub hole_width: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub columns: u64,
    pub rows: u64,
    pub hole_count: u64,
    /// Shielding effectiveness in dB.
    pub effectiveness_db: f64,
    /// Share of the plate surface occupied by holes, in percent.
    pub open_area_percent: f64,
}

impl Candidate {
    /// Evaluates a (height, horizontal spacing, vertical spacing) triple on `plate`.
    ///
    /// Returns `None` when no full hole fits along one of the axes (an infeasible layout),
    /// or when the hole count does not fit in a `u64`.
    pub fn evaluate(
        wavelength: f64,
        plate: &PlateDimensions,
        hole_height: f64,
        horizontal_spacing: f64,
        vertical_spacing: f64,
    ) -> Option<Self> {
        let hole_width = HOLE_ASPECT_RATIO * hole_height;
        let columns = fit_count(plate.width, hole_width + horizontal_spacing);
        let rows = fit_count(plate.height, hole_height + vertical_spacing);
        let hole_count = columns.checked_mul(rows)?;
        if hole_count == 0 {
            return None;
        }

        let effectiveness_db = shielding_effectiveness(hole_count, wavelength, hole_height);
        let open_area_percent =
            hole_count as f64 * hole_width * hole_height / plate.area() * 100.0;

        Some(Self {
            hole_height,
            hole_width,
            horizontal_spacing,
            vertical_spacing,
            columns,
            rows,
            hole_count,
            effectiveness_db,
            open_area_percent,
        })
    }

    /// The starting point of every search: no holes and the worst possible score.
    pub fn sentinel() -> Self {
        Self {
            hole_height: 0.0,
            hole_width: 0.0,
            horizontal_spacing: 0.0,
            vertical_spacing: 0.0,
            columns: 0,
            rows: 0,
            hole_count: 0,
            effectiveness_db: f64::NEG_INFINITY,
            open_area_percent: 0.0,
        }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.hole_count == 0
    }

    /// Absolute distance between this candidate's effectiveness and `target_db`.
    ///
    /// The sentinel is infinitely far from any finite target.
    #[inline]
    pub fn distance_to(&self, target_db: f64) -> f64 {
        (self.effectiveness_db - target_db).abs()
    }
}

fn fit_count(extent: f64, pitch: f64) -> u64 {
    let fitted = (extent / pitch).floor();
    if fitted.is_finite() && fitted > 0.0 {
        fitted as u64
    } else {
        0
    }
}

/// Counters collected while a search runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Number of configurations visited.
    pub evaluated: usize,
    /// Visited configurations with no feasible layout.
    pub discarded: usize,
    /// Every candidate that replaced the incumbent, in acceptance order.
    pub improvements: Vec<Candidate>,
}

/// Outcome of a search: the winning candidate, or the sentinel if nothing qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct BestConfiguration {
    pub plate: PlateDimensions,
    pub candidate: Candidate,
    pub stats: SearchStats,
}

impl BestConfiguration {
    pub fn infeasible(plate: PlateDimensions, stats: SearchStats) -> Self {
        Self {
            plate,
            candidate: Candidate::sentinel(),
            stats,
        }
    }

    /// `false` when the search found no acceptable layout. Consumers must check this
    /// before describing or drawing the configuration.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        !self.candidate.is_sentinel()
    }

    /// Hole positions for the winning configuration, if there is one.
    pub fn layout(&self) -> Option<HoleLayout> {
        self.is_feasible()
            .then(|| HoleLayout::from_candidate(self.plate, &self.candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WAVELENGTH: f64 = 3.0e8 / 3.26e9;

    fn plate() -> PlateDimensions {
        PlateDimensions::new(0.5, 0.5)
    }

    #[test]
    fn evaluate_derives_width_from_fixed_aspect_ratio() {
        for height in [0.015, 0.0172, 0.02, 0.025] {
            let candidate = Candidate::evaluate(WAVELENGTH, &plate(), height, 0.01, 0.01).unwrap();
            assert_relative_eq!(
                candidate.hole_width / candidate.hole_height,
                2.0 / 3.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn evaluate_counts_columns_and_rows_independently() {
        let candidate = Candidate::evaluate(WAVELENGTH, &plate(), 0.015, 0.03, 0.03).unwrap();
        assert_eq!(candidate.columns, 12);
        assert_eq!(candidate.rows, 11);
        assert_eq!(candidate.hole_count, 132);
    }

    #[test]
    fn evaluate_computes_effectiveness_and_open_area() {
        let candidate = Candidate::evaluate(WAVELENGTH, &plate(), 0.015, 0.03, 0.03).unwrap();
        let expected_db = shielding_effectiveness(132, WAVELENGTH, 0.015);
        assert_relative_eq!(candidate.effectiveness_db, expected_db, epsilon = 1e-12);
        let expected_open = 132.0 * 0.01 * 0.015 / 0.25 * 100.0;
        assert_relative_eq!(candidate.open_area_percent, expected_open, epsilon = 1e-9);
    }

    #[test]
    fn evaluate_rejects_layout_when_a_hole_does_not_fit() {
        assert!(Candidate::evaluate(WAVELENGTH, &plate(), 0.3, 0.35, 0.0).is_none());
        assert!(Candidate::evaluate(WAVELENGTH, &plate(), 0.03, 0.0, 0.6).is_none());
    }

    #[test]
    fn evaluate_rejects_hole_counts_beyond_u64() {
        let huge = PlateDimensions::new(1e6, 1e6);
        assert!(Candidate::evaluate(WAVELENGTH, &huge, 1e-9, 0.0, 0.0).is_none());
    }

    #[test]
    fn sentinel_is_infinitely_far_from_any_target() {
        let sentinel = Candidate::sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.distance_to(8.0), f64::INFINITY);
        assert_eq!(sentinel.distance_to(-40.0), f64::INFINITY);
    }

    #[test]
    fn infeasible_configuration_has_no_layout() {
        let best = BestConfiguration::infeasible(plate(), SearchStats::default());
        assert!(!best.is_feasible());
        assert!(best.layout().is_none());
    }
}
