use crate::core::models::candidate::{BestConfiguration, Candidate, SearchStats};
use crate::core::models::physics::PhysicalConstants;
use crate::core::models::plate::PlateDimensions;
use crate::engine::config::SearchSpace;
use crate::engine::context::SearchContext;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::selection::SelectionPolicy;
use itertools::iproduct;
use tracing::{debug, info, instrument, trace};

/// Exhaustively searches `space` without progress reporting.
pub fn optimize(
    constants: &PhysicalConstants,
    plate: &PlateDimensions,
    space: &SearchSpace,
    policy: &dyn SelectionPolicy,
) -> BestConfiguration {
    let reporter = ProgressReporter::new();
    run(&SearchContext::new(constants, plate, space, &reporter), policy)
}

/// Visits every triple of the search space in the order the sequences are given
/// (hole height outermost, vertical spacing innermost).
///
/// Triples that fit no hole on the plate are discarded. Every other triple is offered
/// to `policy`; the incumbent only changes when the policy prefers the newcomer, so
/// the earliest of several equally-scored candidates is kept. If nothing is accepted
/// the result is infeasible.
#[instrument(skip_all, name = "grid_search_task")]
pub fn run(context: &SearchContext, policy: &dyn SelectionPolicy) -> BestConfiguration {
    let space = context.space;
    let wavelength = context.constants.wavelength();
    info!(
        policy = policy.name(),
        triples = space.size(),
        wavelength,
        target_db = space.target_db(),
        floor_db = space.floor_db(),
        "Starting grid search."
    );
    context.reporter.report(Progress::TaskStart {
        total_steps: space.size() as u64,
    });

    let mut best = Candidate::sentinel();
    let mut stats = SearchStats::default();

    for (&hole_height, &horizontal_spacing, &vertical_spacing) in iproduct!(
        space.hole_heights(),
        space.horizontal_spacings(),
        space.vertical_spacings()
    ) {
        stats.evaluated += 1;
        context.reporter.report(Progress::TaskIncrement);

        let Some(candidate) = Candidate::evaluate(
            wavelength,
            context.plate,
            hole_height,
            horizontal_spacing,
            vertical_spacing,
        ) else {
            stats.discarded += 1;
            trace!(
                hole_height,
                horizontal_spacing,
                vertical_spacing,
                "No hole fits; discarded."
            );
            continue;
        };

        if policy.prefers(&candidate, &best) {
            debug!(
                hole_height,
                horizontal_spacing,
                vertical_spacing,
                hole_count = candidate.hole_count,
                effectiveness_db = candidate.effectiveness_db,
                open_area_percent = candidate.open_area_percent,
                "New best candidate."
            );
            context.reporter.report(Progress::Improved(candidate));
            stats.improvements.push(candidate);
            best = candidate;
        }
    }

    context.reporter.report(Progress::TaskFinish);
    info!(
        evaluated = stats.evaluated,
        discarded = stats.discarded,
        improvements = stats.improvements.len(),
        feasible = !best.is_sentinel(),
        "Grid search complete."
    );

    if best.is_sentinel() {
        BestConfiguration::infeasible(*context.plate, stats)
    } else {
        BestConfiguration {
            plate: *context.plate,
            candidate: best,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::HOLE_ASPECT_RATIO;
    use crate::engine::config::{SelectionRule, ValueRange};
    use crate::engine::selection::{FloorEnforcing, OpenAreaTieBreak};
    use approx::assert_relative_eq;
    use std::sync::Mutex;

    fn constants() -> PhysicalConstants {
        PhysicalConstants::at_frequency(3.26e9)
    }

    fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
        ValueRange::linspace(start, stop, count).expand("test").unwrap()
    }

    /// Small plate with a mix of candidates above and below 10 dB.
    fn mixed_space(target_db: f64, floor_db: f64) -> (PlateDimensions, SearchSpace) {
        let plate = PlateDimensions::new(0.1, 0.1);
        let space = SearchSpace::new(
            vec![0.004, 0.006, 0.008, 0.01],
            linspace(0.0, 0.09, 10),
            linspace(0.0, 0.09, 10),
            target_db,
            floor_db,
        )
        .unwrap();
        (plate, space)
    }

    fn all_candidates(plate: &PlateDimensions, space: &SearchSpace) -> Vec<Candidate> {
        let wavelength = constants().wavelength();
        iproduct!(
            space.hole_heights(),
            space.horizontal_spacings(),
            space.vertical_spacings()
        )
        .filter_map(|(&h, &sx, &sy)| Candidate::evaluate(wavelength, plate, h, sx, sy))
        .collect()
    }

    #[test]
    fn distance_to_target_never_regresses() {
        let (plate, space) = mixed_space(12.0, 10.0);
        let policy = FloorEnforcing {
            target_db: 12.0,
            floor_db: 10.0,
        };
        let best = optimize(&constants(), &plate, &space, &policy);

        assert!(best.is_feasible());
        let distances: Vec<f64> = best
            .stats
            .improvements
            .iter()
            .map(|c| c.distance_to(12.0))
            .collect();
        assert!(distances.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(best.stats.improvements.last(), Some(&best.candidate));
    }

    #[test]
    fn floor_is_never_violated_and_best_is_closest_above_floor() {
        // Target below the floor: the closest candidates overall are all rejected.
        let (plate, space) = mixed_space(8.0, 10.0);
        let policy = FloorEnforcing {
            target_db: 8.0,
            floor_db: 10.0,
        };
        let best = optimize(&constants(), &plate, &space, &policy);

        assert!(best.is_feasible());
        for accepted in &best.stats.improvements {
            assert!(accepted.effectiveness_db >= 10.0);
        }
        let below_floor_but_closer = all_candidates(&plate, &space).into_iter().any(|c| {
            c.effectiveness_db < 10.0 && c.distance_to(8.0) < best.candidate.distance_to(8.0)
        });
        assert!(below_floor_but_closer);

        let closest = all_candidates(&plate, &space)
            .into_iter()
            .filter(|c| c.effectiveness_db >= 10.0)
            .map(|c| c.distance_to(8.0))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best.candidate.distance_to(8.0), closest);
    }

    #[test]
    fn every_evaluated_candidate_keeps_two_to_three_aspect() {
        let (plate, space) = mixed_space(12.0, 10.0);
        for candidate in all_candidates(&plate, &space) {
            assert_relative_eq!(
                candidate.hole_width / candidate.hole_height,
                HOLE_ASPECT_RATIO,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn floor_above_every_candidate_yields_infeasible_result() {
        let (plate, space) = mixed_space(40.0, 40.0);
        let policy = SelectionRule::FloorEnforcing.policy(&space);
        let best = optimize(&constants(), &plate, &space, policy.as_ref());

        assert!(!best.is_feasible());
        assert_eq!(best.candidate.hole_count, 0);
        assert!(best.stats.improvements.is_empty());
        assert_eq!(best.stats.evaluated, space.size());
    }

    #[test]
    fn oversized_holes_discard_every_triple() {
        let plate = PlateDimensions::new(0.05, 0.05);
        let space =
            SearchSpace::new(vec![0.06, 0.08], vec![0.0, 0.01], vec![0.0, 0.01], 8.0, 8.0).unwrap();
        let policy = OpenAreaTieBreak { target_db: 8.0 };
        let best = optimize(&constants(), &plate, &space, &policy);

        assert!(!best.is_feasible());
        assert_eq!(best.stats.evaluated, 8);
        assert_eq!(best.stats.discarded, 8);
    }

    #[test]
    fn tie_break_rule_picks_highest_effectiveness_when_all_fall_short() {
        let plate = PlateDimensions::new(0.5, 0.5);
        let space = SearchSpace::new(
            linspace(0.015, 0.025, 10),
            linspace(0.01, 0.03, 10),
            linspace(0.01, 0.03, 10),
            8.0,
            8.0,
        )
        .unwrap();
        let best = optimize(
            &constants(),
            &plate,
            &space,
            &OpenAreaTieBreak { target_db: 8.0 },
        );

        let highest = all_candidates(&plate, &space)
            .into_iter()
            .map(|c| c.effectiveness_db)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(highest < 8.0);
        assert_eq!(best.candidate.effectiveness_db, highest);
    }

    #[test]
    fn earliest_of_equally_scored_candidates_wins() {
        // Both vertical spacings give one row, so both triples score identically.
        let plate = PlateDimensions::new(0.1, 0.1);
        let space = SearchSpace::new(vec![0.03], vec![0.05], vec![0.04, 0.05], 40.0, -100.0)
            .unwrap();
        let best = optimize(
            &constants(),
            &plate,
            &space,
            &FloorEnforcing {
                target_db: 40.0,
                floor_db: -100.0,
            },
        );
        assert_eq!(best.stats.improvements.len(), 1);
        assert_eq!(best.candidate.vertical_spacing, 0.04);
    }

    #[test]
    fn progress_is_reported_for_every_triple() {
        let (plate, space) = mixed_space(12.0, 10.0);
        let increments = Mutex::new(0_u64);
        let improvements = Mutex::new(0_usize);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement => *increments.lock().unwrap() += 1,
            Progress::Improved(_) => *improvements.lock().unwrap() += 1,
            _ => {}
        }));
        let constants = constants();
        let context = SearchContext::new(&constants, &plate, &space, &reporter);
        let policy = FloorEnforcing {
            target_db: 12.0,
            floor_db: 10.0,
        };
        let best = run(&context, &policy);
        drop(reporter);

        assert_eq!(increments.into_inner().unwrap(), space.size() as u64);
        assert_eq!(
            improvements.into_inner().unwrap(),
            best.stats.improvements.len()
        );
    }
}
