use crate::core::models::candidate::{BestConfiguration, Candidate, SearchStats};
use crate::engine::config::SweepConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, trace};

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// The first configuration reaching the target, or infeasible if the layout
    /// emptied out first.
    pub best: BestConfiguration,
    /// Spacing at which the sweep stopped, in metres.
    pub final_spacing: f64,
    pub steps: usize,
}

impl SweepOutcome {
    pub fn reached_target(&self) -> bool {
        self.best.is_feasible()
    }
}

/// Grows a spacing shared by both axes from zero in increments of `config.step`
/// (spacing `k * step` at step `k`) and stops at the first spacing whose layout
/// reaches the target effectiveness.
///
/// A spacing that leaves no room for a single hole also stops the sweep: its
/// effectiveness is the infinite sentinel, which does not count as reaching the
/// target, and the outcome is infeasible.
#[instrument(skip_all, name = "spacing_sweep_task")]
pub fn run(config: &SweepConfig, reporter: &ProgressReporter) -> Result<SweepOutcome, EngineError> {
    let wavelength = config.constants.wavelength();
    let max_steps = config.max_steps();
    info!(
        hole_height = config.hole_height,
        step = config.step,
        target_db = config.target_db,
        max_steps,
        "Starting spacing sweep."
    );
    reporter.report(Progress::TaskStart {
        total_steps: max_steps as u64 + 1,
    });

    let mut stats = SearchStats::default();
    for k in 0..=max_steps {
        let spacing = k as f64 * config.step;
        stats.evaluated += 1;
        reporter.report(Progress::TaskIncrement);

        match Candidate::evaluate(
            wavelength,
            &config.plate,
            config.hole_height,
            spacing,
            spacing,
        ) {
            None => {
                stats.discarded += 1;
                reporter.report(Progress::TaskFinish);
                info!(
                    spacing,
                    steps = k + 1,
                    "Layout emptied before the target was reached."
                );
                return Ok(SweepOutcome {
                    best: BestConfiguration::infeasible(config.plate, stats),
                    final_spacing: spacing,
                    steps: k + 1,
                });
            }
            Some(candidate) if candidate.effectiveness_db >= config.target_db => {
                reporter.report(Progress::Improved(candidate));
                reporter.report(Progress::TaskFinish);
                stats.improvements.push(candidate);
                info!(
                    spacing,
                    steps = k + 1,
                    hole_count = candidate.hole_count,
                    effectiveness_db = candidate.effectiveness_db,
                    "Target reached."
                );
                return Ok(SweepOutcome {
                    best: BestConfiguration {
                        plate: config.plate,
                        candidate,
                        stats,
                    },
                    final_spacing: spacing,
                    steps: k + 1,
                });
            }
            Some(candidate) => {
                trace!(
                    spacing,
                    hole_count = candidate.hole_count,
                    effectiveness_db = candidate.effectiveness_db,
                    "Below target."
                );
            }
        }
    }

    reporter.report(Progress::TaskFinish);
    Err(EngineError::SweepExhausted {
        steps: max_steps + 1,
    })
}
