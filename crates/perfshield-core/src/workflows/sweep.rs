use crate::engine::config::SweepConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::spacing_sweep::{self, SweepOutcome};
use tracing::instrument;

/// Runs the incremental spacing sweep described by `config`.
#[instrument(skip_all, name = "sweep_workflow")]
pub fn run(config: &SweepConfig, reporter: &ProgressReporter) -> Result<SweepOutcome, EngineError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Spacing Sweep",
    });
    let outcome = spacing_sweep::run(config, reporter)?;
    reporter.report(Progress::PhaseFinish);
    Ok(outcome)
}
