use crate::core::models::candidate::BestConfiguration;
use crate::engine::config::DesignConfig;
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::grid_search;
use tracing::{info, instrument, warn};

/// Runs the grid search described by `config` with its configured selection rule.
///
/// An empty result is not an error: check [`BestConfiguration::is_feasible`].
#[instrument(skip_all, name = "design_workflow")]
pub fn run(
    config: &DesignConfig,
    reporter: &ProgressReporter,
) -> Result<BestConfiguration, EngineError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Grid Search",
    });
    let policy = config.selection.policy(&config.search);
    let context = SearchContext::new(&config.constants, &config.plate, &config.search, reporter);
    let best = grid_search::run(&context, policy.as_ref());

    if best.is_feasible() {
        info!(
            hole_count = best.candidate.hole_count,
            effectiveness_db = best.candidate.effectiveness_db,
            "Design workflow found a configuration."
        );
    } else {
        warn!(
            rule = %config.selection,
            "No configuration in the search space satisfies the selection rule."
        );
        reporter.report_with(|| {
            Progress::Message(format!(
                "No candidate satisfies the {} rule ({} of {} had no room for a hole).",
                config.selection, best.stats.discarded, best.stats.evaluated
            ))
        });
    }
    reporter.report(Progress::PhaseFinish);
    Ok(best)
}
