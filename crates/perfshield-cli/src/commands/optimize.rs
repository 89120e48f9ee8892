use super::{emit_result, progress_handler};
use crate::cli::OptimizeArgs;
use crate::config::builder::build_design_config;
use crate::error::Result;
use perfshield::engine::progress::ProgressReporter;
use perfshield::workflows;
use tracing::{info, warn};

pub fn run(args: OptimizeArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let config = build_design_config(&args)?;

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Searching {} configurations ({} rule)...",
        config.search.size(),
        config.selection
    );
    info!("Invoking the design workflow...");
    let best = workflows::design::run(&config, &reporter)?;

    info!(
        evaluated = best.stats.evaluated,
        discarded = best.stats.discarded,
        improvements = best.stats.improvements.len(),
        "Grid search finished."
    );
    if !best.is_feasible() {
        warn!("Workflow completed but found no feasible configuration.");
    }

    emit_result(&best, args.diagram.as_deref(), &mut std::io::stdout().lock())
}
