use super::{emit_result, progress_handler};
use crate::cli::SweepArgs;
use crate::config::builder::build_sweep_config;
use crate::error::Result;
use perfshield::core::constants::MM_PER_M;
use perfshield::engine::progress::ProgressReporter;
use perfshield::workflows;
use tracing::{info, warn};

pub fn run(args: SweepArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let config = build_sweep_config(&args)?;

    let progress_handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Sweeping spacing for {:.2} mm holes in {:.2} mm steps...",
        config.hole_height * MM_PER_M,
        config.step * MM_PER_M
    );
    let outcome = workflows::sweep::run(&config, &reporter)?;

    if outcome.reached_target() {
        info!(
            steps = outcome.steps,
            spacing = outcome.final_spacing,
            "Sweep reached the target."
        );
    } else {
        warn!(
            steps = outcome.steps,
            spacing = outcome.final_spacing,
            "Sweep ran out of room before reaching the target."
        );
    }
    println!(
        "Stopped at {:.2} mm spacing after {} steps.",
        outcome.final_spacing * MM_PER_M,
        outcome.steps
    );

    emit_result(
        &outcome.best,
        args.diagram.as_deref(),
        &mut std::io::stdout().lock(),
    )
}
