pub mod optimize;
pub mod show;
pub mod sweep;

use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use perfshield::core::io::report::TextReport;
use perfshield::core::io::svg::SvgDiagram;
use perfshield::core::io::traits::LayoutWriter;
use perfshield::core::models::candidate::BestConfiguration;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Progress handler for a command run; nothing is drawn in quiet mode.
fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}

/// Prints the text report to `out` and, when requested and possible, writes the diagram.
fn emit_result(best: &BestConfiguration, diagram: Option<&Path>, out: &mut impl Write) -> Result<()> {
    TextReport::write_to(best, out)?;

    let Some(path) = diagram else {
        return Ok(());
    };
    if !best.is_feasible() {
        warn!("Skipping diagram {:?}: the result has no holes to draw.", path);
        return Ok(());
    }

    info!("Writing layout diagram to {:?}", path);
    SvgDiagram::write_to_path(best, path)?;
    writeln!(out, "✓ Diagram written to: {}", path.display())?;
    Ok(())
}
