use super::traits::LayoutWriter;
use crate::core::constants::MM_PER_M;
use crate::core::models::candidate::BestConfiguration;
use std::io::{self, Write};

pub const NO_SOLUTION_MESSAGE: &str =
    "No feasible solution found. Try reducing the hole size or increasing the spacing.";

/// Plain-text summary of a search result.
///
/// An infeasible result is reported as a single line, never as an error.
pub struct TextReport;

impl LayoutWriter for TextReport {
    type Error = io::Error;

    fn write_to(best: &BestConfiguration, writer: &mut impl Write) -> Result<(), Self::Error> {
        if !best.is_feasible() {
            writeln!(writer, "{}", NO_SOLUTION_MESSAGE)?;
            return Ok(());
        }

        let c = &best.candidate;
        writeln!(writer, "Optimal perforation:")?;
        writeln!(
            writer,
            "  Holes:               {} ({} columns x {} rows)",
            c.hole_count, c.columns, c.rows
        )?;
        writeln!(
            writer,
            "  Hole width:          {:.2} mm",
            c.hole_width * MM_PER_M
        )?;
        writeln!(
            writer,
            "  Hole height:         {:.2} mm (width:height = 2:3)",
            c.hole_height * MM_PER_M
        )?;
        writeln!(
            writer,
            "  Horizontal spacing:  {:.2} mm",
            c.horizontal_spacing * MM_PER_M
        )?;
        writeln!(
            writer,
            "  Vertical spacing:    {:.2} mm",
            c.vertical_spacing * MM_PER_M
        )?;
        writeln!(
            writer,
            "  Effectiveness:       {:.2} dB",
            c.effectiveness_db
        )?;
        writeln!(
            writer,
            "  Open area:           {:.2} %",
            c.open_area_percent
        )?;
        Ok(())
    }
}
