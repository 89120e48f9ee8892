//! SVG rendering of a hole layout with dimension callouts.
//!
//! The drawing works directly in metres: the `viewBox` is the plate plus a margin,
//! so both axes share one scale. SVG's `y` axis points down, which puts the origin
//! at the plate's top-left corner.

use super::traits::LayoutWriter;
use crate::core::constants::MM_PER_M;
use crate::core::models::candidate::BestConfiguration;
use crate::core::models::layout::HoleLayout;
use std::io::{self, Write};
use thiserror::Error;

const CANVAS_WIDTH_PX: f64 = 800.0;
const MARGIN_FRACTION: f64 = 0.18;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Cannot draw a layout without holes")]
    Infeasible,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Dimensioned SVG drawing of the winning hole grid.
pub struct SvgDiagram;

impl LayoutWriter for SvgDiagram {
    type Error = DiagramError;

    fn write_to(best: &BestConfiguration, writer: &mut impl Write) -> Result<(), Self::Error> {
        let layout = best.layout().ok_or(DiagramError::Infeasible)?;
        let style = Style::for_layout(&layout);
        let plate = layout.plate;

        let view_width = plate.width + 2.0 * style.margin;
        let view_height = plate.height + 2.0 * style.margin;
        let canvas_height = CANVAS_WIDTH_PX * view_height / view_width;

        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{:.6} {:.6} {:.6} {:.6}">"#,
            CANVAS_WIDTH_PX, canvas_height, -style.margin, -style.margin, view_width, view_height
        )?;
        writeln!(
            writer,
            r#"<defs><marker id="arrow" viewBox="0 0 10 10" refX="5" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="black"/></marker></defs>"#
        )?;
        writeln!(
            writer,
            r##"<rect x="0" y="0" width="{:.6}" height="{:.6}" fill="#d9d9d9" stroke="black" stroke-width="{:.6}"/>"##,
            plate.width, plate.height, style.stroke
        )?;

        writeln!(
            writer,
            r#"<g id="holes" fill="white" stroke="black" stroke-width="{:.6}">"#,
            style.thin
        )?;
        for hole in layout.holes() {
            writeln!(
                writer,
                r#"<rect x="{:.6}" y="{:.6}" width="{:.6}" height="{:.6}"/>"#,
                hole.x, hole.y, hole.width, hole.height
            )?;
        }
        writeln!(writer, "</g>")?;

        write_callouts(writer, &layout, &style)?;
        writeln!(writer, "</svg>")?;
        Ok(())
    }
}

struct Style {
    margin: f64,
    stroke: f64,
    thin: f64,
    font: f64,
}

impl Style {
    fn for_layout(layout: &HoleLayout) -> Self {
        let scale = layout.plate.longest_side();
        Self {
            margin: scale * MARGIN_FRACTION,
            stroke: scale * 0.003,
            thin: scale * 0.0015,
            font: scale * 0.022,
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A measured span along one axis, drawn at a fixed offset from the plate.
struct Dimension<'a> {
    axis: Axis,
    from: f64,
    to: f64,
    offset: f64,
    label: &'a str,
}

fn write_callouts(writer: &mut impl Write, layout: &HoleLayout, style: &Style) -> io::Result<()> {
    let plate = layout.plate;
    let near = style.margin * 0.3;
    let far = style.margin * 0.65;

    let plate_width = format!("plate {}", mm(plate.width));
    let plate_height = format!("plate {}", mm(plate.height));
    let hole_width = format!("w {}", mm(layout.hole_width));
    let hole_height = format!("h {}", mm(layout.hole_height));
    let h_spacing = format!("sx {}", mm(layout.horizontal_spacing));
    let v_spacing = format!("sy {}", mm(layout.vertical_spacing));

    let dimensions = [
        Dimension {
            axis: Axis::Horizontal,
            from: 0.0,
            to: plate.width,
            offset: -near,
            label: &plate_width,
        },
        Dimension {
            axis: Axis::Vertical,
            from: 0.0,
            to: plate.height,
            offset: -near,
            label: &plate_height,
        },
        Dimension {
            axis: Axis::Horizontal,
            from: 0.0,
            to: layout.hole_width,
            offset: plate.height + near,
            label: &hole_width,
        },
        Dimension {
            axis: Axis::Horizontal,
            from: layout.hole_width,
            to: layout.column_pitch(),
            offset: plate.height + far,
            label: &h_spacing,
        },
        Dimension {
            axis: Axis::Vertical,
            from: 0.0,
            to: layout.hole_height,
            offset: plate.width + near,
            label: &hole_height,
        },
        Dimension {
            axis: Axis::Vertical,
            from: layout.hole_height,
            to: layout.row_pitch(),
            offset: plate.width + far,
            label: &v_spacing,
        },
    ];

    writeln!(
        writer,
        r#"<g id="dimensions" stroke="black" stroke-width="{:.6}" font-family="sans-serif" font-size="{:.6}">"#,
        style.thin, style.font
    )?;
    for dimension in &dimensions {
        write_dimension(writer, dimension, style)?;
    }
    writeln!(writer, "</g>")
}

fn write_dimension(writer: &mut impl Write, d: &Dimension, style: &Style) -> io::Result<()> {
    let (x1, y1, x2, y2) = match d.axis {
        Axis::Horizontal => (d.from, d.offset, d.to, d.offset),
        Axis::Vertical => (d.offset, d.from, d.offset, d.to),
    };
    writeln!(
        writer,
        r#"<line x1="{:.6}" y1="{:.6}" x2="{:.6}" y2="{:.6}" marker-start="url(#arrow)" marker-end="url(#arrow)"/>"#,
        x1, y1, x2, y2
    )?;

    let mid = (d.from + d.to) / 2.0;
    let gap = style.font * 0.4;
    match d.axis {
        Axis::Horizontal => writeln!(
            writer,
            r#"<text x="{:.6}" y="{:.6}" stroke="none" text-anchor="middle">{}</text>"#,
            mid,
            d.offset - gap,
            d.label
        ),
        Axis::Vertical => writeln!(
            writer,
            r#"<text x="{:.6}" y="{:.6}" stroke="none" text-anchor="middle" transform="rotate(-90 {:.6} {:.6})">{}</text>"#,
            d.offset - gap,
            mid,
            d.offset - gap,
            mid,
            d.label
        ),
    }
}

fn mm(metres: f64) -> String {
    format!("{:.2} mm", metres * MM_PER_M)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::candidate::{Candidate, SearchStats};
    use crate::core::models::plate::PlateDimensions;

    fn best(plate: PlateDimensions, height: f64, hs: f64, vs: f64) -> BestConfiguration {
        let candidate = Candidate::evaluate(3.0e8 / 3.26e9, &plate, height, hs, vs).unwrap();
        BestConfiguration {
            plate,
            candidate,
            stats: SearchStats::default(),
        }
    }

    #[test]
    fn draws_one_rectangle_per_hole_plus_plate_outline() {
        let best = best(PlateDimensions::new(0.5, 0.5), 0.015, 0.03, 0.03);
        let svg = SvgDiagram::write_to_string(&best).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 132 + 1);
    }

    #[test]
    fn annotates_every_dimension() {
        let best = best(PlateDimensions::new(0.5, 0.4), 0.015, 0.02, 0.01);
        let svg = SvgDiagram::write_to_string(&best).unwrap();
        assert_eq!(svg.matches("<line").count(), 6);
        for label in [
            "plate 500.00 mm",
            "plate 400.00 mm",
            "w 10.00 mm",
            "h 15.00 mm",
            "sx 20.00 mm",
            "sy 10.00 mm",
        ] {
            assert!(svg.contains(label), "missing label {label}");
        }
    }

    #[test]
    fn view_box_keeps_equal_aspect_with_origin_at_top_left() {
        let best = best(PlateDimensions::new(0.5, 0.25), 0.015, 0.03, 0.03);
        let svg = SvgDiagram::write_to_string(&best).unwrap();
        let margin = 0.5 * MARGIN_FRACTION;
        assert!(svg.contains(&format!(
            r#"viewBox="{:.6} {:.6} {:.6} {:.6}""#,
            -margin,
            -margin,
            0.5 + 2.0 * margin,
            0.25 + 2.0 * margin
        )));
        let expected_height = CANVAS_WIDTH_PX * (0.25 + 2.0 * margin) / (0.5 + 2.0 * margin);
        assert!(svg.contains(&format!(r#"height="{:.0}""#, expected_height)));
    }

    #[test]
    fn refuses_to_draw_infeasible_configuration() {
        let best = BestConfiguration::infeasible(PlateDimensions::default(), SearchStats::default());
        let result = SvgDiagram::write_to_string(&best);
        assert!(matches!(result, Err(DiagramError::Infeasible)));
    }
}
