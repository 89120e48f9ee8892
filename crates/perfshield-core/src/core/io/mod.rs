//! Output writers for search results.
//!
//! Both writers consume a finished [`BestConfiguration`](crate::core::models::candidate::BestConfiguration)
//! through the common [`traits::LayoutWriter`] interface: [`report::TextReport`] produces the
//! human-readable summary and [`svg::SvgDiagram`] draws the dimensioned hole layout.

pub mod report;
pub mod svg;
pub mod traits;
