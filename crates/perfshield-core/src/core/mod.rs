//! # Core Module
//!
//! Stateless building blocks for perforated-plate design.
//!
//! - **Constants** ([`constants`]) - Physical constants and fixed geometric ratios
//! - **Data Models** ([`models`]) - Physical constants, plate dimensions, evaluated
//!   candidates, the best-configuration record and the derived hole layout
//! - **Effectiveness Model** ([`effectiveness`]) - Shielding effectiveness of an aperture array
//! - **Output** ([`io`]) - Text report and SVG diagram writers for a search result

pub mod constants;
pub mod effectiveness;
pub mod io;
pub mod models;
