//! # PerfShield Core Library
//!
//! Designs perforated shielding plates: a rectangular plate pierced by a regular
//! grid of 2:3 rectangular holes, sized and spaced so that the plate reaches a target
//! electromagnetic shielding effectiveness at a given operating frequency.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PhysicalConstants`,
//!   `PlateDimensions`, `Candidate`, `BestConfiguration`), the pure shielding
//!   effectiveness model, and writers for the text report and the SVG layout diagram.
//!
//! - **[`engine`]: The Logic Core.** Validated search configuration, the pluggable
//!   selection policies, and the search tasks themselves (the exhaustive grid search
//!   and the incremental spacing sweep).
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that validate a
//!   configuration, run a search with progress reporting, and hand back a typed result.

pub mod core;
pub mod engine;
pub mod workflows;
