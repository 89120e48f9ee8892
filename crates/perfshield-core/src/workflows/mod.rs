//! # Workflows Module
//!
//! Top-level entry points. Each workflow re-validates its configuration, runs one
//! search with progress reporting, and returns a typed result that the report and
//! diagram writers in [`crate::core::io`] can consume directly.
//!
//! - **Design Workflow** ([`design`]) - Exhaustive grid search over hole height and spacings
//! - **Sweep Workflow** ([`sweep`]) - Incremental growth of a single spacing for a fixed hole

pub mod design;
pub mod sweep;
