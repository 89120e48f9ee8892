//! # Engine Module
//!
//! The search machinery that turns a validated configuration into a
//! [`BestConfiguration`](crate::core::models::candidate::BestConfiguration).
//!
//! - **Configuration** ([`config`]) - Search space, value ranges, selection rule and builders
//!   that reject non-physical input before any search starts
//! - **Selection** ([`selection`]) - Pluggable rules deciding whether a candidate replaces
//!   the incumbent best
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Tasks** ([`tasks`]) - The grid search and the incremental spacing sweep
//!
//! Searches are single-threaded and deterministic: the same configuration always
//! yields the same result, including which of several equally-scored candidates wins.

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod selection;
pub mod tasks;
