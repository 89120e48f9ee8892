//! Data structures describing a plate design problem and its solutions.
//!
//! - [`physics`] - Operating frequency and propagation speed
//! - [`plate`] - The bounding rectangle that holes must tile
//! - [`candidate`] - One evaluated (height, spacing) configuration and the search result record
//! - [`layout`] - Hole positions derived from a configuration, for rendering

pub mod candidate;
pub mod layout;
pub mod physics;
pub mod plate;
