//! Search tasks.
//!
//! - [`grid_search`] enumerates every (hole height, horizontal spacing, vertical spacing)
//!   triple and keeps the best one under a [`SelectionPolicy`](super::selection::SelectionPolicy).
//! - [`spacing_sweep`] fixes the hole size and grows a single spacing until the target
//!   effectiveness is reached.

pub mod grid_search;
pub mod spacing_sweep;
