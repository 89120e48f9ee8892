use super::config::SearchSpace;
use super::progress::ProgressReporter;
use crate::core::models::physics::PhysicalConstants;
use crate::core::models::plate::PlateDimensions;

/// Everything a grid search reads, borrowed for the duration of one run.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub constants: &'a PhysicalConstants,
    pub plate: &'a PlateDimensions,
    pub space: &'a SearchSpace,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        constants: &'a PhysicalConstants,
        plate: &'a PlateDimensions,
        space: &'a SearchSpace,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            constants,
            plate,
            space,
            reporter,
        }
    }
}
