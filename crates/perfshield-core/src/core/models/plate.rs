use serde::{Deserialize, Serialize};

/// The rectangle, in metres, that the hole grid must fit inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateDimensions {
    pub width: f64,
    pub height: f64,
}

impl PlateDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Largest of the two sides. No positive spacing beyond this fits a single hole.
    #[inline]
    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

impl Default for PlateDimensions {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}
