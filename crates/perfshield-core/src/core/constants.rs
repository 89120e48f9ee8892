//! Physical constants and fixed design ratios.

/// Propagation speed of the wave in free space, in m/s.
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Default operating frequency, in Hz.
pub const DEFAULT_FREQUENCY_HZ: f64 = 3.26e9;

/// Ratio of hole width to hole height. Every hole is a 2:3 rectangle.
pub const HOLE_ASPECT_RATIO: f64 = 2.0 / 3.0;

/// Conversion factor from metres to millimetres, used for human-facing output.
pub const MM_PER_M: f64 = 1e3;
