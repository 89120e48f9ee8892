use crate::core::constants::{DEFAULT_FREQUENCY_HZ, SPEED_OF_LIGHT};
use serde::{Deserialize, Serialize};

/// Operating conditions shared by every candidate of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Operating frequency, in Hz.
    pub frequency_hz: f64,
    /// Propagation speed, in m/s.
    pub propagation_speed: f64,
}

impl PhysicalConstants {
    pub fn new(frequency_hz: f64, propagation_speed: f64) -> Self {
        Self {
            frequency_hz,
            propagation_speed,
        }
    }

    /// Free-space operating conditions at `frequency_hz`.
    pub fn at_frequency(frequency_hz: f64) -> Self {
        Self::new(frequency_hz, SPEED_OF_LIGHT)
    }

    /// Wavelength in metres.
    #[inline]
    pub fn wavelength(&self) -> f64 {
        self.propagation_speed / self.frequency_hz
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::at_frequency(DEFAULT_FREQUENCY_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_wavelength_is_about_nine_centimetres() {
        let constants = PhysicalConstants::default();
        assert_relative_eq!(constants.wavelength(), 0.092_024_539, epsilon = 1e-9);
    }

    #[test]
    fn wavelength_scales_inversely_with_frequency() {
        let low = PhysicalConstants::at_frequency(1e9);
        let high = PhysicalConstants::at_frequency(2e9);
        assert_relative_eq!(low.wavelength(), 0.3, epsilon = 1e-15);
        assert_relative_eq!(low.wavelength(), 2.0 * high.wavelength(), epsilon = 1e-15);
    }
}
