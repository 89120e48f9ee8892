use perfshield::core::constants::{DEFAULT_FREQUENCY_HZ, SPEED_OF_LIGHT};
use perfshield::engine::config::{SelectionRule, ValueRange};

/// Built-in values used when neither the command line nor a configuration file sets them.
/// An unset floor follows the resolved target.
pub struct DefaultsConfig {
    pub frequency_hz: f64,
    pub propagation_speed: f64,
    pub plate_width: f64,
    pub plate_height: f64,
    pub hole_heights: ValueRange,
    pub horizontal_spacings: ValueRange,
    pub vertical_spacings: ValueRange,
    pub target_db: f64,
    pub rule: SelectionRule,
    pub sweep_hole_height: f64,
    pub sweep_step: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            propagation_speed: SPEED_OF_LIGHT,
            plate_width: 0.5,
            plate_height: 0.5,
            hole_heights: ValueRange::linspace(0.015, 0.025, 10),
            horizontal_spacings: ValueRange::linspace(0.01, 0.03, 10),
            vertical_spacings: ValueRange::linspace(0.01, 0.03, 10),
            target_db: 8.0,
            rule: SelectionRule::FloorEnforcing,
            sweep_hole_height: 0.03,
            sweep_step: 1e-3,
        }
    }
}
