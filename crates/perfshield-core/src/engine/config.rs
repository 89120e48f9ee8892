use crate::core::constants::{HOLE_ASPECT_RATIO, SPEED_OF_LIGHT};
use crate::core::models::physics::PhysicalConstants;
use crate::core::models::plate::PlateDimensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on the number of points a single range may expand to.
pub const MAX_RANGE_POINTS: usize = 1_000_000;

/// Upper bound on the number of steps a spacing sweep may need.
pub const MAX_SWEEP_STEPS: usize = 10_000_000;

/// Upper bound on the number of holes any single layout of a search may contain.
pub const MAX_HOLE_COUNT: usize = 1_000_000;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{field}': {value} (must be {requirement})")]
    DomainViolation {
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("Candidate sequence '{0}' is empty")]
    EmptySequence(&'static str),

    #[error("Range '{field}' expands to {points} points (limit is {limit})")]
    RangeTooLarge {
        field: &'static str,
        points: f64,
        limit: usize,
    },

    #[error("Unknown selection rule '{0}'. Expected 'floor-enforcing' or 'open-area-tie-break'.")]
    UnknownSelectionRule(String),
}

fn require_finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::DomainViolation {
            field,
            value,
            requirement: "a finite number",
        })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::DomainViolation {
            field,
            value,
            requirement: "finite and greater than zero",
        })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::DomainViolation {
            field,
            value,
            requirement: "finite and not negative",
        })
    }
}

pub fn validate_constants(constants: &PhysicalConstants) -> Result<(), ConfigError> {
    require_positive("frequency", constants.frequency_hz)?;
    require_positive("propagation-speed", constants.propagation_speed)?;
    Ok(())
}

pub fn validate_plate(plate: &PlateDimensions) -> Result<(), ConfigError> {
    require_positive("plate-width", plate.width)?;
    require_positive("plate-height", plate.height)?;
    Ok(())
}

/// Rejects a plate on which the densest layout (smallest hole, smallest spacings)
/// would exceed [`MAX_HOLE_COUNT`].
fn validate_hole_capacity(
    plate: &PlateDimensions,
    hole_height: f64,
    horizontal_spacing: f64,
    vertical_spacing: f64,
) -> Result<(), ConfigError> {
    let columns = (plate.width / (HOLE_ASPECT_RATIO * hole_height + horizontal_spacing)).floor();
    let rows = (plate.height / (hole_height + vertical_spacing)).floor();
    let holes = columns.max(0.0) * rows.max(0.0);
    if holes.is_nan() || holes > MAX_HOLE_COUNT as f64 {
        return Err(ConfigError::RangeTooLarge {
            field: "hole-count",
            points: holes,
            limit: MAX_HOLE_COUNT,
        });
    }
    Ok(())
}

/// Description of an ordered, finite sequence of candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub enum ValueRange {
    /// Explicit values, used in the given order.
    Values(Vec<f64>),
    /// `count` evenly spaced values from `start` to `stop`, both included.
    Linspace { start: f64, stop: f64, count: usize },
    /// Values `start, start + step, ...` strictly below `stop`.
    Arange { start: f64, stop: f64, step: f64 },
}

impl ValueRange {
    pub fn linspace(start: f64, stop: f64, count: usize) -> Self {
        Self::Linspace { start, stop, count }
    }

    pub fn arange(start: f64, stop: f64, step: f64) -> Self {
        Self::Arange { start, stop, step }
    }

    pub fn single(value: f64) -> Self {
        Self::Values(vec![value])
    }

    /// Expands the range into concrete values, in order.
    pub fn expand(&self, field: &'static str) -> Result<Vec<f64>, ConfigError> {
        match *self {
            Self::Values(ref values) => Ok(values.clone()),
            Self::Linspace { start, stop, count } => {
                require_finite(field, start)?;
                require_finite(field, stop)?;
                if count > MAX_RANGE_POINTS {
                    return Err(ConfigError::RangeTooLarge {
                        field,
                        points: count as f64,
                        limit: MAX_RANGE_POINTS,
                    });
                }
                Ok(match count {
                    0 => Vec::new(),
                    1 => vec![start],
                    _ => {
                        let step = (stop - start) / (count - 1) as f64;
                        let mut values: Vec<f64> =
                            (0..count).map(|i| start + i as f64 * step).collect();
                        values[count - 1] = stop;
                        values
                    }
                })
            }
            Self::Arange { start, stop, step } => {
                require_finite(field, start)?;
                require_finite(field, stop)?;
                require_positive(field, step)?;
                let points = ((stop - start) / step).ceil().max(0.0);
                if points > MAX_RANGE_POINTS as f64 {
                    return Err(ConfigError::RangeTooLarge {
                        field,
                        points,
                        limit: MAX_RANGE_POINTS,
                    });
                }
                Ok((0..points as usize)
                    .map(|i| start + i as f64 * step)
                    .collect())
            }
        }
    }
}

/// Rule deciding whether an evaluated candidate replaces the current best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionRule {
    /// Closest to target among candidates at or above the floor.
    #[default]
    FloorEnforcing,
    /// Closest to target; exact ties go to the larger open area. No floor.
    OpenAreaTieBreak,
}

impl SelectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FloorEnforcing => "floor-enforcing",
            Self::OpenAreaTieBreak => "open-area-tie-break",
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor-enforcing" | "floor" => Ok(Self::FloorEnforcing),
            "open-area-tie-break" | "open-area" => Ok(Self::OpenAreaTieBreak),
            _ => Err(ConfigError::UnknownSelectionRule(s.to_string())),
        }
    }
}

/// Validated, immutable grid to search over.
///
/// Every hole height is strictly positive and every spacing is non-negative, so the
/// effectiveness model never sees a value outside its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    hole_heights: Vec<f64>,
    horizontal_spacings: Vec<f64>,
    vertical_spacings: Vec<f64>,
    target_db: f64,
    floor_db: f64,
}

impl SearchSpace {
    pub fn new(
        hole_heights: Vec<f64>,
        horizontal_spacings: Vec<f64>,
        vertical_spacings: Vec<f64>,
        target_db: f64,
        floor_db: f64,
    ) -> Result<Self, ConfigError> {
        check_sequence("hole-heights", &hole_heights, require_positive)?;
        check_sequence("horizontal-spacings", &horizontal_spacings, require_non_negative)?;
        check_sequence("vertical-spacings", &vertical_spacings, require_non_negative)?;
        require_finite("target", target_db)?;
        require_finite("floor", floor_db)?;

        Ok(Self {
            hole_heights,
            horizontal_spacings,
            vertical_spacings,
            target_db,
            floor_db,
        })
    }

    pub fn hole_heights(&self) -> &[f64] {
        &self.hole_heights
    }

    pub fn horizontal_spacings(&self) -> &[f64] {
        &self.horizontal_spacings
    }

    pub fn vertical_spacings(&self) -> &[f64] {
        &self.vertical_spacings
    }

    pub fn target_db(&self) -> f64 {
        self.target_db
    }

    pub fn floor_db(&self) -> f64 {
        self.floor_db
    }

    /// Checks that no triple of this space packs more than [`MAX_HOLE_COUNT`] holes
    /// onto `plate`.
    pub fn validate_for(&self, plate: &PlateDimensions) -> Result<(), ConfigError> {
        validate_hole_capacity(
            plate,
            min_of(&self.hole_heights),
            min_of(&self.horizontal_spacings),
            min_of(&self.vertical_spacings),
        )
    }

    /// Number of (height, horizontal spacing, vertical spacing) triples.
    pub fn size(&self) -> usize {
        self.hole_heights.len() * self.horizontal_spacings.len() * self.vertical_spacings.len()
    }
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn check_sequence(
    field: &'static str,
    values: &[f64],
    check: fn(&'static str, f64) -> Result<f64, ConfigError>,
) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptySequence(field));
    }
    for &value in values {
        check(field, value)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub constants: PhysicalConstants,
    pub plate: PlateDimensions,
    pub search: SearchSpace,
    pub selection: SelectionRule,
}

impl DesignConfig {
    /// Re-checks the publicly mutable parts of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_constants(&self.constants)?;
        validate_plate(&self.plate)?;
        self.search.validate_for(&self.plate)
    }
}

/// Builds a [`DesignConfig`]. The propagation speed defaults to the speed of light,
/// the floor to the target and the selection rule to [`SelectionRule::FloorEnforcing`].
#[derive(Default)]
pub struct DesignConfigBuilder {
    frequency_hz: Option<f64>,
    propagation_speed: Option<f64>,
    plate_width: Option<f64>,
    plate_height: Option<f64>,
    hole_heights: Option<ValueRange>,
    horizontal_spacings: Option<ValueRange>,
    vertical_spacings: Option<ValueRange>,
    target_db: Option<f64>,
    floor_db: Option<f64>,
    selection: Option<SelectionRule>,
}

impl DesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency_hz(mut self, frequency: f64) -> Self {
        self.frequency_hz = Some(frequency);
        self
    }
    pub fn propagation_speed(mut self, speed: f64) -> Self {
        self.propagation_speed = Some(speed);
        self
    }
    pub fn plate_width(mut self, width: f64) -> Self {
        self.plate_width = Some(width);
        self
    }
    pub fn plate_height(mut self, height: f64) -> Self {
        self.plate_height = Some(height);
        self
    }
    pub fn hole_heights(mut self, range: ValueRange) -> Self {
        self.hole_heights = Some(range);
        self
    }
    pub fn horizontal_spacings(mut self, range: ValueRange) -> Self {
        self.horizontal_spacings = Some(range);
        self
    }
    pub fn vertical_spacings(mut self, range: ValueRange) -> Self {
        self.vertical_spacings = Some(range);
        self
    }
    pub fn target_db(mut self, target: f64) -> Self {
        self.target_db = Some(target);
        self
    }
    pub fn floor_db(mut self, floor: f64) -> Self {
        self.floor_db = Some(floor);
        self
    }
    pub fn selection(mut self, rule: SelectionRule) -> Self {
        self.selection = Some(rule);
        self
    }

    pub fn build(self) -> Result<DesignConfig, ConfigError> {
        let constants = PhysicalConstants::new(
            self.frequency_hz
                .ok_or(ConfigError::MissingParameter("frequency"))?,
            self.propagation_speed.unwrap_or(SPEED_OF_LIGHT),
        );
        validate_constants(&constants)?;

        let plate = PlateDimensions::new(
            self.plate_width
                .ok_or(ConfigError::MissingParameter("plate-width"))?,
            self.plate_height
                .ok_or(ConfigError::MissingParameter("plate-height"))?,
        );
        validate_plate(&plate)?;

        let target_db = self
            .target_db
            .ok_or(ConfigError::MissingParameter("target"))?;
        let search = SearchSpace::new(
            self.hole_heights
                .ok_or(ConfigError::MissingParameter("hole-heights"))?
                .expand("hole-heights")?,
            self.horizontal_spacings
                .ok_or(ConfigError::MissingParameter("horizontal-spacings"))?
                .expand("horizontal-spacings")?,
            self.vertical_spacings
                .ok_or(ConfigError::MissingParameter("vertical-spacings"))?
                .expand("vertical-spacings")?,
            target_db,
            self.floor_db.unwrap_or(target_db),
        )?;
        search.validate_for(&plate)?;

        Ok(DesignConfig {
            constants,
            plate,
            search,
            selection: self.selection.unwrap_or_default(),
        })
    }
}

/// Parameters of the incremental spacing sweep: one hole size, one spacing shared by
/// both axes, grown by `step` until the target is met.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub constants: PhysicalConstants,
    pub plate: PlateDimensions,
    pub hole_height: f64,
    pub step: f64,
    pub target_db: f64,
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_constants(&self.constants)?;
        validate_plate(&self.plate)?;
        require_positive("hole-height", self.hole_height)?;
        require_positive("step", self.step)?;
        require_finite("target", self.target_db)?;
        validate_hole_capacity(&self.plate, self.hole_height, 0.0, 0.0)?;
        let steps = self.max_steps_f64();
        if steps > MAX_SWEEP_STEPS as f64 {
            return Err(ConfigError::RangeTooLarge {
                field: "step",
                points: steps,
                limit: MAX_SWEEP_STEPS,
            });
        }
        Ok(())
    }

    /// Steps after which the spacing alone exceeds the plate, guaranteeing an empty layout.
    pub fn max_steps(&self) -> usize {
        self.max_steps_f64() as usize
    }

    fn max_steps_f64(&self) -> f64 {
        (self.plate.longest_side() / self.step).ceil() + 1.0
    }
}

#[derive(Default)]
pub struct SweepConfigBuilder {
    frequency_hz: Option<f64>,
    propagation_speed: Option<f64>,
    plate_width: Option<f64>,
    plate_height: Option<f64>,
    hole_height: Option<f64>,
    step: Option<f64>,
    target_db: Option<f64>,
}

impl SweepConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency_hz(mut self, frequency: f64) -> Self {
        self.frequency_hz = Some(frequency);
        self
    }
    pub fn propagation_speed(mut self, speed: f64) -> Self {
        self.propagation_speed = Some(speed);
        self
    }
    pub fn plate_width(mut self, width: f64) -> Self {
        self.plate_width = Some(width);
        self
    }
    pub fn plate_height(mut self, height: f64) -> Self {
        self.plate_height = Some(height);
        self
    }
    pub fn hole_height(mut self, height: f64) -> Self {
        self.hole_height = Some(height);
        self
    }
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
    pub fn target_db(mut self, target: f64) -> Self {
        self.target_db = Some(target);
        self
    }

    pub fn build(self) -> Result<SweepConfig, ConfigError> {
        let config = SweepConfig {
            constants: PhysicalConstants::new(
                self.frequency_hz
                    .ok_or(ConfigError::MissingParameter("frequency"))?,
                self.propagation_speed.unwrap_or(SPEED_OF_LIGHT),
            ),
            plate: PlateDimensions::new(
                self.plate_width
                    .ok_or(ConfigError::MissingParameter("plate-width"))?,
                self.plate_height
                    .ok_or(ConfigError::MissingParameter("plate-height"))?,
            ),
            hole_height: self
                .hole_height
                .ok_or(ConfigError::MissingParameter("hole-height"))?,
            step: self.step.ok_or(ConfigError::MissingParameter("step"))?,
            target_db: self
                .target_db
                .ok_or(ConfigError::MissingParameter("target"))?,
        };
        config.validate()?;
        Ok(config)
    }
}
