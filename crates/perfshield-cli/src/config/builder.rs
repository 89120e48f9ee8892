use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{CommonArgs, OptimizeArgs, SweepArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{parse_key_value, parse_number, parse_range};
use perfshield::engine::config::{
    DesignConfig, DesignConfigBuilder, SelectionRule, SweepConfig, SweepConfigBuilder,
};
use tracing::{debug, info};

/// Builds the grid-search configuration from the command line, its `--set` overrides,
/// the optional configuration file and the built-in defaults.
pub fn build_design_config(args: &OptimizeArgs) -> Result<DesignConfig> {
    let mut file_config = effective_file_config(&args.common)?;

    let search = file_config.search_mut();
    if let Some(range) = &args.hole_heights {
        search.hole_heights = Some(range.clone());
    }
    if let Some(range) = &args.spacings {
        search.horizontal_spacings = Some(range.clone());
        search.vertical_spacings = Some(range.clone());
    }
    if let Some(range) = &args.horizontal_spacings {
        search.horizontal_spacings = Some(range.clone());
    }
    if let Some(range) = &args.vertical_spacings {
        search.vertical_spacings = Some(range.clone());
    }
    if let Some(target) = args.target {
        search.target = Some(target);
    }
    if let Some(floor) = args.floor {
        search.floor = Some(floor);
    }
    if let Some(rule) = args.rule {
        search.rule = Some(rule);
    }

    let resolved = with_defaults(file_config);
    let physics = resolved.physics.unwrap_or_default();
    let plate = resolved.plate.unwrap_or_default();
    let search = resolved.search.unwrap_or_default();

    let mut builder = DesignConfigBuilder::new();
    if let Some(v) = physics.frequency {
        builder = builder.frequency_hz(v);
    }
    if let Some(v) = physics.propagation_speed {
        builder = builder.propagation_speed(v);
    }
    if let Some(v) = plate.width {
        builder = builder.plate_width(v);
    }
    if let Some(v) = plate.height {
        builder = builder.plate_height(v);
    }
    if let Some(v) = search.hole_heights {
        builder = builder.hole_heights(v);
    }
    if let Some(v) = search.horizontal_spacings {
        builder = builder.horizontal_spacings(v);
    }
    if let Some(v) = search.vertical_spacings {
        builder = builder.vertical_spacings(v);
    }
    if let Some(v) = search.target {
        builder = builder.target_db(v);
    }
    if let Some(v) = search.floor {
        builder = builder.floor_db(v);
    }
    if let Some(v) = search.rule {
        builder = builder.selection(v);
    }

    let config = builder.build()?;
    info!(
        candidates = config.search.size(),
        rule = %config.selection,
        "Design configuration built."
    );
    Ok(config)
}

/// Builds the spacing-sweep configuration. An unset sweep target falls back to the
/// search target.
pub fn build_sweep_config(args: &SweepArgs) -> Result<SweepConfig> {
    let mut file_config = effective_file_config(&args.common)?;

    let sweep = file_config.sweep_mut();
    if let Some(height) = args.hole_height {
        sweep.hole_height = Some(height);
    }
    if let Some(step) = args.step {
        sweep.step = Some(step);
    }
    if let Some(target) = args.target {
        sweep.target = Some(target);
    }

    let resolved = with_defaults(file_config);
    let physics = resolved.physics.unwrap_or_default();
    let plate = resolved.plate.unwrap_or_default();
    let sweep = resolved.sweep.unwrap_or_default();

    let mut builder = SweepConfigBuilder::new();
    if let Some(v) = physics.frequency {
        builder = builder.frequency_hz(v);
    }
    if let Some(v) = physics.propagation_speed {
        builder = builder.propagation_speed(v);
    }
    if let Some(v) = plate.width {
        builder = builder.plate_width(v);
    }
    if let Some(v) = plate.height {
        builder = builder.plate_height(v);
    }
    if let Some(v) = sweep.hole_height {
        builder = builder.hole_height(v);
    }
    if let Some(v) = sweep.step {
        builder = builder.step(v);
    }
    if let Some(v) = sweep.target {
        builder = builder.target_db(v);
    }

    let config = builder.build()?;
    info!(
        hole_height = config.hole_height,
        step = config.step,
        "Sweep configuration built."
    );
    Ok(config)
}

/// The fully resolved configuration, as printed by the `config` command.
pub fn resolved_file_config(common: &CommonArgs) -> Result<FileConfig> {
    effective_file_config(common).map(with_defaults)
}

/// Loads the configuration file (if any), then applies `--set` overrides and the
/// shared command-line flags. Fields nobody set stay `None`.
pub fn effective_file_config(common: &CommonArgs) -> Result<FileConfig> {
    let mut config = match &common.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    apply_set_values(&mut config, &common.set_values)?;

    if let Some(v) = common.frequency {
        config.physics_mut().frequency = Some(v);
    }
    if let Some(v) = common.propagation_speed {
        config.physics_mut().propagation_speed = Some(v);
    }
    if let Some(v) = common.plate_width {
        config.plate_mut().width = Some(v);
    }
    if let Some(v) = common.plate_height {
        config.plate_mut().height = Some(v);
    }
    Ok(config)
}

/// Applies `KEY=VALUE` overrides in order; a later override of the same key wins.
pub fn apply_set_values(config: &mut FileConfig, values: &[String]) -> Result<()> {
    for kv in values {
        let (key, value) = parse_key_value(kv).map_err(argument_error)?;
        debug!("Applying override: {} = {}", key, value);

        let number = || parse_number(kv, value).map_err(argument_error);
        let range = || parse_range(value).map_err(argument_error);

        match key {
            "physics.frequency" => config.physics_mut().frequency = Some(number()?),
            "physics.propagation-speed" => {
                config.physics_mut().propagation_speed = Some(number()?)
            }
            "plate.width" => config.plate_mut().width = Some(number()?),
            "plate.height" => config.plate_mut().height = Some(number()?),
            "search.hole-heights" => config.search_mut().hole_heights = Some(range()?),
            "search.horizontal-spacings" => {
                config.search_mut().horizontal_spacings = Some(range()?)
            }
            "search.vertical-spacings" => config.search_mut().vertical_spacings = Some(range()?),
            "search.target" => config.search_mut().target = Some(number()?),
            "search.floor" => config.search_mut().floor = Some(number()?),
            "search.rule" => config.search_mut().rule = Some(value.parse::<SelectionRule>()?),
            "sweep.hole-height" => config.sweep_mut().hole_height = Some(number()?),
            "sweep.step" => config.sweep_mut().step = Some(number()?),
            "sweep.target" => config.sweep_mut().target = Some(number()?),
            _ => {
                return Err(CliError::Argument(format!(
                    "Unknown configuration key '{}'.",
                    key
                )));
            }
        }
    }
    Ok(())
}

fn with_defaults(mut config: FileConfig) -> FileConfig {
    let defaults = DefaultsConfig::default();

    let physics = config.physics_mut();
    physics.frequency.get_or_insert(defaults.frequency_hz);
    physics.propagation_speed.get_or_insert(defaults.propagation_speed);

    let plate = config.plate_mut();
    plate.width.get_or_insert(defaults.plate_width);
    plate.height.get_or_insert(defaults.plate_height);

    let search = config.search_mut();
    search.hole_heights.get_or_insert(defaults.hole_heights);
    search
        .horizontal_spacings
        .get_or_insert(defaults.horizontal_spacings);
    search
        .vertical_spacings
        .get_or_insert(defaults.vertical_spacings);
    let search_target = *search.target.get_or_insert(defaults.target_db);
    search.floor.get_or_insert(search_target);
    search.rule.get_or_insert(defaults.rule);

    let sweep = config.sweep_mut();
    sweep.hole_height.get_or_insert(defaults.sweep_hole_height);
    sweep.step.get_or_insert(defaults.sweep_step);
    sweep.target.get_or_insert(search_target);

    config
}

fn argument_error(e: impl std::fmt::Display) -> CliError {
    CliError::Argument(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfshield::engine::config::ValueRange;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("perfshield.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_alone_build_the_reference_search() {
        let config = build_design_config(&OptimizeArgs::default()).unwrap();

        assert_eq!(config.constants.frequency_hz, 3.26e9);
        assert_eq!(config.plate.width, 0.5);
        assert_eq!(config.search.hole_heights().len(), 10);
        assert_eq!(config.search.horizontal_spacings().len(), 10);
        assert_eq!(config.search.vertical_spacings().len(), 10);
        assert_eq!(config.search.target_db(), 8.0);
        assert_eq!(config.search.floor_db(), 8.0);
        assert_eq!(config.selection, SelectionRule::FloorEnforcing);
    }

    #[test]
    fn command_line_beats_set_which_beats_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[plate]\nwidth = 0.3\nheight = 0.3\n\n[search]\ntarget = 6.0\n",
        );

        let args = OptimizeArgs {
            common: CommonArgs {
                config: Some(path),
                plate_width: Some(0.4),
                set_values: vec!["plate.width=0.35".into(), "search.target=9".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let config = build_design_config(&args).unwrap();

        assert_eq!(config.plate.width, 0.4);
        assert_eq!(config.plate.height, 0.3);
        assert_eq!(config.search.target_db(), 9.0);
        assert_eq!(config.search.floor_db(), 9.0);
    }

    #[test]
    fn shared_spacing_flag_sets_both_axes() {
        let args = OptimizeArgs {
            spacings: Some(ValueRange::Values(vec![0.01, 0.02])),
            rule: Some(SelectionRule::OpenAreaTieBreak),
            ..Default::default()
        };
        let config = build_design_config(&args).unwrap();

        assert_eq!(config.search.horizontal_spacings(), &[0.01, 0.02]);
        assert_eq!(config.search.vertical_spacings(), &[0.01, 0.02]);
        assert_eq!(config.selection, SelectionRule::OpenAreaTieBreak);
    }

    #[test]
    fn set_values_parse_ranges_and_rules() {
        let mut config = FileConfig::default();
        apply_set_values(
            &mut config,
            &[
                "search.hole-heights=0.01:0.02:3".to_string(),
                "search.rule=open-area".to_string(),
            ],
        )
        .unwrap();

        let search = config.search.unwrap();
        assert_eq!(
            search.hole_heights,
            Some(ValueRange::linspace(0.01, 0.02, 3))
        );
        assert_eq!(search.rule, Some(SelectionRule::OpenAreaTieBreak));
    }

    #[test]
    fn unknown_set_key_is_rejected() {
        let mut config = FileConfig::default();
        let result = apply_set_values(&mut config, &["search.tagret=8".to_string()]);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let mut config = FileConfig::default();
        let result = apply_set_values(&mut config, &["plate.width".to_string()]);
        assert!(matches!(result, Err(CliError::Argument(_))));

        let result = apply_set_values(&mut config, &["plate.width=wide".to_string()]);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let args = OptimizeArgs {
            common: CommonArgs {
                frequency: Some(-1.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            build_design_config(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn sweep_target_falls_back_to_search_target() {
        let args = SweepArgs {
            common: CommonArgs {
                set_values: vec!["search.target=12".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let config = build_sweep_config(&args).unwrap();

        assert_eq!(config.target_db, 12.0);
        assert_eq!(config.hole_height, 0.03);
        assert_eq!(config.step, 1e-3);
    }

    #[test]
    fn sweep_flags_override_defaults() {
        let args = SweepArgs {
            hole_height: Some(0.01),
            step: Some(0.002),
            target: Some(10.0),
            ..Default::default()
        };
        let config = build_sweep_config(&args).unwrap();

        assert_eq!(config.hole_height, 0.01);
        assert_eq!(config.step, 0.002);
        assert_eq!(config.target_db, 10.0);
    }

    #[test]
    fn resolved_config_fills_every_field() {
        let resolved = resolved_file_config(&CommonArgs::default()).unwrap();
        let search = resolved.search.unwrap();
        assert_eq!(search.floor, Some(8.0));
        assert_eq!(search.rule, Some(SelectionRule::FloorEnforcing));
        assert_eq!(resolved.sweep.unwrap().target, Some(8.0));
    }
}
