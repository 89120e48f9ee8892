use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use perfshield::engine::config::{SelectionRule, ValueRange};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "PerfShield CLI - Find hole sizes and spacings for a perforated shielding plate that meet a target shielding effectiveness.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grid-search hole heights and spacings for the configuration closest to the target.
    Optimize(OptimizeArgs),
    /// Grow a single spacing for a fixed hole size until the target is reached.
    Sweep(SweepArgs),
    /// Print the effective configuration (defaults, file and overrides merged) as TOML.
    Config(CommonArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the operating frequency.
    #[arg(short, long, value_name = "HZ")]
    pub frequency: Option<f64>,

    /// Override the propagation speed.
    #[arg(long, value_name = "M_PER_S")]
    pub propagation_speed: Option<f64>,

    /// Override the plate width.
    #[arg(long, value_name = "METRES")]
    pub plate_width: Option<f64>,

    /// Override the plate height.
    #[arg(long, value_name = "METRES")]
    pub plate_height: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.target=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `optimize` subcommand.
///
/// Ranges are written `START:STOP:COUNT` (evenly spaced, both ends included),
/// `START:STOP/STEP` (stepped, stop excluded) or as a comma-separated list.
#[derive(Args, Debug, Default, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Override the candidate hole heights, in metres.
    #[arg(long, value_name = "RANGE", value_parser = parser::parse_range)]
    pub hole_heights: Option<ValueRange>,

    /// Override the candidate horizontal spacings, in metres.
    #[arg(long, value_name = "RANGE", value_parser = parser::parse_range)]
    pub horizontal_spacings: Option<ValueRange>,

    /// Override the candidate vertical spacings, in metres.
    #[arg(long, value_name = "RANGE", value_parser = parser::parse_range)]
    pub vertical_spacings: Option<ValueRange>,

    /// Override both spacing ranges at once.
    #[arg(
        long,
        value_name = "RANGE",
        value_parser = parser::parse_range,
        conflicts_with_all = ["horizontal_spacings", "vertical_spacings"]
    )]
    pub spacings: Option<ValueRange>,

    /// Override the target shielding effectiveness.
    #[arg(short, long, value_name = "DB", allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Override the minimum acceptable shielding effectiveness.
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub floor: Option<f64>,

    /// Override the selection rule ('floor-enforcing' or 'open-area-tie-break').
    #[arg(short, long, value_name = "RULE")]
    pub rule: Option<SelectionRule>,

    /// Write an SVG diagram of the resulting layout.
    #[arg(short, long, value_name = "PATH")]
    pub diagram: Option<PathBuf>,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Override the fixed hole height, in metres.
    #[arg(long, value_name = "METRES")]
    pub hole_height: Option<f64>,

    /// Override the spacing increment, in metres.
    #[arg(long, value_name = "METRES")]
    pub step: Option<f64>,

    /// Override the target shielding effectiveness.
    #[arg(short, long, value_name = "DB", allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Write an SVG diagram of the resulting layout.
    #[arg(short, long, value_name = "PATH")]
    pub diagram: Option<PathBuf>,
}
