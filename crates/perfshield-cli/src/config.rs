//! Configuration layering for the CLI.
//!
//! Values are resolved with the precedence: command-line flag, then `--set KEY=VALUE`,
//! then the TOML configuration file, then the built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
