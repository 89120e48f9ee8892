use crate::cli::CommonArgs;
use crate::config::builder::resolved_file_config;
use crate::error::Result;
use tracing::info;

/// Prints the merged configuration; the output is a valid `--config` file.
pub fn run(args: CommonArgs) -> Result<()> {
    let resolved = resolved_file_config(&args)?;
    info!("Printing the effective configuration.");
    print!("{}", resolved.to_toml_string()?);
    Ok(())
}
