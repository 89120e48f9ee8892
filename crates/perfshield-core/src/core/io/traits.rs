use crate::core::models::candidate::BestConfiguration;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing a search result to some output format.
///
/// Implementors only provide [`LayoutWriter::write_to`]; file and string
/// destinations are derived from it.
pub trait LayoutWriter {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes the configuration to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be represented in this format
    /// or if the underlying writer fails.
    fn write_to(best: &BestConfiguration, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the configuration to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(best: &BestConfiguration, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(best, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Renders the configuration into an in-memory string.
    fn write_to_string(best: &BestConfiguration) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(best, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
