use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Spacing sweep did not terminate within {steps} steps")]
    SweepExhausted { steps: usize },
}
