//! Errors raised while preparing the annotation tables

use thiserror::Error;

/// Table preparation and configuration errors.
///
/// Integrity and lookup failures carry the 1-based line of the offending
/// row (the header is line 1) so the source file can be fixed directly.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required identifier is missing from a source row
    #[error("Data integrity error at row {row}: missing required value in column '{column}'")]
    DataIntegrity { row: usize, column: &'static str },

    /// A protein name from the annotation table has no systematic name
    #[error("Lookup error at row {row}: no systematic name for protein '{name}'")]
    Lookup { row: usize, name: String },

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
