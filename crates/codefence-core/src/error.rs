//! Error types for codefence

use thiserror::Error;

/// Main error type for codefence operations.
///
/// The streaming parser itself never fails; these errors come from the
/// surfaces around it (configuration, path resolution setup, writing blocks).
#[derive(Error, Debug)]
pub enum CodefenceError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A path could not be turned into a location
    #[error("Resolve error: {0}")]
    Resolve(String),

    /// A completed block could not be written out
    #[error("Output error: {0}")]
    Output(String),
}

/// Result type alias for codefence operations
pub type Result<T> = std::result::Result<T, CodefenceError>;
