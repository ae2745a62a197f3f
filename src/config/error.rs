//! Configuration errors.

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration load and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error while reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Out-of-range or inconsistent configuration value.
    #[error("Invalid config: {0}")]
    InvalidValue(String),

    /// Batch scheduling with integration disabled.
    ///
    /// The batch path has no compaction-only fallback for multi-request
    /// batches, so this combination is rejected up front rather than asserted
    /// at runtime.
    #[error("batch scheduling requires integration to be enabled")]
    BatchWithoutIntegration,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
