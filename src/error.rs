use thiserror::Error;

/// Custom error type for Fabula operations.
#[derive(Debug, Error)]
pub enum FabulaError {
    /// An external model/service failed to load or run.
    #[error("Model error: {0}")]
    Model(String),

    /// A coreference cluster references offsets outside the document.
    ///
    /// This is a contract violation by the upstream coreference model and is
    /// fatal: clamping the span would corrupt every offset to its right.
    #[error("Cluster span [{start}, {end}) is out of bounds for text of {len} chars")]
    ClusterOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for FabulaError {
    fn from(err: toml::de::Error) -> Self {
        FabulaError::Config(err.to_string())
    }
}
