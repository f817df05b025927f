//! Error types for the Sluice library.

use thiserror::Error;

/// Main error type for Sluice operations.
#[derive(Error, Debug)]
pub enum SluiceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failures surfaced by the cache collaborator, passed through unmodified
    #[error("Cache error: {0}")]
    Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Encoding errors for the persisted attempt log
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SluiceError {
    /// Wrap an arbitrary error raised by a cache backend.
    pub fn cache<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SluiceError::Cache(Box::new(source))
    }
}

/// Result type alias for Sluice operations.
pub type Result<T> = std::result::Result<T, SluiceError>;
