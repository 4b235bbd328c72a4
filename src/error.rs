//! Error types for the omics-intersect library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum IntersectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Sample label '{label}' has {found} segment(s), at least {required} required")]
    MalformedLabel {
        label: String,
        found: usize,
        required: usize,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, IntersectError>;
