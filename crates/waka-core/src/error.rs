use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and configuring the dashboard.
///
/// The analytics engine itself is total over well-formed input; every variant
/// here originates from the loader or the configuration layer.
#[derive(Error, Debug)]
pub enum WakaError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A required field is absent from the export document.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A day entry carries a date that is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A duration is negative, non-finite or not a number.
    #[error("Invalid duration for {field}: {value}")]
    InvalidDuration { field: String, value: String },

    /// A field is present but holds the wrong JSON type.
    #[error("Expected {expected} for {field}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    /// The same calendar date appears more than once in the export.
    #[error("Duplicate date in export: {0}")]
    DuplicateDate(String),

    /// A month key string did not match `YYYY-MM`.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, WakaError>;
