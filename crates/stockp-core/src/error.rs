use std::path::PathBuf;

use thiserror::Error;

/// Construction errors for a single table row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("date '{value}' does not match 'Mon DD, YYYY'")]
    InvalidDate { value: String },
    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("volume is not a non-negative integer: '{value}'")]
    InvalidVolume { value: String },
    #[error("row has {count} cells, expected at most {max}")]
    TooManyCells { count: usize, max: usize },
    #[error("row has no date cell")]
    MissingDate,
}

/// Pipeline error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    FetchFailed,
    ParseSourceInvalid,
    MalformedRecord,
    EmptySeries,
    Internal,
}

impl CoreErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchFailed => "fetch_failed",
            Self::ParseSourceInvalid => "parse_source_invalid",
            Self::MalformedRecord => "malformed_record",
            Self::EmptySeries => "empty_series",
            Self::Internal => "internal",
        }
    }
}

/// Top-level error type for pipeline operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("fetching '{url}' failed: {message}")]
    FetchFailed { url: String, message: String },

    #[error("document '{}' is not valid markup: {message}", path.display())]
    ParseSourceInvalid { path: PathBuf, message: String },

    #[error(transparent)]
    MalformedRecord(#[from] RecordError),

    #[error("cannot forecast over an empty series")]
    EmptySeries,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn fetch_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn parse_source_invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseSourceInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> CoreErrorKind {
        match self {
            Self::FetchFailed { .. } => CoreErrorKind::FetchFailed,
            Self::ParseSourceInvalid { .. } => CoreErrorKind::ParseSourceInvalid,
            Self::MalformedRecord(_) => CoreErrorKind::MalformedRecord,
            Self::EmptySeries => CoreErrorKind::EmptySeries,
            Self::Config(_) | Self::Serialization(_) => CoreErrorKind::Internal,
        }
    }
}
