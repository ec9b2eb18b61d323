//! Error handling for biomarker ingestion.
//!
//! Range parsing never produces an error: unrecognized reference ranges
//! degrade to an unknown range and are reported through the diagnostics
//! sink. The variants below cover the failures that must halt a run.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for biomarker loading and aggregation
#[derive(Debug, thiserror::Error)]
pub enum BiomarkerError {
    /// Error opening, reading or writing a file
    #[error("IO error: {message}{}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error decoding the CSV export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error serializing the report summary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// A required column is absent from the export header
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A row whose draw date or value cannot be parsed.
    ///
    /// Skipping such a row would silently drop a clinical data point, so the
    /// whole ingestion stops.
    #[error("Malformed row {row}{} for marker '{marker}': {reason}", line_suffix(.line))]
    MalformedRow {
        /// Zero-based index of the row in input order
        row: usize,
        /// Line of the row in the source file, when it was read from one
        line: Option<u64>,
        marker: String,
        reason: String,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

impl BiomarkerError {
    /// Create an IO error with a message and no underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping an underlying `io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    /// Prefix extra context onto an IO or config error message
    #[must_use]
    pub fn context(self, context: impl AsRef<str>) -> Self {
        match self {
            Self::Io {
                message,
                path,
                source,
            } => Self::Io {
                message: format!("{message}. {}", context.as_ref()),
                path,
                source,
            },
            Self::Config(msg) => Self::Config(format!("{msg}. {}", context.as_ref())),
            other => other,
        }
    }

    /// Build a malformed-row error
    pub fn malformed_row(
        row: usize,
        line: Option<u64>,
        marker: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            row,
            line,
            marker: marker.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for BiomarkerError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

/// Result type for biomarker operations
pub type Result<T> = std::result::Result<T, BiomarkerError>;
