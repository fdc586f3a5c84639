//! Error types for record loading
//!
//! Two levels of failure:
//! - [`LoadError`]: the source as a whole is unusable
//! - [`RecordError`]: a single row is excluded, the load continues

use std::path::PathBuf;

/// Failure that aborts a whole load
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The reader failed below the row level (I/O or header decoding)
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Reason a single row or record is invalid
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Salary text does not parse as a number
    #[error("salary `{0}` is not numeric")]
    NonNumericSalary(String),

    /// Salary parsed but is negative, NaN or infinite
    #[error("salary must be a finite non-negative number, got {0}")]
    InvalidSalary(f64),

    /// Experience level is not one of SE, EX, MI, EN
    #[error("unknown experience level `{0}`")]
    UnknownExperienceLevel(String),

    /// A categorical field is blank
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),

    /// Row shape does not match the header
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// A row excluded during loading
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    /// 1-based data row (the header is row 0)
    pub row: usize,
    /// Why the row was excluded
    pub reason: RecordError,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}
