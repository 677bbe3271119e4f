//! Loader error types.
//!
//! Every failure mode has a named variant. Row-level problems are not errors
//! at all: they become [`MalformedRecord`] entries in the load report under
//! the skip-with-count policy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A row that could not be converted into an inventory record.
///
/// Carried in the load report so callers can surface a skipped-row count
/// without the whole load failing.
#[derive(Clone, Debug)]
pub struct MalformedRecord {
    /// 1-based line number in the source file, counting the header line.
    pub line: u64,
    pub reason: String,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
