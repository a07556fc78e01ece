//! Error types for graph compilation.

use es_datafile::ParseError;
use thiserror::Error;

/// Errors that abort a compilation. No partial graph is produced.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An effect block was handed over that does not start with `on`.
    #[error("line {line}: effect block must start with 'on', found '{tokens}'")]
    MalformedEffect { line: usize, tokens: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
