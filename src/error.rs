use std::io;

use thiserror::Error;

/// Errors surfaced by dictionary construction and queries.
///
/// Everything else in the crate is reported through sentinel values:
/// `-1` for an exceeded edit distance, empty vectors for "no suggestions".
#[derive(Error, Debug)]
pub enum SpellError {
    /// The query asked for a larger edit distance than the dictionary
    /// was built for.
    #[error("lookup edit distance {requested} exceeds dictionary maximum {max}")]
    DistanceTooLarge { requested: i64, max: i64 },

    /// Rejected constructor arguments.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure while streaming a dictionary file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
