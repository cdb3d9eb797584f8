//! Error types of the analyser.
//!
//! Segmentation dead ends are never errors. Only two things can fail: loading
//! the closed-class tables or the lexicon at startup, and calls into a stem
//! lookup service.

/// Result type defaulting to [`MorphError`].
pub type Result<T, E = MorphError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Malformed or incomplete static data. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table {table} is not valid JSON: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("table {table} contains an invalid pattern {pattern:?}: {source}")]
    Pattern {
        table: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("table {table} has a malformed cell {cell:?}")]
    Cell { table: &'static str, cell: String },

    #[error("table {table} is missing required entry {entry:?}")]
    MissingEntry { table: &'static str, entry: String },

    #[error("table {table} has an unusable entry {entry:?}: {reason}")]
    Entry {
        table: &'static str,
        entry: String,
        reason: &'static str,
    },
}

/// Failure of the external stem lookup service for one request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("stem lookup service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed lexical entry {entry:?}: {reason}")]
    MalformedEntry { entry: String, reason: String },
}
