//! Errors raised while loading a single input document.

use thiserror::Error;

/// Why one input document could not be merged.
///
/// A `LoadError` never aborts a batch; the loader records it against the file
/// and moves on.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read file: {0}")]
    Read(#[from] std::io::Error),

    /// The document is not valid Turtle.
    #[error("invalid Turtle: {0}")]
    Syntax(String),

    /// The parser produced a term kind that has no place in a plain RDF graph
    /// (a quoted triple or a variable).
    #[error("unsupported term kind: {0}")]
    UnsupportedTerm(String),
}
