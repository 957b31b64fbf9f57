//! Typed errors, distinguishing build-fatal failures from per-record/per-term
//! warnings that are absorbed by their caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the indexing and query pipelines.
///
/// Fatal variants (`Spill`, `Merge`, `MissingIndex`) should abort the
/// enclosing operation. The others are always caught and logged by their
/// caller; they exist as a type so tests can assert on *why* a record or
/// term was skipped instead of just that it was.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("input record at {path} is invalid: {reason}")]
    InputRecordInvalid { path: PathBuf, reason: String },

    #[error("fatal error while spilling segment {segment}: {source}")]
    Spill {
        segment: u32,
        #[source]
        source: Box<IndexError>,
    },

    #[error("fatal I/O error while merging segments: {source}")]
    Merge {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read postings for term {term:?}: {reason}")]
    QueryTermRead { term: String, reason: String },

    #[error("index not found at {path}: {reason}")]
    MissingIndex { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("(de)serialization failed: {0}")]
    Codec(#[from] Box<bincode::ErrorKind>),

    #[error("(de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
