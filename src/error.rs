//! Error types for the toolkit.
//!
//! Every variant is a caller bug or bad input; nothing here is transient, so
//! nothing is ever retried.

use thiserror::Error;

use crate::cancel::Cancelled;

/// Errors raised at the toolkit's call boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Neighbours were requested for a node that was never registered.
    #[error("node {0} was never registered in the graph")]
    UnknownNode(String),

    #[error("target sum must be non-negative, got {0}")]
    NegativeTarget(i64),

    #[error("value at position {position} is negative ({value})")]
    NegativeValue { position: usize, value: i64 },

    #[error("cannot select {k} values from {len}")]
    SelectionTooLarge { k: usize, len: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid number on line {line}: {source}")]
    InvalidNumber {
        line: usize,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("search cancelled")]
    Cancelled,
}

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Error::Cancelled
    }
}

pub type Result<T> = std::result::Result<T, Error>;
