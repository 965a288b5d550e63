//! Error types returned by [`Sequence`](crate::Sequence) operations.

use thiserror::Error;

/// Errors that can occur during sequence operations.
///
/// A failed call never leaves the sequence in a partial state: the
/// receiver is unchanged and remains usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An index-based access (`get`, `remove_at`, `swap`) fell outside `[0, len)`.
    #[error("index {index} is out of range for sequence of length {len}")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
        /// Length of the sequence at the time of the call.
        len: usize,
    },
    /// A required argument was absent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, SequenceError>;
