//! Sequence container module.
//!
//! This module contains the [`Sequence`] container and its supporting types:
//! the shareable backing store and the error type.

pub mod error;
pub mod list;
pub mod store;

// Re-export the main public API
pub use error::{Result, SequenceError};
pub use list::Sequence;
pub use store::SharedVec;
