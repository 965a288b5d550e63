//! # generic-sequence
//!
//! A generic, growable, ordered container of a single element type, with
//! standard collection operations: insertion, removal, lookup,
//! map/filter/reduce, bulk copy/merge and predicate queries.
//!
//! ## Features
//!
//! - **Checked access**: invalid indices and absent arguments are reported as
//!   [`SequenceError`] values, never as panics
//! - **Explicit absence**: value queries take `Option<&T>`, so the zero value
//!   of `T` is an ordinary, searchable element
//! - **Two copy families**: shallow handles that alias one store
//!   (`clone`, `copy`, `from_slice`, `to_slice`) and deep copies with
//!   independent storage (`copy_from`, `copy_to`, `copy_from_slice`,
//!   `copy_to_slice`)
//!
//! ## Example
//!
//! ```rust
//! use generic_sequence::Sequence;
//!
//! let mut seq: Sequence<i32> = vec![1, 2, 3, 4, 5].into();
//! assert_eq!(seq.reduce(|acc, v| acc + v), 15);
//! assert_eq!(seq.index_of(Some(&3)), Ok(Some(2)));
//!
//! seq.remove_at(0)?;
//! assert_eq!(seq.first(), 2);
//! # Ok::<(), generic_sequence::SequenceError>(())
//! ```

pub mod sequence;

// Re-export the main public API from the sequence module
pub use sequence::{Result, Sequence, SequenceError, SharedVec};
