//! Shareable backing store for sequences.
//!
//! A [`SharedVec`] is a reference-counted handle to a `Vec<T>` behind a
//! `parking_lot::RwLock`. Several handles (sequences or raw `SharedVec`s) may
//! point at the same store; element writes through one are visible through
//! all of them.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// A handle to a vector that may be shared between several owners.
///
/// Cloning a `SharedVec` clones the handle, not the data.
pub struct SharedVec<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> SharedVec<T> {
    /// Creates a store holding no elements.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Adopts `data` as the store contents without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        SharedVec {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Locks the store for reading. Guards never leave the crate, and no
    /// caller code runs while one is held.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.inner.write()
    }

    /// Overwrites the element at `index` in place. Every handle sees the new
    /// value. Returns false if `index` is out of range.
    pub fn set(&self, index: usize, value: T) -> bool {
        match self.inner.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns true if both handles refer to the same store.
    pub fn ptr_eq(&self, other: &SharedVec<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns true if some other handle refers to this store.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }
}

impl<T: Clone> SharedVec<T> {
    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.read().get(index).cloned()
    }

    /// Copies the contents out into an independent vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().clone()
    }
}

impl<T> Clone for SharedVec<T> {
    fn clone(&self) -> Self {
        SharedVec {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for SharedVec<T> {
    fn from(data: Vec<T>) -> Self {
        SharedVec::from_vec(data)
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.read().iter()).finish()
    }
}
