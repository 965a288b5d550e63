//! Core sequence implementation.
//!
//! This module contains the [`Sequence`] struct and its operations. A sequence
//! stores its elements in a [`SharedVec`], which lets several handles alias one
//! store:
//!
//! - Element-level operations (`for_each`, `reverse`, `swap`) write through the
//!   shared store, so every alias observes them.
//! - Structural operations (`add`, `remove_at`, `clear`, `merge`, ...) move the
//!   receiver onto a fresh store when the current one is shared, leaving the
//!   other handles with the store they already had.

use std::fmt;
use tracing::{debug, trace};

use crate::sequence::error::{Result, SequenceError};
use crate::sequence::store::SharedVec;

/// An ordered, index-addressable, growable collection of `T`.
///
/// # Copy semantics
///
/// - `clone`, `copy`, `from_slice` and `to_slice` share storage (shallow).
/// - `copy_from`, `copy_to`, `copy_from_slice` and `copy_to_slice` duplicate
///   element values into independent storage (deep).
///
/// # Example
///
/// ```rust
/// use generic_sequence::Sequence;
///
/// let mut seq = Sequence::new();
/// seq.add(1);
/// seq.add(2);
///
/// let alias = seq.clone();
/// seq.for_each(|v| *v *= 10);
/// assert_eq!(alias.to_vec(), vec![10, 20]);
///
/// seq.add(30);
/// assert_eq!(alias.count(), 2);
/// ```
pub struct Sequence<T> {
    store: SharedVec<T>,
}

fn invalid_index(index: usize, len: usize) -> SequenceError {
    debug!(index, len, "rejected out-of-range index");
    SequenceError::InvalidIndex { index, len }
}

fn absent(reason: &'static str) -> SequenceError {
    debug!(reason, "rejected absent argument");
    SequenceError::InvalidArgument(reason)
}

impl<T> Sequence<T> {
    /// Creates an empty sequence backed by a fresh store.
    pub fn new() -> Self {
        Sequence {
            store: SharedVec::new(),
        }
    }

    /// Resets to a new empty store, discarding prior contents.
    ///
    /// Handles that shared the previous store keep it unchanged.
    pub fn init(&mut self) {
        self.store = SharedVec::new();
    }

    /// Removes all elements. No-op on an already-empty sequence.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        if self.store.is_shared() {
            trace!(op = "clear", "detached from shared store");
            self.store = SharedVec::new();
        } else {
            self.store.write().clear();
        }
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Alias for [`Sequence::count`].
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns true if the sequence holds at least one element.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns a shallow handle sharing this sequence's store.
    ///
    /// Same as [`Clone::clone`].
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns true if both sequences reference the same store.
    pub fn shares_storage_with(&self, other: &Sequence<T>) -> bool {
        self.store.ptr_eq(&other.store)
    }

    /// Adopts `data` as the backing store without copying.
    ///
    /// A `Vec<T>` is moved in. A [`SharedVec<T>`] is shared, so in-place
    /// writes made through the caller's handle remain visible here.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_slice(&mut self, data: impl Into<SharedVec<T>>) {
        self.store = data.into();
    }

    /// Exposes the live backing store. The returned handle aliases this
    /// sequence until either side performs a structural change.
    pub fn to_slice(&self) -> SharedVec<T> {
        self.store.clone()
    }

    /// Reverses element order in place, through the shared store.
    pub fn reverse(&mut self) {
        self.store.write().reverse();
    }

    /// Exchanges the elements at `i` and `j` in place.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidIndex`] if either index is outside `[0, len)`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let mut data = self.store.write();
        let len = data.len();
        if i >= len {
            return Err(invalid_index(i, len));
        }
        if j >= len {
            return Err(invalid_index(j, len));
        }
        data.swap(i, j);
        Ok(())
    }
}

impl<T: Clone> Sequence<T> {
    /// Applies a structural change to the element vector.
    ///
    /// When the store is shared the change is applied to a private copy that
    /// then replaces this handle's store; otherwise it is applied in place.
    fn restructure<R>(&mut self, op: &'static str, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        if self.store.is_shared() {
            let mut data = self.store.to_vec();
            let out = f(&mut data);
            trace!(op, len = data.len(), "detached from shared store");
            self.store = SharedVec::from_vec(data);
            out
        } else {
            let mut data = self.store.write();
            f(&mut *data)
        }
    }

    /// Clones the element at `index` out under a short read lock.
    fn element(&self, index: usize) -> Option<T> {
        self.store.read().get(index).cloned()
    }

    /// Invokes `f` once per element, in order, with a mutable reference.
    ///
    /// Each element is copied out, handed to `f`, and written back through the
    /// shared store, so every alias observes the change. No lock is held while
    /// `f` runs; reading the sequence through another handle from inside `f`
    /// is allowed.
    pub fn for_each(&mut self, mut f: impl FnMut(&mut T)) {
        let mut index = 0;
        while let Some(mut item) = self.element(index) {
            f(&mut item);
            match self.store.write().get_mut(index) {
                Some(slot) => *slot = item,
                None => break,
            }
            index += 1;
        }
    }

    /// Returns true if `f` holds for some element. False on an empty sequence.
    pub fn any(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        let mut index = 0;
        while let Some(item) = self.element(index) {
            if f(&item) {
                return true;
            }
            index += 1;
        }
        false
    }

    /// Returns true if `f` holds for every element. Vacuously true on an
    /// empty sequence.
    pub fn all(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        !self.any(|item| !f(item))
    }

    /// Appends `value` at the end.
    pub fn add(&mut self, value: T) {
        self.restructure("add", |data| data.push(value));
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidIndex`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.count();
        if index >= len {
            return Err(invalid_index(index, len));
        }
        Ok(self.restructure("remove_at", |data| data.remove(index)))
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        let data = self.store.read();
        data.get(index)
            .cloned()
            .ok_or_else(|| invalid_index(index, data.len()))
    }

    /// First element, or `T::default()` when empty.
    pub fn first(&self) -> T
    where
        T: Default,
    {
        self.store.read().first().cloned().unwrap_or_default()
    }

    /// Last element, or `T::default()` when empty.
    pub fn last(&self) -> T
    where
        T: Default,
    {
        self.store.read().last().cloned().unwrap_or_default()
    }

    /// Appends every element of `other`, preserving its order.
    ///
    /// Merging a handle that aliases this sequence appends a copy of the
    /// current contents.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] if `other` is `None`.
    pub fn merge(&mut self, other: Option<&Sequence<T>>) -> Result<()> {
        let other = other.ok_or_else(|| absent("sequence to merge is absent"))?;
        let tail = other.store.to_vec();
        self.restructure("merge", |data| data.extend(tail));
        Ok(())
    }

    /// Replaces the contents with a deep copy of `data`.
    pub fn copy_from_slice(&mut self, data: &[T]) {
        self.store = SharedVec::from_vec(data.to_vec());
    }

    /// Deep-copies this sequence's elements into `dest`, replacing its store.
    pub fn copy_to(&self, dest: Option<&mut Sequence<T>>) -> Result<()> {
        let dest = dest.ok_or_else(|| absent("destination sequence is absent"))?;
        dest.store = SharedVec::from_vec(self.store.to_vec());
        Ok(())
    }

    /// Replaces this sequence's store with a deep copy of `src`'s elements.
    pub fn copy_from(&mut self, src: Option<&Sequence<T>>) -> Result<()> {
        let src = src.ok_or_else(|| absent("source sequence is absent"))?;
        self.store = SharedVec::from_vec(src.store.to_vec());
        Ok(())
    }

    /// Copies `min(dest.len(), self.len())` elements into `dest` and returns
    /// the number copied.
    pub fn copy_to_slice(&self, dest: &mut [T]) -> usize {
        let data = self.store.read();
        let n = dest.len().min(data.len());
        dest[..n].clone_from_slice(&data[..n]);
        n
    }

    /// Detached snapshot of the current elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.store.to_vec()
    }

    /// Builds a new, independent sequence by applying `f` to each element.
    pub fn map(&self, f: impl FnMut(&T) -> T) -> Sequence<T> {
        self.to_vec().iter().map(f).collect()
    }

    /// Builds a new, independent sequence of the elements for which `f`
    /// returns true, in their original order.
    pub fn filter(&self, mut f: impl FnMut(&T) -> bool) -> Sequence<T> {
        self.to_vec().into_iter().filter(|item| f(item)).collect()
    }

    /// Left fold seeded with the first element. Returns `T::default()` when
    /// the sequence is empty.
    pub fn reduce(&self, mut f: impl FnMut(T, &T) -> T) -> T
    where
        T: Default,
    {
        let data = self.to_vec();
        let mut iter = data.iter();
        match iter.next() {
            Some(head) => iter.fold(head.clone(), |acc, item| f(acc, item)),
            None => T::default(),
        }
    }
}

impl<T: Clone + PartialEq> Sequence<T> {
    /// Index of the first element equal to `value`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] if `value` is `None`.
    pub fn index_of(&self, value: Option<&T>) -> Result<Option<usize>> {
        let value = value.ok_or_else(|| absent("search value is absent"))?;
        Ok(self.store.read().iter().position(|item| item == value))
    }

    /// Returns true if some element equals `value`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] if `value` is `None`.
    pub fn contains(&self, value: Option<&T>) -> Result<bool> {
        Ok(self.index_of(value)?.is_some())
    }

    /// Removes the first element equal to `value`. Returns whether an element
    /// was removed; a missing value leaves the sequence untouched.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidArgument`] if `value` is `None`.
    pub fn remove_by_value(&mut self, value: Option<&T>) -> Result<bool> {
        let value = value.ok_or_else(|| absent("value to remove is absent"))?;
        let position = self.store.read().iter().position(|item| item == value);
        match position {
            Some(index) => {
                self.restructure("remove_by_value", |data| data.remove(index));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Shallow clone: the new handle shares the same backing store.
impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Sequence {
            store: self.store.clone(),
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(data: Vec<T>) -> Self {
        Sequence {
            store: SharedVec::from_vec(data),
        }
    }
}

impl<T> From<SharedVec<T>> for Sequence<T> {
    fn from(store: SharedVec<T>) -> Self {
        Sequence { store }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.store, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_of(items: &[i32]) -> Sequence<i32> {
        let mut seq = Sequence::new();
        for &item in items {
            seq.add(item);
        }
        seq
    }

    #[test]
    fn test_new_and_add() {
        let mut seq = Sequence::new();
        seq.add(4);
        seq.add(5);

        assert_eq!(seq.count(), 2);
        assert_eq!(seq.get(0).unwrap(), 4);
        assert_eq!(seq.get(1).unwrap(), 5);
    }

    #[test]
    fn test_init_discards_contents() {
        let mut seq = seq_of(&[1, 2, 3]);
        seq.init();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_remove_at() {
        let mut seq = seq_of(&[4, 5, 6]);

        assert_eq!(seq.remove_at(1).unwrap(), 5);
        assert_eq!(seq.to_vec(), vec![4, 6]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut seq = seq_of(&[4, 5, 6]);

        let err = seq.remove_at(3).unwrap_err();
        assert_eq!(err, SequenceError::InvalidIndex { index: 3, len: 3 });
        assert_eq!(seq.count(), 3);
    }

    #[test]
    fn test_remove_by_value() {
        let mut seq = seq_of(&[1, 2, 3, 2]);

        assert!(seq.remove_by_value(Some(&2)).unwrap());
        assert_eq!(seq.to_vec(), vec![1, 3, 2]);

        assert!(!seq.remove_by_value(Some(&9)).unwrap());
        assert_eq!(seq.to_vec(), vec![1, 3, 2]);
    }

    #[test]
    fn test_remove_by_value_absent_argument() {
        let mut seq = seq_of(&[1, 2]);
        assert!(matches!(
            seq.remove_by_value(None),
            Err(SequenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_is_a_searchable_value() {
        let mut seq = seq_of(&[3, 0, 7]);

        assert_eq!(seq.index_of(Some(&0)).unwrap(), Some(1));
        assert!(seq.contains(Some(&0)).unwrap());
        assert!(seq.remove_by_value(Some(&0)).unwrap());
        assert_eq!(seq.to_vec(), vec![3, 7]);
    }

    #[test]
    fn test_clear() {
        let mut seq = seq_of(&[1, 2]);
        seq.clear();
        assert!(seq.is_empty());

        seq.clear();
        assert_eq!(seq.count(), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let seq = seq_of(&[1]);
        assert_eq!(
            seq.get(1),
            Err(SequenceError::InvalidIndex { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_index_of_and_contains() {
        let seq = seq_of(&[1, 2, 3, 4, 5]);

        assert_eq!(seq.index_of(Some(&3)).unwrap(), Some(2));
        assert_eq!(seq.index_of(Some(&6)).unwrap(), None);
        assert!(seq.contains(Some(&5)).unwrap());
        assert!(!seq.contains(Some(&6)).unwrap());
        assert!(seq.index_of(None).is_err());
        assert!(seq.contains(None).is_err());
    }

    #[test]
    fn test_first_and_last() {
        let seq = seq_of(&[4, 5, 6]);
        assert_eq!(seq.first(), 4);
        assert_eq!(seq.last(), 6);

        let empty: Sequence<i32> = Sequence::new();
        assert_eq!(empty.first(), 0);
        assert_eq!(empty.last(), 0);
    }

    #[test]
    fn test_for_each_mutates_in_place() {
        let mut seq = seq_of(&[1, 2, 3]);
        seq.for_each(|v| *v *= 2);
        assert_eq!(seq.to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn test_map_filter_reduce() {
        let seq = seq_of(&[1, 2, 3, 4, 5]);

        let doubled = seq.map(|v| v * 2);
        assert_eq!(doubled.to_vec(), vec![2, 4, 6, 8, 10]);
        assert!(!doubled.shares_storage_with(&seq));

        let evens = seq.filter(|v| v % 2 == 0);
        assert_eq!(evens.to_vec(), vec![2, 4]);

        assert_eq!(seq.reduce(|acc, v| acc + v), 15);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reduce_empty_returns_default() {
        let seq: Sequence<i32> = Sequence::new();
        assert_eq!(seq.reduce(|acc, v| acc + v), 0);

        let words: Sequence<String> = Sequence::new();
        assert_eq!(words.reduce(|acc, v| acc + v), "");
    }

    #[test]
    fn test_any_all() {
        let seq = seq_of(&[2, 4, 6]);
        assert!(seq.all(|v| v % 2 == 0));
        assert!(!seq.any(|v| *v > 10));

        let empty: Sequence<i32> = Sequence::new();
        assert!(empty.all(|_| false));
        assert!(!empty.any(|_| true));
    }

    #[test]
    fn test_any_short_circuits() {
        let seq = seq_of(&[1, 2, 3, 4]);
        let mut visited = 0;
        assert!(seq.any(|v| {
            visited += 1;
            *v == 2
        }));
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_reverse_and_swap() {
        let mut seq = seq_of(&[4, 5, 6]);
        seq.reverse();
        assert_eq!(seq.to_vec(), vec![6, 5, 4]);

        seq.swap(0, 2).unwrap();
        assert_eq!(seq.to_vec(), vec![4, 5, 6]);

        assert_eq!(
            seq.swap(0, 3),
            Err(SequenceError::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(seq.to_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_clone_aliases_elements() {
        let mut seq = seq_of(&[1, 2]);
        let alias = seq.clone();

        assert!(alias.shares_storage_with(&seq));
        seq.for_each(|v| *v += 100);
        assert_eq!(alias.to_vec(), vec![101, 102]);
    }

    #[test]
    fn test_structural_change_detaches() {
        let mut seq = seq_of(&[1, 2]);
        let alias = seq.copy();

        seq.add(3);
        assert!(!seq.shares_storage_with(&alias));
        assert_eq!(alias.to_vec(), vec![1, 2]);
        assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_debug_format() {
        let seq = seq_of(&[1, 2, 3]);
        assert_eq!(format!("{:?}", seq), "[1, 2, 3]");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reverse_twice_is_identity(items in proptest::collection::vec(any::<i32>(), 0..64)) {
                let mut seq = Sequence::from(items.clone());
                seq.reverse();
                seq.reverse();
                prop_assert_eq!(seq.to_vec(), items);
            }

            #[test]
            fn map_preserves_length(items in proptest::collection::vec(-1000i32..1000, 0..64)) {
                let seq = Sequence::from(items.clone());
                let mapped = seq.map(|v| v + 1);
                prop_assert_eq!(mapped.count(), seq.count());
                for (i, original) in items.iter().enumerate() {
                    prop_assert_eq!(mapped.get(i).unwrap(), original + 1);
                }
            }

            #[test]
            fn filter_keeps_relative_order(items in proptest::collection::vec(any::<i32>(), 0..64)) {
                let seq = Sequence::from(items.clone());
                let kept = seq.filter(|v| v % 3 == 0);
                let expected: Vec<i32> = items.iter().copied().filter(|v| v % 3 == 0).collect();
                prop_assert!(kept.count() <= seq.count());
                prop_assert_eq!(kept.to_vec(), expected);
            }

            #[test]
            fn remove_at_shifts_left(
                items in proptest::collection::vec(any::<i32>(), 1..64),
                pick in any::<prop::sample::Index>(),
            ) {
                let index = pick.index(items.len());
                let mut seq = Sequence::from(items.clone());
                let removed = seq.remove_at(index).unwrap();

                prop_assert_eq!(removed, items[index]);
                prop_assert_eq!(seq.count(), items.len() - 1);
                let remaining = seq.to_vec();
                prop_assert_eq!(&remaining[..index], &items[..index]);
                prop_assert_eq!(&remaining[index..], &items[index + 1..]);
            }
        }
    }
}
