use alloc::vec::Vec;

use super::handle::Handle;

/// Owns every node of a tree; nodes name each other by [`Handle`].
///
/// Because a link is an index and not a pointer, a parent link does not keep
/// its target alive. Removing an entry leaves a hole that the next
/// [`insert`](Arena::insert) fills before the vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    entries: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Arena {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            entries: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    /// Entries that fit before the backing vector reallocates.
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Live entries, holes excluded.
    pub(crate) const fn len(&self) -> usize {
        self.entries.len() - self.vacant.len()
    }

    /// Stores `value`, filling the most recently vacated hole if there is one.
    pub(crate) fn insert(&mut self, value: T) -> Handle {
        match self.vacant.pop() {
            Some(handle) => {
                self.entries[handle.slot()] = Some(value);
                handle
            }
            None => {
                let slot = self.entries.len();
                assert!(slot <= Handle::MAX, "`Arena::insert()` - no handle left for entry {slot}");
                self.entries.push(Some(value));
                Handle::from_slot(slot)
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.entries[handle.slot()] {
            Some(value) => value,
            None => panic!("`Arena::get()` - {handle:?} points at a hole"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.entries[handle.slot()] {
            Some(value) => value,
            None => panic!("`Arena::get_mut()` - {handle:?} points at a hole"),
        }
    }

    /// Moves the entry out, leaving a hole for reuse.
    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let Some(value) = self.entries[handle.slot()].take() else {
            panic!("`Arena::remove()` - {handle:?} points at a hole");
        };
        self.vacant.push(handle);
        value
    }

    /// Drops every entry but keeps the allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.vacant.clear();
    }
}
