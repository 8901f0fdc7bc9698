//! Shared, direction-aware handles onto one [`OrderedTree`].
//!
//! An [`OrderedSetView`] owns a reference-counted handle to a tree plus a
//! direction. [`descending_set`](OrderedSetView::descending_set) hands out
//! another view of the same tree with the direction flipped; nothing is
//! copied, and a key added through any view is visible through all of them.
//!
//! Because views share the tree, it can change while a [`ViewIter`] is in
//! flight. Each iterator remembers the tree's version from when it was
//! created and fails with [`Error::StaleIterator`] once that version is
//! out of date.
//!
//! Views are single-threaded (`!Send`, `!Sync`).

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::ordered_tree::OrderedTree;
use crate::raw::{Cursor, Direction};

/// An ascending or descending view of a shared [`OrderedTree`].
///
/// Size, membership and mutation do not depend on direction. Everything
/// positional does: a descending view's [`first`](Self::first) is the tree's
/// largest key, its [`lower`](Self::lower) is the tree's `higher`, and its
/// [`iter`](Self::iter) walks from largest to smallest.
///
/// Cloning a view clones the handle, not the keys.
///
/// Keys are handed out by value, since a reference into the shared tree
/// cannot outlive the call that produced it.
///
/// # Examples
///
/// ```
/// use navset::OrderedSetView;
///
/// let asc = OrderedSetView::new();
/// for key in [15, 1, 24, 4] {
///     asc.add(key).unwrap();
/// }
///
/// let desc = asc.descending_set();
/// assert_eq!(desc.first(), Ok(24));
/// assert_eq!(desc.lower(&4), Ok(Some(15)));
///
/// desc.add(3).unwrap();
/// assert_eq!(asc.contains(&3), Ok(true));
/// assert_eq!(asc.to_vec(), [1, 3, 4, 15, 24]);
/// assert_eq!(desc.to_vec(), [24, 15, 4, 3, 1]);
/// ```
pub struct OrderedSetView<T, C = NaturalOrder> {
    tree: Rc<RefCell<OrderedTree<T, C>>>,
    direction: Direction,
}

/// A version-checked iterator over an [`OrderedSetView`].
///
/// This `struct` is created by [`OrderedSetView::iter`] and
/// [`OrderedSetView::descending_iter`]. It keeps the shared tree alive but
/// does not borrow it between calls.
///
/// As an [`Iterator`] it yields `Ok(key)` for each key, then `None`. If the
/// tree is modified in the meantime, it yields a single
/// `Err(Error::StaleIterator)` and then `None`. The explicit
/// [`has_next`](Self::has_next) and [`try_next`](Self::try_next) keep
/// reporting [`Error::StaleIterator`] on every call.
///
/// # Examples
///
/// ```
/// use navset::{Error, OrderedSetView};
///
/// let view = OrderedSetView::new();
/// view.add(1).unwrap();
/// view.add(2).unwrap();
///
/// let mut iter = view.iter();
/// assert_eq!(iter.try_next(), Ok(1));
/// view.add(3).unwrap();
/// assert_eq!(iter.has_next(), Err(Error::StaleIterator));
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ViewIter<T, C = NaturalOrder> {
    tree: Rc<RefCell<OrderedTree<T, C>>>,
    cursor: Cursor,
    // Set once `next` has returned `None` or a stale error.
    finished: bool,
}

impl<T> OrderedSetView<T> {
    /// Creates an ascending view of a new, empty, naturally ordered tree.
    #[must_use]
    pub fn new() -> Self {
        Self::from(OrderedTree::new())
    }
}

impl<T, C> OrderedSetView<T, C> {
    /// Creates an ascending view of a new, empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedSetView;
    ///
    /// let view = OrderedSetView::with_comparator(|a: &i32, b: &i32| (a % 10).cmp(&(b % 10)));
    /// assert_eq!(view.add(10), Ok(true));
    /// assert_eq!(view.add(20), Ok(false));
    /// assert_eq!(view.len(), 1);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::from(OrderedTree::with_comparator(comparator))
    }

    /// Returns `true` if this view walks the tree from smallest to largest.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Ascending
    }

    /// Returns a view of the same tree in the opposite direction.
    ///
    /// Calling it twice gives back a view in the original direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedSetView;
    ///
    /// let view: OrderedSetView<i32> = OrderedSetView::new();
    /// let desc = view.descending_set();
    /// assert!(!desc.is_ascending());
    /// assert!(desc.descending_set().is_ascending());
    /// assert!(desc.shares_tree_with(&view));
    /// ```
    #[must_use]
    pub fn descending_set(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            direction: self.direction.reverse(),
        }
    }

    /// Returns `true` if both views are backed by the same tree.
    #[must_use]
    pub fn shares_tree_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.borrow().len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.borrow().is_empty()
    }

    /// Returns the tree's mutation counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.tree.borrow().version()
    }

    /// Removes every key from the tree.
    pub fn clear(&self) {
        self.tree.borrow_mut().clear();
    }

    /// Removes and returns the first key in this view's order.
    pub fn pop_first(&self) -> Option<T> {
        let mut tree = self.tree.borrow_mut();
        match self.direction {
            Direction::Ascending => tree.pop_first(),
            Direction::Descending => tree.pop_last(),
        }
    }

    /// Removes and returns the last key in this view's order.
    pub fn pop_last(&self) -> Option<T> {
        let mut tree = self.tree.borrow_mut();
        match self.direction {
            Direction::Ascending => tree.pop_last(),
            Direction::Descending => tree.pop_first(),
        }
    }

    /// Returns an iterator in this view's direction.
    pub fn iter(&self) -> ViewIter<T, C> {
        ViewIter::new(Rc::clone(&self.tree), self.direction)
    }

    /// Returns an iterator against this view's direction.
    ///
    /// On a descending view this walks from smallest to largest.
    pub fn descending_iter(&self) -> ViewIter<T, C> {
        ViewIter::new(Rc::clone(&self.tree), self.direction.reverse())
    }
}

impl<T: Clone, C> OrderedSetView<T, C> {
    /// Returns the first key in this view's order: the tree's smallest key
    /// when ascending, its largest when descending.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    pub fn first(&self) -> Result<T> {
        let tree = self.tree.borrow();
        match self.direction {
            Direction::Ascending => tree.first().cloned(),
            Direction::Descending => tree.last().cloned(),
        }
    }

    /// Returns the last key in this view's order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    pub fn last(&self) -> Result<T> {
        let tree = self.tree.borrow();
        match self.direction {
            Direction::Ascending => tree.last().cloned(),
            Direction::Descending => tree.first().cloned(),
        }
    }

    /// Collects the keys in this view's order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        let tree = self.tree.borrow();
        match self.direction {
            Direction::Ascending => tree.ascending_iter().cloned().collect(),
            Direction::Descending => tree.descending_iter().cloned().collect(),
        }
    }
}

impl<T, C: Comparator<T>> OrderedSetView<T, C> {
    /// Adds `key` to the tree unless an equivalent key is present.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn add(&self, key: T) -> Result<bool> {
        self.tree.borrow_mut().add(key)
    }

    /// Removes the key equivalent to `key`. Returns `true` if one was present.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn remove(&self, key: &T) -> Result<bool> {
        self.tree.borrow_mut().remove(key)
    }

    /// Returns `true` if a key equivalent to `key` is present.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn contains(&self, key: &T) -> Result<bool> {
        self.tree.borrow().contains(key)
    }
}

impl<T: Clone, C: Comparator<T>> OrderedSetView<T, C> {
    /// Returns the closest key before `key` in this view's order.
    ///
    /// For a descending view that is the least key greater than `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn lower(&self, key: &T) -> Result<Option<T>> {
        let tree = self.tree.borrow();
        let found = match self.direction {
            Direction::Ascending => tree.lower(key)?,
            Direction::Descending => tree.higher(key)?,
        };
        Ok(found.cloned())
    }

    /// Returns the closest key at or before `key` in this view's order.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn floor(&self, key: &T) -> Result<Option<T>> {
        let tree = self.tree.borrow();
        let found = match self.direction {
            Direction::Ascending => tree.floor(key)?,
            Direction::Descending => tree.ceiling(key)?,
        };
        Ok(found.cloned())
    }

    /// Returns the closest key at or after `key` in this view's order.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn ceiling(&self, key: &T) -> Result<Option<T>> {
        let tree = self.tree.borrow();
        let found = match self.direction {
            Direction::Ascending => tree.ceiling(key)?,
            Direction::Descending => tree.floor(key)?,
        };
        Ok(found.cloned())
    }

    /// Returns the closest key after `key` in this view's order.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn higher(&self, key: &T) -> Result<Option<T>> {
        let tree = self.tree.borrow();
        let found = match self.direction {
            Direction::Ascending => tree.higher(key)?,
            Direction::Descending => tree.lower(key)?,
        };
        Ok(found.cloned())
    }
}

impl<T, C> From<OrderedTree<T, C>> for OrderedSetView<T, C> {
    /// Moves `tree` behind a shared handle and returns an ascending view of it.
    fn from(tree: OrderedTree<T, C>) -> Self {
        Self {
            tree: Rc::new(RefCell::new(tree)),
            direction: Direction::Ascending,
        }
    }
}

impl<T, C> Clone for OrderedSetView<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            direction: self.direction,
        }
    }
}

impl<T, C: Default> Default for OrderedSetView<T, C> {
    fn default() -> Self {
        Self::from(OrderedTree::default())
    }
}

impl<T: PartialEq, C> PartialEq for OrderedSetView<T, C> {
    /// Views compare as sets of keys. Direction is ignored, so a view equals
    /// its own [`descending_set`](Self::descending_set).
    fn eq(&self, other: &Self) -> bool {
        self.shares_tree_with(other) || *self.tree.borrow() == *other.tree.borrow()
    }
}

impl<T: Eq, C> Eq for OrderedSetView<T, C> {}

impl<T: Hash, C> Hash for OrderedSetView<T, C> {
    /// Hashes the keys in ascending order whatever the view's direction.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.borrow().hash(state);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSetView<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        match self.direction {
            Direction::Ascending => f.debug_set().entries(tree.ascending_iter()).finish(),
            Direction::Descending => f.debug_set().entries(tree.descending_iter()).finish(),
        }
    }
}

impl<T, C> ViewIter<T, C> {
    fn new(tree: Rc<RefCell<OrderedTree<T, C>>>, direction: Direction) -> Self {
        let cursor = Cursor::new(tree.borrow().raw(), direction);
        Self {
            tree,
            cursor,
            finished: false,
        }
    }

    /// Returns whether another key is available.
    ///
    /// # Errors
    ///
    /// [`Error::StaleIterator`] if the tree was modified after this iterator
    /// was created.
    pub fn has_next(&self) -> Result<bool> {
        self.cursor.has_next(self.tree.borrow().raw())
    }
}

impl<T: Clone, C> ViewIter<T, C> {
    /// Advances and returns the next key.
    ///
    /// # Errors
    ///
    /// [`Error::StaleIterator`] if the tree was modified after this iterator
    /// was created, [`Error::IteratorExhausted`] if every key has been
    /// returned.
    pub fn try_next(&mut self) -> Result<T> {
        let tree = self.tree.borrow();
        let handle = self.cursor.advance(tree.raw())?;
        Ok(tree.raw().key(handle).clone())
    }
}

impl<T: Clone, C> Iterator for ViewIter<T, C> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.finished {
            return None;
        }
        match self.try_next() {
            Ok(key) => Some(Ok(key)),
            Err(Error::IteratorExhausted) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<T: Clone, C> FusedIterator for ViewIter<T, C> {}

impl<T, C> fmt::Debug for ViewIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewIter").field("direction", &self.cursor.direction()).finish_non_exhaustive()
    }
}
