use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::raw::{Cursor, Direction, RawTree};

mod capacity;
mod navigation;

/// An ordered set stored in an unbalanced binary search tree.
///
/// Keys are arranged by a [`Comparator`], which defaults to the natural order
/// of `T`. Keys the comparator reports as equal are the same key: the set
/// holds at most one of them.
///
/// The tree never rebalances. Inserting keys in sorted order produces a
/// chain, and every operation then takes time linear in the number of keys.
///
/// Comparability is checked lazily. Nothing is validated at construction;
/// a pair of keys the comparator cannot order makes the operation that
/// compared them fail with [`Error::NotComparable`], and leaves the tree as
/// it was.
///
/// To share one tree between several handles, or to look at it in reverse
/// order without copying, wrap it in an [`OrderedSetView`](crate::OrderedSetView).
///
/// # Examples
///
/// ```
/// use navset::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// for key in [15, 16, 19, 24, 1, 10, 21, 4, 6] {
///     tree.add(key).unwrap();
/// }
///
/// assert_eq!(tree.first(), Ok(&1));
/// assert_eq!(tree.last(), Ok(&24));
/// assert_eq!(tree.lower(&4), Ok(Some(&1)));
/// assert_eq!(tree.ceiling(&11), Ok(Some(&15)));
///
/// let keys: Vec<_> = tree.ascending_iter().copied().collect();
/// assert_eq!(keys, [1, 4, 6, 10, 15, 16, 19, 21, 24]);
/// ```
pub struct OrderedTree<T, C = NaturalOrder> {
    raw: RawTree<T>,
    comparator: C,
}

/// An iterator over the keys of an [`OrderedTree`], in ascending or
/// descending order.
///
/// This `struct` is created by [`OrderedTree::ascending_iter`] and
/// [`OrderedTree::descending_iter`]. It borrows the tree, so the tree cannot
/// change underneath it.
///
/// # Examples
///
/// ```
/// use navset::OrderedTree;
///
/// let tree = OrderedTree::from([3, 1, 2]);
/// let mut iter = tree.descending_iter();
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.len(), 2);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: &'a RawTree<T>,
    front: Cursor,
    back: Cursor,
    // Keys not yet yielded from either end; the two cursors never cross.
    remaining: usize,
}

/// An owning iterator over the keys of an [`OrderedTree`], in ascending order.
///
/// This `struct` is created by the [`into_iter`](IntoIterator::into_iter)
/// method on [`OrderedTree`]. Each step detaches the smallest (or, from the
/// back, the largest) remaining key.
///
/// # Examples
///
/// ```
/// use navset::OrderedTree;
///
/// let tree = OrderedTree::from([2, 3, 1]);
/// let mut keys = tree.into_iter();
/// assert_eq!(keys.next_back(), Some(3));
/// assert_eq!(keys.collect::<Vec<_>>(), [1, 2]);
/// ```
pub struct IntoIter<T, C = NaturalOrder> {
    tree: OrderedTree<T, C>,
}

impl<T> OrderedTree<T> {
    /// Makes a new, empty tree ordered by the natural order of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.add("b").unwrap();
    /// tree.add("a").unwrap();
    /// assert_eq!(tree.first(), Ok(&"a"));
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> OrderedTree<T, C> {
    /// Makes a new, empty tree ordered by `comparator`.
    ///
    /// The comparator is not exercised until two keys are compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Reverse;
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::with_comparator(|a: &u32, b: &u32| Reverse(a).cmp(&Reverse(b)));
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.first(), Ok(&3));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawTree::new(),
            comparator,
        }
    }

    /// Returns the comparator that orders this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the mutation counter.
    ///
    /// It advances on every insert, remove and clear, and on nothing else.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// let v0 = tree.version();
    /// tree.add(1).unwrap();
    /// tree.add(1).unwrap(); // duplicate, no change
    /// assert_eq!(tree.version(), v0 + 1);
    /// ```
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.raw.version()
    }

    /// Removes every key.
    ///
    /// Always counts as a modification, so it invalidates outstanding view
    /// iterators even when the tree was already empty.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn first(&self) -> Result<&T> {
        self.raw.first_node().map(|h| self.raw.key(h)).ok_or(Error::EmptyCollection)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn last(&self) -> Result<&T> {
        self.raw.last_node().map(|h| self.raw.key(h)).ok_or(Error::EmptyCollection)
    }

    /// Removes and returns the smallest key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([2, 1]);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.raw.first_node()?;
        Some(self.raw.remove_node(handle))
    }

    /// Removes and returns the largest key, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.raw.last_node()?;
        Some(self.raw.remove_node(handle))
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// # Complexity
    ///
    /// Each step is O(height); a full pass is O(n).
    pub fn ascending_iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw, Direction::Ascending)
    }

    /// Returns an iterator over the keys in descending order.
    pub fn descending_iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw, Direction::Descending)
    }

    pub(crate) fn raw(&self) -> &RawTree<T> {
        &self.raw
    }
}

impl<T, C: Comparator<T>> OrderedTree<T, C> {
    /// Adds `key` unless an equivalent key is already present.
    ///
    /// Returns `true` if the key was added. An existing equivalent key is left
    /// in place and `key` is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a key it
    /// meets on the way down. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.add(3), Ok(true));
    /// assert_eq!(tree.add(3), Ok(false));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn add(&mut self, key: T) -> Result<bool> {
        Ok(self.raw.insert(key, &self.comparator)?.is_ok())
    }

    /// Adds every key from `keys`, stopping at the first incomparable one.
    ///
    /// Returns how many keys were newly added.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] from the first key that could not be placed.
    /// Keys before it stay added.
    pub fn try_extend<I>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = 0;
        for key in keys {
            if self.add(key)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes the key equivalent to `key`. Returns `true` if one was present.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([1, 2]);
    /// assert_eq!(tree.remove(&1), Ok(true));
    /// assert_eq!(tree.remove(&1), Ok(false));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn remove(&mut self, key: &T) -> Result<bool> {
        Ok(self.take(key)?.is_some())
    }

    /// Removes the key equivalent to `key` and returns the stored key.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    pub fn take(&mut self, key: &T) -> Result<Option<T>> {
        self.raw.remove(key, &self.comparator)
    }

    /// Returns `true` if a key equivalent to `key` is present.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn contains(&self, key: &T) -> Result<bool> {
        Ok(self.raw.find(key, &self.comparator)?.is_some())
    }

    /// Returns the stored key equivalent to `key`, if any.
    ///
    /// Useful when the comparator looks at only part of the key.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`] if `key` cannot be ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let mut tree = OrderedTree::with_comparator(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    /// tree.add((1, 'x')).unwrap();
    /// assert_eq!(tree.get(&(1, '?')), Ok(Some(&(1, 'x'))));
    /// ```
    pub fn get(&self, key: &T) -> Result<Option<&T>> {
        Ok(self.raw.find(key, &self.comparator)?.map(|h| self.raw.key(h)))
    }
}

impl<T: Clone, C: Clone> Clone for OrderedTree<T, C> {
    /// Deep-copies the keys. The clone has the same shape as the original and
    /// its own version counter.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ascending_iter()).finish()
    }
}

impl<T, C: Default> Default for OrderedTree<T, C> {
    /// Creates an empty tree with the default comparator.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: PartialEq, C> PartialEq for OrderedTree<T, C> {
    /// Two trees are equal when they hold equal keys in the same order.
    /// Comparators are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ascending_iter().eq(other.ascending_iter())
    }
}

impl<T: Eq, C> Eq for OrderedTree<T, C> {}

impl<T: Hash, C> Hash for OrderedTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for key in self {
            key.hash(state);
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedTree<T, C> {
    /// # Panics
    ///
    /// Panics if a key cannot be compared with the keys already present. Use
    /// [`OrderedTree::try_extend`] to get an error instead.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            panic!("`OrderedTree::extend()` - {err}");
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for OrderedTree<T> {
    /// # Panics
    ///
    /// Panics if two keys cannot be compared.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: PartialOrd, const N: usize> From<[T; N]> for OrderedTree<T> {
    /// Builds a tree by adding the keys in array order.
    ///
    /// # Panics
    ///
    /// Panics if two keys cannot be compared.
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<T, C> IntoIterator for OrderedTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter { tree: self }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.ascending_iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a RawTree<T>, direction: Direction) -> Self {
        Self {
            tree,
            front: Cursor::new(tree, direction),
            back: Cursor::new(tree, direction.reverse()),
            remaining: tree.len(),
        }
    }

    // The borrow on the tree rules out modification, so a cursor can only
    // fail by running off the end, which `remaining` already prevents.
    fn step(tree: &'a RawTree<T>, cursor: &mut Cursor, remaining: &mut usize) -> Option<&'a T> {
        if *remaining == 0 {
            return None;
        }
        let handle = cursor.advance(tree).ok()?;
        *remaining -= 1;
        Some(tree.key(handle))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        Self::step(self.tree, &mut self.front, &mut self.remaining)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        Self::step(self.tree, &mut self.back, &mut self.remaining)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("direction", &self.front.direction()).field("remaining", &self.remaining).finish()
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.tree.pop_last()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {
    fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.tree).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn first_and_last_on_empty_tree() {
        let tree: OrderedTree<i32> = OrderedTree::new();
        assert_eq!(tree.first(), Err(Error::EmptyCollection));
        assert_eq!(tree.last(), Err(Error::EmptyCollection));
    }

    #[test]
    fn iter_len_counts_down() {
        let tree = OrderedTree::from([5, 3, 8]);
        let mut iter = tree.ascending_iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.by_ref().count(), 2);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_ends_meet_in_the_middle() {
        let tree = OrderedTree::from([4, 2, 6, 1, 3, 5]);
        let mut iter = tree.ascending_iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().last(), Some(&4));
        assert_eq!(iter.copied().collect::<Vec<_>>(), [2, 3, 4]);

        let reversed: Vec<_> = tree.descending_iter().rev().copied().collect();
        assert_eq!(reversed, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn into_iter_drains_from_both_ends() {
        let tree = OrderedTree::from([3, 1, 4, 2]);
        let mut keys = tree.into_iter();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys.next_back(), Some(4));
        assert_eq!(keys.next(), Some(1));
        assert_eq!(keys.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn equality_follows_contents() {
        let a = OrderedTree::from([1, 2, 3]);
        let mut b = OrderedTree::from([3, 1, 2]);
        assert_eq!(a, b);
        b.remove(&2).unwrap();
        assert_ne!(a, b);
        b.add(2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = OrderedTree::from([2, 1, 3]);
        let copy = tree.clone();
        tree.add(4).unwrap();
        tree.remove(&1).unwrap();
        assert_eq!(copy.ascending_iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(tree.ascending_iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
        copy.raw().validate_invariants();
    }

    #[test]
    fn debug_prints_as_set() {
        let tree = OrderedTree::from([2, 1]);
        assert_eq!(format!("{tree:?}"), "{1, 2}");
    }

    #[test]
    fn try_extend_stops_at_incomparable_key() {
        let mut tree = OrderedTree::new();
        assert_eq!(tree.try_extend([1.0, 2.0, f64::NAN, 3.0]), Err(Error::NotComparable));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`OrderedTree::extend()` - keys cannot be compared under this ordering")]
    fn extend_panics_on_incomparable_key() {
        let mut tree = OrderedTree::new();
        tree.extend([1.0, f64::NAN]);
    }

    #[test]
    fn pop_from_both_ends() {
        let mut tree = OrderedTree::from([4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.pop_last(), Some(7));
        assert_eq!(tree.pop_first(), Some(1));
        assert_eq!(tree.pop_last(), Some(6));
        assert_eq!(tree.len(), 4);
        tree.raw().validate_invariants();
    }
}
