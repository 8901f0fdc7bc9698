use super::OrderedTree;
use crate::comparator::NaturalOrder;
use crate::raw::RawTree;

impl<T> OrderedTree<T, NaturalOrder> {
    /// Creates an empty, naturally ordered tree with room for at least
    /// `capacity` keys before its node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = OrderedTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> OrderedTree<T, C> {
    /// Creates an empty tree ordered by `comparator`, with room for at least
    /// `capacity` keys.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OrderedTree {
            raw: RawTree::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns how many keys the tree can hold before its node storage
    /// reallocates. Slots freed by removals are reused first.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
