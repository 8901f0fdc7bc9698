use super::OrderedTree;
use crate::comparator::Comparator;
use crate::error::Result;

impl<T, C: Comparator<T>> OrderedTree<T, C> {
    /// Returns the greatest key strictly less than `key`.
    ///
    /// This is the key just before the lower bound of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`](crate::Error::NotComparable) if `key` cannot be
    /// ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 4, 6]);
    /// assert_eq!(tree.lower(&4), Ok(Some(&1)));
    /// assert_eq!(tree.lower(&1), Ok(None));
    /// assert_eq!(tree.lower(&30), Ok(Some(&6)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn lower(&self, key: &T) -> Result<Option<&T>> {
        let bound = self.raw.lower_bound(key, &self.comparator)?;
        Ok(self.raw.before_bound(bound).map(|h| self.raw.key(h)))
    }

    /// Returns the greatest key less than or equal to `key`.
    ///
    /// This is the key just before the upper bound of `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`](crate::Error::NotComparable) if `key` cannot be
    /// ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 4, 6]);
    /// assert_eq!(tree.floor(&3), Ok(Some(&1)));
    /// assert_eq!(tree.floor(&4), Ok(Some(&4)));
    /// assert_eq!(tree.floor(&0), Ok(None));
    /// ```
    pub fn floor(&self, key: &T) -> Result<Option<&T>> {
        let bound = self.raw.upper_bound(key, &self.comparator)?;
        Ok(self.raw.before_bound(bound).map(|h| self.raw.key(h)))
    }

    /// Returns the least key greater than or equal to `key`: its lower bound.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`](crate::Error::NotComparable) if `key` cannot be
    /// ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 4, 6]);
    /// assert_eq!(tree.ceiling(&4), Ok(Some(&4)));
    /// assert_eq!(tree.ceiling(&0), Ok(Some(&1)));
    /// assert_eq!(tree.ceiling(&7), Ok(None));
    /// ```
    pub fn ceiling(&self, key: &T) -> Result<Option<&T>> {
        let bound = self.raw.lower_bound(key, &self.comparator)?;
        Ok(bound.map(|h| self.raw.key(h)))
    }

    /// Returns the least key strictly greater than `key`: its upper bound.
    ///
    /// # Errors
    ///
    /// [`Error::NotComparable`](crate::Error::NotComparable) if `key` cannot be
    /// ordered against a stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use navset::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 4, 6]);
    /// assert_eq!(tree.higher(&1), Ok(Some(&4)));
    /// assert_eq!(tree.higher(&6), Ok(None));
    /// ```
    pub fn higher(&self, key: &T) -> Result<Option<&T>> {
        let bound = self.raw.upper_bound(key, &self.comparator)?;
        Ok(bound.map(|h| self.raw.key(h)))
    }
}
