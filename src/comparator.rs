//! Orderings used to arrange keys in an [`OrderedTree`](crate::OrderedTree).
//!
//! A tree never checks up front that its keys can be ordered. The
//! [`Comparator`] is asked about one pair at a time, and a pair it cannot order
//! surfaces as [`Error::NotComparable`](crate::Error::NotComparable) from
//! whichever operation made the comparison.

use core::cmp::Ordering;
use core::fmt;

/// A (possibly partial) ordering over keys of type `T`.
///
/// Returning `None` declares the pair incomparable. Comparators must be
/// consistent: for every pair they can order, the result has to describe a
/// total order over all keys stored in one tree. Two keys that compare
/// [`Equal`](Ordering::Equal) are the same key as far as the tree is
/// concerned, whatever `PartialEq` says.
///
/// Any closure `Fn(&T, &T) -> Ordering` is a comparator that orders every pair.
///
/// # Examples
///
/// ```
/// use navset::OrderedTree;
///
/// // Keys are equivalent when they share the last decimal digit.
/// let mut tree = OrderedTree::with_comparator(|a: &i32, b: &i32| (a % 10).cmp(&(b % 10)));
/// assert_eq!(tree.add(10), Ok(true));
/// assert_eq!(tree.add(20), Ok(false));
/// assert_eq!(tree.len(), 1);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Orders `probe` relative to `stored`, or returns `None` if the two
    /// cannot be ordered.
    fn compare(&self, probe: &T, stored: &T) -> Option<Ordering>;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, probe: &T, stored: &T) -> Option<Ordering> {
        Some(self(probe, stored))
    }
}

/// The natural order of `T`, as given by its [`PartialOrd`] implementation.
///
/// Pairs for which `partial_cmp` returns `None` (such as a floating point
/// `NaN` against anything) are reported as not comparable.
///
/// # Examples
///
/// ```
/// use navset::{Error, OrderedTree};
///
/// let mut tree = OrderedTree::new();
/// tree.add(1.5_f64).unwrap();
/// assert_eq!(tree.add(f64::NAN), Err(Error::NotComparable));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + PartialOrd> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, probe: &T, stored: &T) -> Option<Ordering> {
        probe.partial_cmp(stored)
    }
}

impl fmt::Debug for NaturalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NaturalOrder")
    }
}
