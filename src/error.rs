use thiserror::Error;

/// Failures reported by [`OrderedTree`](crate::OrderedTree),
/// [`OrderedSetView`](crate::OrderedSetView) and their iterators.
///
/// All of them are local to the call that raised them. A failed mutation
/// leaves the tree exactly as it was.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum Error {
    /// The comparator could not order two keys it was asked about.
    #[error("keys cannot be compared under this ordering")]
    NotComparable,
    /// `first` or `last` was called on an empty set.
    #[error("the set is empty")]
    EmptyCollection,
    /// The tree changed after the iterator was created. The iterator stays
    /// unusable from then on.
    #[error("the set was modified after this iterator was created")]
    StaleIterator,
    /// `try_next` was called with no element left to yield.
    #[error("the iterator has no more elements")]
    IteratorExhausted,
}

/// Result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
