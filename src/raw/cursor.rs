use super::handle::Handle;
use super::raw_tree::RawTree;
use crate::error::{Error, Result};

/// Traversal direction of a [`Cursor`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    pub(crate) const fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    NotStarted,
    Positioned(Handle),
    Exhausted,
}

/// Position of an in-progress walk over a [`RawTree`].
///
/// A cursor holds no reference to the tree; each call is handed the tree
/// again. It records the tree's version when created and refuses to move once
/// that version is out of date, so a handle it holds is never read after the
/// node behind it may have been freed.
#[derive(Clone, Debug)]
pub(crate) struct Cursor {
    direction: Direction,
    state: State,
    version: u64,
}

impl Cursor {
    pub(crate) fn new<T>(tree: &RawTree<T>, direction: Direction) -> Self {
        Self {
            direction,
            state: State::NotStarted,
            version: tree.version(),
        }
    }

    pub(crate) const fn direction(&self) -> Direction {
        self.direction
    }

    fn check_version<T>(&self, tree: &RawTree<T>) -> Result<()> {
        if self.version == tree.version() {
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(created = self.version, current = tree.version(), "stale iterator");
            Err(Error::StaleIterator)
        }
    }

    /// The node a fresh walk starts from.
    fn start<T>(&self, tree: &RawTree<T>) -> Option<Handle> {
        match self.direction {
            Direction::Ascending => tree.first_node(),
            Direction::Descending => tree.last_node(),
        }
    }

    /// The node a walk ends on, recomputed on every call.
    fn end<T>(&self, tree: &RawTree<T>) -> Option<Handle> {
        match self.direction {
            Direction::Ascending => tree.last_node(),
            Direction::Descending => tree.first_node(),
        }
    }

    /// Returns whether [`advance`](Self::advance) would yield another node.
    ///
    /// # Errors
    ///
    /// [`Error::StaleIterator`] if the tree changed since the cursor was made.
    pub(crate) fn has_next<T>(&self, tree: &RawTree<T>) -> Result<bool> {
        self.check_version(tree)?;
        Ok(match self.state {
            State::NotStarted => !tree.is_empty(),
            State::Positioned(handle) => Some(handle) != self.end(tree),
            State::Exhausted => false,
        })
    }

    /// Moves to the next node in the cursor's direction and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::StaleIterator`] if the tree changed since the cursor was made,
    /// [`Error::IteratorExhausted`] if there is no next node.
    pub(crate) fn advance<T>(&mut self, tree: &RawTree<T>) -> Result<Handle> {
        if !self.has_next(tree)? {
            self.state = State::Exhausted;
            return Err(Error::IteratorExhausted);
        }
        let next = match (self.state, self.direction) {
            (State::Positioned(handle), Direction::Ascending) => tree.next_node(handle),
            (State::Positioned(handle), Direction::Descending) => tree.prev_node(handle),
            _ => self.start(tree),
        };
        // `has_next` saw a node past the current one, so the step exists.
        let next = next.expect("`Cursor::advance()` - in-order neighbour missing!");
        self.state = State::Positioned(next);
        Ok(next)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use alloc::vec::Vec;

    fn tree_from(keys: &[u8]) -> RawTree<u8> {
        let mut tree = RawTree::new();
        for &key in keys {
            let _ = tree.insert(key, &NaturalOrder).unwrap();
        }
        tree
    }

    fn drain(cursor: &mut Cursor, tree: &RawTree<u8>) -> Vec<u8> {
        let mut out = Vec::new();
        while cursor.has_next(tree).unwrap() {
            out.push(*tree.key(cursor.advance(tree).unwrap()));
        }
        out
    }

    #[test]
    fn walks_both_directions() {
        let tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let mut up = Cursor::new(&tree, Direction::Ascending);
        let mut down = Cursor::new(&tree, Direction::Descending);
        assert_eq!(drain(&mut up, &tree), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(drain(&mut down, &tree), [7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn empty_tree_has_nothing() {
        let tree = tree_from(&[]);
        let mut cursor = Cursor::new(&tree, Direction::Ascending);
        assert_eq!(cursor.has_next(&tree), Ok(false));
        assert_eq!(cursor.advance(&tree), Err(Error::IteratorExhausted));
        assert_eq!(cursor.has_next(&tree), Ok(false));
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let tree = tree_from(&[1]);
        let mut cursor = Cursor::new(&tree, Direction::Descending);
        assert!(cursor.advance(&tree).is_ok());
        assert_eq!(cursor.advance(&tree), Err(Error::IteratorExhausted));
        assert_eq!(cursor.advance(&tree), Err(Error::IteratorExhausted));
    }

    #[test]
    fn any_mutation_makes_cursor_stale() {
        let mut tree = tree_from(&[2, 1, 3]);
        let mut cursor = Cursor::new(&tree, Direction::Ascending);
        assert!(cursor.advance(&tree).is_ok());

        let _ = tree.insert(9, &NaturalOrder).unwrap();
        assert_eq!(cursor.has_next(&tree), Err(Error::StaleIterator));
        assert_eq!(cursor.advance(&tree), Err(Error::StaleIterator));

        // Stale for good: nothing brings the captured version back.
        let _ = tree.remove(&9, &NaturalOrder).unwrap();
        assert_eq!(cursor.has_next(&tree), Err(Error::StaleIterator));
    }

    #[test]
    fn direction_reverses() {
        assert_eq!(Direction::Ascending.reverse(), Direction::Descending);
        assert_eq!(Direction::Descending.reverse().reverse(), Direction::Descending);
    }
}
