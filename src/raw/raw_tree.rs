use core::cmp::Ordering::{self, Equal, Greater, Less};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::comparator::Comparator;
use crate::error::{Error, Result};

/// The unbalanced binary search tree backing `OrderedTree`.
///
/// Keys are ordered by a comparator passed into each call rather than stored
/// here, so the raw tree only knows about shape. Every structural change bumps
/// `version`; iterators compare against it to notice they are stale.
pub(crate) struct RawTree<T> {
    /// Arena owning every node.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of keys reachable from `root`.
    len: usize,
    /// Mutation counter, advanced by every insert, remove and clear.
    version: u64,
}

impl<T> RawTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            version: 0,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            version: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn version(&self) -> u64 {
        self.version
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &T {
        self.nodes.get(handle).key()
    }

    /// Drops every node. Always counts as a structural change, even when the
    /// tree was already empty.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.bump_version();

        #[cfg(feature = "tracing")]
        tracing::trace!(version = self.version, "clear");
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Descends left from `handle` as far as possible.
    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Descends right from `handle` as far as possible.
    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first_node(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last_node(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the in-order successor of `handle`.
    ///
    /// With a right subtree the successor is its leftmost node; otherwise it is
    /// the first ancestor reached from a left child.
    pub(crate) fn next_node(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Some(self.leftmost(right));
        }
        self.climb_until_from(handle, Side::Left)
    }

    /// Returns the in-order predecessor of `handle`. Mirror of [`next_node`](Self::next_node).
    pub(crate) fn prev_node(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.node(handle).left() {
            return Some(self.rightmost(left));
        }
        self.climb_until_from(handle, Side::Right)
    }

    /// Walks parent links until arriving from the `side` child; returns that parent.
    fn climb_until_from(&self, mut handle: Handle, side: Side) -> Option<Handle> {
        while let Some(parent) = self.node(handle).parent() {
            if self.node(parent).child(side) == Some(handle) {
                return Some(parent);
            }
            handle = parent;
        }
        None
    }

    // ─── Search ─────────────────────────────────────────────────────────────

    fn compare<C>(cmp: &C, probe: &T, stored: &T) -> Result<Ordering>
    where
        C: Comparator<T> + ?Sized,
    {
        cmp.compare(probe, stored).ok_or(Error::NotComparable)
    }

    /// Finds the node whose key is equivalent to `key`.
    pub(crate) fn find<C>(&self, key: &T, cmp: &C) -> Result<Option<Handle>>
    where
        C: Comparator<T> + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match Self::compare(cmp, key, node.key())? {
                Equal => return Ok(Some(handle)),
                Less => node.left(),
                Greater => node.right(),
            };
        }
        Ok(None)
    }

    /// Finds the lower bound of `key`: the first node whose key is `>=` it.
    pub(crate) fn lower_bound<C>(&self, key: &T, cmp: &C) -> Result<Option<Handle>>
    where
        C: Comparator<T> + ?Sized,
    {
        self.bound(key, cmp, |ord| ord != Greater)
    }

    /// Finds the upper bound of `key`: the first node whose key is `>` it.
    pub(crate) fn upper_bound<C>(&self, key: &T, cmp: &C) -> Result<Option<Handle>>
    where
        C: Comparator<T> + ?Sized,
    {
        self.bound(key, cmp, |ord| ord == Less)
    }

    // Descends from the root, remembering the last node where `go_left` held.
    fn bound<C, F>(&self, key: &T, cmp: &C, go_left: F) -> Result<Option<Handle>>
    where
        C: Comparator<T> + ?Sized,
        F: Fn(Ordering) -> bool,
    {
        let mut current = self.root;
        let mut result = None;
        while let Some(handle) = current {
            let node = self.node(handle);
            if go_left(Self::compare(cmp, key, node.key())?) {
                result = Some(handle);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        Ok(result)
    }

    /// Returns the node just before `bound`, or the last node when there is no
    /// bound. `None` means nothing precedes the bound.
    pub(crate) fn before_bound(&self, bound: Option<Handle>) -> Option<Handle> {
        match bound {
            None => self.last_node(),
            Some(handle) => self.prev_node(handle),
        }
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Inserts `key` unless an equivalent key is already present.
    ///
    /// The new leaf goes immediately before the lower bound of `key`: as the
    /// right child of the rightmost node in the bound's left subtree, or as
    /// the bound's left child when it has none. Without a lower bound the key
    /// is larger than everything and becomes the rightmost node.
    ///
    /// Returns the key back when an equivalent one was found.
    pub(crate) fn insert<C>(&mut self, key: T, cmp: &C) -> Result<core::result::Result<Handle, T>>
    where
        C: Comparator<T> + ?Sized,
    {
        let Some(root) = self.root else {
            let handle = self.nodes.insert(Node::leaf(key, None));
            self.root = Some(handle);
            self.record_insert();
            return Ok(Ok(handle));
        };

        let bound = self.lower_bound(&key, cmp)?;
        if let Some(bound) = bound
            && Self::compare(cmp, &key, self.key(bound))? == Equal
        {
            return Ok(Err(key));
        }

        // All comparisons are done; from here on the tree is modified.
        let (parent, side) = match bound {
            None => (self.rightmost(root), Side::Right),
            Some(bound) => match self.node(bound).left() {
                Some(left) => (self.rightmost(left), Side::Right),
                None => (bound, Side::Left),
            },
        };
        let handle = self.nodes.insert(Node::leaf(key, Some(parent)));
        self.nodes.get_mut(parent).set_child(side, Some(handle));
        self.record_insert();
        Ok(Ok(handle))
    }

    fn record_insert(&mut self) {
        self.len += 1;
        self.bump_version();
        debug_assert_eq!(self.nodes.len(), self.len);

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, version = self.version, "insert");
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Removes the key equivalent to `key` and returns it.
    pub(crate) fn remove<C>(&mut self, key: &T, cmp: &C) -> Result<Option<T>>
    where
        C: Comparator<T> + ?Sized,
    {
        Ok(self.find(key, cmp)?.map(|handle| self.remove_node(handle)))
    }

    /// Unlinks `handle` from the tree and returns its key.
    ///
    /// A node with two children keeps its slot: it takes over the key of its
    /// in-order successor, and the successor (which has no left child) is
    /// unlinked instead.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> T {
        let node = self.node(handle);
        let removed = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_key = self.unlink(successor);
                self.nodes.get_mut(handle).replace_key(successor_key)
            }
            _ => self.unlink(handle),
        };

        self.len -= 1;
        self.bump_version();
        debug_assert_eq!(self.nodes.len(), self.len);

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, version = self.version, "remove");

        removed
    }

    /// Splices out a node with at most one child, moving that child into its
    /// place, and frees the node's slot.
    fn unlink(&mut self, handle: Handle) -> T {
        let node = self.node(handle);
        debug_assert!(node.left().is_none() || node.right().is_none(), "unlink() needs at most one child");
        let child = node.left().or(node.right());
        let parent = node.parent();

        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let side = self.node(parent).side_of(handle).expect("`RawTree::unlink()` - broken parent link!");
                self.nodes.get_mut(parent).set_child(side, child);
            }
        }
        self.nodes.remove(handle).into_key()
    }
}

impl<T: Clone> Clone for RawTree<T> {
    /// Copies the arena slot for slot, so the clone has the same shape and
    /// handles as the original. The version starts over.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            version: 0,
        }
    }
}
