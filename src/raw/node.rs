use super::handle::Handle;

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

// One key per node. `parent` is a non-owning back link used to step to the
// in-order neighbour without re-descending from the root.
pub(crate) struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a childless node hanging from `parent`.
    pub(crate) fn leaf(key: T, parent: Option<Handle>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &T {
        &self.key
    }

    /// Swaps in a new key, returning the old one.
    pub(crate) fn replace_key(&mut self, key: T) -> T {
        core::mem::replace(&mut self.key, key)
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns the side `child` occupies, or `None` if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            left: self.left,
            right: self.right,
            parent: self.parent,
        }
    }
}
