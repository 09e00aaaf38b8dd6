use core::{fmt, ops::Not};

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from a node to its sentinel leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// Side of a parent a child hangs from, also used as the rotation direction.
///
/// A `Left` rotation lifts the pivot's right child, a `Right` rotation lifts
/// its left child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left child / left rotation
    Left,
    /// Right child / right rotation
    Right,
}

impl Not for Direction {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A single arena slot's content: either a key node or an empty-subtree sentinel.
///
/// Only the key variant carries a color, so a red sentinel cannot be built.
/// Every empty child slot owns its own sentinel with its own parent link.
#[derive(Debug, Clone)]
pub(crate) enum Node<K> {
    Sentinel {
        parent: Option<usize>,
    },
    Key {
        key: K,
        color: Color,
        left: usize,
        right: usize,
        parent: Option<usize>,
    },
}

impl<K> Node<K> {
    #[inline]
    pub(crate) const fn sentinel(parent: Option<usize>) -> Self {
        Self::Sentinel { parent }
    }

    #[inline]
    pub(crate) const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel { .. })
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        match self {
            Self::Sentinel { .. } => Color::Black,
            Self::Key { color, .. } => *color,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<usize> {
        match self {
            Self::Sentinel { parent } | Self::Key { parent, .. } => *parent,
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, new_parent: Option<usize>) {
        match self {
            Self::Sentinel { parent } | Self::Key { parent, .. } => *parent = new_parent,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Option<&K> {
        match self {
            Self::Sentinel { .. } => None,
            Self::Key { key, .. } => Some(key),
        }
    }

    /// Child slot on the given side, `None` for sentinels
    #[inline]
    pub(crate) const fn child(&self, dir: Direction) -> Option<usize> {
        match (self, dir) {
            (Self::Sentinel { .. }, _) => None,
            (Self::Key { left, .. }, Direction::Left) => Some(*left),
            (Self::Key { right, .. }, Direction::Right) => Some(*right),
        }
    }
}

/// Stable handle to a node slot inside one [`RbTree`](crate::RbTree).
///
/// The generation guards against reuse: once the slot is freed, the handle
/// stops resolving even if the slot is later handed to a new node. Handles
/// are also tagged with the tree that issued them; another tree, including
/// a clone, ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) arena: usize,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Position of the node's slot in the tree's arena
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Borrowed, read-only view of a node.
///
/// This is the walking surface for renderers and test harnesses: starting
/// from [`RbTree::root`](crate::RbTree::root), follow [`left`](Self::left)
/// and [`right`](Self::right) until [`is_sentinel`](Self::is_sentinel).
pub struct NodeRef<'a, K> {
    pub(crate) tree: &'a crate::RbTree<K>,
    pub(crate) index: usize,
}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("key", &self.key())
            .field("color", &self.color())
            .finish()
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<'a, K> NodeRef<'a, K> {
    #[inline]
    fn node(&self) -> &'a Node<K> {
        self.tree.node(self.index)
    }

    /// Handle that can be passed back to [`RbTree::delete`](crate::RbTree::delete)
    pub fn id(&self) -> NodeId {
        self.tree.handle(self.index)
    }

    /// The stored key, `None` for a sentinel
    pub fn key(&self) -> Option<&'a K> {
        self.node().key()
    }

    /// Node color; sentinels are always [`Color::Black`]
    pub fn color(&self) -> Color {
        self.node().color()
    }

    /// `true` if this slot represents an empty subtree
    pub fn is_sentinel(&self) -> bool {
        self.node().is_sentinel()
    }

    /// Left child, `None` only for sentinels
    pub fn left(&self) -> Option<Self> {
        self.child(Direction::Left)
    }

    /// Right child, `None` only for sentinels
    pub fn right(&self) -> Option<Self> {
        self.child(Direction::Right)
    }

    /// Child on the given side, `None` only for sentinels
    pub fn child(&self, dir: Direction) -> Option<Self> {
        self.node().child(dir).map(|index| Self {
            tree: self.tree,
            index,
        })
    }

    /// Structural parent, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.node().parent().map(|index| Self {
            tree: self.tree,
            index,
        })
    }
}
