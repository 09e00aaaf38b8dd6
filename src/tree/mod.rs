use core::cmp::Ordering;

use log::debug;

use crate::{
    node::{Color, Direction, Node, NodeId, NodeRef},
    utils::Arena,
};

mod delete;
mod insert;
mod rotate;

/// A red-black tree over totally ordered keys.
///
/// Nodes live in an index-addressed arena. Every empty child position holds
/// its own black sentinel node with a back-reference to the parent that owns
/// the position, so the tree never shares a single nil node between slots.
///
/// Key features:
/// - O(log n) lookup, insertion and deletion
/// - No duplicate keys: inserting an existing key is a no-op
/// - Node handles ([`NodeId`]) that go stale instead of dangling
/// - An independent invariant oracle ([`RbTree::is_valid`])
///
/// Access is single-threaded; wrap the whole tree in a lock if it has to be
/// shared, since one mutation rewires several nodes.
#[derive(Debug, Clone)]
pub struct RbTree<K> {
    /// Backing storage for key nodes and sentinels alike
    arena: Arena<K>,

    /// Slot of the root, a sentinel when the tree is empty
    root: usize,

    /// Number of key nodes currently in the tree
    len: usize,
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RbTree<K> {
    /// Creates an empty tree whose root is a sentinel.
    pub fn new() -> Self {
        Self::from_arena(Arena::new())
    }

    /// Creates an empty tree with arena space reserved for `keys` keys.
    ///
    /// A tree of `n` keys occupies `2n + 1` slots (each key node plus one
    /// sentinel per empty child position), so that is what gets reserved.
    /// The tree still grows past this size on demand.
    pub fn with_capacity(keys: usize) -> Self {
        let slots = keys.saturating_mul(2).saturating_add(1);
        Self::from_arena(Arena::with_capacity(slots))
    }

    fn from_arena(mut arena: Arena<K>) -> Self {
        let root = arena.allocate(Node::sentinel(None));
        Self { arena, root, len: 0 }
    }

    /// Number of keys stored
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` when the root is a sentinel
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key, invalidating all outstanding [`NodeId`]s.
    pub fn clear(&mut self) {
        self.arena.reset();
        self.root = self.arena.allocate(Node::sentinel(None));
        self.len = 0;
        debug!("tree cleared");
    }

    /// The root node; a sentinel view when the tree is empty.
    pub fn root(&self) -> NodeRef<'_, K> {
        NodeRef {
            tree: self,
            index: self.root,
        }
    }

    /// Resolves a handle into a view, `None` if the node has since been freed.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        let index = self.arena.resolve(id)?;
        Some(NodeRef { tree: self, index })
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &Node<K> {
        self.arena.node_at(idx)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        self.arena.node_at_mut(idx)
    }

    #[inline]
    pub(crate) fn handle(&self, idx: usize) -> NodeId {
        self.arena.handle(idx)
    }

    #[inline]
    pub(crate) const fn root_index(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn color(&self, idx: usize) -> Color {
        self.node(idx).color()
    }

    /// Recolors a key node. Sentinels stay black no matter what is asked.
    #[inline]
    pub(crate) fn set_color(&mut self, idx: usize, new_color: Color) {
        match self.node_mut(idx) {
            Node::Key { color, .. } => *color = new_color,
            Node::Sentinel { .. } => debug_assert_eq!(new_color, Color::Black),
        }
    }

    #[inline]
    pub(crate) fn parent(&self, idx: usize) -> Option<usize> {
        self.node(idx).parent()
    }

    #[inline]
    pub(crate) fn child(&self, idx: usize, dir: Direction) -> Option<usize> {
        self.node(idx).child(dir)
    }

    /// Which side of its parent `idx` hangs from, `None` for the root
    pub(crate) fn side_of(&self, idx: usize) -> Option<Direction> {
        let parent = self.parent(idx)?;
        if self.child(parent, Direction::Left) == Some(idx) {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    }

    /// Points `parent`'s child link on `dir` at `child`. Back-references are
    /// left to the caller.
    pub(crate) fn set_child(&mut self, parent: usize, dir: Direction, child: usize) {
        if let Node::Key { left, right, .. } = self.node_mut(parent) {
            match dir {
                Direction::Left => *left = child,
                Direction::Right => *right = child,
            }
        }
    }

    /// Puts `new` into the position `old` occupies, including the root
    /// reference. `old` keeps its own links.
    pub(crate) fn replace_in_parent(&mut self, old: usize, new: usize) {
        let parent = self.parent(old);
        self.node_mut(new).set_parent(parent);

        match parent {
            None => {
                self.root = new;
                debug!("root moved to slot {new}");
            }
            Some(parent) => {
                let side = match self.child(parent, Direction::Left) {
                    Some(left) if left == old => Direction::Left,
                    _ => Direction::Right,
                };
                self.set_child(parent, side, new);
            }
        }
    }

    /// Allocates a key node together with its two fresh sentinel children.
    pub(crate) fn create_key_node(&mut self, key: K, color: Color, parent: Option<usize>) -> usize {
        let idx = self.arena.allocate(Node::Key {
            key,
            color,
            left: 0,
            right: 0,
            parent,
        });
        let left = self.arena.allocate(Node::sentinel(Some(idx)));
        let right = self.arena.allocate(Node::sentinel(Some(idx)));
        self.set_child(idx, Direction::Left, left);
        self.set_child(idx, Direction::Right, right);
        idx
    }

    /// Leftmost key node of the subtree rooted at key node `idx`
    pub(crate) fn leftmost(&self, mut idx: usize) -> usize {
        while let Some(left) = self.child(idx, Direction::Left) {
            if self.node(left).is_sentinel() {
                break;
            }
            idx = left;
        }
        idx
    }
}

impl<K: Ord> RbTree<K> {
    /// Looks up `key`, returning a handle to its node or `None` on a miss.
    ///
    /// ```
    /// use sentinel_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(4);
    /// tree.insert(8);
    ///
    /// let id = tree.find(&8).unwrap();
    /// assert_eq!(tree.get(id).unwrap().key(), Some(&8));
    /// assert!(tree.find(&5).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;

        loop {
            match self.node(current) {
                Node::Sentinel { .. } => return None,
                Node::Key {
                    key: node_key,
                    left,
                    right,
                    ..
                } => match key.cmp(node_key) {
                    Ordering::Equal => return Some(self.handle(current)),
                    Ordering::Less => current = *left,
                    Ordering::Greater => current = *right,
                },
            }
        }
    }

    /// `true` if `key` is stored in the tree
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Finds and deletes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.find(key) {
            Some(id) => {
                self.delete(id);
                true
            }
            None => false,
        }
    }
}
