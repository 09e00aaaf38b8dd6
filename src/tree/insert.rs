use core::cmp::Ordering;

use log::{debug, trace};

use super::RbTree;
use crate::node::{Color, Direction};

impl<K: Ord> RbTree<K> {
    /// Inserts `key`, returning `false` without touching the tree if it is
    /// already present.
    ///
    /// ```
    /// use sentinel_rbtree::{Color, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// assert!(tree.insert(10));
    /// assert!(tree.insert(5));
    /// assert!(!tree.insert(10));
    ///
    /// assert_eq!(tree.root().key(), Some(&10));
    /// assert_eq!(tree.root().color(), Color::Black);
    /// assert_eq!(tree.root().left().unwrap().color(), Color::Red);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.node(self.root).is_sentinel() {
            let old_root = self.root;
            self.arena.deallocate(old_root);
            self.root = self.create_key_node(key, Color::Black, None);
            self.len = 1;
            debug!("first key placed at slot {}", self.root);
        } else {
            let (parent, dir, slot) = match self.find_insertion_slot(&key) {
                Some(found) => found,
                None => return false,
            };

            self.arena.deallocate(slot);
            let new_idx = self.create_key_node(key, Color::Red, Some(parent));
            self.set_child(parent, dir, new_idx);
            self.len += 1;

            self.fix_insertion_violations(new_idx);
        }

        #[cfg(debug_assertions)]
        debug_assert!(
            self.is_valid(),
            "RB tree invariants violated after insertion"
        );
        debug_assert_eq!(self.arena.live(), 2 * self.len + 1);

        true
    }

    /// Walks down from a non-empty root to the sentinel where `key` belongs.
    ///
    /// Returns the parent key node, the side the sentinel hangs from, and the
    /// sentinel slot itself, or `None` if the key is already stored.
    fn find_insertion_slot(&self, key: &K) -> Option<(usize, Direction, usize)> {
        let mut parent = self.root;

        loop {
            let dir = match self.node(parent).key().map(|node_key| key.cmp(node_key)) {
                Some(Ordering::Less) => Direction::Left,
                Some(Ordering::Greater) => Direction::Right,
                Some(Ordering::Equal) | None => return None,
            };
            let next = self.child(parent, dir)?;
            if self.node(next).is_sentinel() {
                return Some((parent, dir, next));
            }
            parent = next;
        }
    }

    fn fix_insertion_violations(&mut self, mut node: usize) {
        while let Some(next) = self.insertion_step(node) {
            node = next;
        }
    }

    /// Resolves one level of red-red conflict between `node` and its parent.
    ///
    /// Returns the node to continue from when the conflict moved upwards.
    fn insertion_step(&mut self, node: usize) -> Option<usize> {
        let parent = self.parent(node)?;
        if self.color(node) == Color::Black || self.color(parent) == Color::Black {
            return None;
        }

        // a red parent is never the root, so the grandparent exists
        let grandparent = self.parent(parent)?;
        let parent_side = self.side_of(parent)?;
        let uncle = self.child(grandparent, !parent_side)?;

        if self.color(uncle) == Color::Red {
            self.set_color(parent, Color::Black);
            self.set_color(uncle, Color::Black);

            // the root stays black and absorbs the extra black level itself
            if grandparent == self.root {
                trace!("insert fix-up: both root children red under slot {grandparent}");
                return None;
            }

            trace!("insert fix-up: red uncle at slot {uncle}, pushing red to slot {grandparent}");
            self.set_color(grandparent, Color::Red);
            return Some(grandparent);
        }

        let node_side = self.side_of(node)?;
        let top = if node_side != parent_side {
            trace!("insert fix-up: triangle at slot {node}, rotating parent slot {parent}");
            self.rotate(parent_side, parent);
            node
        } else {
            parent
        };

        trace!("insert fix-up: line, rotating grandparent slot {grandparent}");
        self.rotate(!parent_side, grandparent);
        self.set_color(top, Color::Black);
        self.set_color(grandparent, Color::Red);
        None
    }
}
