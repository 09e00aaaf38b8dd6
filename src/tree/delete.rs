use log::{debug, trace};

use super::RbTree;
use crate::node::{Color, Node, NodeId};

impl<K> RbTree<K> {
    /// Deletes the node behind `id`.
    ///
    /// Handles pointing at sentinels, at nodes that were already freed, or
    /// into a different tree's arena are ignored.
    ///
    /// A node with two children takes over its in-order successor's key and
    /// the successor's slot is removed instead, so `id` itself keeps resolving
    /// (now holding the successor key) while any handle to the successor goes
    /// stale.
    pub fn delete(&mut self, id: NodeId) {
        let Some(target) = self.arena.resolve(id) else {
            return;
        };

        self.delete_node(target);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.is_valid(),
            "RB tree invariants violated after deletion"
        );
        debug_assert_eq!(self.arena.live(), 2 * self.len + 1);
    }

    fn delete_node(&mut self, target: usize) {
        let (left, right, color) = match self.node(target) {
            Node::Sentinel { .. } => return,
            Node::Key {
                left, right, color, ..
            } => (*left, *right, *color),
        };

        match (self.node(left).is_sentinel(), self.node(right).is_sentinel()) {
            (false, false) => {
                let successor = self.leftmost(right);
                self.arena.swap_keys(target, successor);
                // the successor has no left child, so this lands in a case below
                self.delete_node(successor);
            }
            (true, true) => self.remove_leaf(target, color),
            (true, false) => self.splice_out(target, right),
            (false, true) => self.splice_out(target, left),
        }
    }

    /// Replaces a key node that has only sentinel children with a fresh
    /// sentinel, then repairs the black deficit if a black node went away.
    fn remove_leaf(&mut self, target: usize, color: Color) {
        let sentinel = self.arena.allocate(Node::sentinel(None));
        self.replace_in_parent(target, sentinel);
        self.free_with_children(target);
        self.len -= 1;

        if sentinel == self.root {
            debug!("last key removed, tree is empty");
            return;
        }

        if color == Color::Black {
            self.fix_deletion_violations(sentinel);
        }
    }

    /// Lifts the only key child of `target` into its place.
    ///
    /// Under the invariants this child is red and `target` black, so painting
    /// the child black restores the black height exactly.
    fn splice_out(&mut self, target: usize, child: usize) {
        self.replace_in_parent(target, child);
        self.set_color(child, Color::Black);
        self.free_with_children(target);
        self.len -= 1;
    }

    /// Frees `idx` along with any of its children that are sentinels.
    fn free_with_children(&mut self, idx: usize) {
        if let Some(Node::Key { left, right, .. }) = self.arena.deallocate(idx) {
            for child in [left, right] {
                if self.node(child).is_sentinel() && self.parent(child) == Some(idx) {
                    self.arena.deallocate(child);
                }
            }
        }
    }

    fn fix_deletion_violations(&mut self, mut node: usize) {
        while let Some(next) = self.deletion_step(node) {
            node = next;
        }
    }

    /// Resolves one step of the black deficit carried by `node`.
    ///
    /// Returns the node that carries the deficit afterwards, or `None` once
    /// it has been absorbed.
    fn deletion_step(&mut self, node: usize) -> Option<usize> {
        if node == self.root {
            self.set_color(node, Color::Black);
            return None;
        }

        let parent = self.parent(node)?;
        let side = self.side_of(node)?;
        let sibling = self.child(parent, !side)?;
        // the sibling subtree is a black level taller, so it is never a sentinel
        let near = self.child(sibling, side)?;
        let far = self.child(sibling, !side)?;
        let parent_color = self.color(parent);

        match (self.color(sibling), self.color(near), self.color(far)) {
            (Color::Black, Color::Black, Color::Black) => {
                trace!("delete fix-up: black sibling slot {sibling} with black nephews");
                self.set_color(sibling, Color::Red);
                if parent_color == Color::Black {
                    Some(parent)
                } else {
                    self.set_color(parent, Color::Black);
                    None
                }
            }
            (Color::Black, Color::Red, Color::Black) => {
                trace!("delete fix-up: red near nephew slot {near}, rotating sibling slot {sibling}");
                self.rotate(!side, sibling);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                Some(node)
            }
            (Color::Black, _, Color::Red) => {
                trace!("delete fix-up: red far nephew slot {far}, rotating parent slot {parent}");
                self.set_color(sibling, parent_color);
                self.rotate(side, parent);
                self.set_color(far, Color::Black);
                self.set_color(parent, Color::Black);
                None
            }
            (Color::Red, _, _) => {
                trace!("delete fix-up: red sibling slot {sibling}, rotating parent slot {parent}");
                self.rotate(side, parent);
                self.set_color(parent, Color::Red);
                self.set_color(sibling, Color::Black);
                Some(node)
            }
        }
    }
}
