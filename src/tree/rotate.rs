use log::trace;

use super::RbTree;
use crate::node::Direction;

impl<K> RbTree<K> {
    /// Single rotation around `pivot`.
    ///
    /// A `Left` rotation lifts the pivot's right child into the pivot's
    /// position and hangs the pivot off its left side; `Right` mirrors it.
    /// The lifted child's inner subtree moves across to the pivot. Colors are
    /// untouched. Rotating a sentinel, or towards a sentinel child, does
    /// nothing.
    pub(crate) fn rotate(&mut self, dir: Direction, pivot: usize) {
        let Some(lifted) = self.child(pivot, !dir) else {
            return;
        };
        let Some(inner) = self.child(lifted, dir) else {
            return;
        };

        trace!("rotate {dir:?} at slot {pivot}, lifting slot {lifted}");

        self.set_child(pivot, !dir, inner);
        self.node_mut(inner).set_parent(Some(pivot));

        self.replace_in_parent(pivot, lifted);

        self.set_child(lifted, dir, pivot);
        self.node_mut(pivot).set_parent(Some(lifted));
    }
}
