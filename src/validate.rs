use ahash::RandomState;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::{
    RbTree, Violation,
    node::{Color, Direction, Node},
};

impl<K> RbTree<K> {
    /// Independent red-black oracle: `true` iff the root is black (or the
    /// tree is empty), every path to a sentinel crosses the same number of
    /// black nodes, and no red node has a red child.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Same checks as [`is_valid`](Self::is_valid), naming the first one
    /// that fails.
    pub fn check(&self) -> Result<(), Violation> {
        if self.color(self.root_index()) == Color::Red {
            return Err(Violation::RedRoot);
        }
        self.verify_black_height(self.root_index())?;
        self.verify_no_red_red(self.root_index())
    }

    /// Black height of the whole tree, counting the sentinel level as 1.
    ///
    /// `None` when two paths disagree.
    pub fn black_height(&self) -> Option<usize> {
        self.verify_black_height(self.root_index()).ok()
    }

    fn verify_black_height(&self, idx: usize) -> Result<usize, Violation> {
        match self.node(idx) {
            Node::Sentinel { .. } => Ok(1),
            Node::Key {
                left, right, color, ..
            } => {
                let left_height = self.verify_black_height(*left)?;
                let right_height = self.verify_black_height(*right)?;

                if left_height != right_height {
                    return Err(Violation::BlackHeightMismatch { node: idx });
                }

                match color {
                    Color::Black => Ok(left_height + 1),
                    Color::Red => Ok(left_height),
                }
            }
        }
    }

    fn verify_no_red_red(&self, idx: usize) -> Result<(), Violation> {
        let Node::Key {
            left, right, color, ..
        } = self.node(idx)
        else {
            return Ok(());
        };

        if *color == Color::Red {
            for child in [*left, *right] {
                if self.color(child) == Color::Red {
                    return Err(Violation::RedRedAdjacency { parent: idx, child });
                }
            }
        }

        self.verify_no_red_red(*left)?;
        self.verify_no_red_red(*right)
    }
}

impl<K: Ord> RbTree<K> {
    /// Audits the linkage rather than the coloring: every child points back
    /// at its parent, no slot (sentinels included) is linked twice, keys are
    /// strictly increasing in order, and the reachable key count matches
    /// [`len`](Self::len).
    pub fn check_structure(&self) -> Result<(), Violation> {
        let root = self.root_index();
        if self.parent(root).is_some() {
            return Err(Violation::BrokenParentLink {
                child: root,
                expected: None,
            });
        }

        let mut seen =
            HashSet::with_capacity_and_hasher(2 * self.len() + 1, RandomState::default());
        let mut stack = vec![root];
        seen.insert(root);

        while let Some(idx) = stack.pop() {
            for dir in [Direction::Left, Direction::Right] {
                let Some(child) = self.child(idx, dir) else {
                    continue;
                };
                if !seen.insert(child) {
                    return Err(Violation::SharedSlot { slot: child });
                }
                if self.parent(child) != Some(idx) {
                    return Err(Violation::BrokenParentLink {
                        child,
                        expected: Some(idx),
                    });
                }
                stack.push(child);
            }
        }

        let ordered = self.in_order(root);
        for pair in ordered.windows(2) {
            if self.node(pair[0]).key() >= self.node(pair[1]).key() {
                return Err(Violation::KeyOrder { slot: pair[1] });
            }
        }

        if ordered.len() != self.len() {
            return Err(Violation::LengthMismatch {
                expected: self.len(),
                found: ordered.len(),
            });
        }

        Ok(())
    }
}

impl<K> RbTree<K> {
    /// Key node slots of the subtree at `from`, in key order.
    pub(crate) fn in_order(&self, from: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut current = from;

        loop {
            while !self.node(current).is_sentinel() {
                stack.push(current);
                match self.child(current, Direction::Left) {
                    Some(left) => current = left,
                    None => break,
                }
            }

            let Some(idx) = stack.pop() else {
                return out;
            };
            out.push(idx);
            match self.child(idx, Direction::Right) {
                Some(right) => current = right,
                None => return out,
            }
        }
    }
}
