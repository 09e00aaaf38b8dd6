use thiserror::Error;

/// A broken tree property, reported by the validator.
///
/// The balancing code itself never produces these; a tree built only
/// through [`RbTree`](crate::RbTree) operations should always validate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The root is a red key node
    #[error("root node is red")]
    RedRoot,
    /// A red node has a red child
    #[error("red node at slot {parent} has a red child at slot {child}")]
    RedRedAdjacency {
        /// Slot of the red parent
        parent: usize,
        /// Slot of the red child
        child: usize,
    },
    /// Two paths below a node cross a different number of black nodes
    #[error("black height differs below slot {node}")]
    BlackHeightMismatch {
        /// Slot whose subtrees disagree
        node: usize,
    },
    /// A child's parent back-reference does not point at its parent
    #[error("slot {child} does not point back to its parent {expected:?}")]
    BrokenParentLink {
        /// Slot with the wrong back-reference
        child: usize,
        /// Slot the back-reference should name, `None` for the root
        expected: Option<usize>,
    },
    /// A slot is reachable from more than one parent slot
    #[error("slot {slot} is linked from more than one place")]
    SharedSlot {
        /// The doubly-linked slot
        slot: usize,
    },
    /// In-order traversal is not strictly increasing
    #[error("key at slot {slot} is out of order")]
    KeyOrder {
        /// First slot found out of order
        slot: usize,
    },
    /// Reachable key nodes disagree with the tracked length
    #[error("tree reports {expected} keys but {found} are reachable")]
    LengthMismatch {
        /// Length the tree tracks
        expected: usize,
        /// Key nodes actually reachable from the root
        found: usize,
    },
}
