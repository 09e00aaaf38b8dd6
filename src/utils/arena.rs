use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::node::{Node, NodeId};

/// Source of per-arena tags; every arena, clones included, draws a fresh one
static NEXT_TAG: AtomicUsize = AtomicUsize::new(0);

fn next_tag() -> usize {
    NEXT_TAG.fetch_add(1, Ordering::Relaxed)
}

/// One arena cell; `node` is `None` while the slot sits on the free list.
#[derive(Debug, Clone)]
struct Slot<K> {
    /// Bumped every time the slot is freed, invalidating outstanding handles
    generation: u32,
    node: Option<Node<K>>,
}

/// Growable node storage addressed by index.
///
/// Freed slots are recycled through a LIFO free list, so a tree that
/// oscillates around a steady size stops allocating once warmed up.
/// Handles carry the arena's tag, so a handle never resolves in an arena
/// other than the one that issued it.
#[derive(Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    /// Stack of vacant slot indices, top is the next slot handed out
    free_list: Vec<usize>,
    tag: usize,
}

impl<K: Clone> Clone for Arena<K> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free_list: self.free_list.clone(),
            tag: next_tag(),
        }
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            tag: next_tag(),
        }
    }

    /// Number of occupied slots
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub(crate) fn allocate(&mut self, node: Node<K>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].node.is_none());
                self.slots[idx].node = Some(node);
                idx
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn deallocate(&mut self, idx: usize) -> Option<Node<K>> {
        let slot = self.slots.get_mut(idx)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(idx);
        Some(node)
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: usize) -> &Node<K> {
        match self.slots[idx].node.as_ref() {
            Some(node) => node,
            None => unreachable!("arena slot {idx} is vacant"),
        }
    }

    #[inline]
    pub(crate) fn node_at_mut(&mut self, idx: usize) -> &mut Node<K> {
        match self.slots[idx].node.as_mut() {
            Some(node) => node,
            None => unreachable!("arena slot {idx} is vacant"),
        }
    }

    #[inline]
    pub(crate) fn handle(&self, idx: usize) -> NodeId {
        NodeId {
            arena: self.tag,
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Resolves a handle to its slot index if this arena issued it and the
    /// handle is still current
    pub(crate) fn resolve(&self, id: NodeId) -> Option<usize> {
        if id.arena != self.tag {
            return None;
        }
        let slot = self.slots.get(id.index)?;
        (slot.generation == id.generation && slot.node.is_some()).then_some(id.index)
    }

    /// Exchanges the keys of two key nodes, leaving links and colors alone.
    pub(crate) fn swap_keys(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.slots.split_at_mut(hi);
        if let (Some(Node::Key { key: x, .. }), Some(Node::Key { key: y, .. })) =
            (head[lo].node.as_mut(), tail[0].node.as_mut())
        {
            core::mem::swap(x, y);
        }
    }

    /// Drops every node while keeping generations, so old handles stay dead
    pub(crate) fn reset(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_reuse() {
        let mut arena = Arena::<i32>::new();
        let a = arena.allocate(Node::sentinel(None));
        let b = arena.allocate(Node::sentinel(Some(a)));
        assert_eq!(arena.live(), 2);

        assert!(arena.deallocate(a).is_some());
        assert_eq!(arena.live(), 1);

        let c = arena.allocate(Node::sentinel(Some(b)));
        assert_eq!(c, a);
        assert_eq!(arena.live(), 2);
        assert_eq!(arena.node_at(c).parent(), Some(b));
    }

    #[test]
    fn test_double_free_is_ignored() {
        let mut arena = Arena::<i32>::new();
        let a = arena.allocate(Node::sentinel(None));
        assert!(arena.deallocate(a).is_some());
        assert!(arena.deallocate(a).is_none());
        assert!(arena.deallocate(99).is_none());
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut arena = Arena::<i32>::new();
        let a = arena.allocate(Node::sentinel(None));
        let old = arena.handle(a);
        assert_eq!(arena.resolve(old), Some(a));

        arena.deallocate(a);
        assert_eq!(arena.resolve(old), None);

        let b = arena.allocate(Node::sentinel(None));
        assert_eq!(b, a);
        assert_eq!(arena.resolve(old), None);
        assert_eq!(arena.resolve(arena.handle(b)), Some(b));
    }

    #[test]
    fn test_handle_from_other_arena_does_not_resolve() {
        let mut first = Arena::<i32>::new();
        let mut second = Arena::<i32>::new();
        let a = first.allocate(Node::sentinel(None));
        let b = second.allocate(Node::sentinel(None));
        assert_eq!(a, b);

        assert_eq!(second.resolve(first.handle(a)), None);
        assert_eq!(first.resolve(second.handle(b)), None);

        let copy = first.clone();
        assert_eq!(copy.resolve(first.handle(a)), None);
        assert_eq!(copy.resolve(copy.handle(a)), Some(a));
    }

    #[test]
    fn test_reset_invalidates_everything() {
        let mut arena = Arena::<i32>::with_capacity(4);
        let ids: Vec<_> = (0..4)
            .map(|_| {
                let idx = arena.allocate(Node::sentinel(None));
                arena.handle(idx)
            })
            .collect();

        arena.reset();
        assert_eq!(arena.live(), 0);
        assert!(ids.iter().all(|&id| arena.resolve(id).is_none()));

        // lowest index comes back first after a reset
        assert_eq!(arena.allocate(Node::sentinel(None)), 0);
    }
}
