use std::collections::BTreeSet;

use proptest::prelude::*;
use sentinel_rbtree::{NodeRef, RbTree};

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => (-64i16..64).prop_map(Op::Remove),
    ]
}

fn collect(node: NodeRef<'_, i16>, out: &mut Vec<i16>) {
    if let (Some(left), Some(key), Some(right)) = (node.left(), node.key(), node.right()) {
        collect(left, out);
        out.push(*key);
        collect(right, out);
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = RbTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(tree.insert(key), model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&key));
                }
            }
            prop_assert_eq!(tree.check(), Ok(()));
            prop_assert_eq!(tree.check_structure(), Ok(()));
        }

        for key in -64i16..64 {
            prop_assert_eq!(tree.find(&key).is_some(), model.contains(&key));
        }

        let mut keys = Vec::new();
        collect(tree.root(), &mut keys);
        prop_assert_eq!(keys, model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn deleting_everything_in_any_order_empties(
        order in prop::collection::btree_set(any::<i16>(), 0..120)
            .prop_map(|keys| keys.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
    ) {
        let mut tree = RbTree::new();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        for &key in &sorted {
            tree.insert(key);
        }

        for key in order {
            let id = tree.find(&key);
            prop_assert!(id.is_some());
            if let Some(id) = id {
                tree.delete(id);
            }
            prop_assert!(tree.is_valid());
        }

        prop_assert!(tree.is_empty());
        prop_assert!(tree.root().is_sentinel());
    }

    #[test]
    fn duplicate_insert_changes_nothing(keys in prop::collection::vec(any::<i16>(), 1..80)) {
        let mut tree = RbTree::new();
        for &key in &keys {
            tree.insert(key);
        }
        let len = tree.len();
        let ids: Vec<_> = keys.iter().map(|key| tree.find(key)).collect();

        for &key in &keys {
            prop_assert!(!tree.insert(key));
        }

        prop_assert_eq!(tree.len(), len);
        let after: Vec<_> = keys.iter().map(|key| tree.find(key)).collect();
        prop_assert_eq!(ids, after);
    }
}
