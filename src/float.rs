use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

use crate::{NodeId, RbTree};

/// A red-black tree keyed by floats.
///
/// Keys are wrapped in [`OrderedFloat`], which gives floats a total order:
/// `-0.0` and `0.0` are the same key, and `NaN` is a single key sorting
/// above positive infinity.
pub type FloatTree<T> = RbTree<OrderedFloat<T>>;

impl<T: FloatCore> RbTree<OrderedFloat<T>> {
    /// Inserts a raw float, `false` if an equal key is already present
    #[inline]
    pub fn insert_value(&mut self, value: T) -> bool {
        self.insert(OrderedFloat(value))
    }

    /// Looks up a raw float
    #[inline]
    pub fn find_value(&self, value: T) -> Option<NodeId> {
        self.find(&OrderedFloat(value))
    }

    /// `true` if an equal float key is stored
    #[inline]
    pub fn contains_value(&self, value: T) -> bool {
        self.contains(&OrderedFloat(value))
    }

    /// Removes a raw float, returning whether it was present
    #[inline]
    pub fn remove_value(&mut self, value: T) -> bool {
        self.remove(&OrderedFloat(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_tree_basic() {
        let mut tree = FloatTree::<f64>::new();

        assert!(tree.insert_value(5.0));
        assert!(tree.insert_value(3.0));
        assert!(tree.insert_value(7.0));
        assert!(!tree.insert_value(3.0));

        assert_eq!(tree.len(), 3);
        assert!(tree.contains_value(7.0));
        assert!(!tree.contains_value(7.5));

        assert!(tree.remove_value(5.0));
        assert!(!tree.remove_value(5.0));
        assert_eq!(tree.len(), 2);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_float_tree_signed_zero_is_one_key() {
        let mut tree = FloatTree::<f64>::new();
        assert!(tree.insert_value(0.0));
        assert!(!tree.insert_value(-0.0));
        assert!(tree.find_value(-0.0).is_some());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_float_tree_nan_and_infinities() {
        let mut tree = FloatTree::<f32>::new();
        for value in [1.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -2.5] {
            assert!(tree.insert_value(value));
        }
        assert!(!tree.insert_value(f32::NAN));
        assert_eq!(tree.len(), 5);
        assert!(tree.contains_value(f32::NAN));
        tree.check_structure().unwrap();

        assert!(tree.remove_value(f32::NAN));
        assert!(tree.remove_value(f32::NEG_INFINITY));
        assert_eq!(tree.len(), 3);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_float_tree_sliding_window() {
        let mut tree = FloatTree::<f64>::with_capacity(5);
        let inputs = [10.0, 10.5, 11.2, 10.9, 11.5, 11.9, 12.3, 12.1, 11.8, 12.5];

        for (i, &value) in inputs.iter().enumerate() {
            if i >= 5 {
                assert!(
                    tree.remove_value(inputs[i - 5]),
                    "failed to remove {} at step {}",
                    inputs[i - 5],
                    i
                );
            }
            assert!(tree.insert_value(value), "failed to insert {value} at step {i}");
            assert!(tree.len() <= 5);
            assert!(tree.is_valid());
        }

        for &value in &inputs[5..] {
            assert!(tree.contains_value(value));
        }
    }
}
