/*!
# Node and Cost Representation

Nodes are opaque: the algorithms only ever clone, compare and hash them, so any `Clone + Eq + Hash`
type qualifies. Costs are numeric values that can be added and compared; all primitive integers
and floats qualify.
*/

use std::{hash::Hash, ops::Add};

use fxhash::FxHashMap;
use num::Zero;

/// Anything that can be used as a node (or state) key
pub trait NodeKey: Clone + Eq + Hash {}

impl<T> NodeKey for T where T: Clone + Eq + Hash {}

/// Edge costs and accumulated path lengths.
///
/// Only a partial order is required, so floating point costs work as well.
/// Negative costs are representable but violate the preconditions of the weighted searches.
pub trait Cost: Copy + PartialOrd + Zero + Add<Output = Self> {
    /// Returns *true* if the value is strictly below zero
    fn is_below_zero(&self) -> bool {
        *self < Self::zero()
    }
}

impl<T> Cost for T where T: Copy + PartialOrd + Zero + Add<Output = T> {}

/// Mapping from node to its (minimal) distance
pub type DistanceMap<N, C> = FxHashMap<N, C>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_costs() {
        assert!((-1i32).is_below_zero());
        assert!(!0i64.is_below_zero());
        assert!(!3u8.is_below_zero());
        assert!((-0.5f64).is_below_zero());
        assert!(!f64::NAN.is_below_zero());
    }
}
