//! Weighted random selection over a fixed set of locations.
//!
//! The weights are kept in a [`WeightTree`]: level 0 stores the weight of every location and
//! each coarser level stores pairwise sums, up to a single root holding the total weight.
//! Changing a weight touches one node per level, and drawing a location descends from the root
//! to a leaf, so both operations take `O(log n)` time.
//!
//! Randomness is provided by the caller as any [`rand::Rng`]; each selection consumes a single
//! uniform draw from `[0, total_weight)`.

pub mod error;
pub mod location_selector;
pub mod weight_tree;

pub type Location = usize;

pub use error::SelectError;
pub use location_selector::LocationSelector;
pub use weight_tree::WeightTree;
