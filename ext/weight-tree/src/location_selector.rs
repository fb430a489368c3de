use super::weight_tree::check_weight;
use super::{Location, SelectError, WeightTree};
use rand::Rng;

/// Selects one of a fixed number of locations with probability proportional to its weight.
///
/// Both [`LocationSelector::add_weight`] and [`LocationSelector::select`] run in `O(log n)`.
///
/// # Example
/// ```
/// use pcg_rand::Pcg64;
/// use rand::SeedableRng;
/// use weight_tree::LocationSelector;
///
/// let mut selector = LocationSelector::new(13, 10.0).unwrap();
/// selector.add_weight(5, -10.0).unwrap();
///
/// let mut rng = Pcg64::seed_from_u64(334);
/// for _ in 0..1000 {
///     assert_ne!(selector.select(&mut rng).unwrap(), 5);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct LocationSelector {
    tree: WeightTree,
}

impl LocationSelector {
    pub fn new(num_locations: usize, default_weight: f64) -> Result<Self, SelectError> {
        Ok(Self {
            tree: WeightTree::with_default_weight(num_locations, default_weight)?,
        })
    }

    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Result<Self, SelectError> {
        Ok(Self {
            tree: WeightTree::from_weights(weights)?,
        })
    }

    pub fn num_locations(&self) -> usize {
        self.tree.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.tree.total_weight()
    }

    pub fn weight(&self, location: Location) -> Option<f64> {
        self.tree.weight(location)
    }

    pub fn tree(&self) -> &WeightTree {
        &self.tree
    }

    /// Adds `delta` (which may be negative) to the weight of `location`.
    pub fn add_weight(&mut self, location: Location, delta: f64) -> Result<(), SelectError> {
        self.tree.add_weight_at(location, delta)
    }

    /// Replaces the weight of `location`.
    pub fn set_weight(&mut self, location: Location, weight: f64) -> Result<(), SelectError> {
        let current = self.weight(location).ok_or(SelectError::OutOfRange {
            index: location,
            len: self.num_locations(),
        })?;
        let weight = check_weight(location, weight)?;

        self.tree.add_weight_at(location, weight - current)
    }

    /// Sets the weight of `location` to zero, so it is not selected until its weight is raised.
    pub fn remove_weight(&mut self, location: Location) -> Result<(), SelectError> {
        self.set_weight(location, 0.0)
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Location, SelectError> {
        self.tree.select(rng)
    }
}
