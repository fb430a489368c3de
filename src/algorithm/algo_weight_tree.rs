use super::*;
use weight_tree::LocationSelector;

/// Selection through the weight tree; `O(log n)` per update and per draw.
pub struct AlgoWeightTree {
    selector: LocationSelector,
}

impl Algorithm for AlgoWeightTree {
    fn new(num_locations: usize, default_weight: f64) -> Result<Self, SelectError> {
        Ok(Self {
            selector: LocationSelector::new(num_locations, default_weight)?,
        })
    }

    fn with_weights(weights: &[f64]) -> Result<Self, SelectError> {
        Ok(Self {
            selector: LocationSelector::from_weights(weights.iter().copied())?,
        })
    }

    fn add_weight(&mut self, location: Location, delta: f64) -> Result<(), SelectError> {
        self.selector.add_weight(location, delta)
    }

    fn select(&self, rng: &mut impl Rng) -> Result<Location, SelectError> {
        self.selector.select(rng)
    }

    fn total_weight(&self) -> f64 {
        self.selector.total_weight()
    }
}

impl AlgoWeightTree {
    pub fn selector(&self) -> &LocationSelector {
        &self.selector
    }
}
