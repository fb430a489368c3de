use super::*;

/// Reference implementation scanning the prefix sums; `O(1)` per update and `O(n)` per draw.
pub struct AlgoLinearScan {
    weights: Vec<f64>,
    total_weight: f64,
}

impl Algorithm for AlgoLinearScan {
    fn new(num_locations: usize, default_weight: f64) -> Result<Self, SelectError> {
        Self::with_weights(&vec![default_weight; num_locations])
    }

    fn with_weights(weights: &[f64]) -> Result<Self, SelectError> {
        if weights.is_empty() {
            return Err(SelectError::Empty);
        }

        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(SelectError::InvalidWeight { index, weight });
        }

        Ok(Self {
            weights: weights.to_vec(),
            total_weight: weights.iter().sum(),
        })
    }

    fn add_weight(&mut self, location: Location, delta: f64) -> Result<(), SelectError> {
        let len = self.weights.len();
        let weight = self
            .weights
            .get_mut(location)
            .ok_or(SelectError::OutOfRange {
                index: location,
                len,
            })?;

        if !delta.is_finite() {
            return Err(SelectError::NonFiniteDelta {
                index: location,
                delta,
            });
        }

        *weight += delta;
        self.total_weight += delta;
        Ok(())
    }

    fn select(&self, rng: &mut impl Rng) -> Result<Location, SelectError> {
        let total = self.total_weight;
        if !(total > 0.0 && total.is_finite()) {
            return Err(SelectError::NonPositiveTotal(total));
        }

        let value = rng.gen_range(0.0..total);
        let mut prefix = 0.0;
        let mut last_positive = 0;

        for (loc, &weight) in self.weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }

            prefix += weight;
            last_positive = loc;
            if value < prefix {
                return Ok(loc);
            }
        }

        // rounding in the running total may leave `value` just past the last prefix sum
        Ok(last_positive)
    }

    fn total_weight(&self) -> f64 {
        self.total_weight
    }
}
