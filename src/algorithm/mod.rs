use super::prelude::*;
use crate::parameters::Parameters;
use rand::Rng;

pub mod algo_linear_scan;
pub mod algo_weight_tree;

pub trait Algorithm: Sized {
    fn new(num_locations: usize, default_weight: f64) -> Result<Self, SelectError>;
    fn with_weights(weights: &[f64]) -> Result<Self, SelectError>;

    fn add_weight(&mut self, location: Location, delta: f64) -> Result<(), SelectError>;
    fn select(&self, rng: &mut impl Rng) -> Result<Location, SelectError>;
    fn total_weight(&self) -> f64;

    fn run(
        &self,
        rng: &mut impl Rng,
        num_samples: usize,
        writer: &mut impl SampleWriter,
    ) -> Result<(), SelectError> {
        for _ in 0..num_samples {
            writer.add_sample(self.select(rng)?);
        }
        Ok(())
    }

    fn from_parameters(opt: &Parameters) -> Result<Self, SelectError> {
        let mut algorithm = Self::new(opt.locations, opt.default_weight)?;
        for update in &opt.updates {
            algorithm.add_weight(update.location, update.delta)?;
        }
        Ok(algorithm)
    }
}
