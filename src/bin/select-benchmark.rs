use pcg_rand::Pcg64;
use rand::prelude::*;
use rand::SeedableRng;
use rand_distr::Exp;
use rust_locsel::algorithm::algo_linear_scan::AlgoLinearScan;
use rust_locsel::algorithm::algo_weight_tree::AlgoWeightTree;
use rust_locsel::algorithm::Algorithm;
use rust_locsel::histogram::SampleCounter;
use rust_locsel::SelectError;
use std::error::Error;
use std::time::{Duration, Instant};

const NUM_REPEATS: u64 = 3;
const NUM_MICRO_REPEATS: usize = 100000;
const MAX_LOG_LOCATIONS: u32 = 20;
const MAX_LOG_LOCATIONS_LINEAR: u32 = 12;

fn benchmark_select<T: Algorithm>(
    name: &str,
    rng: &mut impl Rng,
    weights: &[f64],
) -> Result<Duration, SelectError> {
    let algorithm = T::with_weights(weights)?;
    let mut counter = SampleCounter::default();

    let start = Instant::now();
    algorithm.run(rng, NUM_MICRO_REPEATS, &mut counter)?;
    let elapsed = start.elapsed();

    assert_eq!(counter.number_of_samples(), NUM_MICRO_REPEATS);

    println!(
        "{}-select,{},{}",
        name,
        weights.len(),
        elapsed.as_nanos() * 1000 / NUM_MICRO_REPEATS as u128
    );
    Ok(elapsed)
}

fn benchmark_update<T: Algorithm>(
    name: &str,
    rng: &mut impl Rng,
    weights: &[f64],
) -> Result<Duration, SelectError> {
    let mut algorithm = T::with_weights(weights)?;
    let total_before = algorithm.total_weight();

    let start = Instant::now();
    for _ in 0..NUM_MICRO_REPEATS {
        let loc = rng.gen_range(0..weights.len());
        algorithm.add_weight(loc, 1.0)?;
        algorithm.add_weight(loc, -1.0)?;
    }
    let elapsed = start.elapsed();

    let drift = (algorithm.total_weight() - total_before).abs();
    assert!(drift < 1e-6 * total_before.max(1.0));

    println!(
        "{}-update,{},{}",
        name,
        weights.len(),
        elapsed.as_nanos() * 1000 / NUM_MICRO_REPEATS as u128
    );
    Ok(elapsed)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = Pcg64::seed_from_u64(123456);
    let distr = Exp::new(1.0)?;

    for _ in 0..NUM_REPEATS {
        for log_n in 1..=MAX_LOG_LOCATIONS {
            let weights: Vec<f64> = (&mut rng).sample_iter(distr).take(1 << log_n).collect();

            let tree = benchmark_select::<AlgoWeightTree>("tree", &mut rng, &weights)?;
            benchmark_update::<AlgoWeightTree>("tree", &mut rng, &weights)?;

            // the linear scan is too slow beyond this point
            if log_n > MAX_LOG_LOCATIONS_LINEAR {
                continue;
            }

            let linear = benchmark_select::<AlgoLinearScan>("linear", &mut rng, &weights)?;
            benchmark_update::<AlgoLinearScan>("linear", &mut rng, &weights)?;

            println!(
                "fac,{},{}",
                weights.len(),
                linear.as_secs_f64() / tree.as_secs_f64()
            );
        }
    }

    Ok(())
}
