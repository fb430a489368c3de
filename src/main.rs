use rust_locsel::parameters::{get_and_check_options, Parameters, SamplingAlgorithm};
use std::error::Error;
use std::io::stdout;
use std::time::Instant;

use pcg_rand::Pcg64;
use rand::SeedableRng;
use rust_locsel::algorithm::algo_linear_scan::AlgoLinearScan;
use rust_locsel::algorithm::algo_weight_tree::AlgoWeightTree;
use rust_locsel::algorithm::Algorithm;
use rust_locsel::histogram::{Histogram, SampleCounter};
use rust_locsel::logging::init_logging;
use tracing::info;

fn execute<T: Algorithm>(opt: &Parameters) -> Result<(), Box<dyn Error>> {
    let mut rng = if let Some(seed_value) = opt.seed_value {
        Pcg64::seed_from_u64(seed_value)
    } else {
        Pcg64::from_entropy()
    };

    let algorithm = T::from_parameters(opt)?;
    info!(
        locations = opt.locations,
        updates = opt.updates.len(),
        total_weight = algorithm.total_weight(),
        "selector ready"
    );

    let runtime = if opt.quiet {
        let mut writer = SampleCounter::default();
        let start = Instant::now();

        algorithm.run(&mut rng, opt.samples, &mut writer)?;
        assert_eq!(writer.number_of_samples(), opt.samples);

        start.elapsed()
    } else {
        let mut writer = Histogram::new(opt.locations);

        let start = Instant::now();
        algorithm.run(&mut rng, opt.samples, &mut writer)?;
        let duration = start.elapsed();

        info!(unselected = ?writer.unselected(), "sampling finished");
        writer.report_histogram(&mut stdout().lock())?;

        duration
    };

    println!("runtime_s:{}", runtime.as_secs_f64());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = get_and_check_options();
    init_logging(opt.verbose);

    match opt.algorithm {
        SamplingAlgorithm::WeightTree => execute::<AlgoWeightTree>(&opt),
        SamplingAlgorithm::LinearScan => execute::<AlgoLinearScan>(&opt),
    }
}
