use itertools::Itertools;
use pcg_rand::Pcg64;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use weight_tree::{Location, LocationSelector};

const NUM_SAMPLES: usize = 100_000;
const MIN_P_VALUE: f64 = 1e-4;

fn sample_counts(selector: &LocationSelector, rng: &mut impl Rng, num_samples: usize) -> Vec<usize> {
    let counts = (0..num_samples)
        .map(|_| selector.select(rng).unwrap())
        .counts();

    (0..selector.num_locations())
        .map(|loc| counts.get(&loc).copied().unwrap_or(0))
        .collect()
}

/// Pearson's goodness of fit of `counts` against the current weights; returns the p-value.
fn chi_squared_p_value(selector: &LocationSelector, counts: &[usize]) -> f64 {
    let num_samples: usize = counts.iter().sum();
    let total = selector.total_weight();

    let mut statistic = 0.0;
    let mut num_cells = 0;

    for (loc, &count) in counts.iter().enumerate() {
        let expected = num_samples as f64 * selector.weight(loc).unwrap() / total;
        if expected == 0.0 {
            assert_eq!(count, 0, "location {} has no weight but was selected", loc);
            continue;
        }

        statistic += (count as f64 - expected).powi(2) / expected;
        num_cells += 1;
    }

    let distr = ChiSquared::new((num_cells - 1) as f64).unwrap();
    1.0 - distr.cdf(statistic)
}

#[test]
fn uniform_weights_are_fair() {
    let selector = LocationSelector::new(13, 10.0).unwrap();
    let mut rng = Pcg64::seed_from_u64(334);

    let counts = sample_counts(&selector, &mut rng, NUM_SAMPLES);

    assert!(counts.iter().all(|&c| c > 0));
    let p = chi_squared_p_value(&selector, &counts);
    assert!(p > MIN_P_VALUE, "p-value: {} counts: {:?}", p, counts);
}

#[test]
fn zeroed_location_is_never_selected() {
    let mut selector = LocationSelector::new(13, 10.0).unwrap();
    selector.add_weight(5, -10.0).unwrap();

    let mut rng = Pcg64::seed_from_u64(334);
    let counts = sample_counts(&selector, &mut rng, NUM_SAMPLES);

    assert_eq!(counts[5], 0);
    for (loc, &count) in counts.iter().enumerate().filter(|&(loc, _)| loc != 5) {
        assert!(count > 0, "location {} was never selected", loc);
    }

    let p = chi_squared_p_value(&selector, &counts);
    assert!(p > MIN_P_VALUE, "p-value: {} counts: {:?}", p, counts);
}

#[test]
fn frequencies_follow_weights() {
    let selector = LocationSelector::from_weights((1..=13).map(|w| w as f64)).unwrap();
    let mut rng = Pcg64::seed_from_u64(1234);

    let counts = sample_counts(&selector, &mut rng, 2 * NUM_SAMPLES);

    let p = chi_squared_p_value(&selector, &counts);
    assert!(p > MIN_P_VALUE, "p-value: {} counts: {:?}", p, counts);
}

#[test]
fn frequencies_follow_updated_weights() {
    let n = 37;
    let mut selector = LocationSelector::new(n, 1.0).unwrap();
    let mut rng = Pcg64::seed_from_u64(99);

    for _ in 0..1000 {
        let loc: Location = rng.gen_range(0..n);
        let delta = rng.gen_range(-0.5..1.0);
        if selector.weight(loc).unwrap() + delta >= 0.25 {
            selector.add_weight(loc, delta).unwrap();
        }
    }

    // a few locations are switched off entirely
    for loc in [0, 17, 36] {
        selector.remove_weight(loc).unwrap();
    }

    let counts = sample_counts(&selector, &mut rng, 2 * NUM_SAMPLES);
    for loc in [0, 17, 36] {
        assert_eq!(counts[loc], 0);
    }

    let p = chi_squared_p_value(&selector, &counts);
    assert!(p > MIN_P_VALUE, "p-value: {} counts: {:?}", p, counts);
}

#[test]
fn heavy_location_dominates() {
    let mut weights = vec![1e-6; 64];
    weights[41] = 1.0;
    let selector = LocationSelector::from_weights(weights).unwrap();
    let mut rng = Pcg64::seed_from_u64(5);

    let counts = sample_counts(&selector, &mut rng, 10_000);
    assert!(counts[41] > 9_990, "counts: {:?}", counts);
}

#[test]
fn same_seed_same_sequence() {
    let selector = LocationSelector::from_weights((0..100).map(|i| (i % 9) as f64)).unwrap();

    let draw = |seed| {
        let mut rng = Pcg64::seed_from_u64(seed);
        (0..1000)
            .map(|_| selector.select(&mut rng).unwrap())
            .collect_vec()
    };

    assert_eq!(draw(8), draw(8));
    assert_ne!(draw(8), draw(9));
}
