use super::*;
use itertools::Itertools;
use std::io::Write;

pub trait SampleWriter {
    fn add_sample(&mut self, location: Location);
}

#[derive(Default, Clone, Debug)]
pub struct SampleCounter {
    number_of_samples: usize,
}

impl SampleWriter for SampleCounter {
    fn add_sample(&mut self, _location: Location) {
        self.number_of_samples += 1;
    }
}

impl SampleCounter {
    pub fn number_of_samples(&self) -> usize {
        self.number_of_samples
    }
}

/// Counts how often every location was selected.
#[derive(Clone, Debug)]
pub struct Histogram {
    number_of_samples: usize,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn new(number_of_locations: usize) -> Self {
        Self {
            number_of_samples: 0,
            counts: vec![0; number_of_locations],
        }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn number_of_samples(&self) -> usize {
        self.number_of_samples
    }

    /// Relative frequency of every location; all zero if nothing was sampled.
    pub fn frequencies(&self) -> Vec<f64> {
        let n = self.number_of_samples.max(1) as f64;
        self.counts.iter().map(|&c| c as f64 / n).collect()
    }

    /// Locations that were never selected.
    pub fn unselected(&self) -> Vec<Location> {
        self.counts.iter().positions(|&c| c == 0).collect()
    }

    pub fn report_histogram(&self, writer: &mut impl Write) -> std::io::Result<()> {
        report_histogram(&self.counts, writer)
    }
}

pub fn report_histogram(counts: &[usize], writer: &mut impl Write) -> std::io::Result<()> {
    writer.write_all(
        counts
            .iter()
            .enumerate()
            .map(|(loc, n)| format!("Loc {}\t:\t{}\n", loc, n))
            .join("")
            .as_bytes(),
    )?;
    Ok(())
}

impl SampleWriter for Histogram {
    fn add_sample(&mut self, location: Location) {
        self.number_of_samples += 1;
        self.counts[location] += 1;
    }
}
