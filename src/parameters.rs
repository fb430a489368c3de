use super::Location;
use std::str::FromStr;
use structopt::clap::{Error, ErrorKind};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "location_selector",
    about = "Draws locations with probability proportional to their weights and reports a histogram",
    after_help = "EXAMPLE:\n    rust-locsel -u 5:-10 -s 334\n\n    13 locations of weight 10, location 5 lowered to 0, seeded draws; location 5 is never selected."
)]
pub struct Parameters {
    #[structopt(short = "a", long, default_value = "tree")]
    pub algorithm: SamplingAlgorithm,

    #[structopt(short = "n", long, default_value = "13")]
    pub locations: usize,

    #[structopt(short = "w", long, default_value = "10.0")]
    pub default_weight: f64,

    /// Weight change applied before sampling, given as LOCATION:DELTA (e.g. 5:-10)
    #[structopt(short = "u", long = "update", number_of_values = 1)]
    pub updates: Vec<WeightUpdate>,

    #[structopt(short = "k", long, default_value = "100000")]
    pub samples: usize,

    #[structopt(short = "s", long)]
    pub seed_value: Option<u64>,

    /// Only count samples; skip the histogram
    #[structopt(short = "q", long)]
    pub quiet: bool,

    #[structopt(short = "v", long, parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum SamplingAlgorithm {
    WeightTree,
    LinearScan,
}

impl FromStr for SamplingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(SamplingAlgorithm::WeightTree),
            "linear" => Ok(SamplingAlgorithm::LinearScan),
            _ => Err(format!("Unknown algorithm type: {}", s)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WeightUpdate {
    pub location: Location,
    pub delta: f64,
}

impl FromStr for WeightUpdate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (location, delta) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected LOCATION:DELTA, got: {}", s))?;

        Ok(Self {
            location: location
                .trim()
                .parse()
                .map_err(|e| format!("Invalid location '{}': {}", location, e))?,
            delta: delta
                .trim()
                .parse()
                .map_err(|e| format!("Invalid delta '{}': {}", delta, e))?,
        })
    }
}

pub fn check_options(opt: &Parameters) -> Result<(), String> {
    if opt.locations == 0 {
        return Err("at least one location is required".into());
    }

    if !(opt.default_weight.is_finite() && opt.default_weight >= 0.0) {
        return Err(format!(
            "default weight must be finite and non-negative, got {}",
            opt.default_weight
        ));
    }

    for update in &opt.updates {
        if update.location >= opt.locations {
            return Err(format!(
                "update location {} is out of range for {} locations",
                update.location, opt.locations
            ));
        }
        if !update.delta.is_finite() {
            return Err(format!("update delta {} is not finite", update.delta));
        }
    }

    Ok(())
}

pub fn get_and_check_options() -> Parameters {
    let opt = Parameters::from_args();

    if let Err(msg) = check_options(&opt) {
        Error::with_description(&msg, ErrorKind::InvalidValue).exit();
    }

    opt
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Parameters {
        Parameters::from_iter_safe(std::iter::once("rust-locsel").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let opt = parse(&[]);

        assert_eq!(opt.algorithm, SamplingAlgorithm::WeightTree);
        assert_eq!(opt.locations, 13);
        assert_eq!(opt.default_weight, 10.0);
        assert_eq!(opt.samples, 100_000);
        assert!(opt.updates.is_empty());
        assert!(opt.seed_value.is_none());
        assert!(check_options(&opt).is_ok());
    }

    #[test]
    fn updates() {
        let opt = parse(&["-u", "5:-10", "--update", "2:0.5", "-s", "334", "-a", "linear"]);

        assert_eq!(
            opt.updates,
            vec![
                WeightUpdate {
                    location: 5,
                    delta: -10.0
                },
                WeightUpdate {
                    location: 2,
                    delta: 0.5
                }
            ]
        );
        assert_eq!(opt.seed_value, Some(334));
        assert_eq!(opt.algorithm, SamplingAlgorithm::LinearScan);
    }

    #[test]
    fn help_shows_demo_invocation() {
        let mut help = Vec::new();
        Parameters::clap().write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains("rust-locsel -u 5:-10 -s 334"));

        let opt = parse(&["-u", "5:-10", "-s", "334"]);
        assert!(check_options(&opt).is_ok());
        assert_eq!(opt.locations, 13);
        assert_eq!(opt.seed_value, Some(334));
        assert_eq!(
            opt.updates,
            vec![WeightUpdate {
                location: 5,
                delta: -10.0
            }]
        );
    }

    #[test]
    fn malformed_update() {
        assert!("5".parse::<WeightUpdate>().is_err());
        assert!("x:1".parse::<WeightUpdate>().is_err());
        assert!("1:y".parse::<WeightUpdate>().is_err());
        assert_eq!(
            " 3 : 2.5 ".parse::<WeightUpdate>(),
            Ok(WeightUpdate {
                location: 3,
                delta: 2.5
            })
        );
    }

    #[test]
    fn rejected_options() {
        assert!(check_options(&parse(&["-n", "0"])).is_err());
        assert!(check_options(&parse(&["-n", "4", "-u", "4:1"])).is_err());
        assert!(check_options(&parse(&["--default-weight=-1"])).is_err());
        assert!(check_options(&parse(&["-u", "1:inf"])).is_err());
        assert!("bogus".parse::<SamplingAlgorithm>().is_err());
    }
}
