use super::Location;
use std::fmt;

/// Errors returned by [`WeightTree`](crate::WeightTree) and
/// [`LocationSelector`](crate::LocationSelector).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectError {
    /// The structure was constructed without any location.
    Empty,
    /// The location is not in `0..len`.
    OutOfRange { index: Location, len: usize },
    /// A weight is negative, NaN or infinite.
    ///
    /// For an invalid default weight, which applies to every location, `index` is 0.
    InvalidWeight { index: Location, weight: f64 },
    /// A weight delta is NaN or infinite.
    NonFiniteDelta { index: Location, delta: f64 },
    /// The total weight is not a positive finite number, so there is nothing to draw from.
    NonPositiveTotal(f64),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Empty => write!(f, "at least one location is required"),
            SelectError::OutOfRange { index, len } => {
                write!(f, "location {} is out of range for {} locations", index, len)
            }
            SelectError::InvalidWeight { index, weight } => {
                write!(f, "invalid weight {} for location {}", weight, index)
            }
            SelectError::NonFiniteDelta { index, delta } => {
                write!(f, "non-finite weight delta {} for location {}", delta, index)
            }
            SelectError::NonPositiveTotal(total) => {
                write!(f, "cannot select from a total weight of {}", total)
            }
        }
    }
}

impl std::error::Error for SelectError {}
