pub mod algorithm;
pub mod histogram;
pub mod logging;
pub mod parameters;

pub use weight_tree::{Location, SelectError};

pub mod prelude {
    use super::*;

    pub use super::{Location, SelectError};
    pub use algorithm::Algorithm;
    pub use histogram::SampleWriter;
}
