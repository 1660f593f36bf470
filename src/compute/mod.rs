//! Compute module - Selection and speciation algorithms.

mod fitness;
mod rng;
mod selection;
mod similarity;
mod speciation;
mod trends;

pub use fitness::*;
pub use rng::*;
pub use selection::*;
pub use similarity::*;
pub use speciation::*;
pub use trends::*;
