//! Schema module - Agent records, configuration and result types.

mod agent;
mod config;
mod population;
mod selection;
mod speciation;

pub use agent::*;
pub use config::*;
pub use population::*;
pub use selection::*;
pub use speciation::*;
