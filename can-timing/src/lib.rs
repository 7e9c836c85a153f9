//! **`can-timing`**, finds the best nominal bit timing of a CAN controller for a baud rate and sample point.

mod constant;
pub use constant::*;
mod device;
pub use device::*;
mod solver;
pub use solver::*;

pub mod config;
pub mod error;
pub mod utils;
