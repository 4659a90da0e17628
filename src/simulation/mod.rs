// Simulation driver and robot policies

pub mod driver;
pub mod policy;

pub use driver::*;
pub use policy::*;
