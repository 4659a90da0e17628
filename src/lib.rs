//! delivery_robot - grid world delivery simulation
//!
//! A robot moves cell by cell across a fixed obstacle layout toward a goal
//! while a few cars wander the free cells at random. The grid world owns the
//! movement and reachability rules; drivers and presenters sit on top.

// Core modules
pub mod common;
pub mod utils;

// Simulation modules
pub mod grid_world;
pub mod simulation;

// Re-export common types for convenience
pub use common::{Cell, MoveAction, Terminal};
pub use common::{Presenter, RobotPolicy};
pub use common::{SimError, SimResult};
pub use grid_world::{GridWorld, Placement, WorldConfig};
pub use simulation::{Outcome, Simulation, SimulationConfig};
