// Grid world module: robot, cars, goal and the static obstacle layout

pub mod config;
pub mod reachability;
pub mod world;

pub use config::*;
pub use reachability::{free_regions, is_reachable, shortest_distance};
pub use world::GridWorld;
