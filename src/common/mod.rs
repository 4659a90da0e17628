//! Common types, traits, and error definitions for delivery_robot
//!
//! This module provides the foundational building blocks shared by the
//! grid world, the simulation driver and the presenters.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
