//! Utility modules for delivery_robot

pub mod grid_map;
pub mod presenter;
pub mod visualization;

pub use grid_map::*;
pub use presenter::{render_grid, status_line, NullPresenter, PlotPresenter, TextPresenter, DEFAULT_FPS};
pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
