//! Visualization utilities for delivery_robot
//!
//! Draws grid world frames with gnuplot. Columns run along X and rows run
//! down the Y axis, so the picture matches the matrix layout.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Cell, SimError, SimResult};
use crate::grid_world::GridWorld;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const ORANGE: &str = "#FFA500";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const FLOOR: &str = GRAY;
    pub const GOAL: &str = GREEN;
    pub const ROBOT: &str = BLUE;
    pub const CAR: &str = ORANGE;
    pub const TRAIL: &str = RED;
}

/// Style for the robot trail
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(colors::TRAIL, "Robot trail")
    }
}

/// Style for cell markers
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.5,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

fn xy(cells: &[Cell]) -> (Vec<f64>, Vec<f64>) {
    cells.iter().map(|c| (c.col as f64, c.row as f64)).unzip()
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    title: String,
    trail_style: PathStyle,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            trail_style: PathStyle::default(),
            x_range: None,
            y_range: None,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Fit the axes to a `rows` x `cols` grid with row 0 at the top
    pub fn fit_grid(&mut self, rows: usize, cols: usize) -> &mut Self {
        self.x_range = Some((-0.5, cols as f64 - 0.5));
        self.y_range = Some((rows as f64 - 0.5, -0.5));
        self
    }

    /// Draw floor, obstacles, goal, cars and robot of `world`, plus the
    /// cells the robot has visited so far
    pub fn plot_world(&mut self, world: &GridWorld, trail: &[Cell]) -> &mut Self {
        let mut obstacles: Vec<Cell> = world.obstacles().iter().copied().collect();
        obstacles.sort();
        let floor = world.obstacle_map().free_cells();

        let (ox, oy) = xy(&obstacles);
        let (fx, fy) = xy(&floor);
        let (cx, cy) = xy(world.cars());
        let (tx, ty) = xy(trail);
        let goal = PointStyle::new(colors::GOAL, "Goal").with_symbol('S');
        let robot = PointStyle::new(colors::ROBOT, "Robot");
        let car = PointStyle::new(colors::CAR, "Car").with_symbol('T');
        let trail_style = &self.trail_style;

        let axes = self.figure.axes2d();
        axes.points(&fx, &fy, &[
                Caption("Floor"),
                Color(colors::FLOOR),
                PointSymbol('.'),
                PointSize(0.5),
            ])
            .points(&ox, &oy, &[
                Caption("Obstacles"),
                Color(colors::OBSTACLE),
                PointSymbol('S'),
                PointSize(2.0),
            ])
            .lines(&tx, &ty, &[
                Caption(&trail_style.caption),
                Color(&trail_style.color),
                LineWidth(trail_style.line_width),
            ])
            .points(&[world.goal().col as f64], &[world.goal().row as f64], &[
                Caption(&goal.caption),
                Color(&goal.color),
                PointSymbol(goal.symbol),
                PointSize(goal.size),
            ])
            .points(&cx, &cy, &[
                Caption(&car.caption),
                Color(&car.color),
                PointSymbol(car.symbol),
                PointSize(car.size),
            ])
            .points(&[world.robot().col as f64], &[world.robot().row as f64], &[
                Caption(&robot.caption),
                Color(&robot.color),
                PointSymbol(robot.symbol),
                PointSize(robot.size),
            ])
            .set_x_label("column", &[])
            .set_y_label("row", &[])
            .set_aspect_ratio(AutoOption::Fix(1.0));

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        self
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> SimResult<()> {
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| SimError::VisualizationError(e.to_string()))
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
