// Presenters: turn grid world frames into something a person can look at

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::debug;

use crate::common::{Cell, Presenter, SimResult};
use crate::grid_world::GridWorld;
use crate::utils::visualization::Visualizer;

/// Frames per second used by the reference driver
pub const DEFAULT_FPS: u32 = 5;

/// Grid as text, one line per row.
///
/// Later layers cover earlier ones: floor, goal, robot, cars, obstacles.
pub fn render_grid(world: &GridWorld) -> String {
    let mut out = String::with_capacity(world.rows() * (world.cols() + 1));
    for r in 0..world.rows() as i32 {
        for c in 0..world.cols() as i32 {
            let cell = Cell::new(r, c);
            let ch = if world.obstacles().contains(&cell) {
                '#'
            } else if world.cars().contains(&cell) {
                'C'
            } else if world.robot() == cell {
                'R'
            } else if world.goal() == cell {
                'G'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Last robot action and the last move of each car
pub fn status_line(world: &GridWorld) -> String {
    let robot = world
        .last_robot_action()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    let cars = world
        .last_car_actions()
        .iter()
        .map(|a| a.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()))
        .join(", ");
    format!("robot: {} | cars: [{}]", robot, cars)
}

/// Writes character frames to any `Write`, paced to a frame rate
pub struct TextPresenter<W: Write> {
    out: W,
    fps: u32,
    frame_limit: Option<usize>,
    frames: usize,
    last_frame: Option<Instant>,
}

impl<W: Write> TextPresenter<W> {
    /// `fps` of 0 draws as fast as the driver ticks
    pub fn new(out: W, fps: u32) -> Self {
        Self {
            out,
            fps,
            frame_limit: None,
            frames: 0,
            last_frame: None,
        }
    }

    /// Ask the driver to quit after `limit` frames
    pub fn with_frame_limit(mut self, limit: usize) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pace(&mut self) {
        if self.fps == 0 {
            return;
        }
        let period = Duration::from_secs_f64(1.0 / self.fps as f64);
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < period {
                sleep(period - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, world: &GridWorld) -> SimResult<()> {
        self.frames += 1;
        write!(self.out, "{}", render_grid(world))?;
        writeln!(self.out, "{}", status_line(world))?;
        writeln!(self.out)?;
        self.out.flush()?;
        self.pace();
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.frame_limit.map_or(false, |limit| self.frames >= limit)
    }
}

/// Saves every `every`-th frame as a gnuplot PNG in `dir`
pub struct PlotPresenter {
    dir: PathBuf,
    every: usize,
    width: u32,
    height: u32,
    frames: usize,
    trail: Vec<Cell>,
}

impl PlotPresenter {
    pub fn new<P: Into<PathBuf>>(dir: P, every: usize) -> SimResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            every: every.max(1),
            width: 900,
            height: 300,
            frames: 0,
            trail: Vec::new(),
        })
    }

    pub fn trail(&self) -> &[Cell] {
        &self.trail
    }

    fn record(&mut self, robot: Cell) {
        match self.trail.last() {
            Some(last) if *last == robot => {}
            // a jump means the world was reset
            Some(last) if last.manhattan(&robot) > 1 => self.trail = vec![robot],
            _ => self.trail.push(robot),
        }
    }
}

impl Presenter for PlotPresenter {
    fn render(&mut self, world: &GridWorld) -> SimResult<()> {
        self.record(world.robot());
        let frame = self.frames;
        self.frames += 1;
        if frame % self.every != 0 {
            return Ok(());
        }

        let path = self.dir.join(format!("frame_{:05}.png", frame));
        let path = path.to_string_lossy();
        debug!("saving frame {} to {}", frame, path);

        let mut vis = Visualizer::new();
        vis.fit_grid(world.rows(), world.cols())
            .set_title(&format!("Delivery robot - frame {}", frame))
            .plot_world(world, &self.trail);
        vis.save_png(&path, self.width, self.height)
    }
}

/// Counts frames and draws nothing
#[derive(Debug, Default)]
pub struct NullPresenter {
    frames: usize,
    frame_limit: Option<usize>,
}

impl NullPresenter {
    pub fn with_frame_limit(limit: usize) -> Self {
        Self {
            frames: 0,
            frame_limit: Some(limit),
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Presenter for NullPresenter {
    fn render(&mut self, _world: &GridWorld) -> SimResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.frame_limit.map_or(false, |limit| self.frames >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MoveAction;
    use crate::grid_world::WorldConfig;

    fn world() -> GridWorld {
        GridWorld::reference(WorldConfig::default().with_seed(12)).unwrap()
    }

    #[test]
    fn test_render_grid_reference() {
        let text = render_grid(&world());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#".repeat(30));
        assert_eq!(lines[1], format!("#R{}G", ".".repeat(27)));
        assert_eq!(lines[3], "#.....C############.##########");
    }

    #[test]
    fn test_status_line() {
        let mut w = world();
        assert_eq!(status_line(&w), "robot: - | cars: [-]");
        w.apply_robot_action(MoveAction::Right);
        assert!(status_line(&w).starts_with("robot: RIGHT | cars: ["));
    }

    #[test]
    fn test_text_presenter_frame_limit() {
        let w = world();
        let mut presenter = TextPresenter::new(Vec::new(), 0).with_frame_limit(2);
        presenter.render(&w).unwrap();
        assert!(!presenter.quit_requested());
        presenter.render(&w).unwrap();
        assert!(presenter.quit_requested());

        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out.matches("robot:").count(), 2);
    }

    #[test]
    fn test_null_presenter_never_quits_by_default() {
        let w = world();
        let mut presenter = NullPresenter::default();
        for _ in 0..100 {
            presenter.render(&w).unwrap();
        }
        assert!(!presenter.quit_requested());
        assert_eq!(presenter.frames(), 100);
    }

    #[test]
    fn test_plot_presenter_trail_restarts_on_jump() {
        let dir = std::env::temp_dir().join("delivery_robot_trail_test");
        let mut presenter = PlotPresenter::new(&dir, 1).unwrap();
        presenter.record(Cell::new(1, 1));
        presenter.record(Cell::new(1, 2));
        presenter.record(Cell::new(1, 2));
        assert_eq!(presenter.trail(), &[Cell::new(1, 1), Cell::new(1, 2)]);
        presenter.record(Cell::new(1, 9));
        assert_eq!(presenter.trail(), &[Cell::new(1, 9)]);
    }
}
