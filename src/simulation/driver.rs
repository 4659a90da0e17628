//! Simulation driver
//!
//! One tick: the policy picks a robot action, the world applies it, every car
//! takes one step in index order, the terminal state is checked and the
//! presenter draws the frame. The driver decides when an episode ends; the
//! world never stops on its own.

use std::fmt;

use log::{debug, info};

use crate::common::{MoveAction, Presenter, RobotPolicy, SimResult, Terminal};
use crate::grid_world::GridWorld;

/// Configuration for a simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Stop after this many ticks; None runs until a terminal state or quit
    pub max_ticks: Option<usize>,
}

/// What happened during a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: usize,
    pub robot_action: MoveAction,
    pub robot_moved: bool,
    pub cars_moved: usize,
    pub terminal: Terminal,
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Goal,
    Collision,
    Quit,
    TickLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Goal => write!(f, "Win"),
            Outcome::Collision => write!(f, "Crash! Robot collided with a car."),
            Outcome::Quit => write!(f, "Quit"),
            Outcome::TickLimit => write!(f, "Tick limit reached"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub ticks: usize,
    pub outcome: Outcome,
}

pub struct Simulation<P: RobotPolicy, R: Presenter> {
    world: GridWorld,
    policy: P,
    presenter: R,
    config: SimulationConfig,
    tick: usize,
}

impl<P: RobotPolicy, R: Presenter> Simulation<P, R> {
    pub fn new(world: GridWorld, policy: P, presenter: R, config: SimulationConfig) -> Self {
        Self {
            world,
            policy,
            presenter,
            config,
            tick: 0,
        }
    }

    /// Advance the world by one tick and render it
    pub fn tick(&mut self) -> SimResult<TickReport> {
        self.tick += 1;

        let robot_action = self.policy.choose(&self.world);
        let robot_moved = self.world.apply_robot_action(robot_action);
        let cars_moved = self.world.step_cars();
        let terminal = self.world.check_terminal();

        self.presenter.render(&self.world)?;

        debug!(
            "tick {}: robot {} -> {} (moved: {}), {} car(s) moved, {:?}",
            self.tick,
            robot_action,
            self.world.robot(),
            robot_moved,
            cars_moved,
            terminal
        );

        Ok(TickReport {
            tick: self.tick,
            robot_action,
            robot_moved,
            cars_moved,
            terminal,
        })
    }

    /// Tick until the robot crashes or delivers, the presenter asks to quit,
    /// or the tick limit is hit
    pub fn run(&mut self) -> SimResult<EpisodeSummary> {
        loop {
            if self.presenter.quit_requested() {
                return Ok(self.finish(Outcome::Quit));
            }
            if let Some(limit) = self.config.max_ticks {
                if self.tick >= limit {
                    return Ok(self.finish(Outcome::TickLimit));
                }
            }

            let report = self.tick()?;
            match report.terminal {
                Terminal::Collision => return Ok(self.finish(Outcome::Collision)),
                Terminal::Goal => return Ok(self.finish(Outcome::Goal)),
                Terminal::Continue => {}
            }
        }
    }

    /// Reset the world for a fresh episode
    pub fn restart(&mut self) -> SimResult<()> {
        self.tick = 0;
        self.world.reset()?;
        self.presenter.render(&self.world)
    }

    fn finish(&self, outcome: Outcome) -> EpisodeSummary {
        info!("{} after {} tick(s)", outcome, self.tick);
        EpisodeSummary {
            ticks: self.tick,
            outcome,
        }
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }

    pub fn ticks(&self) -> usize {
        self.tick
    }
}
