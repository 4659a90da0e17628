//! Grid world holding the robot, the wandering cars and the goal
//!
//! The world only answers queries and applies single-cell moves. Deciding
//! what the robot does, and what happens after a collision or a delivery,
//! belongs to the driver.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use super::config::{reference_matrix, Placement, WorldConfig, REFERENCE_COLS, REFERENCE_ROWS};
use super::reachability;
use crate::common::{Cell, MoveAction, SimError, SimResult, Terminal};
use crate::utils::ObstacleMap;

pub struct GridWorld {
    map: ObstacleMap,
    obstacles: HashSet<Cell>,
    // free regions with room for both robot and goal
    regions: Vec<Vec<Cell>>,
    config: WorldConfig,
    num_cars: usize,
    robot: Cell,
    cars: Vec<Cell>,
    car_steps: Vec<i64>,
    goal: Cell,
    last_robot_action: Option<MoveAction>,
    last_car_actions: Vec<Option<MoveAction>>,
    rng: StdRng,
}

impl GridWorld {
    /// Build a world from a `rows` x `cols` matrix of 0/1 obstacle flags and reset it
    pub fn new(
        rows: usize,
        cols: usize,
        obstacle_matrix: &[Vec<i32>],
        num_cars: usize,
        config: WorldConfig,
    ) -> SimResult<Self> {
        let map = ObstacleMap::from_rows(rows, cols, obstacle_matrix)?;
        Self::from_map(map, num_cars, config)
    }

    pub fn from_map(map: ObstacleMap, num_cars: usize, config: WorldConfig) -> SimResult<Self> {
        config.validate(&map, num_cars)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let regions: Vec<Vec<Cell>> = reachability::free_regions(&map)
            .into_iter()
            .filter(|region| region.len() >= 2)
            .collect();

        let mut world = GridWorld {
            map,
            obstacles: HashSet::new(),
            regions,
            config,
            num_cars,
            robot: Cell::new(0, 0),
            cars: Vec::with_capacity(num_cars),
            car_steps: Vec::with_capacity(num_cars),
            goal: Cell::new(0, 0),
            last_robot_action: None,
            last_car_actions: Vec::with_capacity(num_cars),
            rng,
        };
        world.reset()?;
        Ok(world)
    }

    /// The 5x30 delivery layout with a single car
    pub fn reference(config: WorldConfig) -> SimResult<Self> {
        Self::new(REFERENCE_ROWS, REFERENCE_COLS, &reference_matrix(), 1, config)
    }

    /// Re-place robot, goal and cars and redraw car budgets until the goal is reachable.
    ///
    /// A fixed placement gives the same robot and goal every time, so the
    /// first failed check is reported straight away. A random placement
    /// draws robot and goal from one free region, and fails with zero
    /// attempts when no region holds two cells. Placement is retried up to
    /// `max_reset_attempts` times.
    pub fn reset(&mut self) -> SimResult<()> {
        let max_attempts = self.config.max_reset_attempts;

        if matches!(self.config.placement, Placement::Random) && self.regions.is_empty() {
            warn!("no two free cells are joined, the goal can never be reached");
            return Err(SimError::Unreachable { attempts: 0 });
        }

        for attempt in 1..=max_attempts {
            self.place_entities()?;

            if let Some(distance) = reachability::shortest_distance(&self.map, self.robot, self.goal) {
                info!(
                    "reset after {} attempt(s): robot {} goal {} ({} steps), cars {:?} budgets {:?}",
                    attempt, self.robot, self.goal, distance, self.cars, self.car_steps
                );
                return Ok(());
            }

            debug!(
                "reset attempt {}: goal {} unreachable from {}",
                attempt, self.goal, self.robot
            );
            if self.config.placement.is_deterministic() {
                warn!("fixed placement cannot reach goal {} from {}", self.goal, self.robot);
                return Err(SimError::Unreachable { attempts: attempt });
            }
        }

        warn!("giving up after {} reset attempts", max_attempts);
        Err(SimError::Unreachable {
            attempts: max_attempts,
        })
    }

    /// Replace the world's generator with one seeded from `seed`, then reset
    pub fn reset_with_seed(&mut self, seed: u64) -> SimResult<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.reset()
    }

    fn place_entities(&mut self) -> SimResult<()> {
        self.obstacles = self.map.obstacle_cells();

        match &self.config.placement {
            Placement::Fixed { robot, goal, cars } => {
                self.robot = *robot;
                self.goal = *goal;
                self.cars = cars.clone();
            }
            Placement::Random => {
                let (robot, goal) = self.pick_robot_and_goal()?;
                // validated: at least num_cars + 2 free cells
                let rest: Vec<Cell> = self
                    .map
                    .free_cells()
                    .into_iter()
                    .filter(|&c| c != robot && c != goal)
                    .collect();
                self.robot = robot;
                self.goal = goal;
                self.cars = rest
                    .choose_multiple(&mut self.rng, self.num_cars)
                    .cloned()
                    .collect();
            }
        }

        let (low, high) = self.config.car_budget_range;
        let budget = Uniform::new_inclusive(low, high);
        let rng = &mut self.rng;
        self.car_steps = (0..self.num_cars).map(|_| budget.sample(rng)).collect();

        self.last_robot_action = None;
        self.last_car_actions = vec![None; self.num_cars];
        Ok(())
    }

    /// Robot uniformly over all cells of regions with two or more cells, goal
    /// uniformly over the rest of the robot's region
    fn pick_robot_and_goal(&mut self) -> SimResult<(Cell, Cell)> {
        let starts: Vec<(usize, Cell)> = self
            .regions
            .iter()
            .enumerate()
            .flat_map(|(i, region)| region.iter().map(move |&c| (i, c)))
            .collect();
        let (region, robot) = *starts
            .choose(&mut self.rng)
            .ok_or(SimError::Unreachable { attempts: 0 })?;

        let goals: Vec<Cell> = self.regions[region]
            .iter()
            .copied()
            .filter(|&c| c != robot)
            .collect();
        let goal = *goals
            .choose(&mut self.rng)
            .ok_or(SimError::Unreachable { attempts: 0 })?;

        Ok((robot, goal))
    }

    /// False if `cell` is off the grid, on an obstacle, or on any car
    pub fn is_valid_position(&self, cell: Cell) -> bool {
        self.map.in_bounds(cell) && !self.obstacles.contains(&cell) && !self.cars.contains(&cell)
    }

    /// Move the robot one cell; an invalid target leaves it in place.
    ///
    /// Returns whether the robot moved.
    pub fn apply_robot_action(&mut self, action: MoveAction) -> bool {
        self.last_robot_action = Some(action);

        let target = self.robot.step(action);
        if self.is_valid_position(target) {
            self.robot = target;
            true
        } else {
            false
        }
    }

    /// Move car `index` one cell in a random valid direction.
    ///
    /// Cars with no budget left never move. A car with no valid neighbor
    /// stays put and keeps its budget.
    pub fn apply_car_action(&mut self, index: usize) -> SimResult<bool> {
        if index >= self.num_cars {
            return Err(SimError::InvalidParameter(format!(
                "car index {} out of range for {} cars",
                index, self.num_cars
            )));
        }
        Ok(self.move_car(index))
    }

    /// Actuate every car once, lowest index first. Returns how many moved.
    pub fn step_cars(&mut self) -> usize {
        (0..self.num_cars).filter(|&i| self.move_car(i)).count()
    }

    fn move_car(&mut self, index: usize) -> bool {
        self.last_car_actions[index] = None;
        if self.car_steps[index] <= 0 {
            return false;
        }

        let mut directions = MoveAction::ALL;
        directions.shuffle(&mut self.rng);

        let current = self.cars[index];
        for action in directions {
            let target = current.step(action);
            if self.is_valid_position(target) {
                self.cars[index] = target;
                self.car_steps[index] -= 1;
                self.last_car_actions[index] = Some(action);
                return true;
            }
        }

        debug!("car {} boxed in at {}", index, current);
        false
    }

    /// Collision wins over Goal if both hold
    pub fn check_terminal(&self) -> Terminal {
        if self.cars.contains(&self.robot) {
            Terminal::Collision
        } else if self.robot == self.goal {
            Terminal::Goal
        } else {
            Terminal::Continue
        }
    }

    /// Steps from the robot to the goal ignoring cars
    pub fn distance_to_goal(&self) -> Option<usize> {
        reachability::shortest_distance(&self.map, self.robot, self.goal)
    }

    pub fn rows(&self) -> usize {
        self.map.rows()
    }

    pub fn cols(&self) -> usize {
        self.map.cols()
    }

    pub fn num_cars(&self) -> usize {
        self.num_cars
    }

    pub fn robot(&self) -> Cell {
        self.robot
    }

    pub fn cars(&self) -> &[Cell] {
        &self.cars
    }

    pub fn car_steps(&self) -> &[i64] {
        &self.car_steps
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn obstacle_map(&self) -> &ObstacleMap {
        &self.map
    }

    pub fn last_robot_action(&self) -> Option<MoveAction> {
        self.last_robot_action
    }

    /// Direction each car moved on its last actuation, None if it stayed
    pub fn last_car_actions(&self) -> &[Option<MoveAction>] {
        &self.last_car_actions
    }
}
