//! Configuration for the grid world

use std::collections::HashSet;

use crate::common::{Cell, SimError, SimResult};
use crate::utils::ObstacleMap;

/// Rows of the reference delivery layout
pub const REFERENCE_ROWS: usize = 5;
/// Columns of the reference delivery layout
pub const REFERENCE_COLS: usize = 30;

/// Border walls plus one interior band with gaps at columns 1 and 19
const REFERENCE_LAYOUT: [[i32; REFERENCE_COLS]; REFERENCE_ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Reference layout as nested rows
pub fn reference_matrix() -> Vec<Vec<i32>> {
    REFERENCE_LAYOUT.iter().map(|row| row.to_vec()).collect()
}

/// How `reset` chooses start cells for the robot, the goal and the cars
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Same cells on every reset
    Fixed { robot: Cell, goal: Cell, cars: Vec<Cell> },
    /// Robot, goal and every car on distinct free cells drawn on each reset
    Random,
}

impl Placement {
    pub fn fixed(robot: Cell, goal: Cell, cars: Vec<Cell>) -> Self {
        Placement::Fixed { robot, goal, cars }
    }

    /// Robot at (1, 1), goal at (1, 29), a single car starting at (3, 6)
    pub fn reference() -> Self {
        Placement::fixed(Cell::new(1, 1), Cell::new(1, 29), vec![Cell::new(3, 6)])
    }

    /// Whether every reset produces the same robot and goal cells
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Placement::Fixed { .. })
    }

    /// Check the placement can be realised on `map` with `num_cars` cars
    pub fn validate(&self, map: &ObstacleMap, num_cars: usize) -> SimResult<()> {
        match self {
            Placement::Fixed { robot, goal, cars } => {
                if cars.len() != num_cars {
                    return Err(SimError::Configuration(format!(
                        "fixed placement lists {} car starts for {} cars",
                        cars.len(),
                        num_cars
                    )));
                }
                let starts = vec![("robot", *robot), ("goal", *goal)]
                    .into_iter()
                    .chain(cars.iter().map(|&c| ("car", c)));
                for (what, cell) in starts {
                    if !map.is_free(cell) {
                        return Err(SimError::Configuration(format!(
                            "{} start {} is outside the grid or on an obstacle",
                            what, cell
                        )));
                    }
                }
                let mut occupied = HashSet::new();
                occupied.insert(*robot);
                for car in cars {
                    if !occupied.insert(*car) {
                        return Err(SimError::Configuration(format!(
                            "car start {} overlaps the robot or another car",
                            car
                        )));
                    }
                }
                Ok(())
            }
            Placement::Random => {
                let free = map.free_cells().len();
                if free < num_cars + 2 {
                    return Err(SimError::Configuration(format!(
                        "random placement needs {} free cells, grid has {}",
                        num_cars + 2,
                        free
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::reference()
    }
}

/// Configuration for GridWorld
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Start-cell policy applied on every reset
    pub placement: Placement,
    /// Inclusive range each car's move budget is drawn from
    pub car_budget_range: (i64, i64),
    /// Reset attempts before the layout is declared unreachable
    pub max_reset_attempts: usize,
    /// Seed for the world's generator; None draws one from the OS
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            placement: Placement::reference(),
            car_budget_range: (30, 85),
            max_reset_attempts: 1000,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_car_budget_range(mut self, low: i64, high: i64) -> Self {
        self.car_budget_range = (low, high);
        self
    }

    pub fn with_max_reset_attempts(mut self, attempts: usize) -> Self {
        self.max_reset_attempts = attempts;
        self
    }

    pub fn validate(&self, map: &ObstacleMap, num_cars: usize) -> SimResult<()> {
        let (low, high) = self.car_budget_range;
        if low < 0 {
            return Err(SimError::Configuration(format!(
                "car budgets cannot be negative, range starts at {}",
                low
            )));
        }
        if low > high {
            return Err(SimError::Configuration(format!(
                "car budget range [{}, {}] is empty",
                low, high
            )));
        }
        if self.max_reset_attempts == 0 {
            return Err(SimError::Configuration(
                "max_reset_attempts must be at least 1".to_string(),
            ));
        }
        self.placement.validate(map, num_cars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_map() -> ObstacleMap {
        ObstacleMap::from_rows(REFERENCE_ROWS, REFERENCE_COLS, &reference_matrix()).unwrap()
    }

    #[test]
    fn test_reference_layout_shape() {
        let m = reference_matrix();
        assert_eq!(m.len(), REFERENCE_ROWS);
        assert!(m.iter().all(|row| row.len() == REFERENCE_COLS));
        // gaps in the interior band
        assert_eq!(m[2][1], 0);
        assert_eq!(m[2][19], 0);
    }

    #[test]
    fn test_default_config_validates() {
        let config = WorldConfig::default();
        assert!(config.validate(&reference_map(), 1).is_ok());
    }

    #[test]
    fn test_fixed_car_count_mismatch() {
        let config = WorldConfig::default();
        let err = config.validate(&reference_map(), 2).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_fixed_start_on_obstacle() {
        let placement = Placement::fixed(Cell::new(0, 0), Cell::new(1, 29), vec![]);
        assert!(placement.validate(&reference_map(), 0).is_err());
    }

    #[test]
    fn test_fixed_car_on_robot() {
        let placement = Placement::fixed(Cell::new(1, 1), Cell::new(1, 29), vec![Cell::new(1, 1)]);
        assert!(placement.validate(&reference_map(), 1).is_err());
    }

    #[test]
    fn test_random_needs_room() {
        let map = ObstacleMap::from_rows(1, 3, &[vec![0, 0, 1]]).unwrap();
        assert!(Placement::Random.validate(&map, 0).is_ok());
        assert!(Placement::Random.validate(&map, 1).is_err());
    }

    #[test]
    fn test_empty_budget_range() {
        let config = WorldConfig::default().with_car_budget_range(10, 5);
        assert!(config.validate(&reference_map(), 1).is_err());
    }
}
