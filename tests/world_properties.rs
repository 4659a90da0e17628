//! Property-based tests for the grid world.
//!
//! Random layouts, placements and action sequences are generated and the
//! movement, budget and terminal rules are checked after every step.
//!
//! Run with: cargo test --test world_properties

use delivery_robot::grid_world::{is_reachable, reference_matrix, GridWorld, Placement, WorldConfig};
use delivery_robot::{Cell, MoveAction, SimError, Terminal};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_action() -> impl Strategy<Value = MoveAction> {
    prop::sample::select(MoveAction::ALL.to_vec())
}

/// A layout of `rows` x `cols` with roughly a quarter of the cells blocked
fn arb_layout() -> impl Strategy<Value = (usize, usize, Vec<Vec<i32>>)> {
    (2usize..8, 2usize..12).prop_flat_map(|(rows, cols)| {
        let row = prop::collection::vec(prop::bool::weighted(0.25).prop_map(i32::from), cols);
        prop::collection::vec(row, rows).prop_map(move |m| (rows, cols, m))
    })
}

fn random_config(seed: u64) -> WorldConfig {
    WorldConfig::default()
        .with_seed(seed)
        .with_max_reset_attempts(200)
        .with_placement(Placement::Random)
}

fn free_count(matrix: &[Vec<i32>]) -> usize {
    matrix.iter().flatten().filter(|&&v| v == 0).count()
}

/// Some free region holds at least two cells
fn has_adjacent_free_pair(matrix: &[Vec<i32>]) -> bool {
    let free = |r: usize, c: usize| matrix.get(r).and_then(|row| row.get(c)) == Some(&0);
    (0..matrix.len()).any(|r| {
        (0..matrix[r].len()).any(|c| free(r, c) && (free(r + 1, c) || free(r, c + 1)))
    })
}

fn check_invariants(world: &GridWorld) {
    let map = world.obstacle_map();
    assert!(map.is_free(world.robot()));
    assert!(map.in_bounds(world.goal()));
    for car in world.cars() {
        assert!(map.is_free(*car));
    }
    assert!(world.car_steps().iter().all(|&b| b >= 0));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reset_establishes_reachability(
        (rows, cols, matrix) in arb_layout(),
        num_cars in 0usize..3,
        seed in any::<u64>(),
    ) {
        let feasible = free_count(&matrix) >= num_cars + 2 && has_adjacent_free_pair(&matrix);
        match GridWorld::new(rows, cols, &matrix, num_cars, random_config(seed)) {
            Ok(world) => {
                prop_assert!(feasible);
                check_invariants(&world);
                prop_assert!(is_reachable(world.obstacle_map(), world.robot(), world.goal()));
            }
            Err(e) => {
                prop_assert!(!feasible, "feasible layout rejected: {}", e);
                prop_assert!(e.is_configuration());
            }
        }
    }

    #[test]
    fn robot_moves_one_cell_or_stays(
        actions in prop::collection::vec(arb_action(), 1..60),
        seed in any::<u64>(),
    ) {
        let config = WorldConfig::default().with_seed(seed);
        let mut world = GridWorld::reference(config).unwrap();

        for action in actions {
            let before = world.robot();
            let moved = world.apply_robot_action(action);
            let after = world.robot();

            if moved {
                prop_assert_eq!(after, before.step(action));
            } else {
                prop_assert_eq!(after, before);
            }
            prop_assert!(world.obstacle_map().is_free(after));
            prop_assert!(!world.obstacles().contains(&after));
            if moved {
                prop_assert!(!world.cars().contains(&after));
            }

            world.step_cars();
            check_invariants(&world);
        }
    }

    #[test]
    fn car_budgets_never_increase(
        ticks in 1usize..120,
        seed in any::<u64>(),
        low in 0i64..5,
        span in 0i64..5,
    ) {
        let config = random_config(seed).with_car_budget_range(low, low + span);
        let mut world = GridWorld::new(5, 30, &reference_matrix(), 3, config).unwrap();

        for _ in 0..ticks {
            let budgets = world.car_steps().to_vec();
            let cars = world.cars().to_vec();
            world.step_cars();

            for i in 0..world.num_cars() {
                let now = world.car_steps()[i];
                prop_assert!(now >= 0);
                prop_assert!(now <= budgets[i]);
                if budgets[i] == 0 {
                    prop_assert_eq!(world.cars()[i], cars[i]);
                }
                if world.cars()[i] != cars[i] {
                    prop_assert_eq!(now, budgets[i] - 1);
                    prop_assert_eq!(world.cars()[i].manhattan(&cars[i]), 1);
                }
            }
        }
    }

    #[test]
    fn terminal_matches_positions(
        actions in prop::collection::vec(arb_action(), 1..80),
        seed in any::<u64>(),
    ) {
        let config = random_config(seed);
        let mut world = GridWorld::new(5, 30, &reference_matrix(), 2, config).unwrap();

        for action in actions {
            world.apply_robot_action(action);
            world.step_cars();

            let expected = if world.cars().contains(&world.robot()) {
                Terminal::Collision
            } else if world.robot() == world.goal() {
                Terminal::Goal
            } else {
                Terminal::Continue
            };
            prop_assert_eq!(world.check_terminal(), expected);
            if expected.is_terminal() {
                break;
            }
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn reference_corridor_delivery() {
    let config = WorldConfig::default()
        .with_seed(50)
        .with_car_budget_range(50, 50);
    let mut world = GridWorld::new(5, 30, &reference_matrix(), 1, config).unwrap();
    assert_eq!(world.cars(), &[Cell::new(3, 6)]);
    assert_eq!(world.car_steps(), &[50]);

    for _ in 0..28 {
        world.apply_robot_action(MoveAction::Right);
    }
    assert_eq!(world.robot(), Cell::new(1, 29));
    assert_eq!(world.check_terminal(), Terminal::Goal);
}

#[test]
fn unreachable_layout_is_a_configuration_error() {
    let matrix = vec![vec![0, 1, 0], vec![0, 1, 0]];
    let config = WorldConfig::default()
        .with_placement(Placement::fixed(Cell::new(0, 0), Cell::new(1, 2), vec![]));
    let err = GridWorld::new(2, 3, &matrix, 0, config).err().unwrap();
    assert!(matches!(err, SimError::Unreachable { .. }));
}
