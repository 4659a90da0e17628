//! Robot policies for the simulation driver

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::{MoveAction, RobotPolicy};
use crate::grid_world::GridWorld;

/// Picks one of the four actions uniformly at random every tick
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RobotPolicy for RandomPolicy {
    fn choose(&mut self, _world: &GridWorld) -> MoveAction {
        // ALL is non-empty
        *MoveAction::ALL.choose(&mut self.rng).unwrap_or(&MoveAction::Up)
    }
}

/// Replays a fixed list of actions
pub struct ScriptedPolicy {
    actions: Vec<MoveAction>,
    cursor: usize,
    cycle: bool,
}

impl ScriptedPolicy {
    /// Once the script runs out the last action is repeated
    pub fn new(actions: Vec<MoveAction>) -> Self {
        Self {
            actions,
            cursor: 0,
            cycle: false,
        }
    }

    /// Once the script runs out it starts over
    pub fn cycling(actions: Vec<MoveAction>) -> Self {
        Self {
            actions,
            cursor: 0,
            cycle: true,
        }
    }

    pub fn repeat(action: MoveAction, times: usize) -> Self {
        Self::new(vec![action; times])
    }
}

impl RobotPolicy for ScriptedPolicy {
    fn choose(&mut self, _world: &GridWorld) -> MoveAction {
        if self.actions.is_empty() {
            return MoveAction::Up;
        }
        let idx = if self.cycle {
            self.cursor % self.actions.len()
        } else {
            self.cursor.min(self.actions.len() - 1)
        };
        self.cursor += 1;
        self.actions[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_world::WorldConfig;

    fn world() -> GridWorld {
        GridWorld::reference(WorldConfig::default().with_seed(0)).unwrap()
    }

    #[test]
    fn test_random_policy_is_seeded() {
        let w = world();
        let mut a = RandomPolicy::new(Some(9));
        let mut b = RandomPolicy::new(Some(9));
        let xs: Vec<_> = (0..32).map(|_| a.choose(&w)).collect();
        let ys: Vec<_> = (0..32).map(|_| b.choose(&w)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_random_policy_covers_all_actions() {
        let w = world();
        let mut policy = RandomPolicy::new(Some(1));
        let seen: Vec<_> = (0..200).map(|_| policy.choose(&w)).collect();
        for action in MoveAction::ALL {
            assert!(seen.contains(&action));
        }
    }

    #[test]
    fn test_scripted_policy_repeats_last() {
        let w = world();
        let mut policy = ScriptedPolicy::new(vec![MoveAction::Down, MoveAction::Right]);
        assert_eq!(policy.choose(&w), MoveAction::Down);
        assert_eq!(policy.choose(&w), MoveAction::Right);
        assert_eq!(policy.choose(&w), MoveAction::Right);
    }

    #[test]
    fn test_scripted_policy_cycles() {
        let w = world();
        let mut policy = ScriptedPolicy::cycling(vec![MoveAction::Left, MoveAction::Right]);
        let xs: Vec<_> = (0..4).map(|_| policy.choose(&w)).collect();
        assert_eq!(
            xs,
            vec![MoveAction::Left, MoveAction::Right, MoveAction::Left, MoveAction::Right]
        );
    }
}
