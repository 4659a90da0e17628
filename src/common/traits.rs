//! Common traits defining the seams between the world, its drivers and presenters

use crate::common::error::SimResult;
use crate::common::types::MoveAction;
use crate::grid_world::GridWorld;

/// Chooses the robot action for the next tick
pub trait RobotPolicy {
    /// Pick an action given the current world state
    fn choose(&mut self, world: &GridWorld) -> MoveAction;
}

/// Presentation layer: draws frames and reports a user quit
pub trait Presenter {
    /// Draw one frame of the current world
    fn render(&mut self, world: &GridWorld) -> SimResult<()>;

    /// Polled once per tick by the driver
    fn quit_requested(&mut self) -> bool {
        false
    }
}

impl<P: RobotPolicy + ?Sized> RobotPolicy for Box<P> {
    fn choose(&mut self, world: &GridWorld) -> MoveAction {
        (**self).choose(world)
    }
}

impl<R: Presenter + ?Sized> Presenter for Box<R> {
    fn render(&mut self, world: &GridWorld) -> SimResult<()> {
        (**self).render(world)
    }

    fn quit_requested(&mut self) -> bool {
        (**self).quit_requested()
    }
}
