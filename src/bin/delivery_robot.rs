// Delivery robot and cars
// A randomly driven robot tries to reach the package at the far end of the
// corridor while a car wanders the lower passage.
//
// usage: delivery_robot [seed]

#[macro_use]
extern crate log;

use std::io;
use std::process;

use env_logger::{Builder, Env};

use delivery_robot::common::{Presenter, SimResult};
use delivery_robot::grid_world::{GridWorld, WorldConfig};
use delivery_robot::simulation::{EpisodeSummary, RandomPolicy, Simulation, SimulationConfig};
use delivery_robot::utils::{PlotPresenter, TextPresenter, DEFAULT_FPS};

// Parameters
const SAVE_FRAMES: bool = false; // also write gnuplot PNG frames
const FRAME_DIR: &str = "img/delivery_robot";
const FRAME_EVERY: usize = 10; // save every n-th frame
const MAX_TICKS: Option<usize> = None;

/// Draws to every wrapped presenter; quits when any of them asks
struct Fanout(Vec<Box<dyn Presenter>>);

impl Presenter for Fanout {
    fn render(&mut self, world: &GridWorld) -> SimResult<()> {
        for p in self.0.iter_mut() {
            p.render(world)?;
        }
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.0.iter_mut().any(|p| p.quit_requested())
    }
}

fn run(seed: Option<u64>) -> SimResult<EpisodeSummary> {
    let mut config = WorldConfig::default();
    config.seed = seed;
    let world = GridWorld::reference(config)?;

    let mut presenters: Vec<Box<dyn Presenter>> =
        vec![Box::new(TextPresenter::new(io::stdout(), DEFAULT_FPS))];
    if SAVE_FRAMES {
        presenters.push(Box::new(PlotPresenter::new(FRAME_DIR, FRAME_EVERY)?));
    }

    let policy = RandomPolicy::new(seed.map(|s| s.wrapping_add(1)));
    let sim_config = SimulationConfig { max_ticks: MAX_TICKS };
    let mut sim = Simulation::new(world, policy, Fanout(presenters), sim_config);

    sim.restart()?;
    sim.run()
}

fn main() {
    // Set default log level to warn for everything, and info for our code
    Builder::from_env(Env::default().default_filter_or("warn,delivery_robot=info")).init();

    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        None => None,
        Some(Ok(seed)) => Some(seed),
        Some(Err(e)) => {
            error!("seed must be an unsigned integer: {}", e);
            process::exit(2);
        }
    };

    info!("Delivery robot simulation start!! (seed: {:?})", seed);

    match run(seed) {
        Ok(summary) => {
            println!("{}", summary.outcome);
            info!("Delivery robot simulation finish after {} ticks", summary.ticks);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
