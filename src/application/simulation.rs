use rand::SeedableRng;
use rand::rngs::StdRng;

use super::SimulationConfig;
use crate::domain::{Grid, Scheduler};

const MIN_UPDATES_PER_SECOND: f32 = 1.0;
const MAX_UPDATES_PER_SECOND: f32 = 120.0;

/// Simulation orchestrates the engine for the frame loop.
/// This is the application layer that coordinates domain logic.
pub struct Simulation {
    pub grid: Grid,
    pub scheduler: Scheduler,
    rng: StdRng,
    live_probability: f64,
    pub is_running: bool,
    pub generation: u64,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub last_step_time_ms: f32,
    pub last_render_time_ms: f32,
}

impl Simulation {
    /// Wrap a grid, seeding its current buffer from `rng`
    pub fn new(mut grid: Grid, scheduler: Scheduler, mut rng: StdRng, live_probability: f64) -> Self {
        grid.randomize(&mut rng, live_probability);
        Self {
            grid,
            scheduler,
            rng,
            live_probability,
            is_running: true,
            generation: 0,
            update_timer: 0.0,
            updates_per_second: 60.0,
            last_step_time_ms: 0.0,
            last_render_time_ms: 0.0,
        }
    }

    /// Build from config: random context and scheduler are created here and nowhere else
    pub fn from_config(grid: Grid, config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let scheduler = config.workers.map_or_else(Scheduler::with_host_parallelism, Scheduler::new);

        let mut sim = Self::new(grid, scheduler, rng, config.live_probability);
        sim.updates_per_second = config
            .updates_per_second
            .clamp(MIN_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND);
        sim
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Advance exactly one generation regardless of pause state
    pub fn step(mut self) -> Self {
        let start = std::time::Instant::now();
        self.scheduler.step(&mut self.grid);
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.generation += 1;
        log::debug!("generation {} took {:.2}ms", self.generation, self.last_step_time_ms);
        self
    }

    /// Draw a fresh random state and reset the generation counter
    pub fn reseed(mut self) -> Self {
        self.grid.randomize(&mut self.rng, self.live_probability);
        self.generation = 0;
        log::info!("reseeded grid, population {}", self.grid.population());
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta)
            .clamp(MIN_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND);
        self
    }

    /// Update simulation by one frame; at most one generation per call
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.updates_per_second;

        if self.update_timer >= update_interval {
            self.update_timer = 0.0;
            return self.step();
        }

        self
    }
}
