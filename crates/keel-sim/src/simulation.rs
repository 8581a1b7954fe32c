use rand::SeedableRng;
use rand::rngs::StdRng;

use keel_core::{BodyError, SpawnSpec, World, WorldSnapshot, spawn_body};

use crate::config::SimConfig;

/// Commands accepted by the simulation driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    Start,
    Stop,
    /// Stop and remove every body.
    Reset,
    /// Drop a preset body into the scene. Allowed while stopped.
    Spawn(SpawnSpec),
}

/// Outcome of [`Simulation::run_until_asleep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub asleep: bool,
}

/// Fixed-step driver around a [`World`].
pub struct Simulation {
    world: World,
    config: SimConfig,
    running: bool,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            world: World::with_config(config.physics.clone()),
            config,
            running: false,
            rng,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, command: SimCommand) -> Result<(), BodyError> {
        match command {
            SimCommand::Start => {
                if !self.running {
                    tracing::info!(bodies = self.world.len(), "Simulation started");
                }
                self.running = true;
            },
            SimCommand::Stop => {
                if self.running {
                    tracing::info!("Simulation stopped");
                }
                self.running = false;
            },
            SimCommand::Reset => {
                self.running = false;
                self.world.reset();
                tracing::info!("Simulation reset");
            },
            SimCommand::Spawn(spec) => {
                spawn_body(&mut self.world, &spec, &mut self.rng)?;
            },
        }
        Ok(())
    }

    /// Advance one fixed step if running. Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.world.update(self.config.dt, self.config.width, self.config.height);
        true
    }

    /// Tick until the scene sleeps, the driver is stopped, or `max_ticks`
    /// steps have run.
    pub fn run_until_asleep(&mut self, max_ticks: usize) -> RunSummary {
        let mut ticks = 0;
        while ticks < max_ticks && !self.world.is_asleep() {
            if !self.tick() {
                break;
            }
            ticks += 1;
        }
        let asleep = self.world.is_asleep();
        if asleep {
            tracing::info!(ticks, "Scene asleep");
        } else {
            tracing::info!(ticks, "Run ended before the scene slept");
        }
        RunSummary { ticks, asleep }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }
}
