use tracing_subscriber::EnvFilter;

use keel_sim::config::SimConfig;
use keel_sim::simulation::{SimCommand, Simulation};
use keel_sim::{default_scene, scene_can_sleep};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let scene = if config.scene.is_empty() {
        default_scene(config.width)
    } else {
        config.scene.clone()
    };
    let max_ticks = config.max_ticks;
    let expect_sleep = scene_can_sleep(&scene);

    tracing::info!(
        width = config.width,
        height = config.height,
        dt = config.dt,
        bodies = scene.len(),
        "keel simulation starting"
    );

    let mut sim = Simulation::new(config);
    for spec in scene {
        if let Err(e) = sim.handle(SimCommand::Spawn(spec.clone())) {
            tracing::error!(kind = %spec.kind, "Failed to spawn body: {e}");
            std::process::exit(1);
        }
    }
    if let Err(e) = sim.handle(SimCommand::Start) {
        tracing::error!("Failed to start: {e}");
        std::process::exit(1);
    }

    let summary = sim.run_until_asleep(max_ticks);
    if !summary.asleep {
        if expect_sleep {
            tracing::warn!(ticks = summary.ticks, "Scene still moving after tick budget");
        } else {
            tracing::info!(
                ticks = summary.ticks,
                "Tick budget spent; triangles rock on their base and never sleep"
            );
        }
    }

    match sim.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to encode snapshot: {e}");
            std::process::exit(1);
        },
    }
}
