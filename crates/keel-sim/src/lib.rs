pub mod config;
pub mod simulation;

use keel_core::{ShapeKind, SpawnSpec};

/// Scene used when the config lists none: one of each shape dropped from
/// near the top of the region.
pub fn default_scene(width: f32) -> Vec<SpawnSpec> {
    ShapeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| SpawnSpec::new(kind, width * (i as f32 + 1.0) / 4.0, 100.0))
        .collect()
}

/// Whether a scene spawned from `scene` can reach global sleep. A dynamic
/// triangle resting on its base rocks forever under the righting torque, so
/// any scene holding one runs until its tick budget is spent.
pub fn scene_can_sleep(scene: &[SpawnSpec]) -> bool {
    !scene
        .iter()
        .any(|spec| spec.kind == ShapeKind::Triangle && !spec.is_static)
}
