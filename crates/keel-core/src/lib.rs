pub mod body;
pub mod config;
pub mod error;
pub mod shape;
pub mod snapshot;
pub mod spawn;
pub mod vector;
pub mod world;

pub use body::Body;
pub use config::PhysicsConfig;
pub use error::{BodyError, ConfigError, ShapeError};
pub use shape::{Outline, Shape};
pub use snapshot::{BodySnapshot, WorldSnapshot};
pub use spawn::{ShapeKind, SpawnSpec, spawn_body};
pub use vector::Vector;
pub use world::{BoundaryHits, World};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::body::Body;
    use crate::shape::Shape;
    use crate::vector::Vector;
    use crate::world::World;

    /// Dynamic circle with default material.
    pub fn circle_body(x: f32, y: f32, radius: f32, mass: f32) -> Body {
        Body::new(Vector::new(x, y), Shape::Circle { radius }, mass, false)
            .expect("test circle must be valid")
    }

    /// Static circle; its mass is irrelevant.
    pub fn static_circle(x: f32, y: f32, radius: f32) -> Body {
        Body::new(Vector::new(x, y), Shape::Circle { radius }, 1.0, true)
            .expect("test circle must be valid")
    }

    /// One body of each shape kind dropped side by side from `y`.
    pub fn three_shape_scene(y: f32) -> World {
        let mut world = World::new();
        let shapes = [
            Shape::Circle { radius: 20.0 },
            Shape::Rectangle {
                width: 40.0,
                height: 30.0,
            },
            Shape::Triangle { size: 40.0 },
        ];
        for (i, shape) in shapes.into_iter().enumerate() {
            let body = Body::new(Vector::new(200.0 + 200.0 * i as f32, y), shape, 10.0, false)
                .expect("preset shape must be valid");
            world.add_body(body);
        }
        world
    }

    /// Step `world` `n` times. Returns the step count at which the scene
    /// first reported asleep, if it did.
    pub fn step_n(world: &mut World, n: usize, dt: f32, width: f32, height: f32) -> Option<usize> {
        let mut slept_at = None;
        for i in 0..n {
            world.update(dt, width, height);
            if slept_at.is_none() && world.is_asleep() {
                slept_at = Some(i + 1);
            }
        }
        slept_at
    }

    /// Assert two vectors agree component-wise within `tolerance`.
    #[track_caller]
    pub fn assert_vec_close(actual: Vector, expected: Vector, tolerance: f32) {
        assert!(
            (actual.x - expected.x).abs() <= tolerance && (actual.y - expected.y).abs() <= tolerance,
            "expected {expected:?} within {tolerance}, got {actual:?}"
        );
    }

    /// Every body must lie inside the region, allowing `slack` for
    /// contacts pushed out after the boundary pass.
    #[track_caller]
    pub fn assert_contained(world: &World, width: f32, height: f32, slack: f32) {
        for (i, body) in world.bodies().iter().enumerate() {
            let r = body.radius();
            let p = body.position;
            assert!(
                p.x - r >= -slack && p.x + r <= width + slack,
                "body {i} escaped horizontally: x = {}",
                p.x
            );
            assert!(
                p.y - r >= -slack && p.y + r <= height + slack,
                "body {i} escaped vertically: y = {}",
                p.y
            );
        }
    }

    // ================================================================
    // Static Body Contract
    // ================================================================

    /// Static bodies in `world` must keep their pose and velocity over
    /// `steps` updates.
    pub fn contract_static_bodies_hold(world: &mut World, steps: usize, dt: f32, width: f32, height: f32) {
        let before: Vec<(usize, Vector, f32, Vector)> = world
            .bodies()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_static)
            .map(|(i, b)| (i, b.position, b.angle, b.velocity))
            .collect();
        step_n(world, steps, dt, width, height);
        for (i, position, angle, velocity) in before {
            let body = &world.bodies()[i];
            assert_eq!(body.position, position, "static body {i} moved");
            assert_eq!(body.angle, angle, "static body {i} rotated");
            assert_eq!(body.velocity, velocity, "static body {i} changed velocity");
        }
    }
}
