mod boundary;
mod contact;

pub use boundary::BoundaryHits;

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::snapshot::{BodySnapshot, WorldSnapshot};
use crate::vector::Vector;

/// Owns the bodies and runs the per-frame pipeline.
///
/// Sleep is tracked for the whole scene, not per body: the idle timer only
/// advances while every dynamic body is slow, and a single fast body resets
/// it.
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
    config: PhysicsConfig,
    idle_timer: f32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: Vec::new(),
            config,
            idle_timer: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Insert a body. Returns its index, which is also its position in the
    /// pair iteration order.
    pub fn add_body(&mut self, body: Body) -> usize {
        tracing::debug!(
            index = self.bodies.len(),
            is_static = body.is_static,
            radius = body.radius(),
            "Body added"
        );
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Seconds the scene has continuously been below the sleep thresholds.
    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    /// Whether the scene holds bodies and all of them are asleep.
    pub fn is_asleep(&self) -> bool {
        !self.bodies.is_empty() && self.bodies.iter().all(|b| b.is_sleeping)
    }

    pub fn wake_all(&mut self) {
        for body in &mut self.bodies {
            body.wake_up();
        }
    }

    /// Remove every body and restart the idle timer.
    pub fn reset(&mut self) {
        tracing::debug!(removed = self.bodies.len(), "World reset");
        self.bodies.clear();
        self.idle_timer = 0.0;
    }

    /// Advance the scene by `dt` seconds inside the `width` x `height`
    /// region whose origin is the top-left corner.
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            if !body.is_inert() {
                body.apply_force(gravity * body.mass);
            }
        }

        for body in &mut self.bodies {
            body.update(dt);
        }

        let contacts = contact::resolve_pairs(&mut self.bodies, &self.config);
        if contacts > 0 {
            tracing::trace!(contacts, "Resolved body contacts");
        }

        let mut settling = 0;
        for body in &mut self.bodies {
            if boundary::resolve(body, width, height, dt, &self.config).settling {
                settling += 1;
            }
        }
        if settling > 0 {
            tracing::trace!(settling, "Bodies settling on the floor");
        }

        self.evaluate_sleep(dt);
    }

    fn evaluate_sleep(&mut self, dt: f32) {
        let lin = self.config.sleep_linear_threshold;
        let ang = self.config.sleep_angular_threshold;
        let all_idle = self
            .bodies
            .iter()
            .filter(|b| !b.is_static)
            .all(|b| b.speed() <= lin && b.angular_velocity.abs() <= ang);

        if !all_idle {
            if self.idle_timer > 0.0 {
                tracing::trace!(idle_timer = self.idle_timer, "Idle timer reset");
            }
            self.idle_timer = 0.0;
            return;
        }

        self.idle_timer += dt;
        if self.idle_timer >= self.config.sleep_timeout {
            let was_asleep = self.is_asleep();
            for body in &mut self.bodies {
                body.is_sleeping = true;
                if !body.is_static {
                    body.velocity = Vector::ZERO;
                    body.angular_velocity = 0.0;
                }
            }
            if !was_asleep && !self.bodies.is_empty() {
                tracing::debug!(
                    bodies = self.bodies.len(),
                    idle_timer = self.idle_timer,
                    "Scene fell asleep"
                );
            }
        }
    }

    /// Read-only copy of what the renderer needs.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            bodies: self.bodies.iter().map(BodySnapshot::from).collect(),
            idle_timer: self.idle_timer,
            asleep: self.is_asleep(),
        }
    }
}
