use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::error::BodyError;
use crate::shape::Shape;
use crate::vector::Vector;

/// Mutable simulation state of one rigid body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Body {
    pub position: Vector,
    pub velocity: Vector,
    /// Force accumulated for the next step; cleared by [`Body::update`].
    pub force: Vector,
    /// Rotation in radians (positive turns +x toward +y).
    pub angle: f32,
    pub angular_velocity: f32,
    /// Torque accumulated for the next step; cleared by [`Body::update`].
    pub torque: f32,
    pub mass: f32,
    /// Infinite for static bodies.
    pub moment_of_inertia: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub restitution: f32,
    pub friction: f32,
    pub is_static: bool,
    pub is_sleeping: bool,
    shape: Shape,
}

impl Body {
    /// Build a body with the default material and damping.
    pub fn new(position: Vector, shape: Shape, mass: f32, is_static: bool) -> Result<Self, BodyError> {
        Self::with_config(position, shape, mass, is_static, &PhysicsConfig::default())
    }

    /// Build a body taking damping and material defaults from `config`.
    pub fn with_config(
        position: Vector,
        shape: Shape,
        mass: f32,
        is_static: bool,
        config: &PhysicsConfig,
    ) -> Result<Self, BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if !position.is_finite() {
            return Err(BodyError::NonFinitePosition);
        }
        validate_shape(&shape)?;

        Ok(Self {
            position,
            velocity: Vector::ZERO,
            force: Vector::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            torque: 0.0,
            mass,
            moment_of_inertia: moment_of_inertia(&shape, mass, is_static),
            linear_damping: config.linear_damping,
            angular_damping: config.angular_damping,
            restitution: config.default_restitution,
            friction: config.default_friction,
            is_static,
            is_sleeping: false,
            shape,
        })
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Bounding radius of the shape, the only geometry collisions use.
    pub fn radius(&self) -> f32 {
        self.shape.bounding_radius()
    }

    /// Zero for static bodies.
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static { 0.0 } else { 1.0 / self.mass }
    }

    /// Zero for static bodies.
    pub fn inverse_inertia(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.moment_of_inertia
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Static or asleep: skipped by integration and boundary handling.
    pub fn is_inert(&self) -> bool {
        self.is_static || self.is_sleeping
    }

    pub fn apply_force(&mut self, force: Vector) {
        self.force = self.force + force;
    }

    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    pub fn wake_up(&mut self) {
        self.is_sleeping = false;
    }

    /// Advance one semi-implicit Euler step and clear accumulated force and torque.
    pub fn update(&mut self, dt: f32) {
        if self.is_inert() {
            return;
        }

        let acceleration = self.force * (1.0 / self.mass);
        self.velocity = self.velocity + acceleration * dt;

        let angular_acceleration = self.torque / self.moment_of_inertia;
        self.angular_velocity += angular_acceleration * dt;

        // Once per step regardless of dt.
        self.velocity = self.velocity * self.linear_damping;
        self.angular_velocity *= self.angular_damping;

        self.position = self.position + self.velocity * dt;
        self.angle += self.angular_velocity * dt;

        self.force = Vector::ZERO;
        self.torque = 0.0;
    }
}

fn validate_shape(shape: &Shape) -> Result<(), BodyError> {
    match *shape {
        Shape::Circle { radius } => Shape::circle(radius)?,
        Shape::Rectangle { width, height } => Shape::rectangle(width, height)?,
        Shape::Triangle { size } => Shape::triangle(size)?,
    };
    Ok(())
}

fn moment_of_inertia(shape: &Shape, mass: f32, is_static: bool) -> f32 {
    if is_static {
        return f32::INFINITY;
    }
    let r = shape.bounding_radius();
    match shape {
        // Solid disk.
        Shape::Circle { .. } => 0.5 * mass * r * r,
        // Approximated as the square inscribed in the bounding circle.
        Shape::Rectangle { .. } => {
            let side = std::f32::consts::SQRT_2 * r;
            (1.0 / 12.0) * mass * (side * side + side * side)
        },
        Shape::Triangle { .. } => mass * r * r,
    }
}
