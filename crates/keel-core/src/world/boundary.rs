//! Containment in the `width` x `height` region and floor self-righting.

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::vector::Vector;

/// Which walls a body touched this step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub floor: bool,
    /// The floor contact was slow enough to trigger the righting torque.
    pub settling: bool,
}

impl BoundaryHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.floor
    }
}

/// Clamp `body` inside the region, bounce it off the walls it crossed and,
/// when it is settling on the floor, nudge it toward its natural base.
pub(crate) fn resolve(
    body: &mut Body,
    width: f32,
    height: f32,
    dt: f32,
    config: &PhysicsConfig,
) -> BoundaryHits {
    let mut hits = BoundaryHits::default();
    if body.is_inert() {
        return hits;
    }

    let radius = body.radius();
    let e = body.restitution;

    if body.position.x + radius > width {
        body.position.x = width - radius;
        body.velocity.x *= -e;
        body.wake_up();
        hits.right = true;
    }
    if body.position.x - radius < 0.0 {
        body.position.x = radius;
        body.velocity.x *= -e;
        body.wake_up();
        hits.left = true;
    }
    if body.position.y - radius < 0.0 {
        body.position.y = radius;
        body.velocity.y *= -e;
        body.wake_up();
        hits.top = true;
    }
    if body.position.y + radius > height {
        body.position.y = height - radius;
        let rest_speed = config.gravity.magnitude() * dt * config.rest_contact_steps;
        if (0.0..=rest_speed).contains(&body.velocity.y) {
            // Resting contact: eat the speed gravity added this step.
            body.velocity.y = 0.0;
        } else {
            body.velocity.y *= -e;
        }
        body.wake_up();
        hits.floor = true;
        hits.settling = stabilize(body, config);
    }

    hits
}

/// Righting torque and wobble damping for a slow body on the floor.
/// Returns whether the body was settling.
fn stabilize(body: &mut Body, config: &PhysicsConfig) -> bool {
    if body.speed() >= config.settle_linear_threshold
        || body.angular_velocity.abs() >= config.settle_angular_threshold
    {
        return false;
    }

    let support = body.shape().support_center(body.angle);
    let lever = (-support).rotate(body.angle);
    let torque = lever.cross(Vector::DOWN) * body.mass * config.stabilization_torque_gain;
    body.apply_torque(torque);

    body.angular_velocity *= config.settle_damping;
    body.velocity.x *= config.settle_damping;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    const DT: f32 = 0.016;

    fn body(shape: Shape, x: f32, y: f32) -> Body {
        Body::new(Vector::new(x, y), shape, 10.0, false).unwrap()
    }

    #[test]
    fn inside_region_is_untouched() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(10.0).unwrap(), 50.0, 50.0).with_velocity(Vector::new(5.0, 5.0));
        let hits = resolve(&mut b, 100.0, 100.0, DT, &cfg);
        assert!(!hits.any());
        assert_eq!(b.velocity, Vector::new(5.0, 5.0));
    }

    #[test]
    fn side_walls_and_ceiling_bounce_with_restitution() {
        let cfg = PhysicsConfig::default();
        let mut right = body(Shape::circle(10.0).unwrap(), 95.0, 50.0).with_velocity(Vector::new(10.0, 0.0));
        let hits = resolve(&mut right, 100.0, 100.0, DT, &cfg);
        assert!(hits.right && !hits.left);
        assert_eq!(right.position.x, 90.0);
        assert!((right.velocity.x + 8.0).abs() < 1e-5);

        let mut left = body(Shape::circle(10.0).unwrap(), 3.0, 50.0).with_velocity(Vector::new(-10.0, 0.0));
        assert!(resolve(&mut left, 100.0, 100.0, DT, &cfg).left);
        assert_eq!(left.position.x, 10.0);
        assert!((left.velocity.x - 8.0).abs() < 1e-5);

        let mut top = body(Shape::circle(10.0).unwrap(), 50.0, 2.0).with_velocity(Vector::new(0.0, -10.0));
        assert!(resolve(&mut top, 100.0, 100.0, DT, &cfg).top);
        assert_eq!(top.position.y, 10.0);
        assert!((top.velocity.y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn fast_floor_impact_bounces() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(20.0).unwrap(), 400.0, 590.0).with_velocity(Vector::new(0.0, 300.0));
        let hits = resolve(&mut b, 800.0, 600.0, DT, &cfg);
        assert!(hits.floor);
        assert_eq!(b.position.y, 580.0);
        assert!((b.velocity.y + 240.0).abs() < 1e-3);
    }

    #[test]
    fn slow_floor_impact_comes_to_rest() {
        let cfg = PhysicsConfig::default();
        // One step of gravity at 60 Hz.
        let mut b = body(Shape::circle(20.0).unwrap(), 400.0, 580.1).with_velocity(Vector::new(0.0, 7.96));
        let hits = resolve(&mut b, 800.0, 600.0, DT, &cfg);
        assert!(hits.floor && hits.settling);
        assert_eq!(b.velocity.y, 0.0);
        assert_eq!(b.position.y, 580.0);
    }

    #[test]
    fn settling_damps_horizontal_and_spin_only() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(20.0).unwrap(), 400.0, 585.0).with_velocity(Vector::new(10.0, 0.0));
        b.angular_velocity = 1.0;
        let hits = resolve(&mut b, 800.0, 600.0, DT, &cfg);
        assert!(hits.settling);
        assert!((b.velocity.x - 8.0).abs() < 1e-5);
        assert!((b.angular_velocity - 0.8).abs() < 1e-6);
        // Upright circle: support straight below, no righting torque.
        assert!(b.torque.abs() < 1e-3);
    }

    #[test]
    fn fast_spinner_is_not_settling() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(20.0).unwrap(), 400.0, 585.0);
        b.angular_velocity = 3.0;
        let hits = resolve(&mut b, 800.0, 600.0, DT, &cfg);
        assert!(hits.floor && !hits.settling);
        assert_eq!(b.angular_velocity, 3.0);
    }

    #[test]
    fn tilted_triangle_is_pushed_back_flat() {
        let cfg = PhysicsConfig::default();
        for tilt in [0.3_f32, -0.3] {
            let mut b = body(Shape::triangle(40.0).unwrap(), 400.0, 585.0).with_angle(tilt);
            resolve(&mut b, 800.0, 600.0, DT, &cfg);
            assert!(
                b.torque * tilt < 0.0,
                "tilt {tilt}: righting torque {} must oppose the tilt",
                b.torque
            );
        }
    }

    #[test]
    fn tilted_rectangle_rolls_onto_nearest_side() {
        let cfg = PhysicsConfig::default();
        // Just past the diagonal the box is driven onto the face it leans toward.
        let mut b = body(Shape::rectangle(40.0, 40.0).unwrap(), 400.0, 585.0).with_angle(1.0);
        resolve(&mut b, 800.0, 600.0, DT, &cfg);
        assert!(b.torque > 0.0, "torque {}", b.torque);

        // Lying on its side it stays put.
        let mut side = body(Shape::rectangle(40.0, 40.0).unwrap(), 400.0, 585.0)
            .with_angle(std::f32::consts::FRAC_PI_2);
        resolve(&mut side, 800.0, 600.0, DT, &cfg);
        assert!(side.torque.abs() < 1e-2, "torque {}", side.torque);
    }

    #[test]
    fn inert_bodies_are_skipped() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(10.0).unwrap(), -50.0, 50.0);
        b.is_sleeping = true;
        assert!(!resolve(&mut b, 100.0, 100.0, DT, &cfg).any());
        assert_eq!(b.position.x, -50.0);
    }

    #[test]
    fn corner_hits_two_walls() {
        let cfg = PhysicsConfig::default();
        let mut b = body(Shape::circle(10.0).unwrap(), 97.0, 96.0).with_velocity(Vector::new(50.0, 50.0));
        let hits = resolve(&mut b, 100.0, 100.0, DT, &cfg);
        assert!(hits.right && hits.floor);
        assert_eq!(b.position, Vector::new(90.0, 90.0));
        assert!(b.velocity.x < 0.0 && b.velocity.y < 0.0);
    }
}
