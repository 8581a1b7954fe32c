//! Body-vs-body contacts. Every body is treated as its bounding circle.

use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::vector::Vector;

/// Resolve every unordered pair in collection order. Returns the number of
/// penetrating pairs found.
pub(crate) fn resolve_pairs(bodies: &mut [Body], config: &PhysicsConfig) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, config) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Resolve one pair. Returns whether the bounding circles overlapped.
pub(crate) fn resolve_pair(a: &mut Body, b: &mut Body, config: &PhysicsConfig) -> bool {
    // Two infinite-mass participants would divide by zero below.
    if a.is_inert() && b.is_inert() {
        return false;
    }

    let delta = b.position - a.position;
    let dist = delta.magnitude();
    let min_dist = a.radius() + b.radius();
    if dist >= min_dist {
        return false;
    }

    a.wake_up();
    b.wake_up();

    let normal = delta.normalize();
    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let total_inv_mass = inv_mass_a + inv_mass_b;
    if total_inv_mass <= 0.0 {
        return true;
    }

    let penetration = min_dist - dist;
    let correction = normal * (penetration * config.correction_factor / total_inv_mass);
    if !a.is_static {
        a.position = a.position - correction * inv_mass_a;
    }
    if !b.is_static {
        b.position = b.position + correction * inv_mass_b;
    }

    let r_a = normal * a.radius();
    let r_b = normal * -b.radius();
    let inv_inertia_a = a.inverse_inertia();
    let inv_inertia_b = b.inverse_inertia();

    let relative = contact_velocity(b, r_b) - contact_velocity(a, r_a);
    let relative_normal = relative.dot(normal);
    if relative_normal > 0.0 {
        // Already separating.
        return true;
    }

    let restitution = a.restitution.min(b.restitution);
    let ra_n = r_a.cross(normal);
    let rb_n = r_b.cross(normal);
    let denominator =
        total_inv_mass + ra_n * ra_n * inv_inertia_a + rb_n * rb_n * inv_inertia_b;
    let normal_impulse = -(1.0 + restitution) * relative_normal / denominator;
    apply_impulse(a, b, r_a, r_b, normal * normal_impulse);

    let relative = contact_velocity(b, r_b) - contact_velocity(a, r_a);
    let tangent = relative - normal * relative.dot(normal);
    if tangent.magnitude() < config.tangent_epsilon {
        return true;
    }
    let tangent = tangent.normalize();

    let ra_t = r_a.cross(tangent);
    let rb_t = r_b.cross(tangent);
    let denominator_t =
        total_inv_mass + ra_t * ra_t * inv_inertia_a + rb_t * rb_t * inv_inertia_b;
    let tangent_impulse = -relative.dot(tangent) / denominator_t;

    // Coulomb cone: |jt| <= mu * jn.
    let mu = (a.friction * b.friction).sqrt();
    let max_friction = normal_impulse * mu;
    let friction_impulse = if tangent_impulse.abs() > max_friction {
        tangent * -max_friction
    } else {
        tangent * tangent_impulse
    };
    apply_impulse(a, b, r_a, r_b, friction_impulse);

    true
}

fn contact_velocity(body: &Body, r: Vector) -> Vector {
    body.velocity + Vector::spin_velocity(body.angular_velocity, r)
}

/// Push `impulse` into `b` and its reaction into `a`. Static bodies are untouched.
fn apply_impulse(a: &mut Body, b: &mut Body, r_a: Vector, r_b: Vector, impulse: Vector) {
    if !a.is_static {
        a.velocity = a.velocity - impulse * a.inverse_mass();
        a.angular_velocity -= r_a.cross(impulse) * a.inverse_inertia();
    }
    if !b.is_static {
        b.velocity = b.velocity + impulse * b.inverse_mass();
        b.angular_velocity += r_b.cross(impulse) * b.inverse_inertia();
    }
}
