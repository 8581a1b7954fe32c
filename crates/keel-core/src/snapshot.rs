use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::shape::{Outline, Shape};
use crate::vector::Vector;

/// What a renderer needs to draw one body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodySnapshot {
    pub position: Vector,
    pub angle: f32,
    pub shape: Shape,
    pub is_static: bool,
    pub sleeping: bool,
}

impl BodySnapshot {
    pub fn outline(&self) -> Outline {
        self.shape.outline(self.position, self.angle)
    }
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            position: body.position,
            angle: body.angle,
            shape: *body.shape(),
            is_static: body.is_static,
            sleeping: body.is_sleeping,
        }
    }
}

/// Frame-level view of the world, in body insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub bodies: Vec<BodySnapshot>,
    pub idle_timer: f32,
    pub asleep: bool,
}

impl WorldSnapshot {
    /// MessagePack encoding with named fields.
    pub fn to_bytes(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn outlines(&self) -> Vec<Outline> {
        self.bodies.iter().map(BodySnapshot::outline).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    fn scene() -> World {
        let mut world = World::new();
        world.add_body(Body::new(Vector::new(100.0, 100.0), Shape::circle(10.0).unwrap(), 1.0, false).unwrap());
        world.add_body(
            Body::new(Vector::new(300.0, 500.0), Shape::rectangle(40.0, 30.0).unwrap(), 1.0, true)
                .unwrap()
                .with_angle(0.5),
        );
        world.add_body(Body::new(Vector::new(500.0, 200.0), Shape::triangle(40.0).unwrap(), 1.0, false).unwrap());
        world
    }

    #[test]
    fn snapshot_preserves_order_and_pose() {
        let world = scene();
        let snap = world.snapshot();
        assert_eq!(snap.bodies.len(), 3);
        assert_eq!(snap.bodies[1].position, Vector::new(300.0, 500.0));
        assert_eq!(snap.bodies[1].angle, 0.5);
        assert!(snap.bodies[1].is_static);
        assert!(!snap.asleep);
    }

    #[test]
    fn msgpack_roundtrip() {
        let snap = scene().snapshot();
        let bytes = snap.to_bytes().unwrap();
        assert_eq!(WorldSnapshot::from_bytes(&bytes).unwrap(), snap);
    }

    #[test]
    fn json_names_shapes() {
        let json = scene().snapshot().to_json().unwrap();
        assert!(json.contains("\"circle\""));
        assert!(json.contains("\"rectangle\""));
        assert!(json.contains("\"triangle\""));
    }

    #[test]
    fn outlines_match_shapes() {
        let outlines = scene().snapshot().outlines();
        assert!(matches!(outlines[0], Outline::Circle { radius, .. } if radius == 10.0));
        assert!(matches!(&outlines[1], Outline::Polygon(p) if p.len() == 4));
        assert!(matches!(&outlines[2], Outline::Polygon(p) if p.len() == 3));
    }
}
