use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::BodyError;
use crate::shape::Shape;
use crate::vector::Vector;
use crate::world::World;

/// Default mass of spawned bodies.
pub const SPAWN_MASS: f32 = 10.0;
/// Spawned bodies get a random initial torque in `[-SPAWN_TORQUE, SPAWN_TORQUE)`.
pub const SPAWN_TORQUE: f32 = 250.0;

/// Shape families offered to the spawner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [Self; 3] = [Self::Circle, Self::Rectangle, Self::Triangle];

    /// Preset geometry: circle r=20, rectangle 40x30, triangle 40.
    pub fn default_shape(self) -> Shape {
        match self {
            Self::Circle => Shape::Circle { radius: 20.0 },
            Self::Rectangle => Shape::Rectangle {
                width: 40.0,
                height: 30.0,
            },
            Self::Triangle => Shape::Triangle { size: 40.0 },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "triangle" => Ok(Self::Triangle),
            other => Err(format!("unknown shape kind '{other}'")),
        }
    }
}

fn default_mass() -> f32 {
    SPAWN_MASS
}

/// A request to drop a preset body into the world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpawnSpec {
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default)]
    pub is_static: bool,
}

impl SpawnSpec {
    pub fn new(kind: ShapeKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            mass: SPAWN_MASS,
            is_static: false,
        }
    }
}

/// Build the body for `spec`, give it a random spin, add it to `world` and
/// wake the whole scene. Returns the new body's index.
pub fn spawn_body<R: Rng + ?Sized>(
    world: &mut World,
    spec: &SpawnSpec,
    rng: &mut R,
) -> Result<usize, BodyError> {
    let mut body = Body::with_config(
        Vector::new(spec.x, spec.y),
        spec.kind.default_shape(),
        spec.mass,
        spec.is_static,
        world.config(),
    )?;
    if !spec.is_static {
        body.apply_torque(rng.random_range(-SPAWN_TORQUE..SPAWN_TORQUE));
    }
    let index = world.add_body(body);
    world.wake_all();
    tracing::debug!(index, kind = %spec.kind, x = spec.x, y = spec.y, "Spawned body");
    Ok(index)
}
