use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::vector::Vector;

/// Collision and drawing geometry of a body, in body-local coordinates
/// centered on the body's position.
///
/// Collision detection only ever looks at [`Shape::bounding_radius`]; the
/// actual outline matters for the floor self-righting torque and for the
/// renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
    /// Isosceles triangle, apex up, fitting a `size` x `size` box.
    Triangle { size: f32 },
}

/// World-space drawable outline handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Outline {
    Circle { center: Vector, radius: f32 },
    Polygon(Vec<Vector>),
}

/// Outward normals of the four rectangle faces, in the same order as the
/// face centers.
const RECT_FACE_NORMALS: [Vector; 4] = [
    Vector::new(0.0, 1.0),
    Vector::new(-1.0, 0.0),
    Vector::new(0.0, -1.0),
    Vector::new(1.0, 0.0),
];

fn check_dimension(name: &'static str, value: f32) -> Result<f32, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositiveDimension { name, value })
    }
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self, ShapeError> {
        Ok(Self::Circle {
            radius: check_dimension("radius", radius)?,
        })
    }

    pub fn rectangle(width: f32, height: f32) -> Result<Self, ShapeError> {
        Ok(Self::Rectangle {
            width: check_dimension("width", width)?,
            height: check_dimension("height", height)?,
        })
    }

    pub fn triangle(size: f32) -> Result<Self, ShapeError> {
        Ok(Self::Triangle {
            size: check_dimension("size", size)?,
        })
    }

    /// Radius of the smallest origin-centered circle containing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Self::Circle { radius } => radius,
            Self::Rectangle { width, height } => (width * width + height * height).sqrt() / 2.0,
            Self::Triangle { size } => size / 2.0,
        }
    }

    /// Local point treated as the contact foot when the body rests on the
    /// floor at rotation `angle`.
    pub fn support_center(&self, angle: f32) -> Vector {
        match *self {
            Self::Circle { radius } => Vector::new(0.0, radius),
            Self::Rectangle { width, height } => {
                let centers = Self::rectangle_face_centers(width, height);
                // Normals are turned by -angle when picking the face, which
                // makes the righting torque settle the box on a face rather
                // than balance it on a corner.
                let mut best = centers[0];
                let mut best_dot = f32::NEG_INFINITY;
                for (normal, center) in RECT_FACE_NORMALS.iter().zip(centers) {
                    let dot = normal.rotate(-angle).dot(Vector::DOWN);
                    if dot > best_dot {
                        best_dot = dot;
                        best = center;
                    }
                }
                best
            },
            Self::Triangle { size } => {
                let mut lowest = Vector::ZERO;
                let mut max_y = f32::NEG_INFINITY;
                for vertex in Self::triangle_vertices(size) {
                    let y = vertex.rotate(angle).y;
                    if y > max_y {
                        max_y = y;
                        lowest = vertex;
                    }
                }
                lowest
            },
        }
    }

    /// Outline in world space for a body at `position` rotated by `angle`.
    pub fn outline(&self, position: Vector, angle: f32) -> Outline {
        let to_world = |v: Vector| position + v.rotate(angle);
        match *self {
            Self::Circle { radius } => Outline::Circle {
                center: position,
                radius,
            },
            Self::Rectangle { width, height } => {
                let (w2, h2) = (width / 2.0, height / 2.0);
                Outline::Polygon(
                    [
                        Vector::new(-w2, -h2),
                        Vector::new(w2, -h2),
                        Vector::new(w2, h2),
                        Vector::new(-w2, h2),
                    ]
                    .into_iter()
                    .map(to_world)
                    .collect(),
                )
            },
            Self::Triangle { size } => {
                Outline::Polygon(Self::triangle_vertices(size).into_iter().map(to_world).collect())
            },
        }
    }

    fn rectangle_face_centers(width: f32, height: f32) -> [Vector; 4] {
        let (w2, h2) = (width / 2.0, height / 2.0);
        [
            Vector::new(0.0, h2),
            Vector::new(-w2, 0.0),
            Vector::new(0.0, -h2),
            Vector::new(w2, 0.0),
        ]
    }

    fn triangle_vertices(size: f32) -> [Vector; 3] {
        let half = size / 2.0;
        [
            Vector::new(0.0, -half),
            Vector::new(-half, half),
            Vector::new(half, half),
        ]
    }
}
