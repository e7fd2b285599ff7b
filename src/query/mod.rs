//! Pairwise distance / closest-point queries.
//!
//! Every query returns a [`QueryResult`]. `squared_distance` is the
//! authoritative value; `distance` is its square root. `closest_points`
//! and `parameters` are ordered (self, argument); the reverse ordering is
//! obtained with [`QueryResult::swapped`], which is what the
//! [`Primitive`] dispatch table uses for flipped pairs. Queries never
//! error: degenerate configurations take deterministic fallbacks and set
//! the relevant flags (`is_equidistant`, `interior`).

use crate::Point3;
use serde::{Deserialize, Serialize};

pub mod line;
pub mod point;
pub mod ray;
pub mod segment;

pub use point::{
    point_capsule, point_circle, point_disk, point_line, point_plane, point_point,
    point_polyline, point_ray, point_rectangle, point_segment, point_sphere, point_triangle,
};

use crate::shape::{
    Capsule, Circle, Disk, Line, Plane, Ray, Rectangle, Segment, Sphere, Triangle,
};

/// Universal output of a distance / closest-point query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Authoritative squared distance, >= 0.
    pub squared_distance: f64,
    /// `squared_distance.sqrt()`, except for the sphere/capsule offset
    /// queries where a negative value signals an interior point.
    pub distance: f64,
    /// One scalar per operand. Lines carry a signed arc-length parameter,
    /// rays a parameter clamped to >= 0, segments an arc-length fraction
    /// in [0, 1]. Operands without a scalar parametrization (triangles,
    /// rectangles, ...) report 0 here; their position lives in the
    /// shape-specific extras below.
    pub parameters: [f64; 2],
    /// Closest point on each operand; always fresh values, never aliases
    /// into the operands.
    pub closest_points: [Point3; 2],
    /// Barycentric coordinates of the triangle-side closest point, for
    /// triangle queries.
    pub barycentric: Option<[f64; 3]>,
    /// Axis parameters of the rectangle-side closest point, for rectangle
    /// queries.
    pub rectangle_parameters: Option<[f64; 2]>,
    /// Signed plane distance, for plane and disk queries.
    pub signed_distance: Option<f64>,
    /// Index of the winning segment, for polyline queries.
    pub segment_index: Option<usize>,
    /// Set when every point of the other primitive is equally close
    /// (on-axis circle query, sphere-center query) and the closest point
    /// is an arbitrary deterministic pick.
    pub is_equidistant: bool,
    /// Set when the query point lies inside a sphere or capsule.
    pub interior: bool,
}

impl QueryResult {
    /// Result for a known pair of closest points and parameters.
    pub(crate) fn between(c0: Point3, c1: Point3, t0: f64, t1: f64) -> Self {
        let squared = (c0 - c1).norm_squared();
        Self {
            squared_distance: squared,
            distance: squared.sqrt(),
            parameters: [t0, t1],
            closest_points: [c0, c1],
            barycentric: None,
            rectangle_parameters: None,
            signed_distance: None,
            segment_index: None,
            is_equidistant: false,
            interior: false,
        }
    }

    /// The same configuration with the operand ordering reversed.
    /// Distances are unchanged; shape-specific extras stay put.
    pub fn swapped(mut self) -> Self {
        self.closest_points.swap(0, 1);
        self.parameters.swap(0, 1);
        self
    }
}

/// A tagged primitive, for callers that select operand kinds at runtime.
///
/// Dispatch is a fixed double match over the kind tags; unsupported pairs
/// return `None` rather than guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Point(Point3),
    Line(Line),
    Ray(Ray),
    Segment(Segment),
    Plane(Plane),
    Circle(Circle),
    Disk(Disk),
    Sphere(Sphere),
    Capsule(Capsule),
    Triangle(Triangle),
    Rectangle(Rectangle),
}

impl Primitive {
    /// Minimum-distance configuration between two primitives, ordered
    /// (self, other). `None` for unsupported pairs.
    pub fn distance_to(&self, other: &Primitive) -> Option<QueryResult> {
        use Primitive::*;
        let result = match (self, other) {
            (Point(a), Point(b)) => point_point(a, b),
            (Point(a), Line(b)) => point_line(a, b),
            (Point(a), Ray(b)) => point_ray(a, b),
            (Point(a), Segment(b)) => point_segment(a, b),
            (Point(a), Plane(b)) => point_plane(a, b),
            (Point(a), Circle(b)) => point_circle(a, b),
            (Point(a), Disk(b)) => point_disk(a, b),
            (Point(a), Sphere(b)) => point_sphere(a, b),
            (Point(a), Capsule(b)) => point_capsule(a, b),
            (Point(a), Triangle(b)) => point_triangle(a, b),
            (Point(a), Rectangle(b)) => point_rectangle(a, b),

            (Line(a), Point(b)) => point_line(b, a).swapped(),
            (Line(a), Line(b)) => a.distance_to_line(b),
            (Line(a), Ray(b)) => a.distance_to_ray(b),
            (Line(a), Segment(b)) => a.distance_to_segment(b),
            (Line(a), Triangle(b)) => a.distance_to_triangle(b),

            (Ray(a), Point(b)) => point_ray(b, a).swapped(),
            (Ray(a), Line(b)) => b.distance_to_ray(a).swapped(),
            (Ray(a), Ray(b)) => a.distance_to_ray(b),
            (Ray(a), Segment(b)) => a.distance_to_segment(b),
            (Ray(a), Triangle(b)) => a.distance_to_triangle(b),

            (Segment(a), Point(b)) => point_segment(b, a).swapped(),
            (Segment(a), Line(b)) => b.distance_to_segment(a).swapped(),
            (Segment(a), Ray(b)) => b.distance_to_segment(a).swapped(),
            (Segment(a), Segment(b)) => a.distance_to_segment(b),

            (Plane(a), Point(b)) => point_plane(b, a).swapped(),
            (Circle(a), Point(b)) => point_circle(b, a).swapped(),
            (Disk(a), Point(b)) => point_disk(b, a).swapped(),
            (Sphere(a), Point(b)) => point_sphere(b, a).swapped(),
            (Capsule(a), Point(b)) => point_capsule(b, a).swapped(),
            (Triangle(a), Point(b)) => point_triangle(b, a).swapped(),
            (Triangle(a), Line(b)) => b.distance_to_triangle(a).swapped(),
            (Triangle(a), Ray(b)) => b.distance_to_triangle(a).swapped(),
            (Rectangle(a), Point(b)) => point_rectangle(b, a).swapped(),

            _ => return None,
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, Vector3};

    #[test]
    fn dispatch_orders_results_by_operand() {
        let p = Primitive::Point(Point3::new(0.0, 2.0, 0.0));
        let seg = Primitive::Segment(Segment::new(
            Point3::origin(),
            Point3::new(4.0, 0.0, 0.0),
        ));

        let forward = p.distance_to(&seg).unwrap();
        let reverse = seg.distance_to(&p).unwrap();

        assert!((forward.distance - 2.0).abs() < 1e-12);
        assert!((forward.distance - reverse.distance).abs() < 1e-12);
        assert_eq!(forward.closest_points[0], reverse.closest_points[1]);
        assert_eq!(forward.closest_points[1], reverse.closest_points[0]);
    }

    #[test]
    fn unsupported_pair_is_none() {
        let a = Primitive::Plane(Plane::new(Vector3::z(), 0.0));
        let b = Primitive::Sphere(Sphere::new(Point3::origin(), 1.0));
        assert!(a.distance_to(&b).is_none());
    }
}
