use super::Orientation;
use crate::{Point3, Vector3, G_PRECISION};
use serde::{Deserialize, Serialize};

/// A bounded line segment between two endpoints.
///
/// Center, direction and length are derived at construction. A zero-length
/// segment has a zero direction vector; queries treat it as a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    p0: Point3,
    p1: Point3,
    center: Point3,
    direction: Vector3,
    length: f64,
    length_squared: f64,
}

impl Segment {
    pub fn new(p0: Point3, p1: Point3) -> Self {
        let delta = p1 - p0;
        let length_squared = delta.norm_squared();
        let length = length_squared.sqrt();
        let direction = if length > 0.0 {
            delta / length
        } else {
            Vector3::zeros()
        };
        Self {
            p0,
            p1,
            center: p0 + delta * 0.5,
            direction,
            length,
            length_squared,
        }
    }

    pub fn p0(&self) -> Point3 {
        self.p0
    }

    pub fn p1(&self) -> Point3 {
        self.p1
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Unit direction from `p0` to `p1`; zero for a degenerate segment.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn length_squared(&self) -> f64 {
        self.length_squared
    }

    /// Unnormalized `p1 - p0`.
    pub fn delta(&self) -> Vector3 {
        self.p1 - self.p0
    }

    /// Point at arc-length fraction `t` (0 at `p0`, 1 at `p1`).
    pub fn at(&self, t: f64) -> Point3 {
        self.p0 + self.delta() * t
    }

    pub fn reversed(&self) -> Segment {
        Segment::new(self.p1, self.p0)
    }

    /// Side of the segment's supporting line a point falls on, seen from
    /// `normal`. `Common` when the point lies on the line within tolerance.
    pub fn orientation_point(&self, point: &Point3, normal: &Vector3) -> Orientation {
        let diff = point - self.p0;
        let perp = diff - self.direction * self.direction.dot(&diff);
        if perp.norm() < G_PRECISION {
            return Orientation::Common;
        }
        let binormal = self.direction.cross(normal);
        if diff.dot(&binormal) > 0.0 {
            Orientation::Positive
        } else {
            Orientation::Negative
        }
    }

    /// Classification of another segment against this one's supporting
    /// line: the bitwise OR of the endpoint classifications.
    pub fn orientation_segment(&self, other: &Segment, normal: &Vector3) -> Orientation {
        self.orientation_point(&other.p0, normal) | self.orientation_point(&other.p1, normal)
    }
}
