use super::{Orientation, Segment};
use crate::{Point3, Vector3, G_PRECISION};
use serde::{Deserialize, Serialize};

/// An infinite line through `origin` toward `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    origin: Point3,
    end: Point3,
    direction: Vector3,
}

impl Line {
    pub fn new(origin: Point3, end: Point3) -> Self {
        let delta = end - origin;
        let norm = delta.norm();
        let direction = if norm > 0.0 { delta / norm } else { Vector3::zeros() };
        Self {
            origin,
            end,
            direction,
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Unit direction; zero when the two defining points coincide.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Point at signed parameter `t` (arc length from the origin).
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Side of the line a point falls on, seen from `normal`.
    /// `Common` when the point lies on the line within tolerance.
    pub fn orientation_point(&self, point: &Point3, normal: &Vector3) -> Orientation {
        let diff = point - self.origin;
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

    /// Bitwise OR of the endpoint classifications of `segment`.
    pub fn orientation_segment(&self, segment: &Segment, normal: &Vector3) -> Orientation {
        self.orientation_point(&segment.p0(), normal) | self.orientation_point(&segment.p1(), normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApproxEq;

    #[test]
    fn at_walks_along_unit_direction() {
        let l = Line::new(Point3::origin(), Point3::new(0.0, 2.0, 0.0));
        assert!(l.at(3.0).approx_eq(&Point3::new(0.0, 3.0, 0.0)));
        assert!(l.at(-1.0).approx_eq(&Point3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn orientation_splits_the_plane() {
        let l = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let up = Vector3::z();
        assert_eq!(
            l.orientation_point(&Point3::new(0.0, -2.0, 0.0), &up),
            Orientation::Positive
        );
        assert_eq!(
            l.orientation_point(&Point3::new(0.0, 2.0, 0.0), &up),
            Orientation::Negative
        );
        assert_eq!(
            l.orientation_point(&Point3::new(-5.0, 0.0, 0.0), &up),
            Orientation::Common
        );
    }
}
