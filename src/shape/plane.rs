use super::{Orientation, Segment};
use crate::{Point3, Vector3, G_PRECISION};
use serde::{Deserialize, Serialize};

/// An oriented plane `normal . p = w` with unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vector3,
    w: f64,
}

impl Plane {
    pub fn new(normal: Vector3, w: f64) -> Self {
        let norm = normal.norm();
        let normal = if norm > 0.0 { normal / norm } else { Vector3::z() };
        Self { normal, w }
    }

    pub fn from_point_and_normal(point: Point3, normal: Vector3) -> Self {
        let norm = normal.norm();
        let normal = if norm > 0.0 { normal / norm } else { Vector3::z() };
        Self {
            normal,
            w: normal.dot(&point.coords),
        }
    }

    pub fn from_three_points(p0: Point3, p1: Point3, p2: Point3) -> Self {
        let normal = (p1 - p0).cross(&(p2 - p0));
        Self::from_point_and_normal(p0, normal)
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    /// The projection of the world origin onto the plane.
    pub fn origin(&self) -> Point3 {
        Point3::from(self.normal * self.w)
    }

    pub fn negated(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance; positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.w
    }

    pub fn project_point(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    pub fn contains_point(&self, point: &Point3) -> bool {
        self.signed_distance(point).abs() < G_PRECISION
    }

    /// `Intersect` iff the absolute signed distance is below tolerance.
    pub fn orientation_point(&self, point: &Point3) -> Orientation {
        let signed = self.signed_distance(point);
        if signed.abs() < G_PRECISION {
            Orientation::Intersect
        } else if signed > 0.0 {
            Orientation::Positive
        } else {
            Orientation::Negative
        }
    }

    /// Bitwise OR of the endpoint classifications: `Intersect` when the
    /// endpoints straddle the plane or either lies on it.
    pub fn orientation_segment(&self, segment: &Segment) -> Orientation {
        self.orientation_point(&segment.p0()) | self.orientation_point(&segment.p1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApproxEq;

    #[test]
    fn signed_distance_and_projection() {
        let plane = Plane::new(Vector3::z(), 1.0);
        let p = Point3::new(2.0, 3.0, 4.0);
        assert!((plane.signed_distance(&p) - 3.0).abs() < 1e-12);
        assert!(plane.project_point(&p).approx_eq(&Point3::new(2.0, 3.0, 1.0)));
        assert!(plane.contains_point(&Point3::new(-7.0, 0.5, 1.0)));
    }

    #[test]
    fn from_three_points_recovers_plane() {
        let plane = Plane::from_three_points(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        );
        assert!(plane.normal().approx_eq(&Vector3::z()));
        assert!((plane.w() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn segment_classification_uses_bit_or() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let above = Segment::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 2.0));
        let crossing = Segment::new(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(plane.orientation_segment(&above), Orientation::Positive);
        assert_eq!(plane.orientation_segment(&crossing), Orientation::Intersect);
    }
}
