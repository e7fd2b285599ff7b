use super::Segment;
use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A triangle with three ordered vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl Triangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn points(&self) -> [Point3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Unit normal of the vertex winding; zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3 {
        let n = (self.p1 - self.p0).cross(&(self.p2 - self.p0));
        let norm = n.norm();
        if norm > 0.0 {
            n / norm
        } else {
            Vector3::zeros()
        }
    }

    pub fn area(&self) -> f64 {
        (self.p1 - self.p0).cross(&(self.p2 - self.p0)).norm() * 0.5
    }

    /// Edge opposite the winding: 0 -> p0p1, 1 -> p1p2, 2 -> p2p0.
    pub fn edge(&self, index: usize) -> Segment {
        let pts = self.points();
        Segment::new(pts[index % 3], pts[(index + 1) % 3])
    }

    /// Point at barycentric coordinates (b0, b1, b2).
    pub fn barycentric_point(&self, b: &[f64; 3]) -> Point3 {
        Point3::from(self.p0.coords * b[0] + self.p1.coords * b[1] + self.p2.coords * b[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApproxEq;

    #[test]
    fn area_and_normal() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert!((t.area() - 6.0).abs() < 1e-12);
        assert!(t.normal().approx_eq(&Vector3::z()));
    }

    #[test]
    fn barycentric_point_interpolates() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        let centroid = t.barycentric_point(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
        assert!(centroid.approx_eq(&Point3::new(2.0 / 3.0, 2.0 / 3.0, 0.0)));
    }
}
