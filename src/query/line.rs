//! Line vs. line / ray / segment / triangle queries.
//!
//! The line-line family minimizes the bilinear form of the squared
//! distance between two parametrized lines. With unit directions the
//! cross coefficient `a01 = -d0 . d1` satisfies `|a01| <= 1`, so
//! `|a01| < 1` is the non-parallel test; the parallel branches pick a
//! deterministic representative pair.

use super::{point_triangle, QueryResult};
use crate::shape::{Line, Ray, Segment, Triangle};
use crate::{Vector3, G_PRECISION};

/// Two unit vectors completing `d` (assumed unit) to an orthonormal basis.
pub(crate) fn orthonormal_complement(d: &Vector3) -> (Vector3, Vector3) {
    let u = if d.x.abs() > d.y.abs() {
        Vector3::new(-d.z, 0.0, d.x)
    } else {
        Vector3::new(0.0, d.z, -d.y)
    };
    let u = u.normalize();
    let v = d.cross(&u).normalize();
    (u, v)
}

impl Line {
    pub fn distance_to_line(&self, other: &Line) -> QueryResult {
        let diff = self.origin() - other.origin();
        let a01 = -self.direction().dot(&other.direction());
        let b0 = diff.dot(&self.direction());

        let (s0, s1);
        if a01.abs() < 1.0 {
            let det = 1.0 - a01 * a01;
            let b1 = -diff.dot(&other.direction());
            s0 = (a01 * b1 - b0) / det;
            s1 = (a01 * b0 - b1) / det;
        } else {
            // Parallel: fix the other line at its origin.
            s0 = -b0;
            s1 = 0.0;
        }

        QueryResult::between(self.at(s0), other.at(s1), s0, s1)
    }

    pub fn distance_to_ray(&self, ray: &Ray) -> QueryResult {
        let diff = self.origin() - ray.origin();
        let a01 = -self.direction().dot(&ray.direction());
        let b0 = diff.dot(&self.direction());

        let (mut s0, mut s1);
        if a01.abs() < 1.0 {
            let b1 = -diff.dot(&ray.direction());
            s1 = a01 * b0 - b1;
            if s1 >= 0.0 {
                // Interior minimum: same as line-line.
                let det = 1.0 - a01 * a01;
                s0 = (a01 * b1 - b0) / det;
                s1 /= det;
            } else {
                // The ray origin is the closest point on the ray.
                s0 = -b0;
                s1 = 0.0;
            }
        } else {
            s0 = -b0;
            s1 = 0.0;
        }

        QueryResult::between(self.at(s0), ray.at(s1), s0, s1)
    }

    pub fn distance_to_segment(&self, segment: &Segment) -> QueryResult {
        let seg_center = segment.center();
        let seg_direction = segment.direction();
        let seg_extent = segment.length() * 0.5;

        let diff = self.origin() - seg_center;
        let a01 = -self.direction().dot(&seg_direction);
        let b0 = diff.dot(&self.direction());

        let (mut s0, mut s1);
        if a01.abs() < 1.0 {
            let det = 1.0 - a01 * a01;
            let ext_det = seg_extent * det;
            let b1 = -diff.dot(&seg_direction);
            s1 = a01 * b0 - b1;

            if s1 >= -ext_det {
                if s1 <= ext_det {
                    // Interior minimum on both operands.
                    s0 = (a01 * b1 - b0) / det;
                    s1 /= det;
                } else {
                    s1 = seg_extent;
                    s0 = -(a01 * s1 + b0);
                }
            } else {
                s1 = -seg_extent;
                s0 = -(a01 * s1 + b0);
            }
        } else {
            // Parallel: pin the closest pair at the segment center.
            s1 = 0.0;
            s0 = -b0;
        }

        let closest1 = seg_center + seg_direction * s1;
        let fraction = centered_to_fraction(s1, segment.length());
        QueryResult::between(self.at(s0), closest1, s0, fraction)
    }

    /// Zero distance when the line pierces the triangle; otherwise the
    /// minimum over the three edges treated as segments.
    ///
    /// The triangle operand has no scalar parametrization: `parameters[1]`
    /// is 0 in every branch and the closest point's position on the
    /// triangle is reported through `barycentric`.
    pub fn distance_to_triangle(&self, triangle: &Triangle) -> QueryResult {
        let edge0 = triangle.p1 - triangle.p0;
        let edge1 = triangle.p2 - triangle.p0;
        let normal = edge0
            .cross(&edge1)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);
        let n_dot_d = normal.dot(&self.direction());

        if n_dot_d.abs() >= G_PRECISION {
            // Not parallel: solve for the plane intersection in a basis
            // orthogonal to the line direction.
            let diff = self.origin() - triangle.p0;
            let (u, v) = orthonormal_complement(&self.direction());
            let ud_e0 = u.dot(&edge0);
            let ud_e1 = u.dot(&edge1);
            let ud_diff = u.dot(&diff);
            let vd_e0 = v.dot(&edge0);
            let vd_e1 = v.dot(&edge1);
            let vd_diff = v.dot(&diff);
            let det = ud_e0 * vd_e1 - ud_e1 * vd_e0;

            if det.abs() > 0.0 {
                let inv_det = 1.0 / det;
                let b1 = (vd_e1 * ud_diff - ud_e1 * vd_diff) * inv_det;
                let b2 = (ud_e0 * vd_diff - vd_e0 * ud_diff) * inv_det;
                let b0 = 1.0 - b1 - b2;

                if b0 >= 0.0 && b1 >= 0.0 && b2 >= 0.0 {
                    let d = self.direction();
                    let t = b1 * d.dot(&edge0) + b2 * d.dot(&edge1) - d.dot(&diff);
                    let closest1 = triangle.p0 + edge0 * b1 + edge1 * b2;
                    let mut result = QueryResult::between(self.at(t), closest1, t, 0.0);
                    result.squared_distance = 0.0;
                    result.distance = 0.0;
                    result.barycentric = Some([b0, b1, b2]);
                    return result;
                }
            }
        }

        // The closest triangle point lies on an edge; compare all three.
        let mut best: Option<QueryResult> = None;
        for i0 in 0..3 {
            let i1 = (i0 + 1) % 3;
            let edge = triangle.edge(i0);
            let candidate = self.distance_to_segment(&edge);
            if best
                .as_ref()
                .map_or(true, |b| candidate.squared_distance < b.squared_distance)
            {
                let fraction = candidate.parameters[1];
                let mut barycentric = [0.0; 3];
                barycentric[i0] = 1.0 - fraction;
                barycentric[i1] = fraction;
                let mut result = candidate;
                result.parameters[1] = 0.0;
                result.barycentric = Some(barycentric);
                best = Some(result);
            }
        }
        best.expect("triangle has three edges")
    }
}

/// Converts a centered segment parameter in [-length/2, length/2] to an
/// arc-length fraction in [0, 1]; 0 for a degenerate segment.
pub(crate) fn centered_to_fraction(s: f64, length: f64) -> f64 {
    if length > 0.0 {
        (0.5 + s / length).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApproxEq, Point3};

    #[test]
    fn skew_lines() {
        // X axis and a line parallel to Y shifted by (0, 0, 2).
        let a = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let b = Line::new(Point3::new(3.0, 0.0, 2.0), Point3::new(3.0, 1.0, 2.0));
        let result = a.distance_to_line(&b);
        assert!((result.distance - 2.0).abs() < 1e-12);
        assert!((result.parameters[0] - 3.0).abs() < 1e-12);
        assert!(result.closest_points[0].approx_eq(&Point3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn parallel_lines_pick_origin() {
        let a = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let b = Line::new(Point3::new(5.0, 3.0, 0.0), Point3::new(9.0, 3.0, 0.0));
        let result = a.distance_to_line(&b);
        assert!((result.distance - 3.0).abs() < 1e-12);
        assert_eq!(result.parameters[1], 0.0);
    }

    #[test]
    fn line_to_ray_behind_origin() {
        let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        // Ray pointing away; its origin is the closest point.
        let ray = Ray::new(Point3::new(2.0, 3.0, 0.0), Vector3::y());
        let result = line.distance_to_ray(&ray);
        assert!((result.distance - 3.0).abs() < 1e-12);
        assert_eq!(result.parameters[1], 0.0);
        assert!(result.closest_points[0].approx_eq(&Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn line_to_segment_clamps_to_endpoint() {
        let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let segment = Segment::new(Point3::new(4.0, 2.0, 0.0), Point3::new(6.0, 5.0, 0.0));
        let result = line.distance_to_segment(&segment);
        assert!((result.distance - 2.0).abs() < 1e-12);
        assert_eq!(result.parameters[1], 0.0);
        assert!(result.closest_points[1].approx_eq(&Point3::new(4.0, 2.0, 0.0)));
    }

    #[test]
    fn line_through_triangle_is_zero() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(0.0, 4.0, 1.0),
        );
        let line = Line::new(Point3::new(1.0, 1.0, -5.0), Point3::new(1.0, 1.0, 5.0));
        let result = line.distance_to_triangle(&tri);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.parameters[1], 0.0);
        let b = result.barycentric.unwrap();
        assert!((b[0] + b[1] + b[2] - 1.0).abs() < 1e-9);
        assert!(result.closest_points[1].approx_eq(&Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn line_missing_triangle_uses_edges() {
        let tri = Triangle::new(
            Point3::origin(),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        // Vertical line well outside the triangle, closest to vertex p1.
        let line = Line::new(Point3::new(5.0, 0.0, -1.0), Point3::new(5.0, 0.0, 1.0));
        let result = line.distance_to_triangle(&tri);
        assert!((result.distance - 3.0).abs() < 1e-9);
        // Same contract as the pierce branch: position via barycentric only.
        assert_eq!(result.parameters[1], 0.0);
        let b = result.barycentric.unwrap();
        assert!((b.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
