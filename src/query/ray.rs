//! Ray vs. ray / segment / triangle queries.

use super::line::centered_to_fraction;
use super::{point_triangle, QueryResult};
use crate::shape::{Line, Ray, Segment, Triangle};

impl Ray {
    /// Four-region minimization over the quarter-plane of ray parameters.
    pub fn distance_to_ray(&self, other: &Ray) -> QueryResult {
        let diff = self.origin() - other.origin();
        let a01 = -self.direction().dot(&other.direction());
        let b0 = diff.dot(&self.direction());

        let (mut s0, mut s1);
        if a01.abs() < 1.0 {
            let b1 = -diff.dot(&other.direction());
            s0 = a01 * b1 - b0;
            s1 = a01 * b0 - b1;

            if s0 >= 0.0 {
                if s1 >= 0.0 {
                    // Interior on both rays.
                    let det = 1.0 - a01 * a01;
                    s0 /= det;
                    s1 /= det;
                } else {
                    s1 = 0.0;
                    s0 = (-b0).max(0.0);
                }
            } else if s1 >= 0.0 {
                s0 = 0.0;
                s1 = (-b1).max(0.0);
            } else {
                // Corner: clamp whichever origin projection is usable.
                if b0 < 0.0 {
                    s0 = -b0;
                    s1 = 0.0;
                } else {
                    s0 = 0.0;
                    s1 = (-b1).max(0.0);
                }
            }
        } else {
            // Parallel rays.
            if a01 > 0.0 {
                // Opposite directions: both minima sit at an origin.
                s1 = 0.0;
                s0 = (-b0).max(0.0);
            } else if b0 >= 0.0 {
                let b1 = -diff.dot(&other.direction());
                s0 = 0.0;
                s1 = -b1;
            } else {
                s0 = -b0;
                s1 = 0.0;
            }
        }

        QueryResult::between(self.at(s0), other.at(s1), s0, s1)
    }

    /// Six-region minimization over the half-strip of (ray, segment)
    /// parameters, in the segment's centered form.
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
            s0 = a01 * b1 - b0;
            s1 = a01 * b0 - b1;

            if s0 >= 0.0 {
                if s1 >= -ext_det {
                    if s1 <= ext_det {
                        // Interior on both operands.
                        s0 /= det;
                        s1 /= det;
                    } else {
                        s1 = seg_extent;
                        s0 = (-(a01 * s1 + b0)).max(0.0);
                    }
                } else {
                    s1 = -seg_extent;
                    s0 = (-(a01 * s1 + b0)).max(0.0);
                }
            } else if s1 <= -ext_det {
                s0 = -(-a01 * seg_extent + b0);
                if s0 > 0.0 {
                    s1 = -seg_extent;
                } else {
                    s0 = 0.0;
                    s1 = (-b1).clamp(-seg_extent, seg_extent);
                }
            } else if s1 <= ext_det {
                s0 = 0.0;
                s1 = (-b1).clamp(-seg_extent, seg_extent);
            } else {
                s0 = -(a01 * seg_extent + b0);
                if s0 > 0.0 {
                    s1 = seg_extent;
                } else {
                    s0 = 0.0;
                    s1 = (-b1).clamp(-seg_extent, seg_extent);
                }
            }
        } else {
            // Parallel: pick the segment end facing the ray.
            s1 = if a01 > 0.0 { -seg_extent } else { seg_extent };
            s0 = (-(a01 * s1 + b0)).max(0.0);
        }

        let closest1 = seg_center + seg_direction * s1;
        let fraction = centered_to_fraction(s1, segment.length());
        QueryResult::between(self.at(s0), closest1, s0, fraction)
    }

    /// The line solution when its closest point lies ahead of the ray
    /// origin, else the origin against the triangle. As with the line
    /// query, `parameters[1]` is always 0 and the triangle-side position
    /// is reported through `barycentric`.
    pub fn distance_to_triangle(&self, triangle: &Triangle) -> QueryResult {
        let line = Line::new(self.origin(), self.origin() + self.direction());
        let lt = line.distance_to_triangle(triangle);

        if lt.parameters[0] >= 0.0 {
            return lt;
        }

        let origin = self.origin();
        let mut result = point_triangle(&origin, triangle);
        result.parameters = [0.0, 0.0];
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApproxEq, Point3, Vector3};

    #[test]
    fn diverging_rays_meet_at_origins() {
        let a = Ray::new(Point3::origin(), Vector3::x());
        let b = Ray::new(Point3::new(0.0, 3.0, 0.0), -Vector3::x());
        // b points away over a's start; closest pair is (origin, b origin
        // projected back).
        let result = a.distance_to_ray(&b);
        assert!((result.distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn crossing_rays_interior_minimum() {
        let a = Ray::new(Point3::origin(), Vector3::x());
        let b = Ray::new(Point3::new(2.0, -1.0, 1.0), Vector3::y());
        let result = a.distance_to_ray(&b);
        assert!((result.distance - 1.0).abs() < 1e-12);
        assert!(result.closest_points[0].approx_eq(&Point3::new(2.0, 0.0, 0.0)));
        assert!(result.closest_points[1].approx_eq(&Point3::new(2.0, 0.0, 1.0)));
    }

    #[test]
    fn ray_to_segment_behind_origin() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        let segment = Segment::new(Point3::new(-4.0, 1.0, 0.0), Point3::new(-2.0, 1.0, 0.0));
        let result = ray.distance_to_segment(&segment);
        // Everything is behind the ray; its origin wins, against the
        // nearer segment endpoint.
        assert_eq!(result.parameters[0], 0.0);
        assert!(result.closest_points[1].approx_eq(&Point3::new(-2.0, 1.0, 0.0)));
        assert!((result.distance - 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn ray_to_segment_interior() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        let segment = Segment::new(Point3::new(2.0, -1.0, 2.0), Point3::new(2.0, 1.0, 2.0));
        let result = ray.distance_to_segment(&segment);
        assert!((result.distance - 2.0).abs() < 1e-12);
        assert!((result.parameters[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ray_away_from_triangle_uses_origin() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
        );
        let ray = Ray::new(Point3::new(0.2, 0.2, 1.0), Vector3::z());
        let result = ray.distance_to_triangle(&tri);
        assert_eq!(result.parameters[0], 0.0);
        assert!((result.distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn ray_hitting_triangle_is_zero() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
        );
        let ray = Ray::new(Point3::new(0.2, 0.2, 1.0), -Vector3::z());
        let result = ray.distance_to_triangle(&tri);
        assert_eq!(result.distance, 0.0);
        assert!((result.parameters[0] - 2.0).abs() < 1e-9);
    }
}
