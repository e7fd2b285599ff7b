//! Segment vs. segment query.
//!
//! Robust constrained minimization of the squared-distance quadratic
//! R(s, t) over the unit square of segment parameters (Eberly's method):
//! when the unconstrained minimum line dR/ds = 0 crosses the domain, its
//! clipped endpoints are classified against the domain edges and the
//! minimum of the directional derivative along that segment picks the
//! final parameters.

use super::QueryResult;
use crate::shape::Segment;

/// Root of the linear function `h(z) = h0 + slope * z` clamped into
/// [0, 1]. The boundary signs decide the clamp; a root pushed outside the
/// interval by floating error falls back to the midpoint.
fn clamped_root(slope: f64, h0: f64, h1: f64) -> f64 {
    if h0 < 0.0 {
        if h1 > 0.0 {
            let r = -h0 / slope;
            if r > 1.0 {
                0.5
            } else {
                r
            }
        } else {
            1.0
        }
    } else {
        0.0
    }
}

/// Coefficients of the squared-distance quadratic between two segments.
struct SegmentQuadratic {
    b: f64,
    c: f64,
    e: f64,
    f00: f64,
    f10: f64,
    g00: f64,
    g10: f64,
    g01: f64,
    g11: f64,
}

impl SegmentQuadratic {
    /// Endpoints of the intersection of dR/ds = 0 with the unit square.
    /// `edge[i]` records which domain edge `end[i]` lies on:
    /// 0 (s=0), 1 (s=1), 2 (t=0), 3 (t=1).
    fn compute_intersection(
        &self,
        s_value: [f64; 2],
        classify: [i32; 2],
    ) -> ([usize; 2], [[f64; 2]; 2]) {
        let mut edge = [0usize; 2];
        let mut end = [[0.0f64; 2]; 2];

        if classify[0] < 0 {
            edge[0] = 0;
            end[0][0] = 0.0;
            end[0][1] = self.f00 / self.b;
            if end[0][1] < 0.0 || end[0][1] > 1.0 {
                end[0][1] = 0.5;
            }

            if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = 1.0;
            } else {
                edge[1] = 1;
                end[1][0] = 1.0;
                end[1][1] = self.f10 / self.b;
                if end[1][1] < 0.0 || end[1][1] > 1.0 {
                    end[1][1] = 0.5;
                }
            }
        } else if classify[0] == 0 {
            edge[0] = 2;
            end[0][0] = s_value[0];
            end[0][1] = 0.0;

            if classify[1] < 0 {
                edge[1] = 0;
                end[1][0] = 0.0;
                end[1][1] = self.f00 / self.b;
                if end[1][1] < 0.0 || end[1][1] > 1.0 {
                    end[1][1] = 0.5;
                }
            } else if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = 1.0;
            } else {
                edge[1] = 1;
                end[1][0] = 1.0;
                end[1][1] = self.f10 / self.b;
                if end[1][1] < 0.0 || end[1][1] > 1.0 {
                    end[1][1] = 0.5;
                }
            }
        } else {
            edge[0] = 1;
            end[0][0] = 1.0;
            end[0][1] = self.f10 / self.b;
            if end[0][1] < 0.0 || end[0][1] > 1.0 {
                end[0][1] = 0.5;
            }

            if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = 1.0;
            } else {
                edge[1] = 0;
                end[1][0] = 0.0;
                end[1][1] = self.f00 / self.b;
                if end[1][1] < 0.0 || end[1][1] > 1.0 {
                    end[1][1] = 0.5;
                }
            }
        }

        (edge, end)
    }

    /// Minimum of the directional derivative of R along the clipped
    /// dR/ds = 0 segment; H(z) uses dR/dt only because dR/ds vanishes
    /// there.
    fn compute_minimum_parameters(&self, edge: [usize; 2], end: [[f64; 2]; 2]) -> [f64; 2] {
        let delta = end[1][1] - end[0][1];
        let h0 = delta * (-self.b * end[0][0] + self.c * end[0][1] - self.e);

        if h0 >= 0.0 {
            match edge[0] {
                0 => [0.0, clamped_root(self.c, self.g00, self.g01)],
                1 => [1.0, clamped_root(self.c, self.g10, self.g11)],
                _ => [end[0][0], end[0][1]],
            }
        } else {
            let h1 = delta * (-self.b * end[1][0] + self.c * end[1][1] - self.e);
            if h1 <= 0.0 {
                match edge[1] {
                    0 => [0.0, clamped_root(self.c, self.g00, self.g01)],
                    1 => [1.0, clamped_root(self.c, self.g10, self.g11)],
                    _ => [end[1][0], end[1][1]],
                }
            } else {
                let z = (h0 / (h0 - h1)).clamp(0.0, 1.0);
                let omz = 1.0 - z;
                [
                    omz * end[0][0] + z * end[1][0],
                    omz * end[0][1] + z * end[1][1],
                ]
            }
        }
    }
}

impl Segment {
    /// Closest configuration between two segments; parameters are
    /// arc-length fractions in [0, 1] on each segment. Degenerate
    /// segments reduce to the corresponding 1D quadratic (or to a
    /// point-point pair when both collapse).
    pub fn distance_to_segment(&self, other: &Segment) -> QueryResult {
        let dir0 = self.delta();
        let dir1 = other.delta();
        let diff = self.p0() - other.p0();

        let a = dir0.dot(&dir0);
        let b = dir0.dot(&dir1);
        let c = dir1.dot(&dir1);
        let d = dir0.dot(&diff);
        let e = dir1.dot(&diff);

        let f00 = d;
        let f10 = f00 + a;
        let f01 = f00 - b;
        let f11 = f10 - b;

        let g00 = -e;
        let g10 = g00 - b;
        let g01 = g00 + c;
        let g11 = g10 + c;

        let parameters: [f64; 2];
        if a > 0.0 && c > 0.0 {
            let s_value = [clamped_root(a, f00, f10), clamped_root(a, f01, f11)];
            let classify = [
                classify_parameter(s_value[0]),
                classify_parameter(s_value[1]),
            ];

            if classify == [-1, -1] {
                // Minimum on the edge s = 0.
                parameters = [0.0, clamped_root(c, g00, g01)];
            } else if classify == [1, 1] {
                // Minimum on the edge s = 1.
                parameters = [1.0, clamped_root(c, g10, g11)];
            } else {
                let quad = SegmentQuadratic {
                    b,
                    c,
                    e,
                    f00,
                    f10,
                    g00,
                    g10,
                    g01,
                    g11,
                };
                let (edge, end) = quad.compute_intersection(s_value, classify);
                parameters = quad.compute_minimum_parameters(edge, end);
            }
        } else if a > 0.0 {
            // The other segment collapses to a point.
            parameters = [clamped_root(a, f00, f10), 0.0];
        } else if c > 0.0 {
            // This segment collapses to a point.
            parameters = [0.0, clamped_root(c, g00, g01)];
        } else {
            // Both are points.
            parameters = [0.0, 0.0];
        }

        QueryResult::between(
            self.at(parameters[0]),
            other.at(parameters[1]),
            parameters[0],
            parameters[1],
        )
    }
}

fn classify_parameter(value: f64) -> i32 {
    if value <= 0.0 {
        -1
    } else if value >= 1.0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApproxEq, Point3};

    #[test]
    fn crossing_segments_touch() {
        let a = Segment::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let b = Segment::new(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        let result = a.distance_to_segment(&b);
        assert!(result.distance < 1e-12);
        assert!((result.parameters[0] - 0.5).abs() < 1e-12);
        assert!((result.parameters[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parallel_offset_segments() {
        let a = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let b = Segment::new(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let result = a.distance_to_segment(&b);
        assert!((result.distance - 1.0).abs() < 1e-12);
        assert!((result.squared_distance - 1.0).abs() < 1e-12);
        // The closest points must be a corresponding parallel pair.
        let (c0, c1) = (result.closest_points[0], result.closest_points[1]);
        assert!((c0.x - c1.x).abs() < 1e-12);
        assert!((c1.y - c0.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn skew_segments_clamped_to_endpoints() {
        let a = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let b = Segment::new(Point3::new(3.0, 1.0, 0.0), Point3::new(4.0, 2.0, 0.0));
        let result = a.distance_to_segment(&b);
        assert_eq!(result.parameters[0], 1.0);
        assert_eq!(result.parameters[1], 0.0);
        assert!((result.distance - 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_reduces_to_point_query() {
        let p = Point3::new(0.5, 2.0, 0.0);
        let a = Segment::new(p, p);
        let b = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let result = a.distance_to_segment(&b);
        assert_eq!(result.parameters[0], 0.0);
        assert!((result.distance - 2.0).abs() < 1e-12);
        assert!(result.closest_points[1].approx_eq(&Point3::new(0.5, 0.0, 0.0)));

        let both = a.distance_to_segment(&Segment::new(Point3::origin(), Point3::origin()));
        assert_eq!(both.parameters, [0.0, 0.0]);
    }

    #[test]
    fn symmetric_distances_agree() {
        let a = Segment::new(Point3::new(0.0, 0.0, 1.0), Point3::new(2.0, 1.0, 1.0));
        let b = Segment::new(Point3::new(1.0, -2.0, 0.0), Point3::new(3.0, 2.0, -1.0));
        let ab = a.distance_to_segment(&b);
        let ba = b.distance_to_segment(&a);
        assert!((ab.distance - ba.distance).abs() < 1e-9);
        assert!((ab.squared_distance - ba.squared_distance).abs() < 1e-9);
    }
}
