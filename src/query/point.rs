//! Point vs. primitive closest-point queries.
//!
//! All functions order results as (point, primitive). The case analyses
//! follow the classic Geometric Tools treatments; every division is
//! preceded by a degeneracy guard with a deterministic fallback.

use super::QueryResult;
use crate::shape::{
    Capsule, Circle, Disk, Line, Plane, Polyline, Ray, Rectangle, Segment, Sphere, Triangle,
};
use crate::{Point3, Vector3, G_PRECISION};

pub fn point_point(p: &Point3, q: &Point3) -> QueryResult {
    QueryResult::between(*p, *q, 0.0, 0.0)
}

/// Signed projection onto the line direction.
pub fn point_line(p: &Point3, line: &Line) -> QueryResult {
    let diff = p - line.origin();
    let t = line.direction().dot(&diff);
    QueryResult::between(*p, line.at(t), 0.0, t)
}

/// Projection clamped to the ray half-line; the parameter never goes
/// negative.
pub fn point_ray(p: &Point3, ray: &Ray) -> QueryResult {
    let diff = p - ray.origin();
    let t = ray.direction().dot(&diff).max(0.0);
    QueryResult::between(*p, ray.at(t), 0.0, t)
}

/// Projection clamped to [0, 1] as an arc-length fraction. A zero-length
/// segment forces the parameter to 0 and the single endpoint.
pub fn point_segment(p: &Point3, segment: &Segment) -> QueryResult {
    let length_squared = segment.length_squared();
    if length_squared <= 0.0 {
        return QueryResult::between(*p, segment.p0(), 0.0, 0.0);
    }

    let delta = segment.delta();

    let t = delta.dot(&(p - segment.p1()));
    if t >= 0.0 {
        return QueryResult::between(*p, segment.p1(), 0.0, 1.0);
    }

    let t = delta.dot(&(p - segment.p0()));
    if t <= 0.0 {
        return QueryResult::between(*p, segment.p0(), 0.0, 0.0);
    }

    let t = t / length_squared;
    QueryResult::between(*p, segment.at(t), 0.0, t)
}

/// Distance to the plane, with the signed distance reported.
pub fn point_plane(p: &Point3, plane: &Plane) -> QueryResult {
    let signed = plane.signed_distance(p);
    let closest = p - plane.normal() * signed;
    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.signed_distance = Some(signed);
    result
}

/// Projects onto the circle plane, then radially onto the rim. A point on
/// the circle axis is equidistant from the whole rim; the reported closest
/// point is then an arbitrary deterministic pick built from an offset
/// probe.
pub fn point_circle(p: &Point3, circle: &Circle) -> QueryResult {
    let normal = circle.normal();
    let pmc = p - circle.center();
    let qmc = pmc - normal * normal.dot(&pmc);
    let length = qmc.norm();

    if length > G_PRECISION {
        let closest = circle.center() + qmc * (circle.radius() / length);
        return QueryResult::between(*p, closest, 0.0, 0.0);
    }

    // On-axis: manufacture a stable rim direction from an offset probe.
    let probe = Vector3::new(10.0, 10.0, 10.0);
    let mut dir = probe - normal * normal.dot(&probe);
    if dir.norm() < G_PRECISION {
        // Probe parallel to the axis; fall back to coordinate probes.
        dir = Vector3::x() - normal * normal.x;
        if dir.norm() < G_PRECISION {
            dir = Vector3::y() - normal * normal.y;
        }
    }
    let closest = circle.center() + dir.normalize() * circle.radius();
    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.is_equidistant = true;
    result
}

/// Like the circle query, but interior projections stop at the disk plane
/// instead of continuing to the rim.
pub fn point_disk(p: &Point3, disk: &Disk) -> QueryResult {
    let normal = disk.normal();
    let pmc = p - disk.center();
    let qmc = pmc - normal * normal.dot(&pmc);
    let length = qmc.norm();
    let signed = normal.dot(&p.coords) - disk.w();

    let closest = if length > disk.radius() {
        disk.center() + qmc * (disk.radius() / length)
    } else {
        p - normal * signed
    };

    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.signed_distance = Some(signed);
    result
}

/// Center-offset query: `distance` is negative inside the sphere and the
/// `interior` flag is set. A point at the exact center is equidistant from
/// the whole surface.
pub fn point_sphere(p: &Point3, sphere: &Sphere) -> QueryResult {
    let diff = p - sphere.center;
    let center_distance = diff.norm();

    let (dir, equidistant) = if center_distance > G_PRECISION {
        (diff / center_distance, false)
    } else {
        (Vector3::x(), true)
    };

    let distance = center_distance - sphere.radius;
    let closest = sphere.center + dir * sphere.radius;
    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.distance = distance;
    result.squared_distance = distance * distance;
    result.is_equidistant = equidistant;
    result.interior = distance < 0.0;
    result
}

/// Delegates to the spine segment and subtracts the radius; a negative
/// `distance` signals an interior point.
pub fn point_capsule(p: &Point3, capsule: &Capsule) -> QueryResult {
    let spine = point_segment(p, capsule.segment());
    let spine_closest = spine.closest_points[1];

    let offset = p - spine_closest;
    let dir = if offset.norm() > G_PRECISION {
        offset.normalize()
    } else {
        // On the spine: any unit vector perpendicular to it works, pick a
        // deterministic one.
        perpendicular_of(&capsule.segment().direction())
    };

    let distance = spine.distance - capsule.radius();
    let closest = spine_closest + dir * capsule.radius();
    let mut result = QueryResult::between(*p, closest, 0.0, spine.parameters[1]);
    result.distance = distance;
    result.squared_distance = distance * distance;
    result.interior = distance < 0.0;
    result
}

fn perpendicular_of(direction: &Vector3) -> Vector3 {
    if direction.norm_squared() <= 0.0 {
        return Vector3::x();
    }
    let u = if direction.x.abs() > direction.y.abs() {
        Vector3::new(-direction.z, 0.0, direction.x)
    } else {
        Vector3::new(0.0, direction.z, -direction.y)
    };
    u.normalize()
}

/// Quadratic minimization over the barycentric domain
/// `{(s, t): s >= 0, t >= 0, s + t <= 1}`; the seven region cases place
/// the unconstrained minimum relative to the domain triangle.
pub fn point_triangle(p: &Point3, triangle: &Triangle) -> QueryResult {
    let diff = p - triangle.p0;
    let edge0 = triangle.p1 - triangle.p0;
    let edge1 = triangle.p2 - triangle.p0;
    let a00 = edge0.dot(&edge0);
    let a01 = edge0.dot(&edge1);
    let a11 = edge1.dot(&edge1);
    let b0 = -diff.dot(&edge0);
    let b1 = -diff.dot(&edge1);
    let f00 = b0;
    let f10 = b0 + a00;
    let f01 = b0 + a01;

    let min_edge02 = |a11: f64, b1: f64| -> [f64; 2] {
        let t = if b1 >= 0.0 {
            0.0
        } else if a11 + b1 <= 0.0 {
            1.0
        } else {
            -b1 / a11
        };
        [0.0, t]
    };

    let min_edge12 = |a01: f64, a11: f64, b1: f64, f10: f64, f01: f64| -> [f64; 2] {
        let h0 = a01 + b1 - f10;
        let t = if h0 >= 0.0 {
            0.0
        } else {
            let h1 = a11 + b1 - f01;
            if h1 <= 0.0 {
                1.0
            } else {
                h0 / (h0 - h1)
            }
        };
        [1.0 - t, t]
    };

    let min_interior = |p0: [f64; 2], h0: f64, p1: [f64; 2], h1: f64| -> [f64; 2] {
        let z = h0 / (h0 - h1);
        [
            (1.0 - z) * p0[0] + z * p1[0],
            (1.0 - z) * p0[1] + z * p1[1],
        ]
    };

    let p_min: [f64; 2];
    if f00 >= 0.0 {
        if f01 >= 0.0 {
            p_min = min_edge02(a11, b1);
        } else {
            let p0 = [0.0, f00 / (f00 - f01)];
            let t01 = f01 / (f01 - f10);
            let p1 = [t01, 1.0 - t01];
            let dt1 = p1[1] - p0[1];
            let h0 = dt1 * (a11 * p0[1] + b1);
            if h0 >= 0.0 {
                p_min = min_edge02(a11, b1);
            } else {
                let h1 = dt1 * (a01 * p1[0] + a11 * p1[1] + b1);
                if h1 <= 0.0 {
                    p_min = min_edge12(a01, a11, b1, f10, f01);
                } else {
                    p_min = min_interior(p0, h0, p1, h1);
                }
            }
        }
    } else if f01 <= 0.0 {
        if f10 <= 0.0 {
            p_min = min_edge12(a01, a11, b1, f10, f01);
        } else {
            let p0 = [f00 / (f00 - f10), 0.0];
            let t01 = f01 / (f01 - f10);
            let p1 = [t01, 1.0 - t01];
            let h0 = p1[1] * (a01 * p0[0] + b1);
            if h0 >= 0.0 {
                p_min = p0; // minimum on edge t = 0
            } else {
                let h1 = p1[1] * (a01 * p1[0] + a11 * p1[1] + b1);
                if h1 <= 0.0 {
                    p_min = min_edge12(a01, a11, b1, f10, f01);
                } else {
                    p_min = min_interior(p0, h0, p1, h1);
                }
            }
        }
    } else if f10 <= 0.0 {
        let p0 = [0.0, f00 / (f00 - f01)];
        let t01 = f01 / (f01 - f10);
        let p1 = [t01, 1.0 - t01];
        let dt1 = p1[1] - p0[1];
        let h0 = dt1 * (a11 * p0[1] + b1);
        if h0 >= 0.0 {
            p_min = min_edge02(a11, b1);
        } else {
            let h1 = dt1 * (a01 * p1[0] + a11 * p1[1] + b1);
            if h1 <= 0.0 {
                p_min = min_edge12(a01, a11, b1, f10, f01);
            } else {
                p_min = min_interior(p0, h0, p1, h1);
            }
        }
    } else {
        let p0 = [f00 / (f00 - f10), 0.0];
        let p1 = [0.0, f00 / (f00 - f01)];
        let h0 = p1[1] * (a01 * p0[0] + b1);
        if h0 >= 0.0 {
            p_min = p0; // minimum on edge t = 0
        } else {
            let h1 = p1[1] * (a11 * p1[1] + b1);
            if h1 <= 0.0 {
                p_min = min_edge02(a11, b1);
            } else {
                p_min = min_interior(p0, h0, p1, h1);
            }
        }
    }

    let barycentric = [1.0 - p_min[0] - p_min[1], p_min[0], p_min[1]];
    let closest = triangle.p0 + edge0 * p_min[0] + edge1 * p_min[1];
    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.barycentric = Some(barycentric);
    result
}

/// Clamps the point's axis coordinates to the rectangle extents.
pub fn point_rectangle(p: &Point3, rectangle: &Rectangle) -> QueryResult {
    let diff = rectangle.center() - p;
    let b0 = diff.dot(&rectangle.axis(0));
    let b1 = diff.dot(&rectangle.axis(1));
    let s0 = (-b0).clamp(-rectangle.extent(0), rectangle.extent(0));
    let s1 = (-b1).clamp(-rectangle.extent(1), rectangle.extent(1));

    let mut squared = diff.dot(&diff);
    squared += s0 * (s0 + 2.0 * b0);
    squared += s1 * (s1 + 2.0 * b1);
    // Numerical round-off can push the accumulated form slightly negative.
    squared = squared.max(0.0);

    let closest = rectangle.at(s0, s1);
    let mut result = QueryResult::between(*p, closest, 0.0, 0.0);
    result.squared_distance = squared;
    result.distance = squared.sqrt();
    result.rectangle_parameters = Some([s0, s1]);
    result
}

/// Scans the polyline's segments, skipping any whose bounding coordinates
/// already exceed the best distance found. `None` for an empty polyline;
/// a single-vertex polyline degrades to a point query.
pub fn point_polyline(p: &Point3, polyline: &Polyline) -> Option<QueryResult> {
    let points = polyline.points();
    match points.len() {
        0 => return None,
        1 => {
            let mut result = point_point(p, &points[0]);
            result.segment_index = Some(0);
            return Some(result);
        }
        _ => {}
    }

    let mut best: Option<QueryResult> = None;
    let mut best_distance = f64::INFINITY;
    let mut best_index = 0;

    for i in 0..points.len() - 1 {
        let a = points[i];
        let b = points[i + 1];

        // Reject segments that cannot beat the current best on any axis.
        let reject = |ca: f64, cb: f64, cp: f64| {
            (ca - cp).abs() > best_distance
                && (cb - cp).abs() > best_distance
                && (ca - cp) * (cb - cp) > 0.0
        };
        if reject(a.x, b.x, p.x) || reject(a.y, b.y, p.y) || reject(a.z, b.z, p.z) {
            continue;
        }

        let candidate = point_segment(p, &Segment::new(a, b));
        if candidate.distance < best_distance {
            best_distance = candidate.distance;
            best_index = i;
            best = Some(candidate);
        }
    }

    best.map(|mut result| {
        result.segment_index = Some(best_index);
        result
    })
}

impl Segment {
    /// [`point_segment`] with the ordering (segment, point).
    pub fn distance_to_point(&self, p: &Point3) -> QueryResult {
        point_segment(p, self).swapped()
    }
}

impl Line {
    /// [`point_line`] with the ordering (line, point).
    pub fn distance_to_point(&self, p: &Point3) -> QueryResult {
        point_line(p, self).swapped()
    }
}

impl Ray {
    /// [`point_ray`] with the ordering (ray, point).
    pub fn distance_to_point(&self, p: &Point3) -> QueryResult {
        point_ray(p, self).swapped()
    }
}

impl Plane {
    /// [`point_plane`] with the ordering (plane, point).
    pub fn distance_to_point(&self, p: &Point3) -> QueryResult {
        point_plane(p, self).swapped()
    }
}

impl Triangle {
    /// [`point_triangle`] with the ordering (triangle, point).
    pub fn distance_to_point(&self, p: &Point3) -> QueryResult {
        point_triangle(p, self).swapped()
    }
}
