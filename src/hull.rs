//! Planar convex hull by divide and conquer (quickhull).
//!
//! The input is a coplanar (or nearly coplanar) 3D point set. The hull
//! plane is either given through [`HullOptions`] or detected with
//! [`fit_plane`]; the points are rotated onto the XY plane and the hull is
//! built there by recursive partitioning: the x-extreme points form a
//! baseline whose two sides are refined independently, each step keeping
//! only the points strictly outside the current edge and recursing around
//! the farthest of them.

use crate::error::GeometryError;
use crate::query::point_line;
use crate::shape::{Line, Orientation, Plane};
use crate::triangulate::rotation_to_z;
use crate::{Point3, Vector3, G_PRECISION};

/// Options for [`convex_hull`].
#[derive(Debug, Clone, Default)]
pub struct HullOptions {
    /// Normal of the plane the points lie in; detected from the data when
    /// absent.
    pub plane_normal: Option<Vector3>,
}

/// Plane through a coplanar point set.
///
/// The two lexicographic extremes form a baseline, the point farthest
/// from it supplies the third defining point. `None` when the set is
/// (near-)collinear or any point is off the plane by more than the
/// tolerance.
pub fn fit_plane(points: &[Point3]) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| lexicographic(&points[a], &points[b]));
    let first = points[order[0]];
    let last = points[order[order.len() - 1]];

    let baseline = Line::new(first, last);
    let mut max_distance = f64::NEG_INFINITY;
    let mut apex = None;
    for &i in &order[1..order.len() - 1] {
        let distance = point_line(&points[i], &baseline).distance;
        if distance > max_distance {
            max_distance = distance;
            apex = Some(i);
        }
    }
    let apex = apex.filter(|_| max_distance >= G_PRECISION)?;

    let plane = Plane::from_three_points(first, last, points[apex]);
    if points.iter().all(|p| plane.contains_point(p)) {
        Some(plane)
    } else {
        None
    }
}

/// Convex hull of a planar point set.
///
/// Returns indices into `points`, in counter-clockwise order when seen
/// from the hull plane's normal: a caller-supplied normal is honored
/// as given, a detected one is canonicalized toward +Z. Duplicate
/// extremes of collinear input collapse to a two-index "hull". Fewer
/// than 3 points is a contract error, and pathological recursion (which
/// a correct partition cannot produce) aborts with
/// [`GeometryError::RecursionLimit`].
pub fn convex_hull(points: &[Point3], options: &HullOptions) -> Result<Vec<usize>, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints(points.len()));
    }

    let normal = match options.plane_normal {
        Some(n) => n.try_normalize(0.0).unwrap_or_else(Vector3::z),
        None => {
            let mut normal = fit_plane(points)
                .map(|p| p.normal())
                .unwrap_or_else(Vector3::z);
            // A detected plane has no preferred side; pick the upward one
            // so the output frame is deterministic.
            if normal.dot(&Vector3::z()) < 0.0 {
                normal = -normal;
            }
            normal
        }
    };

    let rotation =
        (normal.dot(&Vector3::z()) < 1.0 - G_PRECISION).then(|| rotation_to_z(&normal));
    let flat: Vec<Point3> = points
        .iter()
        .map(|p| {
            let q = match &rotation {
                Some(r) => r * p,
                None => *p,
            };
            Point3::new(q.x, q.y, 0.0)
        })
        .collect();

    let mut min_i = 0;
    let mut max_i = 0;
    for i in 1..flat.len() {
        if lexicographic(&flat[i], &flat[min_i]).is_lt() {
            min_i = i;
        }
        if lexicographic(&flat[i], &flat[max_i]).is_gt() {
            max_i = i;
        }
    }

    let depth_limit = 2 * (flat.len() as f64).log2().ceil() as usize + 16;
    let mut builder = HullBuilder {
        points: &flat,
        hull: Vec::new(),
        depth_limit,
    };

    let candidates: Vec<usize> = (0..flat.len()).collect();
    builder.add_bound_seg(min_i, max_i, &candidates, 0)?;
    builder.add_bound_seg(max_i, min_i, &candidates, 0)?;

    Ok(builder.hull)
}

struct HullBuilder<'a> {
    points: &'a [Point3],
    hull: Vec<usize>,
    depth_limit: usize,
}

impl HullBuilder<'_> {
    /// Refines one hull edge: points on its outer side are partitioned
    /// around the farthest one; an empty outer side makes the edge origin
    /// a hull vertex.
    fn add_bound_seg(
        &mut self,
        origin: usize,
        end: usize,
        candidates: &[usize],
        depth: usize,
    ) -> Result<(), GeometryError> {
        if depth > self.depth_limit {
            return Err(GeometryError::RecursionLimit(self.depth_limit));
        }

        let line = Line::new(self.points[origin], self.points[end]);
        let outer: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| {
                line.orientation_point(&self.points[i], &Vector3::z()) == Orientation::Positive
            })
            .collect();

        if outer.is_empty() {
            self.hull.push(origin);
            return Ok(());
        }

        let mut distal = outer[0];
        let mut max_distance = f64::NEG_INFINITY;
        for &i in &outer {
            let distance = point_line(&self.points[i], &line).distance;
            if distance > max_distance {
                max_distance = distance;
                distal = i;
            }
        }

        self.add_bound_seg(origin, distal, &outer, depth + 1)?;
        self.add_bound_seg(distal, end, &outer, depth + 1)
    }
}

fn lexicographic(a: &Point3, b: &Point3) -> std::cmp::Ordering {
    (a.x, a.y, a.z)
        .partial_cmp(&(b.x, b.y, b.z))
        .unwrap_or(std::cmp::Ordering::Equal)
}
