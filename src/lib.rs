//! Geometry query and tessellation kernel.
//!
//! Three subsystems built on nalgebra's vector algebra:
//!
//! - pairwise closest-point / distance queries between geometric primitives
//!   (point, line, ray, segment, plane, circle, disk, sphere, capsule,
//!   triangle, rectangle, polyline), all returning a [`QueryResult`];
//! - ear-clipping polygon triangulation with hole merging and z-order
//!   spatial acceleration ([`earcut`], [`triangulate_polygon`]);
//! - divide-and-conquer planar convex hull extraction ([`convex_hull`]).
//!
//! Every operation is a synchronous pure function of its inputs: no I/O, no
//! shared scratch state, safe to call from multiple threads. Degenerate
//! inputs (zero-length segments, near-parallel lines, on-axis circle
//! queries) take deterministic fallback branches instead of erroring; only
//! contract violations surface as [`GeometryError`].

use nalgebra as na;

pub type Point3 = na::Point3<f64>;
pub type Vector3 = na::Vector3<f64>;

/// Global tolerance for "on-plane", "parallel" and "equal" classification.
pub const G_PRECISION: f64 = 1e-4;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < G_PRECISION
    }
}

impl ApproxEq for Point3 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < G_PRECISION * G_PRECISION
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < G_PRECISION * G_PRECISION
    }
}

pub mod error;
pub mod hull;
pub mod query;
pub mod shape;
pub mod triangulate;

pub use error::GeometryError;
pub use hull::{convex_hull, fit_plane, HullOptions};
pub use query::{Primitive, QueryResult};
pub use shape::{
    Capsule, Circle, Disk, Line, Orientation, Plane, Polyline, Ray, Rectangle, Segment, Sphere,
    Triangle,
};
pub use triangulate::{deviation, earcut, polygon_normal, triangulate_polygon};
