use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// An oriented rectangle: center, two unit axes and the half-extents
/// along them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    center: Point3,
    axis: [Vector3; 2],
    extent: [f64; 2],
}

impl Rectangle {
    pub fn new(center: Point3, axis0: Vector3, axis1: Vector3, extent: [f64; 2]) -> Self {
        let normalize = |v: Vector3| {
            let n = v.norm();
            if n > 0.0 {
                v / n
            } else {
                Vector3::zeros()
            }
        };
        Self {
            center,
            axis: [normalize(axis0), normalize(axis1)],
            extent,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn axis(&self, index: usize) -> Vector3 {
        self.axis[index]
    }

    pub fn extent(&self, index: usize) -> f64 {
        self.extent[index]
    }

    /// Point at the given axis parameters (each in [-extent, extent] for
    /// points on the rectangle).
    pub fn at(&self, s0: f64, s1: f64) -> Point3 {
        self.center + self.axis[0] * s0 + self.axis[1] * s1
    }
}
