use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        let norm = direction.norm();
        let direction = if norm > 0.0 { direction / norm } else { Vector3::zeros() };
        Self { origin, direction }
    }

    pub fn from_two_points(origin: Point3, through: Point3) -> Self {
        Self::new(origin, through - origin)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Point at parameter `t >= 0`.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
