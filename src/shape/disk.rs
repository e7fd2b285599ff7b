use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A filled disk: circle rim plus interior. `w` is the supporting plane
/// offset, derived at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    center: Point3,
    normal: Vector3,
    radius: f64,
    w: f64,
}

impl Disk {
    pub fn new(center: Point3, normal: Vector3, radius: f64) -> Self {
        let norm = normal.norm();
        let normal = if norm > 0.0 { normal / norm } else { Vector3::z() };
        Self {
            center,
            normal,
            radius,
            w: normal.dot(&center.coords),
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Supporting plane offset `normal . center`.
    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_offset_derived_from_center() {
        let d = Disk::new(Point3::new(0.0, 0.0, 3.0), Vector3::z(), 1.0);
        assert!((d.w() - 3.0).abs() < 1e-12);
    }
}
