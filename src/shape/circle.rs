use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A circle (rim only) with center, unit plane normal and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    center: Point3,
    normal: Vector3,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point3, normal: Vector3, radius: f64) -> Self {
        let norm = normal.norm();
        let normal = if norm > 0.0 { normal / norm } else { Vector3::z() };
        Self {
            center,
            normal,
            radius,
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

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApproxEq;

    #[test]
    fn normalizes_normal() {
        let c = Circle::new(Point3::origin(), Vector3::new(0.0, 0.0, 4.0), 2.0);
        assert!(c.normal().approx_eq(&Vector3::z()));
        assert!((c.area() - 4.0 * PI).abs() < 1e-12);
    }
}
