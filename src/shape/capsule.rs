use super::Segment;
use crate::Point3;
use serde::{Deserialize, Serialize};

/// A capsule: all points within `radius` of a spine segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    segment: Segment,
    radius: f64,
}

impl Capsule {
    pub fn new(p0: Point3, p1: Point3, radius: f64) -> Self {
        Self {
            segment: Segment::new(p0, p1),
            radius,
        }
    }

    pub fn from_segment(segment: Segment, radius: f64) -> Self {
        Self { segment, radius }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}
