//! Typed geometric primitives.
//!
//! Shapes are immutable value objects: derived fields (segment length and
//! direction, plane offset, ...) are computed once at construction and only
//! change by rebuilding the shape. Queries never mutate their operands.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

pub mod capsule;
pub mod circle;
pub mod disk;
pub mod line;
pub mod plane;
pub mod polyline;
pub mod ray;
pub mod rectangle;
pub mod segment;
pub mod sphere;
pub mod triangle;

pub use capsule::Capsule;
pub use circle::Circle;
pub use disk::Disk;
pub use line::Line;
pub use plane::Plane;
pub use polyline::Polyline;
pub use ray::Ray;
pub use rectangle::Rectangle;
pub use segment::Segment;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Classification of a point or segment against an oriented plane or line.
///
/// `Positive` and `Negative` are disjoint bits so that OR-ing the two
/// endpoint classifications of a segment yields `Intersect` when the
/// endpoints straddle the splitting primitive. `Common` means "lies on" in
/// the line/segment variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    Common = 0,
    Positive = 1,
    Negative = 2,
    Intersect = 3,
}

impl Orientation {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Orientation::Common,
            1 => Orientation::Positive,
            2 => Orientation::Negative,
            _ => Orientation::Intersect,
        }
    }
}

impl BitOr for Orientation {
    type Output = Orientation;

    fn bitor(self, rhs: Orientation) -> Orientation {
        Orientation::from_bits(self as u8 | rhs as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_bits_combine() {
        assert_eq!(
            Orientation::Positive | Orientation::Negative,
            Orientation::Intersect
        );
        assert_eq!(
            Orientation::Positive | Orientation::Positive,
            Orientation::Positive
        );
        assert_eq!(Orientation::Common | Orientation::Negative, Orientation::Negative);
        assert_eq!(Orientation::Intersect | Orientation::Common, Orientation::Intersect);
    }
}
