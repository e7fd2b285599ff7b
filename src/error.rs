use thiserror::Error;

/// Errors raised for caller contract violations.
///
/// Numeric degeneracies (zero-length segments, parallel primitives, …) are
/// never errors; each query documents its deterministic fallback instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("convex hull needs at least 3 points, got {0}")]
    InsufficientPoints(usize),

    #[error("malformed hole indices: {0}")]
    MalformedHoles(String),

    #[error("coordinate stride must be at least 2, got {0}")]
    InvalidStride(usize),

    #[error("convex hull recursion exceeded depth limit {0}")]
    RecursionLimit(usize),
}
