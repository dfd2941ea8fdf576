//! Point geometry: fixed 2D coordinates and Euclidean edge weights.

use nalgebra::Vector2;

/// 2D point. Index 0 in a point list is the distinguished source node.
pub type Vec2 = Vector2<f64>;

/// Euclidean distance between points `i` and `j`.
///
/// Pure function of the fixed point set; defined for any pair of valid
/// indices whether or not an edge exists between them. Out-of-range indices
/// are a contract violation and panic.
#[inline]
pub fn weight(points: &[Vec2], i: usize, j: usize) -> f64 {
    (points[i] - points[j]).norm()
}
