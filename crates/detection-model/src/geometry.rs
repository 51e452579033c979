//! Geometric primitives.
//!
//! Coordinates are in pixels of the recorded video frame.

use serde::{Deserialize, Serialize};

/// A point on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Mean of a set of points, `None` when empty.
    pub fn mean<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Point> {
        let (count, sum_x, sum_y) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, sx, sy), p| (n + 1, sx + p.x, sy + p.y));
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Point::new(sum_x / n, sum_y / n))
    }
}
