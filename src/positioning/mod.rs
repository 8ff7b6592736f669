pub mod coords;
pub mod motion;
pub mod spatial;

use serde::{Deserialize, Serialize};

pub use coords::{points_to_plane, to_plane, CoordinateConvention, Viewport};
pub use motion::MotionStep;
pub use spatial::{IndexKind, LinearScan, RTreeIndex, SpatialHash, SpatialIndex};

/// A 2D position in plane coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another position
    ///
    /// Every range test in the crate compares this against `radius * radius`
    /// so all index implementations agree on boundary points.
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Linear interpolation toward another position
    pub fn lerp(&self, target: &Position, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// Whether the position lies inside `[0, width) x [0, height)`
    pub fn within(&self, width: f64, height: f64) -> bool {
        (0.0..width).contains(&self.x) && (0.0..height).contains(&self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_sq_to(&b), 25.0);
        assert_eq!(b.distance_sq_to(&a), 25.0);
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, -10.0);
        assert_eq!(a.lerp(&b, 0.5), Position::new(5.0, -5.0));
        assert_eq!(a.lerp(&b, 2.0), b);
    }

    #[test]
    fn test_within_bounds() {
        assert!(Position::new(0.0, 0.0).within(10.0, 10.0));
        assert!(!Position::new(10.0, 5.0).within(10.0, 10.0));
        assert!(!Position::new(-0.1, 5.0).within(10.0, 10.0));
    }
}
