use crate::mood::RandomSource;

use super::Position;

/// Random walk applied to every cat once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    speed: f64,
}

impl MotionStep {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Move each position by up to `speed` along each axis.
    ///
    /// Draws two signed samples per position, x first, in array order.
    /// Positions are not clamped to the map.
    pub fn apply<R: RandomSource + ?Sized>(&self, positions: &mut [Position], rng: &mut R) {
        for pos in positions.iter_mut() {
            let dx = rng.next_signed();
            let dy = rng.next_signed();
            pos.x += self.speed * dx;
            pos.y += self.speed * dy;
        }
    }
}
