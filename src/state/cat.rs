use serde::{Deserialize, Serialize};

use crate::mood::Mood;
use crate::positioning::Position;

/// A single cat. Its identity is its slot in the session's cat array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cat {
    pub position: Position,
    pub mood: Mood,
}

impl Cat {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            mood: Mood::Calm,
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Position::new(x, y))
    }
}
