//! Drunk cats on a plane.
//!
//! A population of cats wanders the plane at random. Every tick each cat is
//! classified by how close its neighbours are: cats within the fight radius
//! of one another want to fight, and cats merely nearby may start hissing.

pub mod config;
pub mod error;
pub mod mood;
pub mod positioning;
pub mod snapshot;
pub mod state;

pub use config::SimConfig;
pub use error::{ConfigError, Result, SimError};
pub use mood::{Mood, MoodCounts, MoodResolver, RandomSource};
pub use positioning::{CoordinateConvention, IndexKind, Position, Viewport};
pub use snapshot::TickSnapshot;
pub use state::{Cat, Session};
