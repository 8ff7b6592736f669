//! Two-phase mood classification over a snapshot of positions.
//!
//! Phase A spreads `WantsToFight` through every group of cats that sit within
//! the fight radius of one another. Phase B gives each remaining cat a chance
//! to hiss at a neighbour inside the hiss radius, with a probability that
//! falls off with the square of the distance.

use tracing::debug;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::positioning::{IndexKind, Position, SpatialIndex};

use super::random::RandomSource;
use super::{Mood, MoodCounts};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodResolver {
    fight_radius: f64,
    hiss_radius: f64,
    mutual_hiss: bool,
    index_kind: IndexKind,
}

impl MoodResolver {
    /// Radii are taken as given; validate them through [`SimConfig`] first.
    pub fn new(fight_radius: f64, hiss_radius: f64) -> Self {
        Self {
            fight_radius,
            hiss_radius,
            mutual_hiss: true,
            index_kind: IndexKind::Auto,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.fight_radius, config.hiss_radius)
            .mutual_hiss(config.mutual_hiss)
            .index_kind(config.index)
    }

    /// Whether a successful hiss also escalates a calm neighbour
    pub fn mutual_hiss(mut self, enabled: bool) -> Self {
        self.mutual_hiss = enabled;
        self
    }

    pub fn index_kind(mut self, kind: IndexKind) -> Self {
        self.index_kind = kind;
        self
    }

    pub fn fight_radius(&self) -> f64 {
        self.fight_radius
    }

    pub fn hiss_radius(&self) -> f64 {
        self.hiss_radius
    }

    /// Classify every position, returning one mood per input slot
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        positions: &[Position],
        rng: &mut R,
    ) -> Result<Vec<Mood>> {
        let mut moods = Vec::new();
        moods
            .try_reserve_exact(positions.len())
            .map_err(|e| SimError::exhausted("mood array", positions.len(), e))?;
        moods.resize(positions.len(), Mood::Calm);

        self.resolve_into(positions, &mut moods, rng)?;
        Ok(moods)
    }

    /// Classify into an existing buffer.
    ///
    /// `moods` is only written once the positions have been checked and the
    /// index built, so an error leaves the previous contents in place.
    /// Positions with a NaN or infinite coordinate are rejected.
    ///
    /// # Panics
    ///
    /// Panics if `moods` and `positions` differ in length.
    pub fn resolve_into<R: RandomSource + ?Sized>(
        &self,
        positions: &[Position],
        moods: &mut [Mood],
        rng: &mut R,
    ) -> Result<()> {
        assert_eq!(
            positions.len(),
            moods.len(),
            "one mood slot is required per position"
        );

        if positions.is_empty() {
            return Ok(());
        }
        if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
            return Err(SimError::NonFinitePoint { index });
        }

        let index = self.index_kind.build(positions, self.hiss_radius)?;
        moods.fill(Mood::Calm);

        self.spread_fights(index.as_ref(), positions, moods);
        self.draw_hisses(index.as_ref(), positions, moods, rng);

        let counts = MoodCounts::tally(moods.iter());
        debug!(
            cats = positions.len(),
            index = self.index_kind.effective(positions.len()).name(),
            calm = counts.calm,
            hisses = counts.hisses,
            wants_to_fight = counts.wants_to_fight,
            "Resolved moods"
        );
        Ok(())
    }

    /// Phase A: fight contagion
    fn spread_fights(&self, index: &dyn SpatialIndex, positions: &[Position], moods: &mut [Mood]) {
        for i in 0..positions.len() {
            if moods[i] == Mood::WantsToFight {
                continue;
            }

            let nearby = index.range_query(&positions[i], self.fight_radius);
            if nearby.iter().any(|&id| id != i) {
                moods[i] = Mood::WantsToFight;
                for id in nearby {
                    moods[id] = Mood::WantsToFight;
                }
            }
        }
    }

    /// Phase B: probabilistic hissing
    fn draw_hisses<R: RandomSource + ?Sized>(
        &self,
        index: &dyn SpatialIndex,
        positions: &[Position],
        moods: &mut [Mood],
        rng: &mut R,
    ) {
        let fight_sq = self.fight_radius * self.fight_radius;

        for i in 0..positions.len() {
            if moods[i] == Mood::WantsToFight {
                continue;
            }

            let mut nearby = index.range_query(&positions[i], self.hiss_radius);
            nearby.sort_unstable();

            for j in nearby {
                if j == i {
                    continue;
                }
                let dist_sq = positions[i].distance_sq_to(&positions[j]);
                // Coincident cats already fought in phase A
                if dist_sq == 0.0 {
                    continue;
                }

                if rng.next_unit() <= fight_sq / dist_sq {
                    moods[i].escalate(Mood::Hisses);
                    if self.mutual_hiss && moods[j] == Mood::Calm {
                        moods[j] = Mood::Hisses;
                    }
                    break;
                }
            }
        }
    }
}
