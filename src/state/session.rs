use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::mood::{Mood, MoodCounts, MoodResolver, RandomSource, RngSource};
use crate::positioning::{points_to_plane, MotionStep, Position, Viewport};
use crate::snapshot::TickSnapshot;

use super::cat::Cat;

/// A running population of cats.
///
/// The session owns the cat array, its configuration and the single random
/// stream every draw comes from: placement, then motion and hiss draws in
/// tick order.
#[derive(Debug)]
pub struct Session<R: RandomSource = RngSource<StdRng>> {
    config: SimConfig,
    resolver: MoodResolver,
    motion: MotionStep,
    rng: R,
    cats: Vec<Cat>,
    /// Scratch copies kept in step with `cats` for the resolver
    positions: Vec<Position>,
    moods: Vec<Mood>,
    tick: u64,
}

impl Session {
    /// Start a session seeded from `config.seed`, or from OS entropy when unset
    pub fn new(config: SimConfig) -> Result<Self> {
        let source = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl<R: RandomSource> Session<R> {
    /// Start a session that draws from the given source
    pub fn with_source(config: SimConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let mut session = Self {
            resolver: MoodResolver::from_config(&config),
            motion: MotionStep::new(config.speed),
            rng,
            cats: Vec::new(),
            positions: Vec::new(),
            moods: Vec::new(),
            tick: 0,
            config,
        };
        session.populate(session.config.cat_count)?;

        info!(
            cats = session.cats.len(),
            width = session.config.map_width,
            height = session.config.map_height,
            index = session.config.index.name(),
            "Session started"
        );
        Ok(session)
    }

    /// Allocate and place `count` cats, then resolve their first moods
    fn populate(&mut self, count: usize) -> Result<()> {
        let mut cats = Vec::new();
        let mut positions = Vec::new();
        let mut moods = Vec::new();
        cats.try_reserve_exact(count)
            .map_err(|e| SimError::exhausted("cat array", count, e))?;
        positions
            .try_reserve_exact(count)
            .map_err(|e| SimError::exhausted("position buffer", count, e))?;
        moods
            .try_reserve_exact(count)
            .map_err(|e| SimError::exhausted("mood buffer", count, e))?;

        let (width, height) = (self.config.map_width, self.config.map_height);
        for _ in 0..count {
            let x = place(width, self.rng.next_unit());
            let y = place(height, self.rng.next_unit());
            cats.push(Cat::at(x, y));
        }
        positions.extend(cats.iter().map(|cat| cat.position));
        moods.resize(count, Mood::Calm);

        self.resolver
            .resolve_into(&positions, &mut moods, &mut self.rng)?;
        for (cat, mood) in cats.iter_mut().zip(&moods) {
            cat.mood = *mood;
        }

        self.cats = cats;
        self.positions = positions;
        self.moods = moods;
        Ok(())
    }

    /// Advance one step: move every cat, then reclassify the population.
    ///
    /// Motion is applied to the scratch positions and copied into the cats
    /// only after resolution succeeds, so on error the cats, moods and tick
    /// counter are left as they were.
    pub fn tick(&mut self) -> Result<&[Cat]> {
        self.motion.apply(&mut self.positions, &mut self.rng);

        if let Err(err) = self
            .resolver
            .resolve_into(&self.positions, &mut self.moods, &mut self.rng)
        {
            for (slot, cat) in self.positions.iter_mut().zip(&self.cats) {
                *slot = cat.position;
            }
            return Err(err);
        }

        for ((cat, pos), mood) in self
            .cats
            .iter_mut()
            .zip(&self.positions)
            .zip(&self.moods)
        {
            cat.position = *pos;
            cat.mood = *mood;
        }

        self.tick += 1;
        debug!(tick = self.tick, "Tick complete");
        Ok(&self.cats)
    }

    /// Classify externally supplied window points.
    ///
    /// Points are converted with the configured convention and resolved with
    /// this session's radii and random stream. Tracked cats are not touched.
    pub fn calculate_states(
        &mut self,
        external: &[(f64, f64)],
        viewport: &Viewport,
    ) -> Result<Vec<Mood>> {
        let plane = points_to_plane(external, viewport, self.config.convention);
        self.resolver.resolve(&plane, &mut self.rng)
    }

    /// Replace the population with `cat_count` freshly placed cats
    pub fn resize(&mut self, cat_count: usize) -> Result<()> {
        self.populate(cat_count)?;
        self.config.cat_count = cat_count;
        info!(cats = cat_count, "Population resized");
        Ok(())
    }

    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn moods(&self) -> &[Mood] {
        &self.moods
    }

    pub fn counts(&self) -> MoodCounts {
        MoodCounts::tally(&self.moods)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snapshot(&self, include_moods: bool) -> TickSnapshot {
        TickSnapshot::new(self.tick, &self.moods, include_moods)
    }

    /// End the session and release the population
    pub fn dispose(self) {
        debug!(cats = self.cats.len(), ticks = self.tick, "Session disposed");
    }
}

/// Scale a unit sample onto `[0, extent)`
fn place(extent: f64, unit: f64) -> f64 {
    let max = extent - extent * f64::EPSILON;
    (extent * unit).min(max)
}
