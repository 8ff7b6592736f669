use std::time::{Duration, Instant};

/// Target frame rate
pub const TARGET_FPS: u32 = 30;

/// Frame duration for target FPS
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS as u64);

/// Most simulation ticks run in a single frame, so a stalled terminal
/// does not trigger a burst of catch-up work
pub const MAX_TICKS_PER_FRAME: u32 = 8;

pub const MIN_SPEED_FACTOR: f64 = 0.25;
pub const MAX_SPEED_FACTOR: f64 = 4.0;

/// Animation loop state
pub struct AnimationLoop {
    last_frame: Instant,
    frame_count: u64,
    fps_sample_start: Instant,
    fps_sample_count: u32,
    current_fps: u32,
}

impl AnimationLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps_sample_start: now,
            fps_sample_count: 0,
            current_fps: TARGET_FPS,
        }
    }

    /// Check if it's time for a new frame
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= FRAME_DURATION
    }

    /// Get delta time since last frame
    pub fn delta_time(&self) -> f64 {
        self.last_frame.elapsed().as_secs_f64()
    }

    /// Mark frame as rendered
    pub fn frame_rendered(&mut self) {
        self.last_frame = Instant::now();
        self.frame_count += 1;
        self.fps_sample_count += 1;

        // Update FPS calculation every second
        if self.fps_sample_start.elapsed() >= Duration::from_secs(1) {
            self.current_fps = self.fps_sample_count;
            self.fps_sample_count = 0;
            self.fps_sample_start = Instant::now();
        }
    }

    pub fn fps(&self) -> u32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time until next frame
    pub fn time_until_next_frame(&self) -> Duration {
        FRAME_DURATION.saturating_sub(self.last_frame.elapsed())
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts frame time into whole simulation ticks.
///
/// Runs at `tick_rate` ticks per second scaled by a user speed factor.
/// Fractional ticks carry over to the next frame.
#[derive(Debug, Clone)]
pub struct TickPacer {
    tick_rate: f64,
    speed_factor: f64,
    accumulated: f64,
}

impl TickPacer {
    pub fn new(tick_rate: f64) -> Self {
        Self {
            tick_rate: tick_rate.max(0.0),
            speed_factor: 1.0,
            accumulated: 0.0,
        }
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn speed_up(&mut self) {
        self.speed_factor = (self.speed_factor * 2.0).min(MAX_SPEED_FACTOR);
    }

    pub fn slow_down(&mut self) {
        self.speed_factor = (self.speed_factor / 2.0).max(MIN_SPEED_FACTOR);
    }

    /// Number of ticks due after `dt` seconds
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulated += dt.max(0.0) * self.tick_rate * self.speed_factor;
        let due = self.accumulated.floor();
        self.accumulated -= due;

        let due = due as u32;
        if due > MAX_TICKS_PER_FRAME {
            // Drop the backlog rather than replaying it
            self.accumulated = 0.0;
            return MAX_TICKS_PER_FRAME;
        }
        due
    }

    /// Forget any partial tick, e.g. while paused
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacer_carries_fractions() {
        let mut pacer = TickPacer::new(10.0);
        assert_eq!(pacer.advance(0.05), 0);
        assert_eq!(pacer.advance(0.05), 1);
        assert_eq!(pacer.advance(0.25), 2);
        assert_eq!(pacer.advance(0.05), 1);
    }

    #[test]
    fn test_pacer_speed_factor_is_clamped() {
        let mut pacer = TickPacer::new(10.0);
        for _ in 0..10 {
            pacer.speed_up();
        }
        assert_eq!(pacer.speed_factor(), MAX_SPEED_FACTOR);
        for _ in 0..10 {
            pacer.slow_down();
        }
        assert_eq!(pacer.speed_factor(), MIN_SPEED_FACTOR);
    }

    #[test]
    fn test_pacer_caps_backlog() {
        let mut pacer = TickPacer::new(10.0);
        assert_eq!(pacer.advance(60.0), MAX_TICKS_PER_FRAME);
        assert_eq!(pacer.advance(0.0), 0);
    }

    #[test]
    fn test_animation_loop_starts_at_target() {
        let animation = AnimationLoop::new();
        assert_eq!(animation.fps(), TARGET_FPS);
        assert_eq!(animation.frame_count(), 0);
        assert!(animation.time_until_next_frame() <= FRAME_DURATION);
    }
}
