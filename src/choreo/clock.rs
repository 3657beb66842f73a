//! Frame clock for the animation driver
//!
//! One `SceneClock` is read exactly once per frame; everything downstream
//! works off the `ClockTick` it returns, so all entities in a frame agree
//! on elapsed time and delta.

use std::time::Instant;

/// A single clock reading: total elapsed time and the delta since the
/// previous reading, both in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    /// Seconds since the clock was created. Non-decreasing across ticks.
    pub elapsed: f32,
    /// Seconds since the previous `tick()`. Equal to `elapsed` on the
    /// first tick. Never negative.
    pub delta: f32,
}

/// Monotonic elapsed-time and delta-time provider.
///
/// Backed by [`std::time::Instant`], which is monotonic and infallible, so
/// clock creation cannot fail and no per-tick error path exists.
pub struct SceneClock {
    start: Instant,
    last_elapsed: f32,
}

impl SceneClock {
    /// Creates a clock that starts counting from now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_elapsed: 0.0,
        }
    }

    /// Reads the clock and returns the elapsed time plus the delta since
    /// the previous read (0-based on the first read).
    pub fn tick(&mut self) -> ClockTick {
        let elapsed = self.start.elapsed().as_secs_f32();
        // Instant is monotonic, but f32 rounding could in principle produce
        // a tiny negative delta; clamp so the invariant holds exactly.
        let delta = (elapsed - self.last_elapsed).max(0.0);
        self.last_elapsed = elapsed;
        ClockTick { elapsed, delta }
    }

    /// Elapsed seconds as of the most recent `tick()`.
    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_delta_equals_elapsed() {
        let mut clock = SceneClock::new();
        let tick = clock.tick();
        assert!(tick.elapsed >= 0.0);
        assert!((tick.delta - tick.elapsed).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_non_decreasing_and_deltas_consistent() {
        let mut clock = SceneClock::new();
        let mut previous = 0.0_f32;
        for _ in 0..100 {
            let tick = clock.tick();
            assert!(tick.elapsed >= previous);
            assert!(tick.delta >= 0.0);
            assert!((tick.delta - (tick.elapsed - previous)).abs() < 1e-5);
            previous = tick.elapsed;
        }
        assert!((clock.last_elapsed() - previous).abs() < 1e-6);
    }
}
