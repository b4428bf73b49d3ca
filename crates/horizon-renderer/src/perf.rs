//! Frame timing: simulation time step and frames-per-second counting.

use std::time::Instant;

/// Counts presented frames and reports the count once per refresh interval.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    last_refresh_ms: u64,
    interval_ms: u64,
}

impl FpsCounter {
    /// Counter that refreshes when more than `interval_ms` have passed.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            frames: 0,
            last_refresh_ms: 0,
            interval_ms,
        }
    }

    /// Record a frame presented at `now_ms`. Returns the number of frames
    /// since the last refresh when the interval has elapsed.
    pub fn frame(&mut self, now_ms: u64) -> Option<u32> {
        self.frames += 1;
        if now_ms.saturating_sub(self.last_refresh_ms) > self.interval_ms {
            let fps = self.frames;
            self.frames = 0;
            self.last_refresh_ms = now_ms;
            Some(fps)
        } else {
            None
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Millisecond clock driving the feedback time step and the FPS title.
///
/// The time step is the timestamp of the previously presented frame
/// divided by a scale, so it is 0 before the first presentation and grows
/// with the time the demo has been running.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_present_ms: u64,
    fps: FpsCounter,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_present_ms: 0,
            fps: FpsCounter::default(),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Time step for the next feedback pass.
    pub fn time_step(&self, time_scale: f32) -> f32 {
        self.last_present_ms as f32 / time_scale
    }

    /// Record a presentation now. Returns the frame count when the title
    /// should be refreshed.
    pub fn presented(&mut self) -> Option<u32> {
        let now = self.now_ms();
        self.presented_at(now)
    }

    pub fn presented_at(&mut self, now_ms: u64) -> Option<u32> {
        self.last_present_ms = now_ms;
        self.fps.frame(now_ms)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_time_step_is_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.time_step(100_000.0), 0.0);
    }

    #[test]
    fn time_step_uses_last_presentation() {
        let mut clock = FrameClock::new();
        clock.presented_at(500);
        assert_eq!(clock.time_step(100_000.0), 0.005);
        clock.presented_at(2000);
        assert_eq!(clock.time_step(100_000.0), 0.02);
    }

    #[test]
    fn fps_reported_after_more_than_a_second() {
        let mut fps = FpsCounter::default();
        for t in 1..=10 {
            assert_eq!(fps.frame(t * 100), None);
        }
        // Exactly 1000 ms is not "more than".
        assert_eq!(fps.frame(1001), Some(11));
        assert_eq!(fps.frame(1500), None);
        assert_eq!(fps.frame(2002), Some(2));
    }

    #[test]
    fn clock_reports_fps_through_presentations() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.presented_at(10), None);
        assert_eq!(clock.presented_at(1200), Some(2));
    }
}
