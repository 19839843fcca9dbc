//! Frame timing: wall-clock deltas and a smoothed FPS readout.

use web_time::{Duration, Instant};

/// Wall-clock delta source for the frame loop, with a smoothed FPS readout.
pub struct Clock {
    /// Timestamp of the previous [`delta`](Self::delta) call.
    last_tick: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Start the clock now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Seconds elapsed since the previous call (or since construction).
    ///
    /// Long stalls are reported in full.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> f32 {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_non_negative_and_monotone_in_sleep() {
        let mut clock = Clock::new();
        let first = clock.delta();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.delta();
        assert!(first >= 0.0);
        assert!(second >= 0.004);
    }

    #[test]
    fn long_stalls_are_reported_in_full() {
        let mut clock = Clock::new();
        let dt = clock.record(Duration::from_secs(3));
        assert_eq!(dt, 3.0);
    }

    #[test]
    fn fps_tracks_steady_frames() {
        let mut clock = Clock::new();
        for _ in 0..500 {
            let _ = clock.record(Duration::from_millis(10));
        }
        assert!((clock.fps() - 100.0).abs() < 1.0, "{}", clock.fps());
    }
}
