use std::time::{Duration, Instant};

/// Timing snapshot for one completed frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Interval since the previous tick, clamped to the clock's bounds.
    pub dt: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Instantaneous frame rate implied by `dt`.
    #[inline]
    pub fn rate(&self) -> f32 {
        1.0 / self.dt.as_secs_f32()
    }
}

/// Per-loop frame clock producing [`FrameTime`] snapshots.
///
/// The interval is clamped on both ends: the lower bound keeps `rate()`
/// finite when two ticks land in the same scheduler quantum, the upper
/// bound keeps downstream consumers stable across debugger pauses and
/// long stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frames: u64,
    min_dt: Duration,
    max_dt: Duration,
}

impl FrameClock {
    /// A clock with default clamps (100 µs .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// A clock with custom interval clamps.
    pub fn with_clamps(min_dt: Duration, max_dt: Duration) -> Self {
        debug_assert!(min_dt <= max_dt);
        Self { last: Instant::now(), frames: 0, min_dt, max_dt }
    }

    /// Resets the baseline without emitting a frame.
    ///
    /// Call after a suspension so the first frame back does not absorb the
    /// entire pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the snapshot for the frame that just
    /// completed.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.min_dt, self.max_dt);
        self.last = now;

        let ft = FrameTime { dt, now, frame_index: self.frames };
        self.frames = self.frames.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
