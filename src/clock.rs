//! Fixed-interval tick scheduling.
//!
//! The physics stepper advances in whole ticks at a nominal 120 Hz; it
//! has no notion of wall time. [`TickClock`] bridges the two for hosts
//! whose frame callbacks arrive at arbitrary rates: each frame, ask the
//! clock how many ticks are due and step that many times.
//!
//! ```ignore
//! let mut clock = TickClock::new();
//! // In the host's frame callback:
//! for _ in 0..clock.due_ticks() {
//!     field.step(pointer);
//! }
//! ```

use std::time::{Duration, Instant};

/// Nominal tick rate of the animation, in ticks per second.
pub const TICK_HZ: u32 = 120;

/// Converts wall-clock time into a stream of fixed-interval ticks.
#[derive(Debug)]
pub struct TickClock {
    interval: Duration,
    start: Instant,
    last: Instant,
    /// Wall time not yet consumed by a full tick.
    accumulator: Duration,
    tick_count: u64,
}

impl TickClock {
    /// Create a clock at the nominal rate of [`TICK_HZ`].
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1) / TICK_HZ)
    }

    /// Create a clock with a custom tick interval.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval: interval.max(Duration::from_micros(1)),
            start: now,
            last: now,
            accumulator: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Number of ticks that became due since the last call.
    ///
    /// Capped at one second's worth so a long stall (debugger, suspended
    /// app) does not trigger a catch-up burst.
    pub fn due_ticks(&mut self) -> u64 {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last);
        self.last = now;

        let mut due = 0u64;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            due += 1;
        }

        let cap = (Duration::from_secs(1).as_nanos() / self.interval.as_nanos()).max(1) as u64;
        if due > cap {
            due = cap;
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += due;
        due
    }

    /// Total ticks handed out since creation or the last reset.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// The configured tick interval.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wall-clock seconds since creation or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Restart the clock, discarding pending ticks.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
        self.accumulator = Duration::ZERO;
        self.tick_count = 0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
