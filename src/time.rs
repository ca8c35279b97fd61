//! Fixed-timestep clock using an accumulator pattern.
//!
//! `draw_web()` runs at ~60fps with a variable delta. [`GameTime`] turns the
//! frame timestamps into a whole number of ticks so timed state (the status
//! banner countdown, button flash) advances deterministically.

/// Ticks per real-time second used by the collector.
pub const TICKS_PER_SEC: u32 = 10;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`), returning the
    /// number of ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp so a backgrounded tab doesn't replay seconds of ticks at once.
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Number of ticks covering `ms` milliseconds, rounded up and at least one.
pub fn ms_to_ticks(ms: u32, ticks_per_sec: u32) -> u32 {
    let ticks = (ms as u64 * ticks_per_sec as u64).div_ceil(1000);
    ticks.clamp(1, u32::MAX as u64) as u32
}
