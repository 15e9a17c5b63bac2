//! Tick counter and wall-clock mapping.
//!
//! The live loop is driven by a periodic callback whose cadence is not
//! guaranteed, so every tick carries its own measured delta-time.  `NavClock`
//! is the fixed-rate variant used by the demo driver and by tests:
//!
//!   wall_time = start_unix_secs + elapsed_secs
//!
//! where `elapsed_secs` accumulates each tick's delta.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── NavClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: f64,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
    /// The current tick — advanced by [`NavClock::advance`].
    pub current_tick: Tick,
}

impl NavClock {
    pub fn new(start_unix_secs: f64) -> Self {
        Self {
            start_unix_secs,
            elapsed_secs: 0.0,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick lasting `dt_secs`.
    ///
    /// Negative or non-finite deltas are treated as zero so a misbehaving
    /// scheduler can never move time backwards.
    #[inline]
    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs += dt_secs;
        }
        self.current_tick = self.current_tick.offset(1);
    }

    /// Current Unix timestamp.
    #[inline]
    pub fn now_unix_secs(&self) -> f64 {
        self.start_unix_secs + self.elapsed_secs
    }
}

impl fmt::Display for NavClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{:.2} s)", self.current_tick, self.elapsed_secs)
    }
}
