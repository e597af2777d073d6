//! Simulation time model.
//!
//! # Design
//!
//! A tick is one discrete frame.  Each tick carries an externally supplied
//! elapsed-time delta (`dt`, seconds) that the movement controllers
//! integrate; the tick counter itself is an integer so event ordering and
//! snapshot intervals stay exact.
//!
//! `SimClock` tracks both: the monotonically increasing `Tick` and the
//! accumulated simulated seconds.  Accumulation is done in `f64` so long
//! runs of small `f32` deltas don't drift.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

/// Number of ticks between two ticks.
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus accumulated simulated time.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Simulated seconds since tick 0 (sum of every `dt` advanced so far).
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick that lasted `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick.next();
        self.elapsed_secs += dt as f64;
    }

    /// Break elapsed time into (minute, second, millisecond) components.
    /// Useful for human-readable logging.
    pub fn elapsed_msm(&self) -> (u64, u32, u32) {
        let total_ms = (self.elapsed_secs.max(0.0) * 1000.0).round() as u64;
        let minutes = total_ms / 60_000;
        let secs = ((total_ms % 60_000) / 1_000) as u32;
        let millis = (total_ms % 1_000) as u32;
        (minutes, secs, millis)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, ms) = self.elapsed_msm();
        write!(f, "{} ({:02}:{:02}.{:03})", self.current_tick, m, s, ms)
    }
}

// ── ArrivalBoundary ───────────────────────────────────────────────────────────

/// How the overshoot test treats an agent that sits *exactly* on its target
/// node.
///
/// The test compares `|pos − prev|²` against `|target − prev|²`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArrivalBoundary {
    /// `>`: equal distances are **not** an arrival.  The agent arrives on
    /// the tick after it has moved strictly past the node.
    #[default]
    Exclusive,
    /// `>=`: landing exactly on the node counts as arrival.
    Inclusive,
}

impl ArrivalBoundary {
    /// Apply the boundary rule to a pair of squared distances.
    #[inline]
    pub fn passed(self, dist_to_self_sq: f32, dist_to_target_sq: f32) -> bool {
        match self {
            ArrivalBoundary::Exclusive => dist_to_self_sq > dist_to_target_sq,
            ArrivalBoundary::Inclusive => dist_to_self_sq >= dist_to_target_sq,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Fixed `dt` (seconds) used by `Sim::run`.  Drivers that call
    /// `Sim::step` directly supply their own per-frame delta instead.
    pub tick_secs: f32,

    /// Total ticks to simulate in `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Tie-breaking rule for the overshoot arrival test.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arrival: ArrivalBoundary,
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the tick loop cannot integrate.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tick_secs.is_finite() || self.tick_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "tick_secs must be a positive finite number, got {}",
                self.tick_secs
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// 60 frames per second for one simulated minute.
    fn default() -> Self {
        Self {
            tick_secs:               1.0 / 60.0,
            total_ticks:             3_600,
            seed:                    0,
            snapshot_interval_ticks: 60,
            arrival:                 ArrivalBoundary::Exclusive,
        }
    }
}
