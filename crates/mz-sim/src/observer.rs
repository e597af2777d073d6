//! Simulation observer trait for progress reporting and data collection.

use mz_core::{AgentId, Tick};
use mz_motion::Arrival;

use crate::{AgentSnapshot, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival logger
///
/// ```rust,ignore
/// struct ArrivalLog;
///
/// impl SimObserver for ArrivalLog {
///     fn on_arrival(&mut self, tick: Tick, agent: AgentId, arrival: &Arrival) {
///         println!("{tick}: {agent} reached {}", arrival.node);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the player intent is
    /// applied.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per arrival, in ascending `AgentId` order.
    fn on_arrival(&mut self, _tick: Tick, _agent: AgentId, _arrival: &Arrival) {}

    /// Called at the end of each tick with the full report.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called every `config.snapshot_interval_ticks` ticks (never when the
    /// interval is 0).
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentSnapshot]) {}

    /// Called once after [`Sim::run`][crate::Sim::run] reaches its end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
