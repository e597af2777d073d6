//! The `Sim` struct and its tick loop.

use tracing::info;

use mz_core::{AgentId, AgentRng, CoreError, Direction, NodeId, SimClock, SimConfig, Tick};
use mz_motion::{Arrival, InputSteering, MovementController, MovementState};
use mz_nav::{NavGraph, Path, Router};
use mz_pursuit::{PursuerPolicy, PursuerSteering, TargetView};

use crate::{AgentSnapshot, IntentSource, SimObserver, SimResult, TickReport};

// ── Pursuer ───────────────────────────────────────────────────────────────────

/// One autonomous pursuer: its movement, its policy, and its private RNG.
#[derive(Debug, Clone)]
pub struct Pursuer {
    pub id:         AgentId,
    pub controller: MovementController,
    pub policy:     PursuerPolicy,
    pub rng:        AgentRng,
}

impl Pursuer {
    fn advance<R: Router + ?Sized>(
        &mut self,
        graph:  &NavGraph,
        router: &R,
        target: &TargetView,
        dt:     f32,
    ) -> Option<(AgentId, Arrival)> {
        let mut steering = PursuerSteering::new(self.policy, router, target, &mut self.rng);
        self.controller
            .tick(graph, dt, &mut steering)
            .arrived
            .map(|a| (self.id, a))
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One running maze level.
///
/// `Sim<R>` owns the level graph, the router, the player (`AgentId(0)`) and
/// every pursuer.  Drive it frame by frame with [`step`](Self::step), or at a
/// fixed `config.tick_secs` with [`run`](Self::run) /
/// [`run_ticks`](Self::run_ticks).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    /// Run configuration (tick length, run length, seed, arrival rule).
    pub config: SimConfig,

    /// Tick counter and accumulated simulated seconds.
    pub clock: SimClock,

    /// The level.  Never mutated after build.
    pub graph: NavGraph,

    /// Shortest-path engine used by `GraphSearch` pursuers.
    pub router: R,

    /// The player-controlled agent.
    pub player: MovementController,

    /// Pursuers in `AgentId` order: `pursuers[i].id == AgentId(i + 1)`.
    pub pursuers: Vec<Pursuer>,
}

impl<R: Router> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance every agent by `dt` seconds, applying `intent` to the player
    /// first.
    ///
    /// A non-positive or non-finite `dt` still runs the tick (arrivals and
    /// departures happen) but moves nobody along an edge.
    pub fn step(&mut self, dt: f32, intent: Option<Direction>) -> TickReport {
        let dt  = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let now = self.clock.current_tick;

        if let Some(dir) = intent {
            self.player.request(&self.graph, dir);
        }

        // Every pursuer chases where the player was when the tick began.
        let view = TargetView::from_state(&self.player.state);

        let mut arrivals = Vec::new();
        if let Some(a) = self.player.tick(&self.graph, dt, &mut InputSteering).arrived {
            arrivals.push((AgentId(0), a));
        }
        arrivals.extend(self.advance_pursuers(&view, dt));

        self.clock.advance(dt);

        TickReport { tick: now, arrivals, agents: self.snapshots() }
    }

    /// Run at the fixed `config.tick_secs` from the current tick to
    /// `config.end_tick()`.
    pub fn run<I: IntentSource, O: SimObserver>(&mut self, input: &mut I, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.run_one(input, observer);
        }
        info!(
            ticks = self.clock.current_tick.0,
            elapsed_secs = self.clock.elapsed_secs,
            "sim finished"
        );
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<I: IntentSource, O: SimObserver>(&mut self, n: u64, input: &mut I, observer: &mut O) {
        for _ in 0..n {
            self.run_one(input, observer);
        }
    }

    /// Shortest path between two nodes of this level, for path previews.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Path {
        self.router.route(&self.graph, from, to)
    }

    /// Change a pursuer's policy.  Takes effect at its next decision.
    pub fn set_policy(&mut self, agent: AgentId, policy: PursuerPolicy) -> SimResult<()> {
        let pursuer = self
            .pursuer_mut(agent)
            .ok_or(CoreError::AgentNotFound(agent))?;
        pursuer.policy = policy;
        Ok(())
    }

    /// Player first, then pursuers.
    pub fn agent_count(&self) -> usize {
        1 + self.pursuers.len()
    }

    pub fn agent_state(&self, agent: AgentId) -> Option<&MovementState> {
        match agent.index() {
            0 => Some(&self.player.state),
            i => self.pursuers.get(i - 1).map(|p| &p.controller.state),
        }
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        std::iter::once(AgentSnapshot::of(AgentId(0), &self.player.state))
            .chain(self.pursuers.iter().map(|p| AgentSnapshot::of(p.id, &p.controller.state)))
            .collect()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn run_one<I: IntentSource, O: SimObserver>(&mut self, input: &mut I, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let report = self.step(self.config.tick_secs, input.intent(now));

        for (agent, arrival) in &report.arrivals {
            observer.on_arrival(now, *agent, arrival);
        }
        observer.on_tick_end(now, &report);
        if self.config.snapshot_interval_ticks > 0
            && now.0.is_multiple_of(self.config.snapshot_interval_ticks)
        {
            observer.on_snapshot(now, &report.agents);
        }
    }

    fn pursuer_mut(&mut self, agent: AgentId) -> Option<&mut Pursuer> {
        agent
            .index()
            .checked_sub(1)
            .and_then(|i| self.pursuers.get_mut(i))
    }

    /// Advance all pursuers against the same player snapshot.
    ///
    /// Arrivals come back in `AgentId` order in both builds.
    fn advance_pursuers(&mut self, view: &TargetView, dt: f32) -> Vec<(AgentId, Arrival)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let graph  = &self.graph;
        let router = &self.router;

        #[cfg(not(feature = "parallel"))]
        {
            self.pursuers
                .iter_mut()
                .filter_map(|p| p.advance(graph, router, view, dt))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.pursuers
                .par_iter_mut()
                .filter_map(|p| p.advance(graph, router, view, dt))
                .collect()
        }
    }
}
