//! The per-agent movement state machine.

use tracing::trace;

use mz_core::{ArrivalBoundary, Direction, NodeId, Vec2};
use mz_nav::{EdgeMatch, NavGraph, can_move};

use crate::{MotionError, MotionResult, MovementState, Steering};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// What happened when an agent reached a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrival {
    /// The node the agent now stands on (the portal exit if one was taken).
    pub node: NodeId,
    /// The portal entrance, when the arrival was a teleport.
    pub teleported_from: Option<NodeId>,
    /// The hop chosen on arrival; `None` means the agent went idle.
    pub next: Option<NodeId>,
}

/// Result of one [`MovementController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub arrived:  Option<Arrival>,
    /// A queued opposite-direction intent flipped the agent mid-edge.
    pub reversed: bool,
}

// ── MovementController ────────────────────────────────────────────────────────

/// Drives one agent's [`MovementState`] over a graph.
///
/// The controller owns no graph and no routing; it borrows the graph per
/// call and delegates next-hop choice to a [`Steering`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
    pub state:    MovementState,
    /// Board units per second.
    pub speed:    f32,
    pub boundary: ArrivalBoundary,
}

impl MovementController {
    pub fn new(state: MovementState, speed: f32, boundary: ArrivalBoundary) -> MotionResult<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(MotionError::InvalidSpeed(speed));
        }
        Ok(Self { state, speed, boundary })
    }

    /// Place a new stationary agent on the node nearest to `pos`.
    pub fn spawn(
        graph:    &NavGraph,
        pos:      Vec2,
        speed:    f32,
        boundary: ArrivalBoundary,
    ) -> MotionResult<Self> {
        let node = graph.snap_to_node(pos).ok_or(MotionError::NoSpawnNode(pos))?;
        Self::new(MovementState::placed(graph, node), speed, boundary)
    }

    /// Advance the agent by `dt` seconds.
    ///
    /// * Idle: ask `steering` for a hop and start along it.
    /// * In transit and a queued intent is the exact reverse of `heading`:
    ///   reverse in place.
    /// * In transit and overshot: snap onto the target (or portal exit),
    ///   then ask `steering` for the next hop.
    /// * Otherwise: move `heading · speed · dt`.  A non-positive or
    ///   non-finite `dt` moves nothing.
    pub fn tick<S: Steering + ?Sized>(
        &mut self,
        graph:    &NavGraph,
        dt:       f32,
        steering: &mut S,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.state.is_idle() {
            if let Some(hop) = steering.next_hop(graph, &self.state) {
                self.dispatch(graph, hop);
            }
            return outcome;
        }

        outcome.reversed = self.apply_pending_reversal(graph);

        match self.state.has_overshot(graph, self.boundary) {
            Some(true) => {
                outcome.arrived = self.arrive(graph, steering);
            }
            Some(false) => {
                if dt.is_finite() && dt > 0.0 {
                    self.state.position += self.state.heading * (self.speed * dt);
                }
            }
            None => {
                trace!(state = ?self.state, "in transit without an edge origin; skipping");
            }
        }
        outcome
    }

    /// Turn around mid-edge: swap `target` and `previous`, negate `heading`.
    /// The position is untouched.
    ///
    /// Returns `false` (and changes nothing) when the agent is not in
    /// transit, or when the node behind it is a portal.
    pub fn reverse(&mut self, graph: &NavGraph) -> bool {
        if !self.state.in_transit() {
            return false;
        }
        let (Some(target), Some(previous)) = (self.state.target, self.state.previous) else {
            return false;
        };
        if graph.portal(previous).is_some() {
            trace!(%previous, "reversal onto portal refused");
            return false;
        }
        self.state.target   = Some(previous);
        self.state.previous = Some(target);
        self.state.heading  = -self.state.heading;
        trace!(from = %target, to = %previous, "reversed");
        true
    }

    /// Apply a player directional intent.
    ///
    /// The intent is queued unless the agent already heads that way.  An
    /// exact reversal while in transit is applied at once; at a node the
    /// agent departs immediately if an edge points that way.
    pub fn request(&mut self, graph: &NavGraph, dir: Direction) {
        if dir.as_vec() != self.state.heading {
            self.state.pending = Some(dir);
        }

        if self.state.in_transit() {
            self.apply_pending_reversal(graph);
        } else if let Some(node) = self.state.current {
            if let Some(hop) = can_move(graph, node, dir.as_vec(), EdgeMatch::Exact) {
                self.dispatch(graph, hop);
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply_pending_reversal(&mut self, graph: &NavGraph) -> bool {
        let Some(dir) = self.state.pending else {
            return false;
        };
        if self.state.heading.is_zero() || dir.as_vec() != -self.state.heading {
            return false;
        }
        let reversed = self.reverse(graph);
        if reversed {
            self.state.pending = None;
        }
        reversed
    }

    fn arrive<S: Steering + ?Sized>(&mut self, graph: &NavGraph, steering: &mut S) -> Option<Arrival> {
        let target = self.state.target?;

        // Portal transit is a single hop; the exit's own portal is not
        // followed.
        let (node, teleported_from) = match graph.portal(target) {
            Some(exit) => (exit, Some(target)),
            None => (target, None),
        };
        self.state.position = graph.position(node);
        self.state.current  = Some(node);
        self.state.previous = Some(node);
        self.state.target   = None;

        let next = match steering.next_hop(graph, &self.state) {
            Some(hop) if self.dispatch(graph, hop) => Some(hop),
            _ => {
                self.state.heading = Vec2::ZERO;
                None
            }
        };

        match teleported_from {
            Some(entrance) => trace!(%entrance, exit = %node, ?next, "teleported"),
            None => trace!(%node, ?next, "arrived"),
        }
        Some(Arrival { node, teleported_from, next })
    }

    /// Start along the edge `current → hop`.  `false` if there is no such
    /// edge.
    fn dispatch(&mut self, graph: &NavGraph, hop: NodeId) -> bool {
        let Some(from) = self.state.current else {
            return false;
        };
        let Some(heading) = graph.direction_to(from, hop) else {
            trace!(%from, %hop, "steering chose a non-neighbour; staying put");
            return false;
        };
        self.state.previous = Some(from);
        self.state.target   = Some(hop);
        self.state.current  = None;
        self.state.heading  = heading;
        if self.state.pending.is_some_and(|d| d.as_vec() == heading) {
            self.state.pending = None;
        }
        true
    }
}
