//! What one tick produced.

use mz_core::{AgentId, NodeId, Tick, Vec2};
use mz_motion::{Arrival, MovementState};

/// Public view of one agent after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:       AgentId,
    pub position: Vec2,
    pub heading:  Vec2,
    pub current:  Option<NodeId>,
    pub target:   Option<NodeId>,
    pub previous: Option<NodeId>,
}

impl AgentSnapshot {
    pub fn of(id: AgentId, state: &MovementState) -> Self {
        Self {
            id,
            position: state.position,
            heading:  state.heading,
            current:  state.current,
            target:   state.target,
            previous: state.previous,
        }
    }
}

/// Result of one [`Sim::step`][crate::Sim::step].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The tick that was just processed.
    pub tick:     Tick,
    /// Agents that reached a node this tick, in ascending `AgentId` order.
    pub arrivals: Vec<(AgentId, Arrival)>,
    /// Every agent's state after the tick; index = `AgentId`.
    pub agents:   Vec<AgentSnapshot>,
}

impl TickReport {
    pub fn player(&self) -> Option<&AgentSnapshot> {
        self.agents.first()
    }

    pub fn arrival_of(&self, agent: AgentId) -> Option<&Arrival> {
        self.arrivals.iter().find(|(a, _)| *a == agent).map(|(_, arr)| arr)
    }
}
