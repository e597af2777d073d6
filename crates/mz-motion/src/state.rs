//! Per-agent movement state.

use mz_core::{ArrivalBoundary, Direction, NodeId, Vec2};
use mz_nav::NavGraph;

/// The movement state for a single agent.
///
/// An agent is either **at a node** (`current` is set, `target` is not) or
/// **in transit** (`current` is `None`, travelling from `previous` to
/// `target`).  `position == graph.position(current)` whenever `current` is
/// set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementState {
    /// Node the agent is standing on.  `None` while in transit.
    pub current: Option<NodeId>,

    /// Node the current edge started from.  After an arrival this is the
    /// node arrived at (the portal exit if a portal was taken).
    pub previous: Option<NodeId>,

    /// Node the agent is heading to.  `None` while idle.
    pub target: Option<NodeId>,

    /// Continuous position on the maze plane.
    pub position: Vec2,

    /// Unit direction of travel along the current edge, or zero when
    /// stationary.
    pub heading: Vec2,

    /// Queued directional intent (player only).  Applied at the next node
    /// where an edge in that direction exists, or immediately when it is the
    /// exact reverse of `heading`.
    pub pending: Option<Direction>,
}

impl MovementState {
    /// A stationary agent standing on `node`.
    pub fn placed(graph: &NavGraph, node: NodeId) -> Self {
        Self {
            current:  Some(node),
            previous: Some(node),
            target:   None,
            position: graph.position(node),
            heading:  Vec2::ZERO,
            pending:  None,
        }
    }

    /// `true` while travelling along an edge.
    #[inline]
    pub fn in_transit(&self) -> bool {
        self.target.is_some() && self.target != self.current
    }

    /// `true` when the agent has no edge to follow.
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.in_transit()
    }

    /// Has the agent moved far enough along `previous → target` to count as
    /// arrived?
    ///
    /// `None` if `previous` or `target` is unset; the test is meaningless
    /// without an edge.
    pub fn has_overshot(&self, graph: &NavGraph, boundary: ArrivalBoundary) -> Option<bool> {
        let previous = self.previous?;
        let target   = self.target?;
        Some(overshot(
            self.position,
            graph.position(target),
            graph.position(previous),
            boundary,
        ))
    }

    /// The heading as a cardinal direction, if it is one.
    pub fn heading_direction(&self) -> Option<Direction> {
        Direction::from_vec(self.heading)
    }
}

/// The overshoot arrival test.
///
/// Compares squared distances from the edge origin `previous_pos`: the agent
/// has arrived once its own distance exceeds the target's (`Exclusive`) or
/// reaches it (`Inclusive`).  No square roots are taken.
#[inline]
pub fn overshot(position: Vec2, target_pos: Vec2, previous_pos: Vec2, boundary: ArrivalBoundary) -> bool {
    let node_to_self   = position.distance_squared(previous_pos);
    let node_to_target = target_pos.distance_squared(previous_pos);
    boundary.passed(node_to_self, node_to_target)
}
