//! Pursuer next-hop policies.

use std::str::FromStr;

use tracing::trace;

use mz_core::{AgentRng, NodeId, Vec2};
use mz_motion::MovementState;
use mz_nav::{EdgeMatch, NavGraph, Router, can_move};

use crate::{PursuitError, TargetView};

/// How a pursuer picks its next node.  Selected per agent and switchable at
/// runtime.
///
/// Every variant answers `None` when nothing qualifies; the pursuer then
/// idles on its node and asks again next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PursuerPolicy {
    /// Shortest path from the node just reached to the target's resolved
    /// node; take its second node.
    #[default]
    GraphSearch,
    /// Head for the neighbour whose direction matches the bearing to the
    /// target's rounded position on the dominant axis.  Cheap, and easily
    /// trapped behind walls.
    GreedyDirection,
    /// Keep going straight; at a wall take the first non-reversing edge;
    /// reverse only at a dead end.  Ignores the target.
    FixedHeading,
    /// Uniformly random non-reversing edge (reversal only at a dead end).
    Wander,
}

impl PursuerPolicy {
    pub const ALL: [PursuerPolicy; 4] = [
        PursuerPolicy::GraphSearch,
        PursuerPolicy::GreedyDirection,
        PursuerPolicy::FixedHeading,
        PursuerPolicy::Wander,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PursuerPolicy::GraphSearch     => "graph_search",
            PursuerPolicy::GreedyDirection => "greedy_direction",
            PursuerPolicy::FixedHeading    => "fixed_heading",
            PursuerPolicy::Wander          => "wander",
        }
    }

    /// Next node for a pursuer standing on `me.current`.
    pub fn choose<R: Router + ?Sized>(
        self,
        graph:  &NavGraph,
        router: &R,
        me:     &MovementState,
        target: &TargetView,
        rng:    &mut AgentRng,
    ) -> Option<NodeId> {
        let hop = match self {
            PursuerPolicy::GraphSearch => router
                .route_opt(graph, me.previous, target.resolve_node())
                .next_hop(),
            PursuerPolicy::GreedyDirection => {
                let bearing = target.rounded_position() - me.position;
                can_move(graph, me.current?, bearing, EdgeMatch::Quadrant)
            }
            PursuerPolicy::FixedHeading => fixed_heading(graph, me),
            PursuerPolicy::Wander => wander(graph, me, rng),
        };
        if hop.is_none() {
            trace!(policy = self.as_str(), node = ?me.current, "no qualifying hop");
        }
        hop
    }
}

fn fixed_heading(graph: &NavGraph, me: &MovementState) -> Option<NodeId> {
    let node = me.current?;
    if let Some(straight) = can_move(graph, node, me.heading, EdgeMatch::Exact) {
        return Some(straight);
    }
    let neighbors = graph.neighbors(node);
    let directions = graph.directions(node);
    directions
        .iter()
        .position(|&d| !is_reversal(d, me.heading))
        .map(|i| neighbors[i])
        .or_else(|| neighbors.first().copied())
}

fn wander(graph: &NavGraph, me: &MovementState, rng: &mut AgentRng) -> Option<NodeId> {
    let node = me.current?;
    let forward: Vec<NodeId> = graph
        .neighbors(node)
        .iter()
        .zip(graph.directions(node))
        .filter(|&(_, &d)| !is_reversal(d, me.heading))
        .map(|(&n, _)| n)
        .collect();
    if forward.is_empty() {
        rng.choose(graph.neighbors(node)).copied()
    } else {
        rng.choose(&forward).copied()
    }
}

/// Would travelling along `dir` turn straight back along `heading`?
#[inline]
fn is_reversal(dir: Vec2, heading: Vec2) -> bool {
    !heading.is_zero() && dir == -heading
}

impl std::fmt::Display for PursuerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PursuerPolicy {
    type Err = PursuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        PursuerPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| PursuitError::UnknownPolicy(s.to_string()))
    }
}
