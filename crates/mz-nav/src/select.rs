//! Edge selection: which neighbour lies in a requested direction.

use mz_core::{NodeId, Vec2};

use crate::NavGraph;

/// How a requested direction is matched against a node's travel directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMatch {
    /// The travel direction must equal the request exactly.  Used for
    /// discrete cardinal intents; there is no angular tolerance.
    Exact,
    /// The travel direction must point the same way as the request on the
    /// request's dominant axis (x wins ties).  A greedy heading heuristic,
    /// not a shortest-path choice.
    Quadrant,
}

/// Return the first neighbour of `node` that matches `dir` under `mode`, or
/// `None` if no edge qualifies.
///
/// A zero `dir` never matches.
pub fn can_move(graph: &NavGraph, node: NodeId, dir: Vec2, mode: EdgeMatch) -> Option<NodeId> {
    let neighbors = graph.neighbors(node);
    let directions = graph.directions(node);
    let hit = match mode {
        EdgeMatch::Exact => {
            if dir.is_zero() {
                return None;
            }
            directions.iter().position(|&d| d == dir)
        }
        EdgeMatch::Quadrant => {
            let (axis, positive) = dominant_axis(dir)?;
            directions.iter().position(|&d| {
                let c = if axis == Axis::X { d.x } else { d.y };
                c != 0.0 && (c > 0.0) == positive
            })
        }
    };
    hit.map(|i| neighbors[i])
}

#[derive(PartialEq)]
enum Axis {
    X,
    Y,
}

/// Dominant axis of `dir` and whether it points the positive way.
fn dominant_axis(dir: Vec2) -> Option<(Axis, bool)> {
    if dir.is_zero() || !dir.x.is_finite() || !dir.y.is_finite() {
        return None;
    }
    if dir.x.abs() >= dir.y.abs() {
        Some((Axis::X, dir.x > 0.0))
    } else {
        Some((Axis::Y, dir.y > 0.0))
    }
}
