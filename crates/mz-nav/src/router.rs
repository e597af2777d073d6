//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Pursuers call routing via the [`Router`] trait, so applications can swap
//! in custom implementations (A*, precomputed all-pairs tables) without
//! touching the movement code.  The default [`DijkstraRouter`] is enough for
//! maze-sized graphs.
//!
//! # Cost units
//!
//! Edge weights are Euclidean node-to-node distances in board units, read
//! from `NavGraph::edge_length`.

use tracing::trace;

use mz_core::NodeId;

use crate::network::NavGraph;

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query: the nodes to visit, source and target
/// inclusive, and the summed edge length.
///
/// An empty path means "no path": unreachable target, or nothing was asked.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// `nodes[0]` is the source, `nodes.last()` the target.
    pub nodes: Vec<NodeId>,
    /// Sum of Euclidean edge lengths along `nodes`.
    pub total_length: f32,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node to head for next: `nodes[1]`.  `None` for an empty path
    /// or when source and target coincide.
    pub fn next_hop(&self) -> Option<NodeId> {
        self.nodes.get(1).copied()
    }

    /// `true` if source and target are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// worker threads when pursuers are advanced in parallel.  The graph is
/// only ever borrowed immutably.
pub trait Router: Send + Sync {
    /// Shortest path from `source` to `target`.
    ///
    /// Returns an empty [`Path`] if no path exists or either id is not in
    /// `graph`; `source == target` yields the single-node path.
    fn route(&self, graph: &NavGraph, source: NodeId, target: NodeId) -> Path;

    /// Like [`route`](Self::route), but an absent endpoint means "no path
    /// requested yet" and yields an empty path.
    fn route_opt(&self, graph: &NavGraph, source: Option<NodeId>, target: Option<NodeId>) -> Path {
        match (source, target) {
            (Some(s), Some(t)) => self.route(graph, s, t),
            _ => Path::empty(),
        }
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dense Dijkstra: every step rescans the whole unvisited set for the
/// closest node.
///
/// O(V²) per query, which beats a heap for graphs of a few dozen nodes and
/// makes tie-breaking trivially deterministic: among equally close nodes the
/// lowest `NodeId` is settled first.  Any other tie order is equally
/// correct.  Holds no state; every call allocates its own tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &NavGraph, source: NodeId, target: NodeId) -> Path {
        dijkstra(graph, source, target)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(graph: &NavGraph, source: NodeId, target: NodeId) -> Path {
    if !graph.contains(source) || !graph.contains(target) {
        return Path::empty();
    }

    let n = graph.node_count();
    // dist[v] = best known length to reach v.
    let mut dist    = vec![f32::INFINITY; n];
    // prev[v] = node that reached v on the best known path.
    let mut prev    = vec![None::<NodeId>; n];
    let mut visited = vec![false; n];

    dist[source.index()] = 0.0;

    loop {
        // Closest unvisited node; strict `<` keeps the lowest id on ties and
        // never selects an unreached (infinite) node.
        let mut current = None;
        let mut best = f32::INFINITY;
        for (i, &d) in dist.iter().enumerate() {
            if !visited[i] && d < best {
                best = d;
                current = Some(NodeId(i as u32));
            }
        }

        let Some(node) = current else {
            // Everything left is unreachable from `source`.
            trace!(%source, %target, "no path");
            return Path::empty();
        };
        visited[node.index()] = true;

        if node == target {
            return reconstruct(&prev, target, best);
        }

        for (&neighbor, &len) in graph.neighbors(node).iter().zip(graph.edge_lengths(node)) {
            if visited[neighbor.index()] {
                continue;
            }
            let candidate = best + len;
            if candidate < dist[neighbor.index()] {
                dist[neighbor.index()] = candidate;
                prev[neighbor.index()] = Some(node);
            }
        }
    }
}

fn reconstruct(prev: &[Option<NodeId>], target: NodeId, total_length: f32) -> Path {
    let mut nodes = vec![target];
    let mut cur = target;
    while let Some(p) = prev[cur.index()] {
        nodes.push(p);
        cur = p;
    }
    nodes.reverse();
    Path { nodes, total_length }
}
