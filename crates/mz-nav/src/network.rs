//! Maze node graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! `edge_to`, `edge_dir`, and `edge_length` are parallel arrays sorted by
//! source node.  Within one node the edges keep the order they were added
//! in, so `neighbors(n)[i]` and `directions(n)[i]` always describe the same
//! edge and "first matching neighbour" is well defined.
//!
//! Travel directions and lengths are derived once, at build time, from the
//! node positions.  Nothing recomputes them afterwards.
//!
//! # Lookup indices
//!
//! - A cell index maps each node's rounded integer coordinate to its
//!   `NodeId` (the board lookup: at most one node per cell).
//! - An R-tree (via `rstar`) maps an arbitrary position to the nearest
//!   node.  Used to place agents at their spawn point.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::debug;

use mz_core::{NodeId, Vec2};

use crate::{NavError, NavResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NavNode ───────────────────────────────────────────────────────────────────

/// Borrowed view of one maze node.
///
/// `neighbors` and `travel_directions` have the same length;
/// `travel_directions[i]` is the unit vector from this node to
/// `neighbors[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavNode<'g> {
    pub id:                NodeId,
    pub position:          Vec2,
    pub neighbors:         &'g [NodeId],
    pub travel_directions: &'g [Vec2],
    /// Teleport destination if this node is a portal entrance.
    pub portal:            Option<NodeId>,
    /// Allowed to have no neighbours.
    pub dead_end:          bool,
}

impl NavNode<'_> {
    #[inline]
    pub fn is_portal(&self) -> bool {
        self.portal.is_some()
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Immutable maze graph in CSR format plus cell and spatial indices.
///
/// All array fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`NavGraphBuilder`] or
/// [`NavGraph::from_descriptors`].
pub struct NavGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Vec2>,

    /// Portal destination of each node (`None` for ordinary nodes).
    pub node_portal: Vec<Option<NodeId>>,

    /// Whether each node was declared a dead end.
    pub node_dead_end: Vec<bool>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (sorted by source node, insertion order within a node) ──
    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Unit travel direction of each edge.
    pub edge_dir: Vec<Vec2>,

    /// Euclidean length of each edge.  Used as the Dijkstra edge weight.
    pub edge_length: Vec<f32>,

    // ── Lookup indices ────────────────────────────────────────────────────
    cell_index:  FxHashMap<(i32, i32), NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl NavGraph {
    /// Build a graph from explicit node descriptors.
    ///
    /// Descriptor `i` becomes `NodeId(i)`; neighbour and portal references
    /// are indices into the same slice.  This is the pure
    /// descriptors → graph entry point used by the CSV loader.
    pub fn from_descriptors(nodes: &[NodeDescriptor]) -> NavResult<NavGraph> {
        let mut b = NavGraphBuilder::with_capacity(
            nodes.len(),
            nodes.iter().map(|n| n.neighbors.len()).sum(),
        );
        for desc in nodes {
            if desc.dead_end {
                b.add_dead_end(desc.position);
            } else {
                b.add_node(desc.position);
            }
        }
        for (i, desc) in nodes.iter().enumerate() {
            let from = NodeId(i as u32);
            for &n in &desc.neighbors {
                if n >= nodes.len() {
                    return Err(NavError::UnknownNode(n as u32));
                }
                b.add_directed_edge(from, NodeId(n as u32));
            }
            if let Some(p) = desc.portal {
                b.link_portal(from, NodeId(p as u32));
            }
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn portal_count(&self) -> usize {
        self.node_portal.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` is a valid id in this graph.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// Iterator over every node id, in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len()).map(|i| NodeId(i as u32))
    }

    // ── Node access ───────────────────────────────────────────────────────
    //
    // These index directly and panic on an id from another graph.

    #[inline]
    pub fn position(&self, node: NodeId) -> Vec2 {
        self.node_pos[node.index()]
    }

    #[inline]
    pub fn portal(&self, node: NodeId) -> Option<NodeId> {
        self.node_portal[node.index()]
    }

    #[inline]
    pub fn is_dead_end(&self, node: NodeId) -> bool {
        self.node_dead_end[node.index()]
    }

    #[inline]
    fn edge_range(&self, node: NodeId) -> std::ops::Range<usize> {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Neighbours of `node`, in insertion order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.edge_to[self.edge_range(node)]
    }

    /// Unit travel directions of `node`, parallel to [`neighbors`](Self::neighbors).
    #[inline]
    pub fn directions(&self, node: NodeId) -> &[Vec2] {
        &self.edge_dir[self.edge_range(node)]
    }

    /// Edge lengths of `node`, parallel to [`neighbors`](Self::neighbors).
    #[inline]
    pub fn edge_lengths(&self, node: NodeId) -> &[f32] {
        &self.edge_length[self.edge_range(node)]
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.edge_range(node).len()
    }

    /// Borrowed view of a single node.
    pub fn node(&self, node: NodeId) -> NavNode<'_> {
        NavNode {
            id:                node,
            position:          self.position(node),
            neighbors:         self.neighbors(node),
            travel_directions: self.directions(node),
            portal:            self.portal(node),
            dead_end:          self.is_dead_end(node),
        }
    }

    /// Travel direction of the edge `from → to`, if that edge exists.
    pub fn direction_to(&self, from: NodeId, to: NodeId) -> Option<Vec2> {
        self.neighbors(from)
            .iter()
            .position(|&n| n == to)
            .map(|i| self.directions(from)[i])
    }

    /// Length of the edge `from → to`, if that edge exists.
    pub fn edge_length_between(&self, from: NodeId, to: NodeId) -> Option<f32> {
        self.neighbors(from)
            .iter()
            .position(|&n| n == to)
            .map(|i| self.edge_lengths(from)[i])
    }

    /// Sum of edge lengths along `nodes`, or `None` if two consecutive
    /// nodes are not joined by an edge.  A single node has length 0.
    pub fn path_length(&self, nodes: &[NodeId]) -> Option<f32> {
        nodes
            .windows(2)
            .try_fold(0.0f32, |acc, w| Some(acc + self.edge_length_between(w[0], w[1])?))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node occupying the rounded cell of `pos`, if any.
    pub fn node_at(&self, pos: Vec2) -> Option<NodeId> {
        self.cell_index.get(&pos.grid_key()).copied()
    }

    /// Portal destination of the node at `pos`, if that node is a portal.
    pub fn portal_at(&self, pos: Vec2) -> Option<NodeId> {
        self.node_at(pos).and_then(|n| self.portal(n))
    }

    /// Return the `NodeId` of the node nearest to `pos`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn snap_to_node(&self, pos: Vec2) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }
}

// ── NodeDescriptor ────────────────────────────────────────────────────────────

/// One node as supplied by level data: where it is, what it connects to.
///
/// Indices refer to positions in the descriptor slice passed to
/// [`NavGraph::from_descriptors`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub position:  Vec2,
    pub neighbors: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub portal:    Option<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dead_end:  bool,
}

// ── NavGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`NavGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes, directed edges, and portal links in any
/// order.  `build()` validates everything, derives edge directions and
/// lengths, constructs the CSR arrays, and bulk-loads the indices.
///
/// # Example
///
/// ```
/// use mz_core::Vec2;
/// use mz_nav::NavGraphBuilder;
///
/// let mut b = NavGraphBuilder::new();
/// let a = b.add_node(Vec2::new(0.0, 0.0));
/// let c = b.add_node(Vec2::new(5.0, 0.0));
/// b.connect(a, c);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// assert_eq!(graph.directions(a), &[Vec2::RIGHT]);
/// ```
pub struct NavGraphBuilder {
    nodes:     Vec<RawNode>,
    raw_edges: Vec<RawEdge>,
    portals:   Vec<(NodeId, NodeId)>,
}

struct RawNode {
    pos:      Vec2,
    dead_end: bool,
}

struct RawEdge {
    from: NodeId,
    to:   NodeId,
}

impl NavGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new(), portals: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            portals:   Vec::new(),
        }
    }

    /// Add an intersection node and return its `NodeId` (sequential from 0).
    /// It must end up with at least one neighbour.
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        self.push_node(pos, false)
    }

    /// Add a node that is allowed to have no neighbours.
    pub fn add_dead_end(&mut self, pos: Vec2) -> NodeId {
        self.push_node(pos, true)
    }

    fn push_node(&mut self, pos: Vec2, dead_end: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RawNode { pos, dead_end });
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId) {
        self.raw_edges.push(RawEdge { from, to });
    }

    /// Add edges in **both directions**: an ordinary maze corridor.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        self.add_directed_edge(a, b);
        self.add_directed_edge(b, a);
    }

    /// Make `entrance` teleport agents to `exit` on arrival.
    pub fn link_portal(&mut self, entrance: NodeId, exit: NodeId) {
        self.portals.push((entrance, exit));
    }

    /// Link two portal nodes to each other (a wrap-around tunnel).
    pub fn link_portals(&mut self, a: NodeId, b: NodeId) {
        self.link_portal(a, b);
        self.link_portal(b, a);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Vec2 {
        self.nodes[id.index()].pos
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a validated [`NavGraph`].
    ///
    /// # Errors
    ///
    /// Any [`NavError`] construction error; the graph is all-or-nothing.
    pub fn build(self) -> NavResult<NavGraph> {
        let node_count = self.nodes.len();
        let node_pos: Vec<Vec2> = self.nodes.iter().map(|n| n.pos).collect();
        let in_range = |id: NodeId| id.index() < node_count;

        // ── Positions: finite and one node per rounded cell ───────────────
        let mut cell_index: FxHashMap<(i32, i32), NodeId> =
            FxHashMap::with_capacity_and_hasher(node_count, Default::default());
        for (i, &pos) in node_pos.iter().enumerate() {
            let id = NodeId(i as u32);
            if !pos.x.is_finite() || !pos.y.is_finite() {
                return Err(NavError::NonFinitePosition(id));
            }
            if let Some(&first) = cell_index.get(&pos.grid_key()) {
                return Err(NavError::DuplicatePosition { first, second: id, pos });
            }
            cell_index.insert(pos.grid_key(), id);
        }

        // ── Edges: endpoints exist, non-zero length ───────────────────────
        //
        // Stable sort: edges of one node keep their insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let mut edge_to     = Vec::with_capacity(raw.len());
        let mut edge_dir    = Vec::with_capacity(raw.len());
        let mut edge_length = Vec::with_capacity(raw.len());
        for e in &raw {
            for id in [e.from, e.to] {
                if !in_range(id) {
                    return Err(NavError::UnknownNode(id.0));
                }
            }
            let delta = node_pos[e.to.index()] - node_pos[e.from.index()];
            let dir = delta
                .try_normalize()
                .ok_or(NavError::ZeroLengthEdge { from: e.from, to: e.to })?;
            edge_to.push(e.to);
            edge_dir.push(dir);
            edge_length.push(delta.length());
        }

        // ── CSR row pointer ───────────────────────────────────────────────
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_to.len());

        let node_dead_end: Vec<bool> = self.nodes.iter().map(|n| n.dead_end).collect();
        for i in 0..node_count {
            if node_out_start[i] == node_out_start[i + 1] && !node_dead_end[i] {
                return Err(NavError::NoNeighbors(NodeId(i as u32)));
            }
        }

        // ── Portals: resolved only now that every node exists ─────────────
        let mut node_portal: Vec<Option<NodeId>> = vec![None; node_count];
        for &(entrance, exit) in &self.portals {
            if !in_range(entrance) {
                return Err(NavError::UnknownNode(entrance.0));
            }
            if !in_range(exit) {
                return Err(NavError::UnknownPortalTarget { portal: entrance, target: exit.0 });
            }
            if entrance == exit {
                return Err(NavError::PortalToSelf(entrance));
            }
            if node_portal[entrance.index()].is_some() {
                return Err(NavError::DuplicatePortal(entrance));
            }
            node_portal[entrance.index()] = Some(exit);
        }

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: [pos.x, pos.y], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let graph = NavGraph {
            node_pos,
            node_portal,
            node_dead_end,
            node_out_start,
            edge_to,
            edge_dir,
            edge_length,
            cell_index,
            spatial_idx,
        };
        debug!(
            nodes   = graph.node_count(),
            edges   = graph.edge_count(),
            portals = graph.portal_count(),
            "built nav graph"
        );
        Ok(graph)
    }
}

impl Default for NavGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
