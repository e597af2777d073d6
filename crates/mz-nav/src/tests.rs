//! Unit tests for mz-nav.
//!
//! All tests use hand-crafted mazes so they run without any level files.

#[cfg(test)]
mod helpers {
    use mz_core::{NodeId, Vec2};
    use crate::{NavGraph, NavGraphBuilder};

    /// A small maze with a wrap-around tunnel.
    ///
    /// ```text
    ///   3 (0,10) ───────── 4 (10,10)
    ///   │                    │
    ///   0 (0,0) ── 1 (10,0) ── 2 (20,0)
    ///                          │
    ///   5 (-10,-10) ── 6 (0,-10)   7 (20,-10)
    /// ```
    ///
    /// Edges: 0-1, 1-2, 0-3, 3-4, 4-1, 2-7, 5-6.  Portals 5 ↔ 7 (a tunnel:
    /// reaching 7 puts you on 5 and vice versa).  5-6 is only reachable
    /// through the tunnel.
    pub fn maze() -> (NavGraph, [NodeId; 8]) {
        let mut b = NavGraphBuilder::new();
        let n0 = b.add_node(Vec2::new(0.0, 0.0));
        let n1 = b.add_node(Vec2::new(10.0, 0.0));
        let n2 = b.add_node(Vec2::new(20.0, 0.0));
        let n3 = b.add_node(Vec2::new(0.0, 10.0));
        let n4 = b.add_node(Vec2::new(10.0, 10.0));
        let n5 = b.add_node(Vec2::new(-10.0, -10.0));
        let n6 = b.add_node(Vec2::new(0.0, -10.0));
        let n7 = b.add_node(Vec2::new(20.0, -10.0));
        b.connect(n0, n1);
        b.connect(n1, n2);
        b.connect(n0, n3);
        b.connect(n3, n4);
        b.connect(n4, n1);
        b.connect(n2, n7);
        b.connect(n5, n6);
        b.link_portals(n5, n7);
        (b.build().unwrap(), [n0, n1, n2, n3, n4, n5, n6, n7])
    }

    /// N0(0,0) ─ N1(5,0) ─ N2(5,5)
    pub fn elbow() -> (NavGraph, [NodeId; 3]) {
        let mut b = NavGraphBuilder::new();
        let n0 = b.add_node(Vec2::new(0.0, 0.0));
        let n1 = b.add_node(Vec2::new(5.0, 0.0));
        let n2 = b.add_node(Vec2::new(5.0, 5.0));
        b.connect(n0, n1);
        b.connect(n1, n2);
        (b.build().unwrap(), [n0, n1, n2])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use mz_core::{NodeId, Vec2};
    use crate::{NavError, NavGraph, NavGraphBuilder, NodeDescriptor};

    #[test]
    fn empty_build() {
        let g = NavGraphBuilder::new().build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn directions_are_unit_and_symmetric() {
        let (g, _) = super::helpers::maze();
        for a in g.node_ids() {
            let node = g.node(a);
            assert_eq!(node.neighbors.len(), node.travel_directions.len());
            for (&b, &dir) in node.neighbors.iter().zip(node.travel_directions) {
                let expected = (g.position(b) - g.position(a)).try_normalize().unwrap();
                assert_eq!(dir, expected);
                assert!((dir.length() - 1.0).abs() < 1e-6);
                // Every corridor in the fixture is two-way.
                assert_eq!(g.direction_to(b, a), Some(-dir));
            }
        }
    }

    #[test]
    fn neighbor_order_is_insertion_order() {
        let (g, [n0, n1, n2, _, n4, ..]) = super::helpers::maze();
        // n1 edges were added as: 1→0 (connect 0-1), 1→2, 1→4 (connect 4-1).
        assert_eq!(g.neighbors(n1), &[n0, n2, n4]);
        assert_eq!(g.directions(n1), &[Vec2::LEFT, Vec2::RIGHT, Vec2::UP]);
    }

    #[test]
    fn edge_lengths_are_euclidean() {
        let (g, [n0, n1, _, n3, ..]) = super::helpers::maze();
        assert_eq!(g.edge_length_between(n0, n1), Some(10.0));
        assert_eq!(g.edge_length_between(n0, n3), Some(10.0));
        assert_eq!(g.edge_length_between(n1, n3), None);
    }

    #[test]
    fn portals_are_relations() {
        let (g, [n0, .., n5, _, n7]) = super::helpers::maze();
        assert_eq!(g.portal(n5), Some(n7));
        assert_eq!(g.portal(n7), Some(n5));
        assert_eq!(g.portal(n0), None);
        assert!(g.node(n7).is_portal());
        assert_eq!(g.portal_count(), 2);
    }

    #[test]
    fn zero_length_edge_rejected() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        b.add_directed_edge(a, a);
        assert!(matches!(b.build(), Err(NavError::ZeroLengthEdge { .. })));
    }

    #[test]
    fn duplicate_rounded_position_rejected() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(1.0, 1.0));
        let c = b.add_node(Vec2::new(1.2, 0.9)); // same cell once rounded
        b.connect(a, c);
        let err = b.build().err().unwrap();
        assert!(matches!(err, NavError::DuplicatePosition { first, second, .. }
            if first == a && second == c));
    }

    #[test]
    fn unknown_neighbor_rejected() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        b.add_directed_edge(a, NodeId(9));
        assert!(matches!(b.build(), Err(NavError::UnknownNode(9))));
    }

    #[test]
    fn portal_errors() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        let c = b.add_node(Vec2::new(1.0, 0.0));
        b.connect(a, c);
        b.link_portal(a, NodeId(5));
        assert!(matches!(b.build(), Err(NavError::UnknownPortalTarget { target: 5, .. })));

        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        let c = b.add_node(Vec2::new(1.0, 0.0));
        b.connect(a, c);
        b.link_portal(a, a);
        assert!(matches!(b.build(), Err(NavError::PortalToSelf(_))));

        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        let c = b.add_node(Vec2::new(1.0, 0.0));
        b.connect(a, c);
        b.link_portal(a, c);
        b.link_portal(a, c);
        assert!(matches!(b.build(), Err(NavError::DuplicatePortal(_))));
    }

    #[test]
    fn isolated_node_needs_dead_end_flag() {
        let mut b = NavGraphBuilder::new();
        b.add_node(Vec2::new(0.0, 0.0));
        assert!(matches!(b.build(), Err(NavError::NoNeighbors(_))));

        let mut b = NavGraphBuilder::new();
        let d = b.add_dead_end(Vec2::new(0.0, 0.0));
        let g = b.build().unwrap();
        assert!(g.is_dead_end(d));
        assert_eq!(g.out_degree(d), 0);
    }

    #[test]
    fn non_finite_position_rejected() {
        let mut b = NavGraphBuilder::new();
        b.add_dead_end(Vec2::new(f32::NAN, 0.0));
        assert!(matches!(b.build(), Err(NavError::NonFinitePosition(_))));
    }

    #[test]
    fn from_descriptors_matches_builder() {
        let descs = vec![
            NodeDescriptor { position: Vec2::new(0.0, 0.0), neighbors: vec![1], portal: None, dead_end: false },
            NodeDescriptor { position: Vec2::new(0.0, 4.0), neighbors: vec![0], portal: Some(0), dead_end: false },
        ];
        let g = NavGraph::from_descriptors(&descs).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.directions(NodeId(0)), &[Vec2::UP]);
        assert_eq!(g.directions(NodeId(1)), &[Vec2::DOWN]);
        assert_eq!(g.portal(NodeId(1)), Some(NodeId(0)));
    }

    #[test]
    fn from_descriptors_rejects_out_of_range_neighbor() {
        let descs = vec![NodeDescriptor {
            position: Vec2::new(0.0, 0.0),
            neighbors: vec![3],
            portal: None,
            dead_end: false,
        }];
        assert!(matches!(NavGraph::from_descriptors(&descs), Err(NavError::UnknownNode(3))));
    }
}

// ── Spatial lookup ────────────────────────────────────────────────────────────

#[cfg(test)]
mod lookup {
    use mz_core::Vec2;

    #[test]
    fn node_at_rounds_position() {
        let (g, [n0, n1, ..]) = super::helpers::maze();
        assert_eq!(g.node_at(Vec2::new(0.3, -0.4)), Some(n0));
        assert_eq!(g.node_at(Vec2::new(9.6, 0.0)), Some(n1));
        assert_eq!(g.node_at(Vec2::new(5.0, 0.0)), None);
    }

    #[test]
    fn portal_at_position() {
        let (g, [n0, .., n5, _, n7]) = super::helpers::maze();
        assert_eq!(g.portal_at(g.position(n7)), Some(n5));
        assert_eq!(g.portal_at(g.position(n0)), None);
        assert_eq!(g.portal_at(Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn snap_nearest() {
        let (g, [n0, n1, ..]) = super::helpers::maze();
        assert_eq!(g.snap_to_node(Vec2::new(4.0, 0.5)), Some(n0));
        assert_eq!(g.snap_to_node(Vec2::new(6.0, 0.5)), Some(n1));
    }

    #[test]
    fn empty_graph_snaps_to_nothing() {
        let g = crate::NavGraphBuilder::new().build().unwrap();
        assert!(g.snap_to_node(Vec2::ZERO).is_none());
    }

    #[test]
    fn path_length_requires_edges() {
        let (g, [n0, n1, n2, n3, ..]) = super::helpers::maze();
        assert_eq!(g.path_length(&[n0, n1, n2]), Some(20.0));
        assert_eq!(g.path_length(&[n0]), Some(0.0));
        assert_eq!(g.path_length(&[n3, n2]), None);
    }
}

// ── Edge selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod select {
    use mz_core::Vec2;
    use crate::{EdgeMatch, can_move};

    #[test]
    fn exact_match() {
        let (g, [n0, n1, n2, _, n4, ..]) = super::helpers::maze();
        assert_eq!(can_move(&g, n1, Vec2::RIGHT, EdgeMatch::Exact), Some(n2));
        assert_eq!(can_move(&g, n1, Vec2::LEFT, EdgeMatch::Exact), Some(n0));
        assert_eq!(can_move(&g, n1, Vec2::UP, EdgeMatch::Exact), Some(n4));
        assert_eq!(can_move(&g, n1, Vec2::DOWN, EdgeMatch::Exact), None);
    }

    #[test]
    fn exact_has_no_tolerance() {
        let (g, [_, n1, ..]) = super::helpers::maze();
        assert_eq!(can_move(&g, n1, Vec2::new(1.0, 0.001), EdgeMatch::Exact), None);
        assert_eq!(can_move(&g, n1, Vec2::ZERO, EdgeMatch::Exact), None);
    }

    #[test]
    fn quadrant_uses_dominant_axis() {
        let (g, [n0, n1, n2, _, n4, ..]) = super::helpers::maze();
        // Mostly right, slightly down → right.
        assert_eq!(can_move(&g, n1, Vec2::new(8.0, -3.0), EdgeMatch::Quadrant), Some(n2));
        // Mostly up → n4.
        assert_eq!(can_move(&g, n1, Vec2::new(-1.0, 6.0), EdgeMatch::Quadrant), Some(n4));
        // Mostly left → n0.
        assert_eq!(can_move(&g, n1, Vec2::new(-6.0, 1.0), EdgeMatch::Quadrant), Some(n0));
        // Tie: x wins.
        assert_eq!(can_move(&g, n1, Vec2::new(2.0, 2.0), EdgeMatch::Quadrant), Some(n2));
    }

    #[test]
    fn quadrant_no_candidate() {
        let (g, [_, n1, ..]) = super::helpers::maze();
        // Mostly down; n1 has no downward edge.
        assert_eq!(can_move(&g, n1, Vec2::new(1.0, -9.0), EdgeMatch::Quadrant), None);
        assert_eq!(can_move(&g, n1, Vec2::ZERO, EdgeMatch::Quadrant), None);
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use mz_core::{NodeId, Vec2};
    use crate::{DijkstraRouter, NavGraphBuilder, Router};

    #[test]
    fn same_node_is_single_element_path() {
        let (g, [n0, ..]) = super::helpers::maze();
        let p = DijkstraRouter.route(&g, n0, n0);
        assert_eq!(p.nodes, vec![n0]);
        assert_eq!(p.total_length, 0.0);
        assert!(p.is_trivial());
        assert_eq!(p.next_hop(), None);
    }

    #[test]
    fn elbow_scenario() {
        let (g, [n0, n1, n2]) = super::helpers::elbow();
        let p = DijkstraRouter.route(&g, n0, n2);
        assert_eq!(p.nodes, vec![n0, n1, n2]);
        assert_eq!(p.total_length, 10.0);
        assert_eq!(p.next_hop(), Some(n1));
    }

    #[test]
    fn picks_shorter_of_two_routes() {
        let (g, [n0, n1, _, n3, n4, ..]) = super::helpers::maze();
        // 0→1→4 = 20, 0→3→4 = 20: equal; either is optimal.
        let p = DijkstraRouter.route(&g, n0, n4);
        assert_eq!(p.total_length, 20.0);
        assert!(p.nodes == vec![n0, n1, n4] || p.nodes == vec![n0, n3, n4]);
        // 3→0→1→2 and 3→4→1→2 both cost 30.
        let p = DijkstraRouter.route(&g, n3, NodeId(2));
        assert_eq!(p.total_length, 30.0);
    }

    #[test]
    fn weight_equals_sum_of_edges() {
        let (g, nodes) = super::helpers::maze();
        for &s in &nodes[..5] {
            for &t in &nodes[..5] {
                let p = DijkstraRouter.route(&g, s, t);
                assert_eq!(p.nodes.first(), Some(&s));
                assert_eq!(p.nodes.last(), Some(&t));
                assert_eq!(g.path_length(&p.nodes), Some(p.total_length));
            }
        }
    }

    #[test]
    fn portals_are_not_edges() {
        // 5-6 is only reachable through the tunnel, which routing ignores.
        let (g, [n0, .., n6, _]) = super::helpers::maze();
        assert!(DijkstraRouter.route(&g, n0, n6).is_empty());
    }

    #[test]
    fn disconnected_is_empty() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_dead_end(Vec2::new(0.0, 0.0));
        let c = b.add_dead_end(Vec2::new(3.0, 0.0));
        let g = b.build().unwrap();
        let p = DijkstraRouter.route(&g, a, c);
        assert!(p.is_empty());
        assert_eq!(p.next_hop(), None);
    }

    #[test]
    fn one_way_edge_blocks_return() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        let c = b.add_dead_end(Vec2::new(0.0, 1.0));
        b.add_directed_edge(a, c);
        let g = b.build().unwrap();
        assert_eq!(DijkstraRouter.route(&g, a, c).nodes, vec![a, c]);
        assert!(DijkstraRouter.route(&g, c, a).is_empty());
    }

    #[test]
    fn absent_or_foreign_endpoints_give_empty_path() {
        let (g, [n0, ..]) = super::helpers::maze();
        assert!(DijkstraRouter.route_opt(&g, None, Some(n0)).is_empty());
        assert!(DijkstraRouter.route_opt(&g, Some(n0), None).is_empty());
        assert!(DijkstraRouter.route(&g, n0, NodeId(999)).is_empty());
        assert_eq!(DijkstraRouter.route_opt(&g, Some(n0), Some(n0)).nodes, vec![n0]);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let (g, [n0, _, _, _, n4, ..]) = super::helpers::maze();
        let first = DijkstraRouter.route(&g, n0, n4);
        for _ in 0..10 {
            assert_eq!(DijkstraRouter.route(&g, n0, n4), first);
        }
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use mz_core::{NodeId, Vec2};
    use crate::{NavError, load_graph_reader};

    const MAZE_CSV: &str = "\
id,x,y,neighbors,portal,dead_end
2,20,0,1,0,
0,0,0,1;3,2,
1,10,0,0;2,,
3,0,10,,,true
";

    #[test]
    fn loads_rows_in_any_order() {
        let g = load_graph_reader(Cursor::new(MAZE_CSV)).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.position(NodeId(2)), Vec2::new(20.0, 0.0));
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1), NodeId(3)]);
        assert_eq!(g.directions(NodeId(0)), &[Vec2::RIGHT, Vec2::UP]);
        assert_eq!(g.portal(NodeId(2)), Some(NodeId(0)));
        assert_eq!(g.portal(NodeId(0)), Some(NodeId(2)));
        assert!(g.is_dead_end(NodeId(3)));
        assert_eq!(g.out_degree(NodeId(3)), 0);
    }

    #[test]
    fn gap_in_ids_is_parse_error() {
        let csv = "id,x,y,neighbors,portal,dead_end\n0,0,0,,,true\n2,1,0,,,true\n";
        assert!(matches!(load_graph_reader(Cursor::new(csv)), Err(NavError::Parse(_))));
    }

    #[test]
    fn bad_neighbor_token_is_parse_error() {
        let csv = "id,x,y,neighbors,portal,dead_end\n0,0,0,one,,\n";
        assert!(matches!(load_graph_reader(Cursor::new(csv)), Err(NavError::Parse(_))));
    }

    #[test]
    fn construction_errors_propagate() {
        let csv = "id,x,y,neighbors,portal,dead_end\n0,0,0,0,,\n";
        assert!(matches!(
            load_graph_reader(Cursor::new(csv)),
            Err(NavError::ZeroLengthEdge { .. })
        ));
    }
}

// ── Optimality against brute force ────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use proptest::prelude::*;

    use mz_core::{NodeId, Vec2};
    use crate::{DijkstraRouter, NavGraph, NavGraphBuilder, Router};

    /// 3×3 grid with irregular spacing; `mask` selects which of the 12 grid
    /// corridors exist.  Every node is a dead end so any mask is valid.
    fn grid(gaps_x: [u8; 2], gaps_y: [u8; 2], mask: u16) -> NavGraph {
        let xs = [0.0, gaps_x[0] as f32, (gaps_x[0] + gaps_x[1]) as f32];
        let ys = [0.0, gaps_y[0] as f32, (gaps_y[0] + gaps_y[1]) as f32];
        let mut b = NavGraphBuilder::new();
        for &y in &ys {
            for &x in &xs {
                b.add_dead_end(Vec2::new(x, y));
            }
        }
        let id = |r: usize, c: usize| NodeId((r * 3 + c) as u32);
        let mut bit = 0;
        for r in 0..3 {
            for c in 0..3 {
                if c < 2 {
                    if mask & (1 << bit) != 0 {
                        b.connect(id(r, c), id(r, c + 1));
                    }
                    bit += 1;
                }
                if r < 2 {
                    if mask & (1 << bit) != 0 {
                        b.connect(id(r, c), id(r + 1, c));
                    }
                    bit += 1;
                }
            }
        }
        b.build().unwrap()
    }

    /// Shortest simple-path length by exhaustive DFS.
    fn brute_force(g: &NavGraph, s: NodeId, t: NodeId) -> Option<f32> {
        fn dfs(g: &NavGraph, cur: NodeId, t: NodeId, seen: &mut Vec<bool>, len: f32, best: &mut Option<f32>) {
            if cur == t {
                *best = Some(best.map_or(len, |b| b.min(len)));
                return;
            }
            for (&n, &l) in g.neighbors(cur).iter().zip(g.edge_lengths(cur)) {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    dfs(g, n, t, seen, len + l, best);
                    seen[n.index()] = false;
                }
            }
        }
        let mut seen = vec![false; g.node_count()];
        seen[s.index()] = true;
        let mut best = None;
        dfs(g, s, t, &mut seen, 0.0, &mut best);
        best
    }

    proptest! {
        #[test]
        fn dijkstra_is_optimal(
            gaps_x in prop::array::uniform2(1u8..6),
            gaps_y in prop::array::uniform2(1u8..6),
            mask in 0u16..(1 << 12),
            s in 0u32..9,
            t in 0u32..9,
        ) {
            let g = grid(gaps_x, gaps_y, mask);
            let (s, t) = (NodeId(s), NodeId(t));
            let path = DijkstraRouter.route(&g, s, t);

            match brute_force(&g, s, t) {
                None => prop_assert!(path.is_empty()),
                Some(best) => {
                    prop_assert_eq!(path.nodes.first(), Some(&s));
                    prop_assert_eq!(path.nodes.last(), Some(&t));
                    let along = g.path_length(&path.nodes);
                    prop_assert_eq!(along, Some(path.total_length));
                    prop_assert!((path.total_length - best).abs() < 1e-4,
                        "dijkstra {} vs brute force {}", path.total_length, best);
                }
            }
        }
    }
}
