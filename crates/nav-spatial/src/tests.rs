//! Unit tests for nav-spatial.
//!
//! All tests use hand-crafted graphs or the built-in topology so they run
//! without any CSV file on disk.

#[cfg(test)]
mod helpers {
    use nav_core::{Coordinate, NodeId};
    use crate::{SurfaceKind, TopologyBuilder, TopologyGraph};

    /// Diamond between S and T with two branches of similar length.
    ///
    /// ```text
    ///        U (paved, ~157 m per side)
    ///      /   \
    ///     S     T
    ///      \   /
    ///        L (unpaved, slightly shorter)
    /// ```
    pub fn diamond() -> (TopologyGraph, [NodeId; 4]) {
        let mut b = TopologyBuilder::new();
        let s = b.add_node("s", Coordinate::new(0.0, 0.0));
        let u = b.add_node("u", Coordinate::new(0.0010, 0.001));
        let l = b.add_node("l", Coordinate::new(-0.0008, 0.001));
        let t = b.add_node("t", Coordinate::new(0.0, 0.002));
        b.add_road(s, u, SurfaceKind::Paved, false).unwrap();
        b.add_road(u, t, SurfaceKind::Paved, false).unwrap();
        b.add_road(s, l, SurfaceKind::Unpaved, false).unwrap();
        b.add_road(l, t, SurfaceKind::Unpaved, false).unwrap();
        (b.build(), [s, u, l, t])
    }

    /// Three nodes in a line, ~100 m apart: A–B paved flat, B–C unpaved hilly.
    pub fn line_abc() -> (TopologyGraph, [Coordinate; 3]) {
        let a = Coordinate::new(0.0, 0.0);
        let b_pos = a.destination(100.0, 0.0);
        let c = b_pos.destination(100.0, 0.0);
        let mut b = TopologyBuilder::new();
        let na = b.add_node("A", a);
        let nb = b.add_node("B", b_pos);
        let nc = b.add_node("C", c);
        b.add_road(na, nb, SurfaceKind::Paved, false).unwrap();
        b.add_road(nb, nc, SurfaceKind::Unpaved, true).unwrap();
        (b.build(), [a, b_pos, c])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use nav_core::{Coordinate, NodeId};
    use crate::{SpatialError, SurfaceKind, TopologyBuilder};

    #[test]
    fn empty_build() {
        let net = TopologyBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn road_weight_is_geodesic_and_symmetric() {
        let mut b = TopologyBuilder::new();
        let pa = Coordinate::new(30.0, -88.0);
        let pc = Coordinate::new(30.01, -88.0);
        let a = b.add_node("a", pa);
        let c = b.add_node("c", pc);
        b.add_road(a, c, SurfaceKind::Unpaved, true).unwrap();
        let net = b.build();

        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.road_count(), 1);
        let ac: Vec<_> = net.neighbors(a).collect();
        let ca: Vec<_> = net.neighbors(c).collect();
        assert_eq!(ac.len(), 1);
        assert_eq!(ca.len(), 1);
        assert_eq!(ac[0].target, c);
        assert_eq!(ca[0].target, a);
        assert_eq!(ac[0].weight_m, pa.distance_m(pc));
        assert_eq!(ac[0].weight_m, ca[0].weight_m);
        assert_eq!(ca[0].surface, SurfaceKind::Unpaved);
        assert!(ca[0].hilly);
    }

    #[test]
    fn neighbors_keep_definition_order() {
        let mut b = TopologyBuilder::new();
        let hub = b.add_node("hub", Coordinate::new(0.0, 0.0));
        let spokes: Vec<NodeId> = (0..4)
            .map(|i| b.add_node(format!("s{i}"), Coordinate::new(0.001 * (i + 1) as f64, 0.0)))
            .collect();
        // Define roads out of id order.
        for &i in &[2usize, 0, 3, 1] {
            b.add_road(hub, spokes[i], SurfaceKind::Paved, false).unwrap();
        }
        let net = b.build();
        let order: Vec<NodeId> = net.neighbors(hub).map(|e| e.target).collect();
        assert_eq!(order, vec![spokes[2], spokes[0], spokes[3], spokes[1]]);
    }

    #[test]
    fn road_to_unknown_node_errors() {
        let mut b = TopologyBuilder::new();
        let a = b.add_node("a", Coordinate::new(0.0, 0.0));
        let result = b.add_road(a, NodeId(9), SurfaceKind::Paved, false);
        assert!(matches!(result, Err(SpatialError::NodeNotFound(NodeId(9)))));
    }

    #[test]
    fn name_lookup() {
        let (net, [_, u, ..]) = super::helpers::diamond();
        assert_eq!(net.node_by_name("u"), Some(u));
        assert_eq!(net.name(u), Some("u"));
        assert_eq!(net.node_by_name("missing"), None);
    }
}

// ── Nearest-node lookup ───────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use nav_core::Coordinate;
    use crate::TopologyBuilder;

    #[test]
    fn exact_position() {
        let (net, [s, ..]) = super::helpers::diamond();
        assert_eq!(net.nearest_node(Coordinate::new(0.0, 0.0)), Some(s));
    }

    #[test]
    fn nearest_by_distance() {
        let (net, [s, _, _, t]) = super::helpers::diamond();
        assert_eq!(net.nearest_node(Coordinate::new(0.0, 0.0004)), Some(s));
        assert_eq!(net.nearest_node(Coordinate::new(0.0, 0.0017)), Some(t));
    }

    #[test]
    fn ties_go_to_first_defined() {
        let mut b = TopologyBuilder::new();
        let first = b.add_node("east", Coordinate::new(0.0, 0.001));
        let _second = b.add_node("west", Coordinate::new(0.0, -0.001));
        let net = b.build();
        assert_eq!(net.nearest_node(Coordinate::new(0.0, 0.0)), Some(first));
    }

    #[test]
    fn empty_graph_returns_none() {
        let net = TopologyBuilder::new().build();
        assert!(net.nearest_node(Coordinate::new(0.0, 0.0)).is_none());
    }
}

// ── Preferences ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod prefs {
    use nav_core::NodeId;
    use crate::{GraphEdge, RoutingPreferences, SurfaceKind};

    fn edge(surface: SurfaceKind, hilly: bool) -> GraphEdge {
        GraphEdge { target: NodeId(0), weight_m: 100.0, surface, hilly }
    }

    #[test]
    fn defaults_are_neutral() {
        let p = RoutingPreferences::default();
        for surface in [SurfaceKind::Paved, SurfaceKind::Unpaved] {
            for hilly in [false, true] {
                assert_eq!(p.penalty(&edge(surface, hilly)), 1.0);
            }
        }
    }

    #[test]
    fn penalties_stack_multiplicatively() {
        let p = RoutingPreferences { prefer_paved: true, avoid_hills: true, allow_highways: true };
        assert_eq!(p.penalty(&edge(SurfaceKind::Unpaved, true)), 15.0);
        assert_eq!(p.edge_cost(&edge(SurfaceKind::Unpaved, true)), 1_500.0);

        let q = RoutingPreferences { prefer_paved: false, avoid_hills: true, allow_highways: false };
        assert_eq!(q.penalty(&edge(SurfaceKind::Paved, true)), 10.0);
        assert_eq!(q.penalty(&edge(SurfaceKind::Unpaved, false)), 1.0);
    }
}

// ── A* search and planning ────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use nav_core::Coordinate;
    use crate::{
        AStarPathfinder, Pathfinder, RoutingPreferences, SpatialError, SurfaceKind,
        TopologyBuilder, TopologyGraph, default_topology, path_cost,
    };

    #[test]
    fn shortest_path_without_preferences() {
        let (net, [s, _, l, t]) = super::helpers::diamond();
        let path = AStarPathfinder
            .search(&net, s, t, &RoutingPreferences::default())
            .unwrap();
        // Lower (unpaved) branch is physically shorter.
        assert_eq!(path, vec![s, l, t]);
    }

    #[test]
    fn prefer_paved_takes_paved_branch() {
        let (net, [s, u, l, t]) = super::helpers::diamond();
        let prefs = RoutingPreferences { prefer_paved: true, ..Default::default() };
        let path = AStarPathfinder.search(&net, s, t, &prefs).unwrap();
        assert_eq!(path, vec![s, u, t]);

        // The chosen path is never costlier than the unpaved alternative.
        let chosen = path_cost(&net, &path, &prefs).unwrap();
        let unpaved = path_cost(&net, &[s, l, t], &prefs).unwrap();
        assert!(chosen <= unpaved);
    }

    #[test]
    fn no_highways_penalises_paved() {
        let (net, [s, _, l, t]) = super::helpers::diamond();
        let prefs = RoutingPreferences { allow_highways: false, ..Default::default() };
        let path = AStarPathfinder.search(&net, s, t, &prefs).unwrap();
        assert_eq!(path, vec![s, l, t]);
    }

    #[test]
    fn only_path_is_kept_even_when_penalised() {
        let (net, [a, b, c]) = super::helpers::line_abc();
        let prefs = RoutingPreferences { prefer_paved: true, avoid_hills: true, ..Default::default() };
        let route = AStarPathfinder.plan(&net, a, c, &prefs);
        assert_eq!(route, vec![a, b, c]);
    }

    #[test]
    fn plan_pins_exact_endpoints() {
        let (net, [_, u, _, _]) = super::helpers::diamond();
        let start = Coordinate::new(0.0001, -0.0001);
        let end = Coordinate::new(0.0001, 0.0021);
        let prefs = RoutingPreferences { prefer_paved: true, ..Default::default() };
        let route = AStarPathfinder.plan(&net, start, end, &prefs);

        assert_eq!(route.first(), Some(&start));
        assert_eq!(route.last(), Some(&end));
        // s replaced by start, u kept, t kept, end appended.
        assert_eq!(route.len(), 4);
        assert_eq!(route[1], net.node_pos[u.index()]);
    }

    #[test]
    fn same_snapped_node_is_direct() {
        let (net, _) = super::helpers::diamond();
        let start = Coordinate::new(0.00001, 0.0);
        let end = Coordinate::new(-0.00001, 0.00002);
        let route = AStarPathfinder.plan(&net, start, end, &RoutingPreferences::default());
        assert_eq!(route, vec![start, end]);
    }

    #[test]
    fn empty_graph_is_direct() {
        let net = TopologyGraph::empty();
        let start = Coordinate::new(1.0, 1.0);
        let end = Coordinate::new(1.01, 1.0);
        let route = AStarPathfinder.plan(&net, start, end, &RoutingPreferences::default());
        assert_eq!(route, vec![start, end]);
    }

    #[test]
    fn disconnected_is_direct() {
        let mut b = TopologyBuilder::new();
        let a = b.add_node("a", Coordinate::new(0.0, 0.0));
        let a2 = b.add_node("a2", Coordinate::new(0.0, 0.001));
        let c = b.add_node("c", Coordinate::new(0.01, 0.0));
        let c2 = b.add_node("c2", Coordinate::new(0.01, 0.001));
        b.add_road(a, a2, SurfaceKind::Paved, false).unwrap();
        b.add_road(c, c2, SurfaceKind::Paved, false).unwrap();
        let net = b.build();

        let result = AStarPathfinder.search(&net, a, c, &RoutingPreferences::default());
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));

        let start = Coordinate::new(0.0, 0.0001);
        let end = Coordinate::new(0.01, 0.0001);
        let route = AStarPathfinder.plan(&net, start, end, &RoutingPreferences::default());
        assert_eq!(route, vec![start, end]);
    }

    #[test]
    fn search_is_deterministic() {
        let net = default_topology().unwrap();
        let from = net.node_by_name("north_gate").unwrap();
        let to = net.node_by_name("boatyard").unwrap();
        let prefs = RoutingPreferences::default();
        let first = AStarPathfinder.search(&net, from, to, &prefs).unwrap();
        for _ in 0..10 {
            assert_eq!(AStarPathfinder.search(&net, from, to, &prefs).unwrap(), first);
        }
    }

    #[test]
    fn avoid_hills_detours_through_town() {
        let net = default_topology().unwrap();
        let from = net.node_by_name("water_tower").unwrap();
        let to = net.node_by_name("quarry_road").unwrap();
        let prefs = RoutingPreferences { avoid_hills: true, ..Default::default() };
        let path = AStarPathfinder.search(&net, from, to, &prefs).unwrap();
        let town_hall = net.node_by_name("town_hall").unwrap();
        assert_eq!(path, vec![from, town_hall, to]);
    }

    #[test]
    fn prefer_paved_avoids_unpaved_in_town() {
        let net = default_topology().unwrap();
        let from = net.node_by_name("market_square").unwrap();
        let to = net.node_by_name("boatyard").unwrap();
        let prefs = RoutingPreferences { prefer_paved: true, ..Default::default() };
        let path = AStarPathfinder.search(&net, from, to, &prefs).unwrap();
        for pair in path.windows(2) {
            let edge = net.neighbors(pair[0]).find(|e| e.target == pair[1]).unwrap();
            assert_eq!(edge.surface, SurfaceKind::Paved, "{:?}", path);
        }
    }
}

// ── Route geometry ────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use nav_core::Coordinate;
    use crate::{Route, RouteSource};

    fn north_then_east() -> Route {
        let a = Coordinate::new(0.0, 0.0);
        let b = a.destination(100.0, 0.0);
        let c = b.destination(50.0, 90.0);
        Route::new(vec![a, b, c], RouteSource::Offline)
    }

    #[test]
    fn total_length() {
        let r = north_then_east();
        assert!((r.total_length_m() - 150.0).abs() < 1e-6);
    }

    #[test]
    fn remaining_from_start() {
        let r = north_then_east();
        let pos = r.first().unwrap();
        assert!((r.remaining_m(pos, 1) - 150.0).abs() < 1e-6);
        // Past the end: direct distance to the destination.
        let direct = pos.distance_m(r.last().unwrap());
        assert!((r.remaining_m(pos, 3) - direct).abs() < 1e-9);
    }

    #[test]
    fn point_along_crosses_corner() {
        let r = north_then_east();
        let start = r.first().unwrap();
        let p = r.point_along(start, 1, 120.0);
        let corner = r.points()[1];
        assert!((corner.distance_m(p) - 20.0).abs() < 1e-3);
        assert!((corner.bearing_deg(p) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn point_along_saturates_at_end() {
        let r = north_then_east();
        let p = r.point_along(r.first().unwrap(), 1, 10_000.0);
        assert_eq!(p, r.last().unwrap());
    }

    #[test]
    fn direct_route() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(1.5, 2.5);
        let r = Route::direct(a, b);
        assert_eq!(r.points(), &[a, b]);
        assert_eq!(r.source(), RouteSource::Offline);
    }
}

// ── CSV loader & built-in topology ────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{
        AStarPathfinder, Pathfinder, RoutingPreferences, SpatialError, SurfaceKind,
        default_topology, load_topology_reader,
    };

    const NODES: &str = "name,lat,lon\nwest,0.0,0.0\nmid,0.0,0.001\neast,0.0,0.002\n";

    #[test]
    fn loads_nodes_and_roads() {
        let roads = "from,to,surface,hilly\nwest,mid,paved,false\nmid,east,unpaved,true\n";
        let net = load_topology_reader(Cursor::new(NODES), Cursor::new(roads)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.road_count(), 2);
        let mid = net.node_by_name("mid").unwrap();
        let east = net.node_by_name("east").unwrap();
        let e = net.neighbors(mid).find(|e| e.target == east).unwrap();
        assert_eq!(e.surface, SurfaceKind::Unpaved);
        assert!(e.hilly);
        assert!((e.weight_m - 111.3).abs() < 0.5);
    }

    #[test]
    fn unknown_node_in_road() {
        let roads = "from,to,surface,hilly\nwest,nowhere,paved,false\n";
        let result = load_topology_reader(Cursor::new(NODES), Cursor::new(roads));
        assert!(matches!(result, Err(SpatialError::UnknownNode(name)) if name == "nowhere"));
    }

    #[test]
    fn bad_surface() {
        let roads = "from,to,surface,hilly\nwest,mid,gravel,false\n";
        let result = load_topology_reader(Cursor::new(NODES), Cursor::new(roads));
        assert!(matches!(result, Err(SpatialError::Parse(_))));
    }

    #[test]
    fn duplicate_node_name() {
        let nodes = "name,lat,lon\na,0.0,0.0\na,0.0,0.001\n";
        let roads = "from,to,surface,hilly\n";
        let result = load_topology_reader(Cursor::new(nodes), Cursor::new(roads));
        assert!(matches!(result, Err(SpatialError::Parse(_))));
    }

    #[test]
    fn malformed_row() {
        let nodes = "name,lat,lon\na,north,0.0\n";
        let roads = "from,to,surface,hilly\n";
        let result = load_topology_reader(Cursor::new(nodes), Cursor::new(roads));
        assert!(matches!(result, Err(SpatialError::Csv(_))));
    }

    #[test]
    fn default_topology_is_connected() {
        let net = default_topology().unwrap();
        assert_eq!(net.node_count(), 13);
        assert_eq!(net.road_count(), 19);
        let prefs = RoutingPreferences::default();
        let origin = net.node_by_name("north_gate").unwrap();
        for i in 0..net.node_count() as u32 {
            let target = nav_core::NodeId(i);
            assert!(AStarPathfinder.search(&net, origin, target, &prefs).is_ok());
        }
    }
}
