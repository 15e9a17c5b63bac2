//! Pathfinder trait and the preference-weighted A* implementation.
//!
//! # Pluggability
//!
//! `nav-route` calls offline routing via the [`Pathfinder`] trait, so
//! applications can swap in another search without touching the
//! orchestrator.  [`AStarPathfinder`] is the default.
//!
//! # Cost model
//!
//! - **g-score**: cumulative preference-adjusted cost
//!   (`weight_m × RoutingPreferences::penalty`).
//! - **h-score**: straight-line geodesic distance to the goal node, on
//!   *unadjusted* metres.
//!
//! Open-set ties on f-score are broken by insertion order (first pushed,
//! first popped), so a fixed input always yields the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, warn};

use nav_core::{Coordinate, NodeId};

use crate::network::TopologyGraph;
use crate::prefs::RoutingPreferences;
use crate::{SpatialError, SpatialResult};

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable offline routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one instance can plan several
/// legs concurrently against a shared, read-only graph.
pub trait Pathfinder: Send + Sync {
    /// Least-cost node sequence from `from` to `to` (both inclusive).
    ///
    /// Returns [`SpatialError::NoRoute`] when the goal is unreachable.
    fn search(
        &self,
        graph: &TopologyGraph,
        from:  NodeId,
        to:    NodeId,
        prefs: &RoutingPreferences,
    ) -> SpatialResult<Vec<NodeId>>;

    /// Coordinate path from `start` to `end` over `graph`.
    ///
    /// Never fails.  The result begins with exactly `start` and ends with
    /// exactly `end`; when the endpoints cannot be snapped to distinct nodes
    /// or the search is exhausted, it is the direct segment `[start, end]`.
    fn plan(
        &self,
        graph: &TopologyGraph,
        start: Coordinate,
        end:   Coordinate,
        prefs: &RoutingPreferences,
    ) -> Vec<Coordinate> {
        let (Some(from), Some(to)) = (graph.nearest_node(start), graph.nearest_node(end)) else {
            warn!("offline graph has no nodes; routing {start} -> {end} as a direct line");
            return vec![start, end];
        };
        if from == to {
            debug!("{start} and {end} both snap to {from}; direct line");
            return vec![start, end];
        }

        match self.search(graph, from, to, prefs) {
            Ok(nodes) => attach_endpoints(graph, &nodes, start, end),
            Err(e) => {
                warn!("offline search failed ({e}); routing {start} -> {end} as a direct line");
                vec![start, end]
            }
        }
    }
}

/// Map a node path to coordinates, then pin the caller's exact endpoints:
/// the first element becomes `start` and `end` is appended, unless the last
/// snapped node already sits exactly on `end`.
fn attach_endpoints(
    graph: &TopologyGraph,
    nodes: &[NodeId],
    start: Coordinate,
    end:   Coordinate,
) -> Vec<Coordinate> {
    let mut coords: Vec<Coordinate> = Vec::with_capacity(nodes.len() + 1);
    coords.extend(nodes.iter().filter_map(|&n| graph.position(n)));
    match coords.first_mut() {
        Some(first) => *first = start,
        None => coords.push(start),
    }
    if coords.last() != Some(&end) {
        coords.push(end);
    }
    coords
}

/// Total preference-adjusted cost of walking `nodes` in order.
///
/// Uses the cheapest road between each consecutive pair.  Returns `None` if
/// two consecutive nodes are not adjacent.
pub fn path_cost(graph: &TopologyGraph, nodes: &[NodeId], prefs: &RoutingPreferences) -> Option<f64> {
    nodes.windows(2).try_fold(0.0, |acc, pair| {
        graph
            .neighbors(pair[0])
            .filter(|e| e.target == pair[1])
            .map(|e| prefs.edge_cost(&e))
            .min_by(f64::total_cmp)
            .map(|c| acc + c)
    })
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// Classic A* over the CSR topology graph.
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn search(
        &self,
        graph: &TopologyGraph,
        from:  NodeId,
        to:    NodeId,
        prefs: &RoutingPreferences,
    ) -> SpatialResult<Vec<NodeId>> {
        astar(graph, from, to, prefs)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-set entry.  Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// f-score first and, among equal f-scores, the earliest insertion.
struct OpenEntry {
    f:    f64,
    g:    f64,
    seq:  u64,
    node: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

fn astar(
    graph: &TopologyGraph,
    from:  NodeId,
    to:    NodeId,
    prefs: &RoutingPreferences,
) -> SpatialResult<Vec<NodeId>> {
    let n = graph.node_count();
    if from.index() >= n {
        return Err(SpatialError::NodeNotFound(from));
    }
    if to.index() >= n {
        return Err(SpatialError::NodeNotFound(to));
    }
    if from == to {
        return Ok(vec![from]);
    }

    let goal = graph.node_pos[to.index()];
    let h = |node: NodeId| graph.node_pos[node.index()].distance_m(goal);

    // g[v] = best known adjusted cost to reach v.
    let mut g    = vec![f64::INFINITY; n];
    // prev[v] = predecessor on the best known path; INVALID for unreached.
    let mut prev = vec![NodeId::INVALID; n];
    let mut seq  = 0u64;

    g[from.index()] = 0.0;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry { f: h(from), g: 0.0, seq, node: from });

    let mut expanded = 0usize;
    while let Some(OpenEntry { g: g_node, node, .. }) = open.pop() {
        if node == to {
            debug!("A* reached {to} from {from} after {expanded} expansions, cost {g_node:.1}");
            return Ok(reconstruct(&prev, from, to));
        }

        // Skip stale heap entries.
        if g_node > g[node.index()] {
            continue;
        }
        expanded += 1;

        for edge in graph.neighbors(node) {
            let tentative = g_node + prefs.edge_cost(&edge);
            let t = edge.target.index();
            if tentative < g[t] {
                g[t] = tentative;
                prev[t] = node;
                seq += 1;
                open.push(OpenEntry {
                    f: tentative + h(edge.target),
                    g: tentative,
                    seq,
                    node: edge.target,
                });
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
