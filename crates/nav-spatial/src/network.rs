//! Offline topology graph and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing half-edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every road is stored as two half-edges (one per direction) with equal
//! physical weight, surface, and hilliness.  Half-edges are sorted by source
//! node with a **stable** sort, so each node's neighbours keep the order in
//! which their roads were defined.  The pathfinder relies on that order for
//! reproducible tie-breaking.
//!
//! # Immutability
//!
//! A `TopologyGraph` has no mutating methods.  Build it once with
//! [`TopologyBuilder`], wrap it in an `Arc`, and share it with any number of
//! concurrent readers.

use nav_core::{Coordinate, EdgeId, NodeId};

use crate::{SpatialError, SpatialResult};

// ── Edge attributes ───────────────────────────────────────────────────────────

/// Road surface class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceKind {
    Paved,
    Unpaved,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Paved   => "paved",
            SurfaceKind::Unpaved => "unpaved",
        }
    }
}

impl std::str::FromStr for SurfaceKind {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paved"   => Ok(SurfaceKind::Paved),
            "unpaved" => Ok(SurfaceKind::Unpaved),
            other => Err(SpatialError::Parse(format!(
                "invalid surface {other:?}: expected \"paved\" or \"unpaved\""
            ))),
        }
    }
}

/// One outgoing half-edge as seen from its source node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub target:   NodeId,
    /// Geodesic length of the road in metres.
    pub weight_m: f64,
    pub surface:  SurfaceKind,
    pub hilly:    bool,
}

// ── TopologyGraph ─────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`TopologyBuilder`].
pub struct TopologyGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Coordinate>,

    /// Human-readable node names (e.g. `"market_square"`).  Indexed by `NodeId`.
    pub node_name: Vec<String>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing half-edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Half-edge data (indexed by EdgeId = position in sorted order) ─────
    pub edge_to: Vec<NodeId>,

    /// Physical length in metres, always derived from the endpoints.
    pub edge_length_m: Vec<f64>,
    pub edge_surface:  Vec<SurfaceKind>,
    pub edge_hilly:    Vec<bool>,
}

impl TopologyGraph {
    /// Construct a graph with no nodes or edges.
    ///
    /// Every nearest-node query against it returns `None`, which the
    /// pathfinder turns into a direct-line route.
    pub fn empty() -> Self {
        TopologyBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed half-edges (twice the number of roads).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn road_count(&self) -> usize {
        self.edge_count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Node lookups ──────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, node: NodeId) -> Option<Coordinate> {
        self.node_pos.get(node.index()).copied()
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.node_name.get(node.index()).map(String::as_str)
    }

    /// First node whose name equals `name`.
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.node_name
            .iter()
            .position(|n| n == name)
            .map(|i| NodeId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing half-edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Attributes of half-edge `edge`.
    #[inline]
    pub fn edge(&self, edge: EdgeId) -> GraphEdge {
        let i = edge.index();
        GraphEdge {
            target:   self.edge_to[i],
            weight_m: self.edge_length_m[i],
            surface:  self.edge_surface[i],
            hilly:    self.edge_hilly[i],
        }
    }

    /// Neighbours of `node` in road-definition order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = GraphEdge> + '_ {
        self.out_edges(node).map(|e| self.edge(e))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the node nearest to `pos` by geodesic distance.
    ///
    /// Linear scan over every node; ties go to the node defined first.
    /// Returns `None` only if the graph has no nodes.
    pub fn nearest_node(&self, pos: Coordinate) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (i, &p) in self.node_pos.iter().enumerate() {
            let d = pos.distance_m(p);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((NodeId(i as u32), d)),
            }
        }
        best.map(|(id, _)| id)
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`TopologyGraph`] incrementally, then call [`build`](Self::build).
///
/// Roads are always bidirectional and their weight is always the geodesic
/// distance between the endpoints; there is no way to hand-specify a length.
///
/// # Example
///
/// ```
/// use nav_core::Coordinate;
/// use nav_spatial::{SurfaceKind, TopologyBuilder};
///
/// let mut b = TopologyBuilder::new();
/// let a = b.add_node("a", Coordinate::new(30.690, -88.040));
/// let c = b.add_node("c", Coordinate::new(30.691, -88.040));
/// b.add_road(a, c, SurfaceKind::Paved, false).unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // one half-edge per direction
/// ```
pub struct TopologyBuilder {
    nodes:     Vec<(String, Coordinate)>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    surface:  SurfaceKind,
    hilly:    bool,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(roads * 2),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>, pos: Coordinate) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((name.into(), pos));
        id
    }

    /// Add a bidirectional road between `a` and `b`.
    ///
    /// Inserts one half-edge into each endpoint's neighbour list with the same
    /// geodesic weight.
    pub fn add_road(
        &mut self,
        a:       NodeId,
        b:       NodeId,
        surface: SurfaceKind,
        hilly:   bool,
    ) -> SpatialResult<()> {
        let pa = self.node_pos(a).ok_or(SpatialError::NodeNotFound(a))?;
        let pb = self.node_pos(b).ok_or(SpatialError::NodeNotFound(b))?;
        let length_m = pa.distance_m(pb);
        self.raw_edges.push(RawEdge { from: a, to: b, length_m, surface, hilly });
        self.raw_edges.push(RawEdge { from: b, to: a, length_m, surface, hilly });
        Ok(())
    }

    pub fn node_pos(&self, id: NodeId) -> Option<Coordinate> {
        self.nodes.get(id.index()).map(|(_, p)| *p)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.raw_edges.len() / 2 }

    /// Consume the builder and produce a [`TopologyGraph`].
    pub fn build(self) -> TopologyGraph {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: preserves per-node road-definition order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_to:       Vec<NodeId>      = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>         = raw.iter().map(|e| e.length_m).collect();
        let edge_surface:  Vec<SurfaceKind> = raw.iter().map(|e| e.surface).collect();
        let edge_hilly:    Vec<bool>        = raw.iter().map(|e| e.hilly).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let (node_name, node_pos): (Vec<String>, Vec<Coordinate>) =
            self.nodes.into_iter().unzip();

        TopologyGraph {
            node_pos,
            node_name,
            node_out_start,
            edge_to,
            edge_length_m,
            edge_surface,
            edge_hilly,
        }
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
