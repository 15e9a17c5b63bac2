//! CSV topology loader.
//!
//! # CSV format
//!
//! Two files.  Nodes, one row per node, in definition order:
//!
//! ```csv
//! name,lat,lon
//! market_square,30.6920,-88.0475
//! town_hall,30.6920,-88.0450
//! ```
//!
//! Roads, one row per bidirectional road, referencing nodes by name:
//!
//! ```csv
//! from,to,surface,hilly
//! market_square,town_hall,paved,false
//! ```
//!
//! There is no length column: every road's weight is the geodesic distance
//! between its endpoints.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nav_core::{Coordinate, NodeId};

use crate::network::{SurfaceKind, TopologyBuilder, TopologyGraph};
use crate::{SpatialError, SpatialResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

#[derive(Deserialize)]
struct RoadRecord {
    from:    String,
    to:      String,
    surface: String,
    hilly:   bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`TopologyGraph`] from a nodes CSV and a roads CSV.
pub fn load_topology_csv(nodes: &Path, roads: &Path) -> SpatialResult<TopologyGraph> {
    let nodes = std::fs::File::open(nodes)?;
    let roads = std::fs::File::open(roads)?;
    load_topology_reader(nodes, roads)
}

/// Like [`load_topology_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded tables.
pub fn load_topology_reader<N: Read, R: Read>(nodes: N, roads: R) -> SpatialResult<TopologyGraph> {
    let node_rows: Vec<NodeRecord> = csv::Reader::from_reader(nodes)
        .deserialize()
        .collect::<Result<_, _>>()?;
    let road_rows: Vec<RoadRecord> = csv::Reader::from_reader(roads)
        .deserialize()
        .collect::<Result<_, _>>()?;

    let node_defs: Vec<(&str, Coordinate)> = node_rows
        .iter()
        .map(|r| (r.name.as_str(), Coordinate::new(r.lat, r.lon)))
        .collect();
    let road_defs: Vec<(&str, &str, SurfaceKind, bool)> = road_rows
        .iter()
        .map(|r| -> SpatialResult<_> {
            Ok((r.from.as_str(), r.to.as_str(), r.surface.parse::<SurfaceKind>()?, r.hilly))
        })
        .collect::<SpatialResult<_>>()?;

    from_definitions(&node_defs, &road_defs)
}

/// Build a graph from in-memory node and road definitions.
///
/// Node names must be unique and every road must reference defined names.
pub fn from_definitions(
    nodes: &[(&str, Coordinate)],
    roads: &[(&str, &str, SurfaceKind, bool)],
) -> SpatialResult<TopologyGraph> {
    let mut b = TopologyBuilder::with_capacity(nodes.len(), roads.len());
    let mut by_name: HashMap<&str, NodeId> = HashMap::with_capacity(nodes.len());

    for &(name, pos) in nodes {
        if !(-90.0..=90.0).contains(&pos.lat) || !(-180.0..=180.0).contains(&pos.lon) {
            return Err(SpatialError::Parse(format!("node {name:?} has out-of-range position {pos}")));
        }
        let id = b.add_node(name, pos);
        if by_name.insert(name, id).is_some() {
            return Err(SpatialError::Parse(format!("duplicate node name {name:?}")));
        }
    }

    for &(from, to, surface, hilly) in roads {
        let a = *by_name
            .get(from)
            .ok_or_else(|| SpatialError::UnknownNode(from.to_owned()))?;
        let c = *by_name
            .get(to)
            .ok_or_else(|| SpatialError::UnknownNode(to.to_owned()))?;
        b.add_road(a, c, surface, hilly)?;
    }

    Ok(b.build())
}
