//! Built-in offline topology.
//!
//! A 13-node street grid around a small harbour town quarter: three rows of
//! four junctions plus an orchard trail on the east side.  Used whenever the
//! application does not supply its own topology CSVs.
//!
//! ```text
//!   north_gate ── chapel ──~~ water_tower ══ ridge_top
//!       │            │             │             ║
//!   mill_lane ── market_square ── town_hall ── quarry_road ~~ orchard
//!       │            │             │             ~              ~
//!   south_gate ── school ───── harbour ───── boatyard ~~~~~~~~~~
//!
//!   ── paved   ~~ unpaved   ══ paved, hilly   ║ paved, hilly
//! ```

use nav_core::Coordinate;

use crate::SpatialResult;
use crate::loader::from_definitions;
use crate::network::{SurfaceKind, TopologyGraph};

use crate::network::SurfaceKind::{Paved, Unpaved};

const NODES: &[(&str, Coordinate)] = &[
    ("north_gate",    Coordinate::new(30.6940, -88.0500)),
    ("chapel",        Coordinate::new(30.6940, -88.0475)),
    ("water_tower",   Coordinate::new(30.6940, -88.0450)),
    ("ridge_top",     Coordinate::new(30.6940, -88.0425)),
    ("mill_lane",     Coordinate::new(30.6920, -88.0500)),
    ("market_square", Coordinate::new(30.6920, -88.0475)),
    ("town_hall",     Coordinate::new(30.6920, -88.0450)),
    ("quarry_road",   Coordinate::new(30.6920, -88.0425)),
    ("south_gate",    Coordinate::new(30.6900, -88.0500)),
    ("school",        Coordinate::new(30.6900, -88.0475)),
    ("harbour",       Coordinate::new(30.6900, -88.0450)),
    ("boatyard",      Coordinate::new(30.6900, -88.0425)),
    ("orchard",       Coordinate::new(30.6915, -88.0395)),
];

const ROADS: &[(&str, &str, SurfaceKind, bool)] = &[
    // North row.
    ("north_gate",    "chapel",        Paved,   false),
    ("chapel",        "water_tower",   Unpaved, false),
    ("water_tower",   "ridge_top",     Paved,   true),
    // Middle row.
    ("mill_lane",     "market_square", Paved,   false),
    ("market_square", "town_hall",     Paved,   false),
    ("town_hall",     "quarry_road",   Paved,   false),
    ("quarry_road",   "orchard",       Unpaved, false),
    // South row.
    ("south_gate",    "school",        Paved,   false),
    ("school",        "harbour",       Paved,   false),
    ("harbour",       "boatyard",      Paved,   false),
    ("boatyard",      "orchard",       Unpaved, true),
    // Columns.
    ("north_gate",    "mill_lane",     Paved,   false),
    ("mill_lane",     "south_gate",    Paved,   false),
    ("chapel",        "market_square", Paved,   false),
    ("market_square", "school",        Paved,   false),
    ("water_tower",   "town_hall",     Paved,   false),
    ("town_hall",     "harbour",       Paved,   false),
    ("ridge_top",     "quarry_road",   Paved,   true),
    ("quarry_road",   "boatyard",      Unpaved, false),
];

/// Build the built-in offline topology.
pub fn default_topology() -> SpatialResult<TopologyGraph> {
    from_definitions(NODES, ROADS)
}

/// Position of a named junction in the built-in topology.
pub fn landmark(name: &str) -> Option<Coordinate> {
    NODES.iter().find(|(n, _)| *n == name).map(|(_, p)| *p)
}
