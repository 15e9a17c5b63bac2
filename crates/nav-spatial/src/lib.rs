//! `nav-spatial` — offline topology graph, pathfinding, and route geometry.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`network`]    | `TopologyGraph` (CSR), `TopologyBuilder`, `GraphEdge`          |
//! | [`prefs`]      | `RoutingPreferences` and the edge penalty multipliers          |
//! | [`pathfinder`] | `Pathfinder` trait, `AStarPathfinder`, `path_cost`             |
//! | [`route`]      | `Route`, `RouteSource`                                         |
//! | [`loader`]     | CSV topology loader, `from_definitions`                        |
//! | [`fixture`]    | `default_topology` — the built-in offline area                 |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod fixture;
pub mod loader;
pub mod network;
pub mod pathfinder;
pub mod prefs;
pub mod route;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use fixture::default_topology;
pub use loader::{from_definitions, load_topology_csv, load_topology_reader};
pub use network::{GraphEdge, SurfaceKind, TopologyBuilder, TopologyGraph};
pub use pathfinder::{AStarPathfinder, Pathfinder, path_cost};
pub use prefs::RoutingPreferences;
pub use route::{Route, RouteSource};
