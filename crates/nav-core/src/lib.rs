//! `nav-core` — foundational types for the navigation engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It intentionally
//! has no `nav-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                        |
//! | [`geo`]         | `Coordinate`, distance / bearing / destination point      |
//! | [`time`]        | `Tick`, `NavClock`                                        |
//! | [`transport`]   | `TransportMode` enum and nominal cruising speeds          |
//! | [`config`]      | `NavConfig` and its per-subsystem sections                |
//! | [`error`]       | `NavError`, `NavResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `NavConfig` from a JSON file.             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AcquisitionConfig, DeadReckoningConfig, ManeuverConfig, NavConfig, SteeringConfig,
};
pub use error::{NavError, NavResult};
pub use geo::{Coordinate, EARTH_RADIUS_M, normalize_deg, signed_angle_delta};
pub use ids::{EdgeId, NodeId};
pub use time::{NavClock, Tick};
pub use transport::TransportMode;
