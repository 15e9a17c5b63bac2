//! `nav-route` — route acquisition for the navigation engine.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`request`]      | `RouteRequest` — endpoints, waypoints, mode, preferences     |
//! | [`remote`]       | `RemoteRouter` trait, `OfflineOnly`                          |
//! | [`osrm`]         | `OsrmRouter` HTTP client (feature `osrm`)                    |
//! | [`orchestrator`] | `RouteOrchestrator` — time-boxed online, per-leg offline     |
//! | [`error`]        | `RemoteError`                                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `osrm`     | Builds `OsrmRouter` (reqwest + serde_json).               |
//! | `parallel` | Plans offline legs on Rayon's thread pool.                |

pub mod error;
pub mod orchestrator;
#[cfg(feature = "osrm")]
pub mod osrm;
pub mod remote;
pub mod request;

#[cfg(test)]
mod tests;

pub use error::RemoteError;
pub use orchestrator::RouteOrchestrator;
#[cfg(feature = "osrm")]
pub use osrm::{OsrmRouter, parse_osrm_body};
pub use remote::{OfflineOnly, RemoteRouter};
pub use request::RouteRequest;
