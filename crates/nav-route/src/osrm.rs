//! OSRM-compatible HTTP router.
//!
//! Issues one `GET {base}/route/v1/{profile}/{lon,lat;lon,lat;...}` with
//! `overview=full&geometries=geojson` and reads the first route's GeoJSON
//! line string.  The orchestrator owns the time box; this client only sets
//! a connect timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use nav_core::{AcquisitionConfig, Coordinate};

use crate::{RemoteError, RemoteRouter};

const USER_AGENT: &str = concat!("nav-route/", env!("CARGO_PKG_VERSION"));

// ── Response DTOs ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    code:   Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`.
    coordinates: Vec<[f64; 2]>,
}

// ── OsrmRouter ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct OsrmRouter {
    client:   reqwest::Client,
    base_url: String,
}

impl OsrmRouter {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AcquisitionConfig) -> Result<Self, RemoteError> {
        Self::new(config.remote_base_url.as_str())
    }

    /// Full request URL for `waypoints` under `profile`.
    pub fn request_url(&self, waypoints: &[Coordinate], profile: &str) -> String {
        let coords = waypoints
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.lon, c.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/{profile}/{coords}?overview=full&geometries=geojson",
            self.base_url
        )
    }
}

#[async_trait]
impl RemoteRouter for OsrmRouter {
    async fn route(&self, waypoints: &[Coordinate], profile: &str) -> Result<Vec<Coordinate>, RemoteError> {
        if waypoints.len() < 2 {
            return Err(RemoteError::EmptyRoute);
        }
        let url = self.request_url(waypoints, profile);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        parse_osrm_body(&body)
    }
}

/// Extract the first route's geometry from an OSRM JSON body.
///
/// An error `code`, no routes, or an empty line string are all failures.
pub fn parse_osrm_body(body: &str) -> Result<Vec<Coordinate>, RemoteError> {
    let parsed: OsrmResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    if let Some(code) = parsed.code.as_deref() {
        if code != "Ok" {
            return match code {
                "NoRoute" | "NoSegment" => Err(RemoteError::EmptyRoute),
                other => Err(RemoteError::Malformed(format!("service code {other:?}"))),
            };
        }
    }

    let route = parsed.routes.into_iter().next().ok_or(RemoteError::EmptyRoute)?;
    if route.geometry.coordinates.is_empty() {
        return Err(RemoteError::EmptyRoute);
    }
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Coordinate::new(lat, lon))
        .collect())
}
