//! Route acquisition request.

use nav_core::{Coordinate, TransportMode};
use nav_spatial::RoutingPreferences;

/// Everything needed to acquire one route.
///
/// `mode` may be left unset by the caller; it then resolves to
/// [`TransportMode::default`] instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub start:     Coordinate,
    pub end:       Coordinate,
    /// Intermediate stops, visited in order.
    pub waypoints: Vec<Coordinate>,
    pub mode:      Option<TransportMode>,
    pub prefs:     RoutingPreferences,
}

impl RouteRequest {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            waypoints: Vec::new(),
            mode:      None,
            prefs:     RoutingPreferences::default(),
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Coordinate>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_prefs(mut self, prefs: RoutingPreferences) -> Self {
        self.prefs = prefs;
        self
    }

    /// Effective transport mode.
    pub fn mode(&self) -> TransportMode {
        self.mode.unwrap_or_default()
    }

    /// `start`, every waypoint, then `end`.
    pub fn chain(&self) -> Vec<Coordinate> {
        let mut chain = Vec::with_capacity(self.waypoints.len() + 2);
        chain.push(self.start);
        chain.extend_from_slice(&self.waypoints);
        chain.push(self.end);
        chain
    }
}
