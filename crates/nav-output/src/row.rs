//! Plain data rows written by trace backends.

/// The navigation estimate after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub tick:           u64,
    pub unix_time_secs: f64,
    pub lat:            f64,
    pub lon:            f64,
    /// Compass heading in `[0, 360)`.
    pub heading_deg:    f64,
    pub speed_mps:      f64,
    pub next_waypoint:  u64,
    pub strategy:       &'static str,
    /// Empty when no route is being navigated.
    pub maneuver:       &'static str,
    pub maneuver_distance_m: Option<f64>,
    pub eta_secs:       Option<f64>,
}

/// One point of an installed route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    /// Installation counter, starting at 0 for each observer.
    pub route_id: u32,
    /// Tick on which the route was installed.
    pub tick:     u64,
    pub seq:      u32,
    pub lat:      f64,
    pub lon:      f64,
    pub source:   &'static str,
}
