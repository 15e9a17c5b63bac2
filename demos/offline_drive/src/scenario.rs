//! Scripted sensor feeds and a console observer for the drive demo.

use log::info;

use nav_core::{Coordinate, Tick};
use nav_live::{ManeuverKind, NavObserver, NavigationSnapshot, PositionFix, SensorFrame};
use nav_spatial::Route;

/// Planar acceleration of a brisk walker (m/s²).  With the default
/// dead-reckoning gain this maps to roughly walking pace.
const WALK_ACCEL: [f64; 3] = [1.9, 0.77, 9.81];

/// Live positioning reports a stationary vehicle at `position`.
pub fn parked(position: Coordinate) -> impl FnMut(Tick) -> SensorFrame {
    move |_tick| {
        SensorFrame::default().with_fix(PositionFix {
            position,
            speed_mps:   Some(0.0),
            heading_deg: None,
        })
    }
}

/// No positioning; the compass swings a few degrees around `heading_deg`
/// while the accelerometer reports a steady walking gait.
pub fn walking(heading_deg: f64) -> impl FnMut(Tick) -> SensorFrame {
    move |tick| {
        let sway = 4.0 * (tick.0 as f64 * 0.3).sin();
        SensorFrame::default()
            .with_compass(heading_deg + sway)
            .with_accel(WALK_ACCEL)
    }
}

// ── Console observer ──────────────────────────────────────────────────────────

/// Logs route installs, instruction changes, and arrival, then forwards
/// every callback to `inner`.
pub struct Console<O> {
    pub inner:        O,
    pub arrived_at:   Option<Tick>,
    last_instruction: Option<(ManeuverKind, usize)>,
}

impl<O: NavObserver> Console<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, arrived_at: None, last_instruction: None }
    }
}

impl<O: NavObserver> NavObserver for Console<O> {
    fn on_route_installed(&mut self, tick: Tick, route: &Route) {
        info!(
            "{tick}: {} route installed, {} points, {:.0} m",
            route.source().as_str(),
            route.len(),
            route.total_length_m(),
        );
        self.last_instruction = None;
        self.inner.on_route_installed(tick, route);
    }

    fn on_tick(&mut self, tick: Tick, now_unix_secs: f64, snapshot: &NavigationSnapshot) {
        if let Some(m) = &snapshot.maneuver {
            let key = (m.kind, snapshot.next_waypoint_index);
            if self.last_instruction != Some(key) {
                self.last_instruction = Some(key);
                let eta = snapshot.eta.as_ref().map_or(0.0, |e| e.duration_secs);
                info!("{tick}: {} (eta {eta:.0} s)", m.text);
            }
        }
        self.inner.on_tick(tick, now_unix_secs, snapshot);
    }

    fn on_arrival(&mut self, tick: Tick, snapshot: &NavigationSnapshot) {
        self.arrived_at = Some(tick);
        self.inner.on_arrival(tick, snapshot);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}
