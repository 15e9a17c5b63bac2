//! Curvature-aware route following.
//!
//! Each tick projects two targets ahead along the remaining route:
//!
//! - a **steering** target, `speed × steer_lookahead_secs` metres ahead
//!   (clamped to 10–30 m by default), which the heading turns toward;
//! - a **braking** target, `factor ×` further (clamped to 40–100 m), used
//!   only to predict curvature.
//!
//! The divergence between the two bearings is the curvature ahead.  Together
//! with the current heading error it gives a severity in `[0, 1]`, which maps
//! linearly to a speed factor between 1.0 and `min_speed_factor`.

use nav_core::{SteeringConfig, normalize_deg, signed_angle_delta};
use nav_spatial::Route;

use crate::NavigationSnapshot;

/// Diagnostic values from one steering update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteerReport {
    pub steer_bearing_deg: f64,
    pub curvature_deg:     f64,
    pub heading_error_deg: f64,
    pub severity:          f64,
    pub target_speed_mps:  f64,
}

/// `(steering, braking)` lookahead distances for `speed_mps`.
pub fn lookahead_distances(cfg: &SteeringConfig, speed_mps: f64) -> (f64, f64) {
    let steer = (speed_mps * cfg.steer_lookahead_secs)
        .clamp(cfg.steer_lookahead_min_m, cfg.steer_lookahead_max_m);
    let brake = (steer * cfg.brake_lookahead_factor)
        .clamp(cfg.brake_lookahead_min_m, cfg.brake_lookahead_max_m);
    (steer, brake)
}

pub fn severity(cfg: &SteeringConfig, curvature_deg: f64, heading_error_deg: f64) -> f64 {
    let weighted = curvature_deg * cfg.curvature_weight + heading_error_deg * cfg.heading_error_weight;
    (weighted / cfg.severity_full_deg).clamp(0.0, 1.0)
}

/// 1.0 at zero severity, `min_speed_factor` at full severity.
pub fn speed_factor(cfg: &SteeringConfig, severity: f64) -> f64 {
    1.0 - (1.0 - cfg.min_speed_factor) * severity.clamp(0.0, 1.0)
}

/// Move `current` toward `target`, braking faster than accelerating.
/// The result is clamped to `[min_speed_mps, nominal_mps]`.
pub fn integrate_speed(cfg: &SteeringConfig, current: f64, target: f64, nominal_mps: f64, dt: f64) -> f64 {
    let next = if target > current {
        (current + cfg.accel_per_sec * nominal_mps * dt).min(target)
    } else {
        (current - cfg.decel_per_sec * nominal_mps * dt).max(target)
    };
    next.clamp(cfg.min_speed_mps.min(nominal_mps), nominal_mps)
}

/// Maximum turn rate in °/s at `speed_mps`.
pub fn turn_rate_cap(cfg: &SteeringConfig, speed_mps: f64) -> f64 {
    (cfg.turn_rate_max_dps - cfg.turn_rate_speed_slope * speed_mps).max(cfg.turn_rate_min_dps)
}

/// Rotate the accumulated heading toward `target_deg` by the shortest way,
/// by at most `cap_dps × dt`.
pub fn integrate_heading(heading_acc_deg: f64, target_deg: f64, cap_dps: f64, dt: f64) -> f64 {
    let max_step = cap_dps * dt;
    heading_acc_deg + signed_angle_delta(heading_acc_deg, target_deg).clamp(-max_step, max_step)
}

pub fn reach_threshold(cfg: &SteeringConfig, speed_mps: f64) -> f64 {
    (speed_mps * cfg.waypoint_reach_secs).max(cfg.waypoint_reach_min_m)
}

/// One route-following update: speed, heading, position, then waypoint
/// progress.
pub fn follow_route(
    cfg:         &SteeringConfig,
    route:       &Route,
    snap:        &mut NavigationSnapshot,
    nominal_mps: f64,
    dt:          f64,
) -> SteerReport {
    let idx = snap.next_waypoint_index;
    let (steer_m, brake_m) = lookahead_distances(cfg, snap.speed_mps);
    let steer_pt = route.point_along(snap.position, idx, steer_m);
    let brake_pt = route.point_along(snap.position, idx, brake_m);
    let steer_bearing = snap.position.bearing_deg(steer_pt);
    let brake_bearing = snap.position.bearing_deg(brake_pt);

    let curvature = signed_angle_delta(steer_bearing, brake_bearing).abs();
    let heading_error = signed_angle_delta(snap.heading_acc_deg, steer_bearing).abs();
    let severity = severity(cfg, curvature, heading_error);
    let target_speed = nominal_mps * speed_factor(cfg, severity);

    snap.speed_mps = integrate_speed(cfg, snap.speed_mps, target_speed, nominal_mps, dt);
    let cap = turn_rate_cap(cfg, snap.speed_mps);
    snap.heading_acc_deg = integrate_heading(snap.heading_acc_deg, steer_bearing, cap, dt);
    snap.position = snap
        .position
        .destination(snap.speed_mps * dt, normalize_deg(snap.heading_acc_deg));

    advance_waypoint(cfg, route, snap);

    SteerReport {
        steer_bearing_deg: steer_bearing,
        curvature_deg:     curvature,
        heading_error_deg: heading_error,
        severity,
        target_speed_mps:  target_speed,
    }
}

/// Step `next_waypoint_index` by at most one.
///
/// The targeted point counts as reached when within the speed-scaled
/// threshold, or when the position lies past the plane through it normal to
/// the incoming segment (checked only within twice the threshold).
pub(crate) fn advance_waypoint(cfg: &SteeringConfig, route: &Route, snap: &mut NavigationSnapshot) {
    let points = route.points();
    let idx = snap.next_waypoint_index;
    let Some(&target) = points.get(idx) else { return };

    let dist = snap.position.distance_m(target);
    let reach = reach_threshold(cfg, snap.speed_mps);
    let passed = idx > 0 && dist < 2.0 * reach && {
        let incoming = points[idx - 1].bearing_deg(target);
        let outward = target.bearing_deg(snap.position);
        signed_angle_delta(incoming, outward).abs() < 90.0
    };
    if dist < reach || passed {
        snap.next_waypoint_index = idx + 1;
    }
}
