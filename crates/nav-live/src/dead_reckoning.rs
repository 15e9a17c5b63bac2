//! Inertial dead reckoning.
//!
//! A magnitude-to-speed heuristic, not sensor fusion: the planar
//! acceleration magnitude above a motion threshold maps linearly to a speed,
//! capped at a multiple of walking pace.  Heading follows the compass.

use nav_core::{DeadReckoningConfig, TransportMode, normalize_deg, signed_angle_delta};

use crate::NavigationSnapshot;

/// Magnitude of the horizontal `(x, y)` components.
#[inline]
pub fn planar_magnitude(accel: [f64; 3]) -> f64 {
    accel[0].hypot(accel[1])
}

pub fn speed_from_accel(cfg: &DeadReckoningConfig, magnitude: f64) -> f64 {
    if magnitude.is_nan() || magnitude < cfg.motion_threshold_mps2 {
        return 0.0;
    }
    let cap = cfg.max_walk_multiple * TransportMode::Walk.nominal_speed_mps();
    ((magnitude - cfg.motion_threshold_mps2) * cfg.speed_gain).min(cap)
}

/// One dead-reckoning update from calibrated readings.
///
/// `compass` is the calibrated heading; the caller resolves an absent
/// reading to zero before calibration.
pub fn dead_reckon(
    cfg:     &DeadReckoningConfig,
    snap:    &mut NavigationSnapshot,
    compass: f64,
    accel:   [f64; 3],
    dt:      f64,
) {
    snap.heading_acc_deg += signed_angle_delta(snap.heading_acc_deg, compass);
    snap.speed_mps = speed_from_accel(cfg, planar_magnitude(accel));
    if snap.speed_mps > 0.0 {
        snap.position = snap
            .position
            .destination(snap.speed_mps * dt, normalize_deg(snap.heading_acc_deg));
    }
}
