//! Engine configuration.
//!
//! Every tunable constant of the live loop and the route acquisition lives
//! here, grouped by subsystem.  All sections implement `Default`, and with the
//! `serde` feature each section is `#[serde(default)]` so a JSON file only
//! needs to name the values it overrides:
//!
//! ```json
//! { "steering": { "turn_rate_max_dps": 90.0 },
//!   "acquisition": { "remote_timeout_ms": 2500 } }
//! ```

use crate::{NavError, NavResult};

// ── Steering ──────────────────────────────────────────────────────────────────

/// Route-following controller: lookaheads, speed response, turn-rate law.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Steering lookahead = speed × this many seconds, clamped to
    /// `[steer_lookahead_min_m, steer_lookahead_max_m]`.
    pub steer_lookahead_secs:  f64,
    pub steer_lookahead_min_m: f64,
    pub steer_lookahead_max_m: f64,

    /// Braking lookahead = steering lookahead × this factor, clamped to
    /// `[brake_lookahead_min_m, brake_lookahead_max_m]`.
    pub brake_lookahead_factor: f64,
    pub brake_lookahead_min_m:  f64,
    pub brake_lookahead_max_m:  f64,

    /// Weight of predicted curvature (steer vs. brake bearing divergence).
    pub curvature_weight:     f64,
    /// Weight of the current heading error.
    pub heading_error_weight: f64,
    /// Weighted degrees at which severity saturates at 1.0.
    pub severity_full_deg:    f64,
    /// Speed factor at full severity (fraction of nominal speed).
    pub min_speed_factor:     f64,

    /// Acceleration, as a fraction of nominal speed gained per second.
    pub accel_per_sec: f64,
    /// Deceleration, as a fraction of nominal speed shed per second.
    pub decel_per_sec: f64,
    /// Speed never integrates below this while following a route.
    pub min_speed_mps: f64,

    /// Turn-rate cap = max(turn_rate_min_dps, turn_rate_max_dps − slope × speed).
    pub turn_rate_max_dps:     f64,
    pub turn_rate_min_dps:     f64,
    pub turn_rate_speed_slope: f64,

    /// Waypoint reach threshold = max(min, speed × secs).
    pub waypoint_reach_min_m: f64,
    pub waypoint_reach_secs:  f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            steer_lookahead_secs:   1.5,
            steer_lookahead_min_m:  10.0,
            steer_lookahead_max_m:  30.0,
            brake_lookahead_factor: 4.0,
            brake_lookahead_min_m:  40.0,
            brake_lookahead_max_m:  100.0,
            curvature_weight:       1.0,
            heading_error_weight:   0.5,
            severity_full_deg:      90.0,
            min_speed_factor:       0.3,
            accel_per_sec:          0.4,
            decel_per_sec:          1.0,
            min_speed_mps:          0.5,
            turn_rate_max_dps:      120.0,
            turn_rate_min_dps:      35.0,
            turn_rate_speed_slope:  2.5,
            waypoint_reach_min_m:   8.0,
            waypoint_reach_secs:    1.2,
        }
    }
}

// ── Maneuvers & arrival ───────────────────────────────────────────────────────

/// Turn-by-turn detection bounds and classification thresholds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManeuverConfig {
    /// Bearing changes at or below this are "continue straight".
    pub turn_threshold_deg: f64,
    /// Upper bound of a slight turn.
    pub slight_max_deg:     f64,
    /// Upper bound of a normal turn; anything larger is sharp.
    pub normal_max_deg:     f64,
    /// Stop scanning once this much path distance has been covered.
    pub scan_distance_m:    f64,
    /// Stop scanning after this many route points.
    pub scan_max_points:    usize,
    /// Segments shorter than this carry no usable bearing and are skipped.
    pub min_segment_m:      f64,
    /// Remaining distance below which the maneuver becomes "arrive".
    pub arrival_threshold_m: f64,
    /// ETA falls back to the nominal speed below this measured speed.
    pub stall_speed_mps:    f64,
}

impl Default for ManeuverConfig {
    fn default() -> Self {
        Self {
            turn_threshold_deg:  30.0,
            slight_max_deg:      45.0,
            normal_max_deg:      100.0,
            scan_distance_m:     500.0,
            scan_max_points:     25,
            min_segment_m:       0.5,
            arrival_threshold_m: 15.0,
            stall_speed_mps:     0.5,
        }
    }
}

// ── Dead reckoning ────────────────────────────────────────────────────────────

/// Magnitude-to-speed heuristic used when live positioning is unavailable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeadReckoningConfig {
    /// Planar acceleration magnitude (m/s²) below which the user is still.
    pub motion_threshold_mps2: f64,
    /// Speed gained per m/s² of magnitude above the threshold.
    pub speed_gain: f64,
    /// Speed cap as a multiple of the walking nominal speed.
    pub max_walk_multiple: f64,
}

impl Default for DeadReckoningConfig {
    fn default() -> Self {
        Self {
            motion_threshold_mps2: 0.3,
            speed_gain:            0.8,
            max_walk_multiple:     1.5,
        }
    }
}

// ── Route acquisition ─────────────────────────────────────────────────────────

/// Remote routing service settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Hard time box for the single online attempt.
    pub remote_timeout_ms: u64,
    /// Base URL of an OSRM-compatible routing service.
    pub remote_base_url: String,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            remote_timeout_ms: 4_000,
            remote_base_url:   "https://router.project-osrm.org".to_owned(),
        }
    }
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the orchestrator and the navigator.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub steering:       SteeringConfig,
    pub maneuver:       ManeuverConfig,
    pub dead_reckoning: DeadReckoningConfig,
    pub acquisition:    AcquisitionConfig,
}

impl NavConfig {
    /// Reject values that would stall or destabilise the live loop.
    pub fn validate(&self) -> NavResult<()> {
        let s = &self.steering;
        positive("steering.steer_lookahead_min_m", s.steer_lookahead_min_m)?;
        ordered("steering.steer_lookahead", s.steer_lookahead_min_m, s.steer_lookahead_max_m)?;
        positive("steering.brake_lookahead_min_m", s.brake_lookahead_min_m)?;
        ordered("steering.brake_lookahead", s.brake_lookahead_min_m, s.brake_lookahead_max_m)?;
        positive("steering.severity_full_deg", s.severity_full_deg)?;
        if !(0.0..=1.0).contains(&s.min_speed_factor) {
            return Err(NavError::Config(format!(
                "steering.min_speed_factor must lie in [0, 1], got {}",
                s.min_speed_factor
            )));
        }
        positive("steering.accel_per_sec", s.accel_per_sec)?;
        positive("steering.decel_per_sec", s.decel_per_sec)?;
        positive("steering.min_speed_mps", s.min_speed_mps)?;
        ordered("steering.turn_rate", s.turn_rate_min_dps, s.turn_rate_max_dps)?;
        positive("steering.turn_rate_min_dps", s.turn_rate_min_dps)?;
        positive("steering.waypoint_reach_min_m", s.waypoint_reach_min_m)?;

        let m = &self.maneuver;
        positive("maneuver.turn_threshold_deg", m.turn_threshold_deg)?;
        ordered("maneuver.turn_threshold/slight_max", m.turn_threshold_deg, m.slight_max_deg)?;
        ordered("maneuver.slight_max/normal_max", m.slight_max_deg, m.normal_max_deg)?;
        positive("maneuver.scan_distance_m", m.scan_distance_m)?;
        if m.scan_max_points < 3 {
            return Err(NavError::Config(
                "maneuver.scan_max_points must be at least 3".to_owned(),
            ));
        }
        positive("maneuver.arrival_threshold_m", m.arrival_threshold_m)?;
        positive("maneuver.stall_speed_mps", m.stall_speed_mps)?;

        let d = &self.dead_reckoning;
        positive("dead_reckoning.motion_threshold_mps2", d.motion_threshold_mps2)?;
        positive("dead_reckoning.max_walk_multiple", d.max_walk_multiple)?;

        if self.acquisition.remote_timeout_ms == 0 {
            return Err(NavError::Config(
                "acquisition.remote_timeout_ms must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> NavResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NavError::Config(format!("{name} must be positive, got {value}")))
    }
}

fn ordered(name: &str, lo: f64, hi: f64) -> NavResult<()> {
    if lo <= hi {
        Ok(())
    } else {
        Err(NavError::Config(format!("{name} bounds inverted: {lo} > {hi}")))
    }
}
