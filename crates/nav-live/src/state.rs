//! Per-tick navigation state exposed to the UI.

use nav_core::{Coordinate, normalize_deg};

use crate::eta::Eta;

/// Which update the live loop applied on a tick.
///
/// Chosen afresh every tick by [`Navigator::step`][crate::Navigator::step]:
///
/// | Strategy      | When                                                       |
/// |---------------|------------------------------------------------------------|
/// | `FollowRoute` | a route is installed, navigation is on, not yet arrived    |
/// | `Idle`        | otherwise, when the frame carries a position fix           |
/// | `DeadReckon`  | otherwise (no positioning available)                       |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateStrategy {
    FollowRoute,
    DeadReckon,
    #[default]
    Idle,
}

impl UpdateStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateStrategy::FollowRoute => "follow_route",
            UpdateStrategy::DeadReckon  => "dead_reckon",
            UpdateStrategy::Idle        => "idle",
        }
    }
}

// ── Maneuvers ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManeuverKind {
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    Arrive,
}

impl ManeuverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ManeuverKind::Straight    => "straight",
            ManeuverKind::SlightLeft  => "slight_left",
            ManeuverKind::SlightRight => "slight_right",
            ManeuverKind::Left        => "left",
            ManeuverKind::Right       => "right",
            ManeuverKind::SharpLeft   => "sharp_left",
            ManeuverKind::SharpRight  => "sharp_right",
            ManeuverKind::Arrive      => "arrive",
        }
    }
}

/// The next announced direction change.  Recomputed every tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManeuverDescriptor {
    pub kind:       ManeuverKind,
    pub distance_m: f64,
    pub text:       String,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// The live loop's working state after a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationSnapshot {
    pub position: Coordinate,

    /// Accumulated heading in degrees.  Never wrapped: crossing north moves
    /// it past 360 or below 0 instead of jumping.  Use
    /// [`heading_deg`](Self::heading_deg) for a compass value.
    pub heading_acc_deg: f64,

    pub speed_mps: f64,

    /// Index of the route point currently steered toward.  Only increases
    /// while one route is installed; reset to 1 when a route is installed.
    pub next_waypoint_index: usize,

    pub maneuver: Option<ManeuverDescriptor>,
    pub eta:      Option<Eta>,
    pub strategy: UpdateStrategy,
    pub arrived:  bool,
}

impl NavigationSnapshot {
    /// Stationary state at `position`, facing north.
    pub fn at(position: Coordinate) -> Self {
        Self {
            position,
            heading_acc_deg:     0.0,
            speed_mps:           0.0,
            next_waypoint_index: 0,
            maneuver:            None,
            eta:                 None,
            strategy:            UpdateStrategy::Idle,
            arrived:             false,
        }
    }

    /// Compass heading in `[0, 360)`.
    #[inline]
    pub fn heading_deg(&self) -> f64 {
        normalize_deg(self.heading_acc_deg)
    }
}
