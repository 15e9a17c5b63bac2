//! Transportation mode enum shared by the planner and the live loop.
//!
//! Each mode is bound to a nominal cruising speed.  The live loop scales its
//! target speed from this value, and ETA falls back to it whenever the
//! measured speed is near zero.

/// The means by which the user is travelling.
///
/// Defaults to `Car` so a caller that never selects a mode still gets a
/// route and a moving estimate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// On foot.
    Walk,
    /// Bicycle.
    Bike,
    /// Private vehicle.
    #[default]
    Car,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Walk, TransportMode::Bike, TransportMode::Car];

    /// Nominal cruising speed in metres per second.
    #[inline]
    pub fn nominal_speed_mps(self) -> f64 {
        match self {
            TransportMode::Walk => 1.4,
            TransportMode::Bike => 4.2,
            TransportMode::Car  => 11.1,
        }
    }

    /// Profile segment used in remote routing-service URLs.
    pub fn profile(self) -> &'static str {
        match self {
            TransportMode::Walk => "walking",
            TransportMode::Bike => "cycling",
            TransportMode::Car  => "driving",
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Car  => "car",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = crate::NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" | "foot" => Ok(TransportMode::Walk),
            "bike" | "cycling" | "bicycle" => Ok(TransportMode::Bike),
            "car" | "driving" => Ok(TransportMode::Car),
            other => Err(crate::NavError::Parse(format!(
                "unknown transport mode {other:?}: expected walk, bike, or car"
            ))),
        }
    }
}
