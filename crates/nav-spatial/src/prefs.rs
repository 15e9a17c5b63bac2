//! Routing preference flags and the edge penalty they induce.

use crate::network::{GraphEdge, SurfaceKind};

/// Multiplier applied to unpaved edges when `prefer_paved` is set.
pub const UNPAVED_PENALTY: f64 = 3.0;
/// Multiplier applied to hilly edges when `avoid_hills` is set.
pub const HILL_PENALTY: f64 = 5.0;
/// Multiplier applied to paved edges when `allow_highways` is cleared.
///
/// The offline graph has no road-class attribute, so "paved" stands in for
/// "highway" here.
pub const HIGHWAY_PENALTY: f64 = 2.0;

/// User-selected routing preferences.
///
/// Pure configuration: it only scales edge costs inside the pathfinder and
/// never touches graph data.  Every combination is valid; penalties compose
/// multiplicatively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingPreferences {
    pub prefer_paved:   bool,
    pub avoid_hills:    bool,
    pub allow_highways: bool,
}

impl Default for RoutingPreferences {
    fn default() -> Self {
        Self {
            prefer_paved:   false,
            avoid_hills:    false,
            allow_highways: true,
        }
    }
}

impl RoutingPreferences {
    /// Combined cost multiplier for `edge` (always `>= 1.0`).
    #[inline]
    pub fn penalty(&self, edge: &GraphEdge) -> f64 {
        let mut factor = 1.0;
        if self.prefer_paved && edge.surface == SurfaceKind::Unpaved {
            factor *= UNPAVED_PENALTY;
        }
        if self.avoid_hills && edge.hilly {
            factor *= HILL_PENALTY;
        }
        if !self.allow_highways && edge.surface == SurfaceKind::Paved {
            factor *= HIGHWAY_PENALTY;
        }
        factor
    }

    /// Preference-adjusted cost of traversing `edge`.
    #[inline]
    pub fn edge_cost(&self, edge: &GraphEdge) -> f64 {
        edge.weight_m * self.penalty(edge)
    }
}
