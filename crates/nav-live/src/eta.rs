//! Estimated time of arrival.

/// Remaining distance, travel time, and wall-clock arrival.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eta {
    pub remaining_m:       f64,
    pub duration_secs:     f64,
    pub arrival_unix_secs: f64,
}

impl Eta {
    /// Estimate from the measured speed, or from `nominal_mps` when the
    /// measured speed is below `stall_mps`.
    pub fn estimate(
        remaining_m: f64,
        speed_mps:   f64,
        nominal_mps: f64,
        stall_mps:   f64,
        now_unix:    f64,
    ) -> Self {
        let effective = if speed_mps < stall_mps { nominal_mps } else { speed_mps };
        let duration_secs = if effective > 0.0 { remaining_m / effective } else { 0.0 };
        Self {
            remaining_m,
            duration_secs,
            arrival_unix_secs: now_unix + duration_secs,
        }
    }
}
