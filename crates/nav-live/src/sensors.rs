//! Sensor inputs consumed by the live loop.
//!
//! Raw capture and permission handling happen elsewhere; the loop only sees
//! one [`SensorFrame`] per tick.  Any reading may be absent, and frames may
//! arrive at an irregular cadence.

use nav_core::{Coordinate, Tick, normalize_deg};

/// An absolute position from live positioning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionFix {
    pub position:    Coordinate,
    pub speed_mps:   Option<f64>,
    pub heading_deg: Option<f64>,
}

impl PositionFix {
    pub fn at(position: Coordinate) -> Self {
        Self { position, speed_mps: None, heading_deg: None }
    }
}

/// Raw readings for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SensorFrame {
    /// Compass heading in degrees.
    pub heading_deg: Option<f64>,
    /// Accelerometer `[x, y, z]` in m/s².
    pub accel:       Option<[f64; 3]>,
    pub fix:         Option<PositionFix>,
}

impl SensorFrame {
    pub fn with_fix(mut self, fix: PositionFix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn with_compass(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }

    pub fn with_accel(mut self, accel: [f64; 3]) -> Self {
        self.accel = Some(accel);
        self
    }
}

/// Sensor bias corrections, subtracted from raw readings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Calibration {
    pub heading_offset_deg: f64,
    pub accel_offsets:      [f64; 3],
}

impl Calibration {
    /// Corrected compass heading in `[0, 360)`.  Absent or non-finite
    /// readings count as zero.
    pub fn heading(&self, raw: Option<f64>) -> f64 {
        let h = raw.filter(|h| h.is_finite()).unwrap_or(0.0);
        normalize_deg(h - self.heading_offset_deg)
    }

    /// Corrected acceleration.  Absent readings count as zero.
    pub fn accel(&self, raw: Option<[f64; 3]>) -> [f64; 3] {
        let Some(a) = raw else { return [0.0; 3] };
        std::array::from_fn(|i| {
            let v = a[i] - self.accel_offsets[i];
            if v.is_finite() { v } else { 0.0 }
        })
    }
}

/// Supplies one frame per tick to [`Navigator::run_ticks`][crate::Navigator::run_ticks].
pub trait SensorSource {
    fn next_frame(&mut self, tick: Tick) -> SensorFrame;
}

impl<F: FnMut(Tick) -> SensorFrame> SensorSource for F {
    fn next_frame(&mut self, tick: Tick) -> SensorFrame {
        self(tick)
    }
}

/// A source with every reading absent.
pub struct NoSensors;

impl SensorSource for NoSensors {
    fn next_frame(&mut self, _tick: Tick) -> SensorFrame {
        SensorFrame::default()
    }
}
