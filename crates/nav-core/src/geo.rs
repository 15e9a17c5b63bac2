//! Geographic coordinate type and geodesic primitives.
//!
//! All three primitives work on a spherical Earth of radius
//! [`EARTH_RADIUS_M`] (the WGS-84 equatorial radius).  They are pure and hold
//! no shared state, so they are safe to call from any thread.
//!
//! `Coordinate` uses `f64` latitude/longitude.  The live navigation loop
//! integrates sub-metre steps every frame, and `f32` drift would show up as a
//! visible wobble within a few hundred ticks.

/// Earth radius used by every geodesic computation, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Symmetric and non-negative; `a.distance_m(a)` is exactly zero.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Clamp guards against a > 1.0 from rounding on antipodal pairs.
        let c = 2.0 * a.min(1.0).sqrt().asin();
        EARTH_RADIUS_M * c
    }

    /// Initial forward azimuth from `self` to `other`, in degrees `[0, 360)`.
    ///
    /// Returns `0.0` when both points coincide.
    pub fn bearing_deg(self, other: Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_deg(y.atan2(x).to_degrees())
    }

    /// Solve the direct problem: the point reached by travelling
    /// `distance_m` metres from `self` along initial bearing `bearing_deg`.
    ///
    /// Longitude of the result is normalised to `[-180, 180)`.
    pub fn destination(self, distance_m: f64, bearing_deg: f64) -> Coordinate {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();

        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
        let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

        Coordinate {
            lat: lat2.to_degrees(),
            lon: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest rotation from heading `from` to heading `to`, in
/// `(-180, 180]`.  Positive is clockwise (a right turn).
///
/// Both inputs may be unwrapped (any real value); only their difference
/// modulo 360 matters.
#[inline]
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}
