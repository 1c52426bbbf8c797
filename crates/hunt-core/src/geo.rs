//! Geographic coordinate type and geodesy helpers.
//!
//! `Coordinate` uses `f64` latitude/longitude.  Treasures sit within a few
//! metres of the player, so single precision (~1 m at the equator) would make
//! the AR offsets visibly jitter.
//!
//! Longitude wraparound at ±180° is not handled: the haversine and bearing
//! formulas are only fed regional distances.

/// Mean Earth radius used by the spherical model, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial bearing (forward azimuth) from `self` towards `other`.
    ///
    /// Radians in (−π, π], measured clockwise from true north: east is
    /// `+π/2`, west is `−π/2`.
    pub fn bearing_rad(self, other: Coordinate) -> f64 {
        let d_lon = (other.lon - self.lon).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x)
    }

    /// Shift by raw degree offsets.  No normalisation is applied.
    #[inline]
    pub fn offset_deg(self, d_lat: f64, d_lon: f64) -> Coordinate {
        Coordinate::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Free-function form of [`Coordinate::distance_m`].
#[inline]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    a.distance_m(b)
}

/// Free-function form of [`Coordinate::bearing_rad`].
#[inline]
pub fn bearing_radians(a: Coordinate, b: Coordinate) -> f64 {
    a.bearing_rad(b)
}
