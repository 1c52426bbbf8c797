//! A pedestrian who walks straight at the nearest uncollected treasure.
//!
//! Movement uses a local flat-earth step (fine over a few metres) on top of
//! the haversine bearing, so the walker converges on its target instead of
//! orbiting it.

use hunt_core::{Coordinate, EARTH_RADIUS_M};
use hunt_game::Treasure;

/// Metres per degree of latitude on the haversine sphere.
const M_PER_DEG_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

pub struct Walker {
    pub position:  Coordinate,
    /// Walking speed, metres per second.
    pub speed_mps: f64,
    /// How close the walker must be to tap a treasure, metres.
    pub reach_m:   f64,
}

impl Walker {
    pub fn new(position: Coordinate, speed_mps: f64, reach_m: f64) -> Self {
        Self { position, speed_mps, reach_m }
    }

    /// Nearest treasure not yet collected.
    pub fn target<'a>(&self, treasures: &'a [Treasure]) -> Option<&'a Treasure> {
        treasures
            .iter()
            .filter(|t| !t.is_collected())
            .min_by(|a, b| {
                let da = self.position.distance_m(a.position());
                let db = self.position.distance_m(b.position());
                da.total_cmp(&db)
            })
    }

    /// Walk towards `goal` for `dt_ms`.  Returns metres covered.
    pub fn step_towards(&mut self, goal: Coordinate, dt_ms: u64) -> f64 {
        let remaining = self.position.distance_m(goal);
        let stride = (self.speed_mps * dt_ms as f64 / 1_000.0).min(remaining);
        if stride <= 0.0 {
            return 0.0;
        }
        let bearing = self.position.bearing_rad(goal);
        let d_lat = stride * bearing.cos() / M_PER_DEG_LAT;
        let d_lon = stride * bearing.sin() / (M_PER_DEG_LAT * self.position.lat.to_radians().cos());
        self.position = self.position.offset_deg(d_lat, d_lon);
        stride
    }

    pub fn can_reach(&self, treasure: &Treasure) -> bool {
        self.position.distance_m(treasure.position()) <= self.reach_m
    }
}
