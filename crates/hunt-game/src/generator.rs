//! Random treasure layout around the player's first fix.

use hunt_core::{Coordinate, HuntConfig, HuntRng, TreasureId};

use crate::{Treasure, VisualKind};

/// Scatters a fixed number of treasures in a small square around an origin.
///
/// Each treasure's latitude and longitude are jittered independently and
/// uniformly by up to half of `jitter_deg` either way, so the layout fills a
/// `jitter_deg`-wide box centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TreasureGenerator {
    pub count:      usize,
    pub jitter_deg: f64,
    pub min_points: u8,
    pub max_points: u8,
}

impl TreasureGenerator {
    pub fn from_config(config: &HuntConfig) -> Self {
        Self {
            count:      config.treasure_count,
            jitter_deg: config.jitter_deg,
            min_points: config.min_points,
            max_points: config.max_points,
        }
    }

    /// Produce exactly `count` treasures with ids `treasure-0 .. treasure-{count-1}`.
    pub fn generate(&self, origin: Coordinate, rng: &mut HuntRng) -> Vec<Treasure> {
        let half = self.jitter_deg * 0.5;
        let treasures: Vec<Treasure> = (0..self.count)
            .map(|i| {
                let d_lat = self.jitter(half, rng);
                let d_lon = self.jitter(half, rng);
                let points = rng.gen_range(self.min_points..=self.max_points);
                Treasure::new(
                    TreasureId(i as u32),
                    origin.offset_deg(d_lat, d_lon),
                    points,
                    VisualKind::for_index(i),
                )
            })
            .collect();

        tracing::debug!(count = treasures.len(), %origin, "generated treasures");
        treasures
    }

    fn jitter(&self, half: f64, rng: &mut HuntRng) -> f64 {
        if half > 0.0 { rng.gen_range(-half..half) } else { 0.0 }
    }
}

impl Default for TreasureGenerator {
    fn default() -> Self {
        Self::from_config(&HuntConfig::default())
    }
}
