//! Session configuration.
//!
//! Typically built with `HuntConfig::default()` and tweaked by the host, or
//! loaded from a JSON file with the `serde` feature.  Missing JSON fields fall
//! back to the defaults below.

/// Hints passed to the location source when subscribing to updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackingOptions {
    /// Ask for GPS-grade rather than network-grade fixes.
    pub high_accuracy: bool,
    /// Oldest cached fix the source may hand back, in milliseconds.
    pub maximum_age_ms: u64,
    /// Acquisition timeout per fix, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            high_accuracy:  true,
            maximum_age_ms: 1_000,
            timeout_ms:     20_000,
        }
    }
}

/// Top-level hunt configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HuntConfig {
    /// Number of treasures generated around the initial fix.
    pub treasure_count: usize,

    /// Side of the square (in degrees) the treasures are scattered in,
    /// centred on the initial fix.  0.0002° is roughly 10 m per side.
    pub jitter_deg: f64,

    /// Inclusive point-value range.
    pub min_points: u8,
    pub max_points: u8,

    /// Ignore GPS placement and lay treasures out on a ring around the camera.
    pub debug_mode: bool,

    /// Ring radius used in debug mode, metres.
    pub debug_ring_radius_m: f64,

    /// Treasures further than this are left out of a projection pass.
    pub visibility_radius_m: f64,

    /// Treasures further than this get a directional arrow.
    pub arrow_distance_m: f64,

    /// Default on-screen lifetime of a message.
    pub message_duration_ms: u64,

    /// Delay between the last collection and the final "all found" message.
    pub victory_delay_ms: u64,

    /// Master RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub tracking: TrackingOptions,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            treasure_count:      5,
            jitter_deg:          0.0002,
            min_points:          1,
            max_points:          10,
            debug_mode:          false,
            debug_ring_radius_m: 3.0,
            visibility_radius_m: 100.0,
            arrow_distance_m:    10.0,
            message_duration_ms: 3_000,
            victory_delay_ms:    2_000,
            seed:                None,
            tracking:            TrackingOptions::default(),
        }
    }
}

impl HuntConfig {
    /// Reject configurations the generator or projector cannot honour.
    pub fn validate(&self) -> crate::HuntResult<()> {
        use crate::HuntError::Config;

        if self.treasure_count == 0 {
            return Err(Config("treasure_count must be at least 1".into()));
        }
        if u32::try_from(self.treasure_count).is_err() {
            return Err(Config(format!("treasure_count {} is too large", self.treasure_count)));
        }
        if !self.jitter_deg.is_finite() || self.jitter_deg < 0.0 {
            return Err(Config(format!("jitter_deg must be finite and >= 0, got {}", self.jitter_deg)));
        }
        if self.min_points == 0 || self.min_points > self.max_points {
            return Err(Config(format!(
                "point range [{}, {}] must be non-empty and start at 1 or above",
                self.min_points, self.max_points
            )));
        }
        for (name, value) in [
            ("debug_ring_radius_m", self.debug_ring_radius_m),
            ("visibility_radius_m", self.visibility_radius_m),
            ("arrow_distance_m",    self.arrow_distance_m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Config(format!("{name} must be finite and >= 0, got {value}")));
            }
        }
        Ok(())
    }
}
