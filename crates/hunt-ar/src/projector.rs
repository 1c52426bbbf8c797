//! `Projector` — decides where (and whether) each treasure appears.

use std::f64::consts::TAU;

use glam::Vec3;
use hunt_core::{Coordinate, HuntConfig, TreasureId};
use hunt_game::{Treasure, VisualKind};

/// How treasures are laid out relative to the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProjectionMode {
    /// Real placement from distance and bearing.
    Geo {
        /// Treasures further away than this are skipped for the pass.
        visibility_radius_m: f64,
        /// Treasures further away than this carry a directional arrow.
        arrow_distance_m:    f64,
    },
    /// Ignore GPS: spread treasures evenly on a ring around the camera, all
    /// visible and all with arrows.
    DebugRing { radius_m: f64 },
}

/// Where one treasure goes in this projection pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub id:         TreasureId,
    /// Position of the treasure in the session's treasure list.
    pub index:      usize,
    pub kind:       VisualKind,
    /// Camera-relative offset in metres (`y` is always 0).
    pub offset:     Vec3,
    /// Real-world distance from the device.  `None` in debug-ring mode.
    pub distance_m: Option<f64>,
    /// Attach a "walk this way" arrow above the treasure.
    pub arrow:      bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    pub mode: ProjectionMode,
}

impl Projector {
    pub fn new(mode: ProjectionMode) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &HuntConfig) -> Self {
        let mode = if config.debug_mode {
            ProjectionMode::DebugRing { radius_m: config.debug_ring_radius_m }
        } else {
            ProjectionMode::Geo {
                visibility_radius_m: config.visibility_radius_m,
                arrow_distance_m:    config.arrow_distance_m,
            }
        };
        Self { mode }
    }

    /// Project every uncollected treasure seen from `device`.
    ///
    /// Collected treasures and (in geo mode) out-of-range ones are omitted.
    /// Output order follows the treasure list.
    pub fn project(&self, device: Coordinate, treasures: &[Treasure]) -> Vec<Placement> {
        let total = treasures.len();
        treasures
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_collected())
            .filter_map(|(index, t)| self.place(device, t, index, total))
            .collect()
    }

    /// Placement for a single treasure at `index` of `total`.
    ///
    /// Returns `None` when the treasure is beyond the visibility radius.  The
    /// collected flag is not consulted here.
    pub fn place(
        &self,
        device:   Coordinate,
        treasure: &Treasure,
        index:    usize,
        total:    usize,
    ) -> Option<Placement> {
        match self.mode {
            ProjectionMode::DebugRing { radius_m } => {
                let angle = TAU * index as f64 / total.max(1) as f64;
                Some(Placement {
                    id:         treasure.id(),
                    index,
                    kind:       treasure.kind(),
                    offset:     polar_offset(angle, radius_m),
                    distance_m: None,
                    arrow:      true,
                })
            }
            ProjectionMode::Geo { visibility_radius_m, arrow_distance_m } => {
                let target = treasure.position();
                let distance = device.distance_m(target);
                if distance > visibility_radius_m {
                    return None;
                }
                let bearing = device.bearing_rad(target);
                Some(Placement {
                    id:         treasure.id(),
                    index,
                    kind:       treasure.kind(),
                    offset:     polar_offset(bearing, distance),
                    distance_m: Some(distance),
                    arrow:      distance > arrow_distance_m,
                })
            }
        }
    }
}

/// Compass angle (clockwise from north) and range to scene `x`/`z`.
/// North maps to `−z`.
#[inline]
fn polar_offset(angle: f64, range: f64) -> Vec3 {
    let x = angle.sin() * range;
    let z = -angle.cos() * range;
    Vec3::new(x as f32, 0.0, z as f32)
}
