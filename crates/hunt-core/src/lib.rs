//! `hunt-core` — foundational types for the `rust_hunt` AR treasure-hunt core.
//!
//! This crate is a dependency of every other `hunt-*` crate.  It has no
//! `hunt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geo`]         | `Coordinate`, haversine distance, initial bearing     |
//! | [`ids`]         | `TreasureId`                                          |
//! | [`time`]        | `Millis`, `GameClock`                                 |
//! | [`rng`]         | `HuntRng`                                             |
//! | [`config`]      | `HuntConfig`, `TrackingOptions`                       |
//! | [`error`]       | `HuntError`, `HuntResult`, `LocationError`            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HuntConfig, TrackingOptions};
pub use error::{HuntError, HuntResult, LocationError};
pub use geo::{Coordinate, EARTH_RADIUS_M, bearing_radians, distance_meters};
pub use ids::TreasureId;
pub use rng::HuntRng;
pub use time::{GameClock, Millis};
