//! `hunt-ar` — turns treasure coordinates into camera-relative scene entities.
//!
//! # Pipeline
//!
//! ```text
//! device fix ──► Projector::project ──► Vec<Placement> ──► SceneRenderer::rebuild ──► SceneSink
//!                 (pure: distance,                           (clear, then one entity
//!                  bearing, culling, arrows)                  per placement)
//! ```
//!
//! # Scene axes
//!
//! The host scene is right-handed with the camera looking down `−z`.  A
//! treasure due north of the player lands at `(0, 0, −d)`, due east at
//! `(d, 0, 0)`.  `y` is always 0: treasures sit at camera height.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`projector`]   | `Projector`, `ProjectionMode`, `Placement`                 |
//! | [`scene`]       | `SceneSink`, `TreasureEntity`, `Primitive`, `SceneRenderer`, `SceneGraph` |

pub mod projector;
pub mod scene;


pub use projector::{Placement, ProjectionMode, Projector};
pub use scene::{Color, Primitive, SceneGraph, SceneRenderer, SceneSink, TreasureEntity};
