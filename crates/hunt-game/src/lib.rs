//! `hunt-game` — treasures and the score ledger.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`treasure`]    | `Treasure`, `VisualKind`                              |
//! | [`generator`]   | `TreasureGenerator` (random layout around a fix)      |
//! | [`ledger`]      | `GameState` (score, collected count, treasure list)   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod generator;
pub mod ledger;
pub mod treasure;


pub use generator::TreasureGenerator;
pub use ledger::{Collection, GameState};
pub use treasure::{Treasure, VisualKind};
