//! Session observer trait for progress reporting.

use hunt_ar::Placement;
use hunt_core::{LocationError, Millis, TreasureId};
use hunt_game::Treasure;

use crate::Fix;

/// Callbacks invoked by [`HuntSession`][crate::HuntSession] as events are
/// handled.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — collection logger
///
/// ```rust,ignore
/// struct Logger;
///
/// impl HuntObserver for Logger {
///     fn on_collected(&mut self, id: TreasureId, points: u8, score: u32) {
///         println!("{id}: +{points} (total {score})");
///     }
/// }
/// ```
pub trait HuntObserver {
    /// Treasures were generated around the initial fix.
    fn on_seeded(&mut self, _origin: &Fix, _treasures: &[Treasure]) {}

    /// A projection pass finished for `fix`.  `placements` is exactly what
    /// was rendered.
    fn on_projection(&mut self, _fix: &Fix, _placements: &[Placement]) {}

    /// A treasure was collected (not called for repeat activations).
    fn on_collected(&mut self, _id: TreasureId, _points: u8, _score: u32) {}

    /// The deferred "all found" message went up.
    fn on_all_found(&mut self, _at: Millis, _score: u32) {}

    /// The watch stream reported an error.  Tracking is not restarted.
    fn on_tracking_error(&mut self, _error: LocationError) {}

    /// A message was put on screen.
    fn on_message(&mut self, _at: Millis, _text: &str) {}
}

/// A [`HuntObserver`] that does nothing.
pub struct NoopObserver;

impl HuntObserver for NoopObserver {}
