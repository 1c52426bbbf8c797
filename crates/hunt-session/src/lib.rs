//! `hunt-session` — the event-driven controller that ties a hunt together.
//!
//! # Event model
//!
//! Everything runs on the host's single event loop.  The host calls into
//! [`HuntSession`] for four kinds of event, each handled to completion
//! before the next:
//!
//! ```text
//! start(source, now)     ① initial fix → generate treasures → subscribe → welcome message
//! pump() / pump_one()    ② each delivered fix → projection pass → scene rebuild
//!                          each delivered error → logged, observer notified
//! activate(id)           ③ collect → score UI → message → remove entity → maybe schedule victory
//! advance_to(now)        ④ fire due timers (message auto-hide, victory message)
//! ```
//!
//! The location stream is a cancellable [`Subscription`]; call
//! [`HuntSession::stop_tracking`] to tear it down.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hunt_ar::SceneGraph;
//! use hunt_core::{HuntConfig, Millis};
//! use hunt_session::{NoopObserver, SessionBuilder, TextUi};
//!
//! let mut session = SessionBuilder::new(HuntConfig::default(), SceneGraph::new(), TextUi::new())
//!     .build()?;
//! session.start(&mut source, Millis(0), &mut NoopObserver)?;
//! session.pump(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod location;
pub mod messages;
pub mod observer;
pub mod session;
pub mod timers;
pub mod track;
pub mod ui;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use error::{TrackError, TrackResult};
pub use location::{Fix, LocationEvent, LocationFeed, LocationSource, ScriptedSource, Subscription};
pub use messages::MessageBoard;
pub use observer::{HuntObserver, NoopObserver};
pub use session::HuntSession;
pub use timers::{TimerQueue, TimerTask};
pub use track::{TrackRecord, TrackSource, load_track_path, load_track_reader};
pub use ui::{TextUi, UiSurface};
