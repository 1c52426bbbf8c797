//! Host time model.
//!
//! # Design
//!
//! The core never reads a wall clock.  The host passes the current time in
//! as a [`Millis`] value (milliseconds since session start, or any other
//! monotonic origin) whenever it delivers an event or advances time.  Timers
//! (message auto-hide, the deferred "all found" message) are scheduled
//! against that same axis, which keeps every code path deterministic under
//! test.

use std::fmt;

// ── Millis ───────────────────────────────────────────────────────────────────

/// A point on the host's monotonic millisecond axis.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub for Millis {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Millis) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// The session's notion of "now".
///
/// Only ever moves forward: an [`advance_to`](Self::advance_to) with an
/// earlier instant is ignored, so out-of-order host timestamps cannot make
/// already-fired timers fire again.
#[derive(Clone, Debug, Default)]
pub struct GameClock {
    now: Millis,
}

impl GameClock {
    pub fn new(start: Millis) -> Self {
        Self { now: start }
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move the clock to `instant` if it lies in the future.  Returns the
    /// resulting current time.
    pub fn advance_to(&mut self, instant: Millis) -> Millis {
        if instant > self.now {
            self.now = instant;
        }
        self.now
    }

    #[inline]
    pub fn advance_by(&mut self, ms: u64) -> Millis {
        self.now = self.now + ms;
        self.now
    }
}
