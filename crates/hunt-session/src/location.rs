//! Location sources and the cancellable update stream.
//!
//! A [`LocationSource`] answers a one-shot "where am I" and opens a
//! [`Subscription`] for continuous updates.  The subscription is the
//! receiving half of an unbounded channel; the host (or a test) holds the
//! matching [`LocationFeed`] and pushes events into it as the platform
//! delivers them.  Events are consumed in delivery order.

use async_channel::{Receiver, Sender};
use hunt_core::{Coordinate, LocationError, Millis, TrackingOptions};

/// One position report.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,
    /// Reported horizontal accuracy, metres.
    pub accuracy_m: Option<f64>,
    /// When the fix was taken, on the session's millisecond axis.
    pub timestamp:  Millis,
}

impl Fix {
    pub fn new(coordinate: Coordinate, timestamp: Millis) -> Self {
        Self { coordinate, accuracy_m: None, timestamp }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}

/// An item on a watch stream.
pub type LocationEvent = Result<Fix, LocationError>;

/// The platform's positioning service.
pub trait LocationSource {
    /// One-shot position request.
    fn current_position(&mut self, options: &TrackingOptions) -> Result<Fix, LocationError>;

    /// Start continuous updates.  The stream stays open until the returned
    /// subscription is unsubscribed or the source stops feeding it.
    fn watch_position(&mut self, options: &TrackingOptions) -> Subscription;
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// Consumer end of a location update stream.
#[derive(Debug)]
pub struct Subscription {
    rx:        Receiver<LocationEvent>,
    cancelled: bool,
}

impl Subscription {
    /// Create a connected feed/subscription pair.
    pub fn channel() -> (LocationFeed, Subscription) {
        let (tx, rx) = async_channel::unbounded();
        (LocationFeed { tx }, Subscription { rx, cancelled: false })
    }

    /// Next delivered event, without blocking.
    ///
    /// `None` means nothing is waiting right now, or the stream has ended.
    /// Use [`is_active`](Self::is_active) to tell the two apart.
    pub fn try_next(&mut self) -> Option<LocationEvent> {
        if self.cancelled {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Block the current thread until the next event arrives.  Returns
    /// `None` once the stream has ended.
    pub fn next_blocking(&mut self) -> Option<LocationEvent> {
        if self.cancelled {
            return None;
        }
        self.rx.recv_blocking().ok()
    }

    /// Stop receiving updates.  Undelivered events are dropped and the feed
    /// side observes the cancellation.
    pub fn unsubscribe(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.rx.close();
            tracing::debug!(dropped = self.rx.len(), "location subscription cancelled");
        }
    }

    /// `false` once unsubscribed, or once the feed is gone and every
    /// delivered event has been consumed.
    pub fn is_active(&self) -> bool {
        !self.cancelled && !(self.rx.is_closed() && self.rx.is_empty())
    }

    /// Events delivered but not yet consumed.
    pub fn pending(&self) -> usize {
        if self.cancelled { 0 } else { self.rx.len() }
    }
}

/// Producer end of a location update stream.
#[derive(Clone, Debug)]
pub struct LocationFeed {
    tx: Sender<LocationEvent>,
}

impl LocationFeed {
    /// Deliver an event.  Returns `false` if the subscriber has gone away.
    pub fn push(&self, event: LocationEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }

    pub fn push_fix(&self, fix: Fix) -> bool {
        self.push(Ok(fix))
    }

    /// `true` once the subscription was unsubscribed or dropped.
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// A [`LocationSource`] that replays a fixed script.
///
/// The initial result answers `current_position`; `updates` are delivered
/// in order as soon as `watch_position` is called.  The source keeps the
/// feed open afterwards, so more events can be pushed with
/// [`push`](Self::push).
#[derive(Debug)]
pub struct ScriptedSource {
    initial: Result<Fix, LocationError>,
    updates: Vec<LocationEvent>,
    feed:    Option<LocationFeed>,
    /// Options passed to the last `watch_position` call.
    pub last_options: Option<TrackingOptions>,
}

impl ScriptedSource {
    pub fn new(initial: Result<Fix, LocationError>, updates: Vec<LocationEvent>) -> Self {
        Self { initial, updates, feed: None, last_options: None }
    }

    /// A source whose initial fix fails with `error`.
    pub fn failing(error: LocationError) -> Self {
        Self::new(Err(error), Vec::new())
    }

    /// Deliver another event on the open stream.  Returns `false` if no
    /// stream is open or it was cancelled.
    pub fn push(&self, event: LocationEvent) -> bool {
        self.feed.as_ref().is_some_and(|feed| feed.push(event))
    }

    pub fn feed(&self) -> Option<&LocationFeed> {
        self.feed.as_ref()
    }
}

impl LocationSource for ScriptedSource {
    fn current_position(&mut self, _options: &TrackingOptions) -> Result<Fix, LocationError> {
        self.initial
    }

    fn watch_position(&mut self, options: &TrackingOptions) -> Subscription {
        let (feed, subscription) = Subscription::channel();
        for event in self.updates.drain(..) {
            feed.push(event);
        }
        self.feed = Some(feed);
        self.last_options = Some(options.clone());
        subscription
    }
}
