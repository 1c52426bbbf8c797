//! Recorded GPS tracks: CSV loading and replay.
//!
//! # CSV format
//!
//! ```csv
//! t_ms,lat,lon,accuracy_m,error
//! 0,51.500700,-0.124600,4.0,
//! 1000,51.500710,-0.124580,,
//! 2000,,,,3
//! ```
//!
//! | Column       | Type    | Notes                                              |
//! |--------------|---------|----------------------------------------------------|
//! | `t_ms`       | u64     | Timestamp on the session's millisecond axis        |
//! | `lat`, `lon` | f64     | Degrees; required unless `error` is set            |
//! | `accuracy_m` | f64     | Optional                                           |
//! | `error`      | u16     | Optional W3C code: 1 denied, 2 unavailable, 3 timeout |
//!
//! The first row answers the initial position request; the rest are
//! delivered on the watch stream.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use hunt_core::{Coordinate, LocationError, Millis, TrackingOptions};
use serde::Deserialize;

use crate::{Fix, LocationEvent, LocationFeed, LocationSource, Subscription, TrackError, TrackResult};

/// One row of a track CSV.
#[derive(Debug, Deserialize)]
pub struct TrackRecord {
    pub t_ms:       u64,
    pub lat:        Option<f64>,
    pub lon:        Option<f64>,
    pub accuracy_m: Option<f64>,
    pub error:      Option<u16>,
}

impl TrackRecord {
    fn into_event(self, line: usize) -> TrackResult<LocationEvent> {
        if let Some(code) = self.error {
            return LocationError::from_code(code)
                .map(Err)
                .ok_or_else(|| TrackError::Parse(format!("row {line}: unknown error code {code}")));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Ok(Fix {
                coordinate: Coordinate::new(lat, lon),
                accuracy_m: self.accuracy_m,
                timestamp:  Millis(self.t_ms),
            })),
            _ => Err(TrackError::Parse(format!("row {line}: lat/lon missing and no error code"))),
        }
    }
}

/// Parse a track from any reader.
pub fn load_track_reader<R: Read>(reader: R) -> TrackResult<Vec<LocationEvent>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut events = Vec::new();
    for (i, record) in rdr.deserialize::<TrackRecord>().enumerate() {
        // +2: one for the header, one for 1-based numbering.
        events.push(record?.into_event(i + 2)?);
    }
    Ok(events)
}

pub fn load_track_path(path: &Path) -> TrackResult<Vec<LocationEvent>> {
    let file = std::fs::File::open(path)?;
    load_track_reader(file)
}

// ── TrackSource ───────────────────────────────────────────────────────────────

/// A [`LocationSource`] that replays a recorded track.
#[derive(Debug)]
pub struct TrackSource {
    events: VecDeque<LocationEvent>,
    feed:   Option<LocationFeed>,
}

impl TrackSource {
    pub fn new(events: Vec<LocationEvent>) -> Self {
        Self { events: events.into(), feed: None }
    }

    pub fn from_path(path: &Path) -> TrackResult<Self> {
        Ok(Self::new(load_track_path(path)?))
    }

    /// Events not yet handed out.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// `true` once the watch stream's consumer has unsubscribed.
    pub fn is_cancelled(&self) -> bool {
        self.feed.as_ref().is_some_and(LocationFeed::is_cancelled)
    }
}

impl LocationSource for TrackSource {
    fn current_position(&mut self, _options: &TrackingOptions) -> Result<Fix, LocationError> {
        self.events.pop_front().unwrap_or(Err(LocationError::PositionUnavailable))
    }

    fn watch_position(&mut self, _options: &TrackingOptions) -> Subscription {
        let (feed, subscription) = Subscription::channel();
        for event in self.events.drain(..) {
            feed.push(event);
        }
        self.feed = Some(feed);
        subscription
    }
}
