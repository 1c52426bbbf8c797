//! Integration tests for hunt-session.

use hunt_ar::{Placement, SceneGraph};
use hunt_core::{Coordinate, HuntConfig, HuntError, HuntRng, LocationError, Millis, TreasureId};
use hunt_game::{Collection, Treasure};

use crate::{
    Fix, HuntObserver, HuntSession, LocationEvent, NoopObserver, ScriptedSource, SessionBuilder,
    TextUi,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Metres per degree of latitude on the haversine sphere.
const M_PER_DEG_LAT: f64 = 111_194.93;

type TestSession = HuntSession<SceneGraph, TextUi>;

fn origin() -> Coordinate {
    Coordinate::new(48.8584, 2.2945)
}

fn fix_at(coordinate: Coordinate, t_ms: u64) -> LocationEvent {
    Ok(Fix::new(coordinate, Millis(t_ms)))
}

/// A point `metres` due south of the origin.
fn south(metres: f64) -> Coordinate {
    origin().offset_deg(-metres / M_PER_DEG_LAT, 0.0)
}

fn session(config: HuntConfig) -> TestSession {
    SessionBuilder::new(config, SceneGraph::new(), TextUi::new())
        .rng(HuntRng::new(11))
        .build()
        .unwrap()
}

fn started(config: HuntConfig, updates: Vec<LocationEvent>) -> (TestSession, ScriptedSource) {
    let mut s = session(config);
    let mut source = ScriptedSource::new(Ok(Fix::new(origin(), Millis(0))), updates);
    s.start(&mut source, Millis(0), &mut NoopObserver).unwrap();
    (s, source)
}

fn debug_config() -> HuntConfig {
    HuntConfig { debug_mode: true, ..HuntConfig::default() }
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Recorder {
    seeded:      usize,
    passes:      Vec<usize>,
    arrows:      Vec<bool>,
    collected:   Vec<(TreasureId, u8, u32)>,
    all_found:   Vec<(Millis, u32)>,
    errors:      Vec<LocationError>,
    messages:    Vec<(Millis, String)>,
}

impl HuntObserver for Recorder {
    fn on_seeded(&mut self, _origin: &Fix, treasures: &[Treasure]) {
        self.seeded = treasures.len();
    }
    fn on_projection(&mut self, _fix: &Fix, placements: &[Placement]) {
        self.passes.push(placements.len());
        self.arrows = placements.iter().map(|p| p.arrow).collect();
    }
    fn on_collected(&mut self, id: TreasureId, points: u8, score: u32) {
        self.collected.push((id, points, score));
    }
    fn on_all_found(&mut self, at: Millis, score: u32) {
        self.all_found.push((at, score));
    }
    fn on_tracking_error(&mut self, error: LocationError) {
        self.errors.push(error);
    }
    fn on_message(&mut self, at: Millis, text: &str) {
        self.messages.push((at, text.to_owned()));
    }
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod start_tests {
    use super::*;

    #[test]
    fn start_seeds_and_subscribes() {
        let mut s = session(HuntConfig::default());
        let mut source = ScriptedSource::new(Ok(Fix::new(origin(), Millis(0))), vec![]);
        let mut rec = Recorder::default();

        s.start(&mut source, Millis(0), &mut rec).unwrap();

        assert_eq!(rec.seeded, 5);
        assert_eq!(s.state().treasures().len(), 5);
        assert!(s.is_tracking());
        assert_eq!(s.ui().score_text(), "0");
        assert_eq!(s.ui().message(), Some("Find and collect the AR treasures around you!"));
        assert_eq!(source.last_options, Some(s.config().tracking.clone()));
        // Nothing is drawn until the first watch update arrives.
        assert!(s.scene().is_empty());
        assert_eq!(s.last_fix().map(|f| f.coordinate), Some(origin()));
    }

    #[test]
    fn failed_fix_shows_error_and_generates_nothing() {
        let mut s = session(HuntConfig::default());
        let mut source = ScriptedSource::failing(LocationError::PermissionDenied);

        let result = s.start(&mut source, Millis(0), &mut NoopObserver);

        assert!(matches!(result, Err(HuntError::Location(LocationError::PermissionDenied))));
        assert!(!s.state().is_seeded());
        assert!(!s.is_tracking());
        assert_eq!(s.ui().score_text(), "0");
        assert_eq!(
            s.ui().message(),
            Some("Error accessing your location. Please enable location services.")
        );
    }

    #[test]
    fn second_start_is_rejected() {
        let (mut s, _) = started(HuntConfig::default(), vec![]);
        s.activate(TreasureId(0), &mut NoopObserver).unwrap();
        let score = s.state().score();

        let mut again = ScriptedSource::new(Ok(Fix::new(south(500.0), Millis(10))), vec![]);
        let result = s.start(&mut again, Millis(10), &mut NoopObserver);

        assert!(matches!(result, Err(HuntError::AlreadySeeded)));
        assert_eq!(s.state().score(), score);
    }

    #[test]
    fn builder_rejects_bad_config() {
        let config = HuntConfig { treasure_count: 0, ..HuntConfig::default() };
        let result = SessionBuilder::new(config, SceneGraph::new(), TextUi::new()).build();
        assert!(matches!(result, Err(HuntError::Config(_))));
    }

    #[test]
    fn config_seed_is_reproducible() {
        let config = HuntConfig { seed: Some(99), ..HuntConfig::default() };
        let layout = |config: HuntConfig| {
            let mut s = SessionBuilder::new(config, SceneGraph::new(), TextUi::new())
                .build()
                .unwrap();
            let mut source = ScriptedSource::new(Ok(Fix::new(origin(), Millis(0))), vec![]);
            s.start(&mut source, Millis(0), &mut NoopObserver).unwrap();
            s.state().treasures().to_vec()
        };
        assert_eq!(layout(config.clone()), layout(config));
    }
}

// ── Projection passes ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tracking_tests {
    use super::*;

    #[test]
    fn debug_ring_renders_all_five() {
        let (mut s, _) = started(debug_config(), vec![fix_at(south(10_000.0), 100)]);
        let mut rec = Recorder::default();

        assert_eq!(s.pump(&mut rec), 1);

        assert_eq!(rec.passes, vec![5]);
        assert!(rec.arrows.iter().all(|&a| a));
        assert_eq!(s.scene().len(), 5);
        for (i, entity) in s.scene().entities().enumerate() {
            let angle = (72.0 * i as f32).to_radians();
            assert!((entity.position.x - angle.sin() * 3.0).abs() < 1e-3);
            assert!((entity.position.z + angle.cos() * 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn far_device_renders_nothing_until_it_returns() {
        let (mut s, _) = started(
            HuntConfig::default(),
            vec![fix_at(south(1_000.0), 100), fix_at(origin(), 200)],
        );
        let mut rec = Recorder::default();

        assert!(s.pump_one(&mut rec));
        assert!(s.scene().is_empty());
        assert!(s.pump_one(&mut rec));
        assert_eq!(s.scene().len(), 5);
        assert!(!s.pump_one(&mut rec));
        assert_eq!(rec.passes, vec![0, 5]);
    }

    #[test]
    fn fifty_metres_out_gets_arrows() {
        let (mut s, _) = started(HuntConfig::default(), vec![fix_at(south(50.0), 100)]);
        let mut rec = Recorder::default();
        s.pump(&mut rec);

        assert_eq!(rec.passes, vec![5]);
        assert!(rec.arrows.iter().all(|&a| a));
        assert!(s.scene().entities().all(|e| e.has_arrow));
    }

    #[test]
    fn standing_on_origin_has_no_arrows() {
        // Every treasure is within ~7.5 m of the origin.
        let (mut s, _) = started(HuntConfig::default(), vec![fix_at(origin(), 100)]);
        s.pump(&mut NoopObserver);
        assert!(s.scene().entities().all(|e| !e.has_arrow));
    }

    #[test]
    fn every_update_is_a_pass() {
        let updates = (1..=4).map(|i| fix_at(origin(), i * 100)).collect();
        let (mut s, _) = started(debug_config(), updates);
        assert_eq!(s.pump(&mut NoopObserver), 4);
        assert_eq!(s.projection_passes(), 4);
        assert_eq!(s.last_fix().map(|f| f.timestamp), Some(Millis(400)));
    }

    #[test]
    fn tracking_errors_are_logged_not_shown() {
        let (mut s, source) = started(
            debug_config(),
            vec![fix_at(origin(), 100), Err(LocationError::Timeout)],
        );
        let mut rec = Recorder::default();
        // Let the welcome message expire first.
        s.advance_to(Millis(5_000), &mut rec);
        assert_eq!(s.ui().message(), None);

        s.pump(&mut rec);

        assert_eq!(rec.errors, vec![LocationError::Timeout]);
        assert!(rec.messages.is_empty());
        assert_eq!(s.ui().message(), None);
        assert_eq!(s.scene().len(), 5, "scene keeps the last pass");

        // The stream is still open: later fixes are still handled.
        assert!(source.push(fix_at(origin(), 6_000)));
        assert_eq!(s.pump(&mut rec), 1);
        assert_eq!(rec.passes.len(), 2);
    }

    #[test]
    fn stop_tracking_cancels_the_stream() {
        let (mut s, source) = started(debug_config(), vec![fix_at(origin(), 100)]);
        s.stop_tracking();

        assert!(!s.is_tracking());
        assert_eq!(s.pump(&mut NoopObserver), 0);
        assert!(source.feed().unwrap().is_cancelled());
        assert!(!source.push(fix_at(origin(), 200)));
    }

    #[test]
    fn fix_timestamp_drives_timers() {
        let (mut s, _) = started(debug_config(), vec![fix_at(origin(), 3_000)]);
        assert!(s.ui().message().is_some());
        s.pump(&mut NoopObserver);
        assert_eq!(s.now(), Millis(3_000));
        assert_eq!(s.ui().message(), None);
    }
}

// ── Collection ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collection_tests {
    use super::*;

    fn on_ring() -> TestSession {
        let (mut s, _) = started(debug_config(), vec![fix_at(origin(), 0)]);
        s.pump(&mut NoopObserver);
        s
    }

    #[test]
    fn collecting_updates_everything() {
        let mut s = on_ring();
        let mut rec = Recorder::default();
        let points = s.state().treasure(TreasureId(2)).unwrap().points();

        let outcome = s.activate(TreasureId(2), &mut rec).unwrap();

        assert_eq!(
            outcome,
            Collection::Collected { points, score: u32::from(points), all_found: false }
        );
        assert_eq!(s.ui().score_text(), points.to_string());
        assert_eq!(s.ui().message(), Some(format!("You found a treasure! +{points} points").as_str()));
        assert!(!s.scene().contains(TreasureId(2)), "entity removed without waiting for a pass");
        assert_eq!(s.scene().len(), 4);
        assert_eq!(rec.collected, vec![(TreasureId(2), points, u32::from(points))]);
    }

    #[test]
    fn double_activation_is_a_noop() {
        let mut s = on_ring();
        let mut rec = Recorder::default();

        s.activate(TreasureId(1), &mut rec).unwrap();
        let score = s.state().score();
        let shown = s.ui().history().len();

        assert_eq!(s.activate(TreasureId(1), &mut rec).unwrap(), Collection::AlreadyCollected);
        assert_eq!(s.state().score(), score);
        assert_eq!(s.state().collected_count(), 1);
        assert_eq!(s.ui().history().len(), shown);
        assert_eq!(rec.collected.len(), 1);
    }

    #[test]
    fn collected_treasure_stays_gone_after_next_pass() {
        let (mut s, source) = started(debug_config(), vec![fix_at(origin(), 0)]);
        s.pump(&mut NoopObserver);
        s.activate(TreasureId(0), &mut NoopObserver).unwrap();

        source.push(fix_at(origin(), 500));
        s.pump(&mut NoopObserver);

        assert!(!s.scene().contains(TreasureId(0)));
        assert_eq!(s.scene().len(), 4);
    }

    #[test]
    fn activate_by_entity_key() {
        let mut s = on_ring();
        assert!(matches!(
            s.activate_entity("treasure-3", &mut NoopObserver).unwrap(),
            Collection::Collected { .. }
        ));
        assert!(matches!(
            s.activate_entity("bogus", &mut NoopObserver),
            Err(HuntError::Parse(_))
        ));
        assert!(matches!(
            s.activate_entity("treasure-42", &mut NoopObserver),
            Err(HuntError::UnknownTreasure(TreasureId(42)))
        ));
    }

    #[test]
    fn last_treasure_schedules_victory() {
        let mut s = on_ring();
        let mut rec = Recorder::default();

        s.advance_to(Millis(10_000), &mut rec);
        for i in 0..5 {
            s.activate(TreasureId(i), &mut rec).unwrap();
        }
        let score = s.state().score();
        assert!(s.state().is_complete());
        assert_eq!(s.next_timer(), Some(Millis(12_000)));

        s.advance_to(Millis(11_999), &mut rec);
        assert!(rec.all_found.is_empty());

        s.advance_to(Millis(12_000), &mut rec);
        assert_eq!(rec.all_found, vec![(Millis(12_000), score)]);
        let expected = format!("Congratulations! You found all treasures! Final score: {score}");
        assert_eq!(s.ui().message(), Some(expected.as_str()));

        // Hide timers left over from the collection messages (due 13 000)
        // take the victory message down with them.
        s.advance_to(Millis(13_000), &mut rec);
        assert_eq!(s.ui().message(), None);
    }

    #[test]
    fn victory_not_scheduled_early() {
        let mut s = on_ring();
        for i in 0..4 {
            s.activate(TreasureId(i), &mut NoopObserver).unwrap();
        }
        let mut rec = Recorder::default();
        s.advance_to(Millis(60_000), &mut rec);
        assert!(rec.all_found.is_empty());
    }
}

// ── Messages and timers ───────────────────────────────────────────────────────

#[cfg(test)]
mod message_tests {
    use super::*;
    use crate::{MessageBoard, TimerQueue, TimerTask};

    #[test]
    fn message_hides_after_duration() {
        let mut s = session(HuntConfig::default());
        s.show_message("hello", &mut NoopObserver);
        s.advance_to(Millis(2_999), &mut NoopObserver);
        assert_eq!(s.ui().message(), Some("hello"));
        s.advance_to(Millis(3_000), &mut NoopObserver);
        assert_eq!(s.ui().message(), None);
    }

    #[test]
    fn newer_message_replaces_immediately() {
        let mut s = session(HuntConfig::default());
        s.show_message("first", &mut NoopObserver);
        s.advance_to(Millis(100), &mut NoopObserver);
        s.show_message("second", &mut NoopObserver);
        assert_eq!(s.ui().message(), Some("second"));
        assert_eq!(s.message(), Some("second"));
    }

    #[test]
    fn older_timer_can_hide_newer_message() {
        let mut s = session(HuntConfig::default());
        s.show_message("long", &mut NoopObserver); // hides at 3000
        s.advance_to(Millis(2_000), &mut NoopObserver);
        s.show_message_for("short", 2_000, &mut NoopObserver); // hides at 4000

        s.advance_to(Millis(3_000), &mut NoopObserver);
        assert_eq!(s.ui().message(), None, "first message's timer hides the second early");
    }

    #[test]
    fn time_does_not_run_backwards() {
        let mut s = session(HuntConfig::default());
        s.advance_to(Millis(500), &mut NoopObserver);
        s.advance_to(Millis(100), &mut NoopObserver);
        assert_eq!(s.now(), Millis(500));
    }

    #[test]
    fn queue_orders_by_due_then_insertion() {
        let mut q = TimerQueue::new();
        q.push(Millis(20), TimerTask::AnnounceVictory);
        q.push(Millis(10), TimerTask::HideMessage);
        q.push(Millis(20), TimerTask::HideMessage);
        assert_eq!(q.len(), 3);

        assert_eq!(q.pop_due(Millis(5)), None);
        assert_eq!(q.pop_due(Millis(25)), Some((Millis(10), TimerTask::HideMessage)));
        assert_eq!(q.pop_due(Millis(25)), Some((Millis(20), TimerTask::AnnounceVictory)));
        assert_eq!(q.pop_due(Millis(25)), Some((Millis(20), TimerTask::HideMessage)));
        assert!(q.is_empty());
        assert_eq!(q.next_due(), None);
    }

    #[test]
    fn board_schedules_hide() {
        let mut board = MessageBoard::new(3_000);
        let mut timers = TimerQueue::new();
        let mut ui = TextUi::new();
        board.show("hi", 1_500, Millis(100), &mut timers, &mut ui);
        assert_eq!(timers.next_due(), Some(Millis(1_600)));
        assert_eq!(board.hide(&mut ui), Some("hi".to_owned()));
        assert_eq!(ui.message(), None);
        assert_eq!(ui.history(), ["hi".to_owned()]);
    }
}

// ── Location streams and tracks ───────────────────────────────────────────────

#[cfg(test)]
mod location_tests {
    use std::io::{Cursor, Write};

    use hunt_core::TrackingOptions;

    use super::*;
    use crate::{LocationSource, Subscription, TrackError, TrackSource, load_track_path, load_track_reader};

    const TRACK: &str = "\
t_ms,lat,lon,accuracy_m,error
0,48.858400,2.294500,4.0,
1000,48.858410,2.294510,,
2000,,,,3
3000,48.858420,2.294520,5.5,
";

    #[test]
    fn subscription_delivers_in_order() {
        let (feed, mut sub) = Subscription::channel();
        feed.push(fix_at(origin(), 1));
        feed.push(Err(LocationError::PositionUnavailable));
        feed.push(fix_at(origin(), 2));
        assert_eq!(sub.pending(), 3);

        assert_eq!(sub.try_next().unwrap().unwrap().timestamp, Millis(1));
        assert_eq!(sub.try_next().unwrap(), Err(LocationError::PositionUnavailable));
        assert_eq!(sub.try_next().unwrap().unwrap().timestamp, Millis(2));
        assert!(sub.try_next().is_none());
        assert!(sub.is_active(), "an empty stream is not an ended stream");
    }

    #[test]
    fn unsubscribe_drops_pending_and_notifies_feed() {
        let (feed, mut sub) = Subscription::channel();
        feed.push(fix_at(origin(), 1));
        sub.unsubscribe();

        assert!(sub.try_next().is_none());
        assert!(sub.next_blocking().is_none());
        assert!(!sub.is_active());
        assert!(feed.is_cancelled());
        assert!(!feed.push(fix_at(origin(), 2)));
    }

    #[test]
    fn dropped_feed_ends_stream_after_drain() {
        let (feed, mut sub) = Subscription::channel();
        feed.push(fix_at(origin(), 1));
        drop(feed);

        assert!(sub.is_active());
        assert!(sub.next_blocking().is_some());
        assert!(!sub.is_active());
        assert!(sub.next_blocking().is_none());
    }

    #[test]
    fn track_parses_fixes_and_errors() {
        let events = load_track_reader(Cursor::new(TRACK)).unwrap();
        assert_eq!(events.len(), 4);

        let first = events[0].unwrap();
        assert_eq!(first.coordinate, Coordinate::new(48.8584, 2.2945));
        assert_eq!(first.accuracy_m, Some(4.0));
        assert_eq!(events[1].unwrap().accuracy_m, None);
        assert_eq!(events[2], Err(LocationError::Timeout));
        assert_eq!(events[3].unwrap().timestamp, Millis(3_000));
    }

    #[test]
    fn track_rejects_bad_rows() {
        let missing = "t_ms,lat,lon,accuracy_m,error\n0,48.0,,,\n";
        assert!(matches!(load_track_reader(Cursor::new(missing)), Err(TrackError::Parse(_))));

        let bad_code = "t_ms,lat,lon,accuracy_m,error\n0,,,,7\n";
        assert!(matches!(load_track_reader(Cursor::new(bad_code)), Err(TrackError::Parse(_))));

        let not_a_number = "t_ms,lat,lon,accuracy_m,error\nsoon,1,2,,\n";
        assert!(matches!(load_track_reader(Cursor::new(not_a_number)), Err(TrackError::Csv(_))));
    }

    #[test]
    fn track_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRACK.as_bytes()).unwrap();
        let events = load_track_path(file.path()).unwrap();
        assert_eq!(events.len(), 4);

        let missing = std::path::Path::new("/definitely/not/here.csv");
        assert!(matches!(load_track_path(missing), Err(TrackError::Io(_))));
    }

    #[test]
    fn track_source_first_row_is_initial_fix() {
        let mut source = TrackSource::new(load_track_reader(Cursor::new(TRACK)).unwrap());
        let opts = TrackingOptions::default();

        let initial = source.current_position(&opts).unwrap();
        assert_eq!(initial.timestamp, Millis(0));

        let mut sub = source.watch_position(&opts);
        assert_eq!(source.remaining(), 0);
        assert_eq!(sub.pending(), 3);
        sub.unsubscribe();
        assert!(source.is_cancelled());
    }

    #[test]
    fn empty_track_has_no_fix() {
        let mut source = TrackSource::new(vec![]);
        assert_eq!(
            source.current_position(&TrackingOptions::default()),
            Err(LocationError::PositionUnavailable)
        );
    }

    #[test]
    fn replayed_track_drives_a_session() {
        let mut s = session(debug_config());
        let mut source = TrackSource::new(load_track_reader(Cursor::new(TRACK)).unwrap());
        let mut rec = Recorder::default();

        s.start(&mut source, Millis(0), &mut rec).unwrap();
        assert_eq!(s.pump(&mut rec), 3);

        assert_eq!(rec.passes, vec![5, 5]);
        assert_eq!(rec.errors, vec![LocationError::Timeout]);
        assert_eq!(s.now(), Millis(3_000));
    }
}
