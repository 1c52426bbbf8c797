//! The `HuntSession` controller.

use hunt_ar::{Projector, SceneRenderer, SceneSink};
use hunt_core::{GameClock, HuntConfig, HuntError, HuntResult, HuntRng, LocationError, Millis, TreasureId};
use hunt_game::{Collection, GameState, TreasureGenerator};

use crate::{
    Fix, HuntObserver, LocationEvent, LocationSource, MessageBoard, Subscription, TimerQueue,
    TimerTask, UiSurface,
};

pub const WELCOME_TEXT: &str = "Find and collect the AR treasures around you!";
pub const LOCATION_ERROR_TEXT: &str =
    "Error accessing your location. Please enable location services.";

/// All state for one play session.
///
/// `S` is the host's scene, `U` its text UI.  Create via
/// [`SessionBuilder`][crate::SessionBuilder].
pub struct HuntSession<S: SceneSink, U: UiSurface> {
    pub(crate) config:       HuntConfig,
    pub(crate) clock:        GameClock,
    pub(crate) rng:          HuntRng,
    pub(crate) state:        GameState,
    pub(crate) generator:    TreasureGenerator,
    pub(crate) projector:    Projector,
    pub(crate) renderer:     SceneRenderer,
    pub(crate) scene:        S,
    pub(crate) ui:           U,
    pub(crate) board:        MessageBoard,
    pub(crate) timers:       TimerQueue,
    pub(crate) subscription: Option<Subscription>,
    pub(crate) last_fix:     Option<Fix>,
}

impl<S: SceneSink, U: UiSurface> HuntSession<S, U> {
    // ── Start-up ──────────────────────────────────────────────────────────

    /// Request the initial fix, scatter treasures around it, and subscribe
    /// to position updates.
    ///
    /// The score readout is written first, whatever happens next.  If the
    /// fix fails, the location error message is shown, nothing is
    /// generated, and the error is returned.  A session can only be started
    /// once; later calls fail with [`HuntError::AlreadySeeded`].
    pub fn start<L, O>(&mut self, source: &mut L, now: Millis, observer: &mut O) -> HuntResult<()>
    where
        L: LocationSource + ?Sized,
        O: HuntObserver + ?Sized,
    {
        self.advance_to(now, observer);
        if self.state.is_seeded() {
            return Err(HuntError::AlreadySeeded);
        }
        self.ui.set_score(self.state.score());

        let fix = match source.current_position(&self.config.tracking) {
            Ok(fix) => fix,
            Err(error) => {
                tracing::error!(%error, "initial location fix failed");
                self.show_message(LOCATION_ERROR_TEXT, observer);
                return Err(error.into());
            }
        };

        let treasures = self.generator.generate(fix.coordinate, &mut self.rng);
        self.state.seed(treasures)?;
        tracing::info!(origin = %fix.coordinate, count = self.state.treasures().len(), "hunt started");
        observer.on_seeded(&fix, self.state.treasures());
        self.last_fix = Some(fix);

        self.subscription = Some(source.watch_position(&self.config.tracking));
        self.show_message(WELCOME_TEXT, observer);
        Ok(())
    }

    // ── Location updates ──────────────────────────────────────────────────

    /// Handle every event currently waiting on the subscription, in order.
    /// Returns how many were handled.
    pub fn pump<O: HuntObserver + ?Sized>(&mut self, observer: &mut O) -> usize {
        let mut handled = 0;
        while self.pump_one(observer) {
            handled += 1;
        }
        handled
    }

    /// Handle at most one waiting event.  Returns `false` if none was waiting.
    pub fn pump_one<O: HuntObserver + ?Sized>(&mut self, observer: &mut O) -> bool {
        let Some(event) = self.subscription.as_mut().and_then(Subscription::try_next) else {
            return false;
        };
        self.handle_event(event, observer);
        true
    }

    pub fn handle_event<O: HuntObserver + ?Sized>(&mut self, event: LocationEvent, observer: &mut O) {
        match event {
            Ok(fix)    => {
                self.handle_fix(fix, observer);
            }
            Err(error) => self.handle_tracking_error(error, observer),
        }
    }

    /// Run a full projection pass from `fix` and rebuild the scene.
    ///
    /// Timers due up to the fix's timestamp fire first.  Returns the number
    /// of treasures rendered.
    pub fn handle_fix<O: HuntObserver + ?Sized>(&mut self, fix: Fix, observer: &mut O) -> usize {
        self.advance_to(fix.timestamp, observer);
        self.last_fix = Some(fix);

        let placements = self.projector.project(fix.coordinate, self.state.treasures());
        let rendered = self.renderer.rebuild(&mut self.scene, &placements);
        tracing::debug!(
            device = %fix.coordinate,
            accuracy_m = ?fix.accuracy_m,
            rendered,
            remaining = self.state.remaining(),
            "projection pass"
        );
        observer.on_projection(&fix, &placements);
        rendered
    }

    /// Log a watch-stream error.  The player is not told and tracking is not
    /// restarted; play continues from the last fix.
    pub fn handle_tracking_error<O: HuntObserver + ?Sized>(&mut self, error: LocationError, observer: &mut O) {
        tracing::warn!(%error, "position tracking error");
        observer.on_tracking_error(error);
    }

    /// Cancel the location subscription.  Undelivered updates are dropped.
    pub fn stop_tracking(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::info!("position tracking stopped");
        }
    }

    // ── Collection ────────────────────────────────────────────────────────

    /// The player activated the entity for `id`.
    ///
    /// Repeat activations of a collected treasure change nothing and return
    /// [`Collection::AlreadyCollected`].
    pub fn activate<O: HuntObserver + ?Sized>(&mut self, id: TreasureId, observer: &mut O) -> HuntResult<Collection> {
        let outcome = self.state.collect(id)?;

        match outcome {
            Collection::Collected { points, score, all_found } => {
                tracing::info!(treasure = %id, points, score, "treasure collected");
                self.ui.set_score(score);
                self.show_message(&format!("You found a treasure! +{points} points"), observer);
                self.renderer.remove(&mut self.scene, id);
                observer.on_collected(id, points, score);

                if all_found {
                    let due = self.now() + self.config.victory_delay_ms;
                    self.timers.push(due, TimerTask::AnnounceVictory);
                    tracing::debug!(%due, "victory message scheduled");
                }
            }
            Collection::AlreadyCollected => {
                tracing::debug!(treasure = %id, "ignored activation of collected treasure");
            }
        }
        Ok(outcome)
    }

    /// [`activate`](Self::activate) by the string key the scene host sees
    /// (`treasure-<i>`).
    pub fn activate_entity<O: HuntObserver + ?Sized>(&mut self, key: &str, observer: &mut O) -> HuntResult<Collection> {
        let id: TreasureId = key.parse()?;
        self.activate(id, observer)
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// Move time forward to `now` and run every timer due by then, in due
    /// order.  Earlier instants are ignored.  Returns the number of timers run.
    pub fn advance_to<O: HuntObserver + ?Sized>(&mut self, now: Millis, observer: &mut O) -> usize {
        let now = self.clock.advance_to(now);
        let mut fired = 0;
        while let Some((due, task)) = self.timers.pop_due(now) {
            fired += 1;
            match task {
                TimerTask::HideMessage => {
                    self.board.hide(&mut self.ui);
                }
                TimerTask::AnnounceVictory => {
                    let score = self.state.score();
                    let text = format!("Congratulations! You found all treasures! Final score: {score}");
                    let duration = self.board.default_duration_ms();
                    self.board.show(&text, duration, due, &mut self.timers, &mut self.ui);
                    observer.on_message(due, &text);
                    observer.on_all_found(due, score);
                    tracing::info!(score, "all treasures found");
                }
            }
        }
        fired
    }

    // ── Messages ──────────────────────────────────────────────────────────

    /// Show `text` for the configured default duration.
    pub fn show_message<O: HuntObserver + ?Sized>(&mut self, text: &str, observer: &mut O) {
        let duration = self.board.default_duration_ms();
        self.show_message_for(text, duration, observer);
    }

    pub fn show_message_for<O: HuntObserver + ?Sized>(&mut self, text: &str, duration_ms: u64, observer: &mut O) {
        let now = self.now();
        self.board.show(text, duration_ms, now, &mut self.timers, &mut self.ui);
        observer.on_message(now, text);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn message(&self) -> Option<&str> {
        self.board.current()
    }

    /// Most recent position: the origin fix until the first update arrives.
    pub fn last_fix(&self) -> Option<&Fix> {
        self.last_fix.as_ref()
    }

    /// `true` while a subscription is open and not exhausted.
    pub fn is_tracking(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Due time of the next scheduled timer.
    pub fn next_timer(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Number of completed scene rebuilds.
    pub fn projection_passes(&self) -> u64 {
        self.renderer.passes()
    }

    /// Give back the host's scene and UI.
    pub fn into_parts(self) -> (S, U) {
        (self.scene, self.ui)
    }
}
