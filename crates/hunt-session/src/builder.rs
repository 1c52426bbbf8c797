//! Fluent builder for constructing a [`HuntSession`].

use hunt_ar::{Projector, SceneRenderer, SceneSink};
use hunt_core::{GameClock, HuntConfig, HuntResult, HuntRng, Millis};
use hunt_game::{GameState, TreasureGenerator};

use crate::{HuntSession, MessageBoard, TimerQueue, UiSurface};

/// Fluent builder for [`HuntSession<S, U>`].
///
/// # Required inputs
///
/// - [`HuntConfig`] — treasure count, radii, timings, …
/// - `S: SceneSink` — the host scene (e.g. [`hunt_ar::SceneGraph`])
/// - `U: UiSurface` — the host text UI (e.g. [`TextUi`][crate::TextUi])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                          |
/// |---------------------|--------------------------------------------------|
/// | `.rng(r)`           | `config.seed`, or OS entropy if that is `None`   |
/// | `.start_time(t)`    | `Millis(0)`                                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config, SceneGraph::new(), TextUi::new())
///     .rng(HuntRng::new(7))
///     .build()?;
/// ```
pub struct SessionBuilder<S: SceneSink, U: UiSurface> {
    config: HuntConfig,
    scene:  S,
    ui:     U,
    rng:    Option<HuntRng>,
    start:  Millis,
}

impl<S: SceneSink, U: UiSurface> SessionBuilder<S, U> {
    pub fn new(config: HuntConfig, scene: S, ui: U) -> Self {
        Self { config, scene, ui, rng: None, start: Millis::ZERO }
    }

    /// Use `rng` for treasure generation instead of the config seed.
    pub fn rng(mut self, rng: HuntRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Initial value of the session clock.
    pub fn start_time(mut self, start: Millis) -> Self {
        self.start = start;
        self
    }

    /// Validate the config and return a session ready for
    /// [`HuntSession::start`].
    pub fn build(self) -> HuntResult<HuntSession<S, U>> {
        self.config.validate()?;

        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _)     => rng,
            (None, Some(seed)) => HuntRng::new(seed),
            (None, None)       => HuntRng::from_entropy(),
        };

        if self.config.debug_mode {
            tracing::warn!("debug mode: treasures are placed on a ring, GPS placement is ignored");
        }

        Ok(HuntSession {
            generator:    TreasureGenerator::from_config(&self.config),
            projector:    Projector::from_config(&self.config),
            renderer:     SceneRenderer::new(),
            board:        MessageBoard::new(self.config.message_duration_ms),
            clock:        GameClock::new(self.start),
            state:        GameState::new(),
            timers:       TimerQueue::new(),
            subscription: None,
            last_fix:     None,
            rng,
            scene:        self.scene,
            ui:           self.ui,
            config:       self.config,
        })
    }
}
