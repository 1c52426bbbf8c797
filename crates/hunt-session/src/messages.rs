//! Transient on-screen messages.
//!
//! Last write wins: showing a message replaces the current one at once and
//! schedules its own hide.  Hide timers are not tied to the message that
//! scheduled them, so an older, longer timer can still fire after a newer
//! message went up and hide that one early.  Callers that need a guaranteed
//! on-screen time should not overlap messages.

use hunt_core::Millis;

use crate::{TimerQueue, TimerTask, UiSurface};

#[derive(Debug, Clone)]
pub struct MessageBoard {
    current:             Option<String>,
    default_duration_ms: u64,
}

impl MessageBoard {
    pub fn new(default_duration_ms: u64) -> Self {
        Self { current: None, default_duration_ms }
    }

    pub fn default_duration_ms(&self) -> u64 {
        self.default_duration_ms
    }

    /// Show `text` now and hide it `duration_ms` after `at`.
    pub fn show<U: UiSurface + ?Sized>(
        &mut self,
        text:        &str,
        duration_ms: u64,
        at:          Millis,
        timers:      &mut TimerQueue,
        ui:          &mut U,
    ) {
        ui.show_message(text);
        self.current = Some(text.to_owned());
        timers.push(at + duration_ms, TimerTask::HideMessage);
    }

    /// Hide whatever is showing.  Returns the message that was hidden.
    pub fn hide<U: UiSurface + ?Sized>(&mut self, ui: &mut U) -> Option<String> {
        ui.hide_message();
        self.current.take()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
