//! The two text regions the hunt writes to: live score and transient message.

/// Host-side UI surface.
pub trait UiSurface {
    /// Replace the score readout.
    fn set_score(&mut self, score: u32);

    /// Make `text` the visible message, replacing any other.
    fn show_message(&mut self, text: &str);

    /// Hide the message region.
    fn hide_message(&mut self);
}

/// In-memory [`UiSurface`] that records what a real page would display.
#[derive(Debug, Default, Clone)]
pub struct TextUi {
    score:   String,
    message: Option<String>,
    history: Vec<String>,
}

impl TextUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The score readout as text, empty until first set.
    pub fn score_text(&self) -> &str {
        &self.score
    }

    /// The currently visible message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Every message ever shown, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl UiSurface for TextUi {
    fn set_score(&mut self, score: u32) {
        self.score = score.to_string();
    }

    fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_owned());
        self.history.push(text.to_owned());
    }

    fn hide_message(&mut self) {
        self.message = None;
    }
}
