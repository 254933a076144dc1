//! Presentation seam driven by the session controller.

use crate::types::GuessRecord;

/// Where the controller renders a game: a history list that only grows,
/// plus modal-style notifications.
pub trait GameView {
    /// Reveal the guessing UI.
    fn show_game(&mut self);
    fn clear_history(&mut self);
    fn append_history(&mut self, record: &GuessRecord);
    fn notify(&mut self, message: &str);
}

/// Keeps everything in memory. Handy for headless embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    pub visible: bool,
    pub history: Vec<String>,
    pub notifications: Vec<String>,
}

impl GameView for RecordingView {
    fn show_game(&mut self) {
        self.visible = true;
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }

    fn append_history(&mut self, record: &GuessRecord) {
        self.history.push(record.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}
