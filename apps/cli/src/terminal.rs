use std::io::{self, Write};

use client_core::{GameView, GuessRecord};
use tracing::warn;

pub const HISTORY_CLEARED: &str = "-- history cleared --";

/// Renders the game as plain lines on a writer.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write failures are logged and never propagated.
    fn emit(&mut self, written: io::Result<()>) {
        if let Err(err) = written.and_then(|()| self.out.flush()) {
            warn!(error = %err, "terminal write failed");
        }
    }
}

impl<W: Write> GameView for TerminalView<W> {
    fn show_game(&mut self) {
        let written = writeln!(self.out, "----------------------------------------");
        self.emit(written);
    }

    fn clear_history(&mut self) {
        let written = writeln!(self.out, "{HISTORY_CLEARED}");
        self.emit(written);
    }

    fn append_history(&mut self, record: &GuessRecord) {
        let written = match record.turn {
            Some(turn) => writeln!(self.out, "{turn:>3}. {record}"),
            None => writeln!(self.out, "     {record}"),
        };
        self.emit(written);
    }

    fn notify(&mut self, message: &str) {
        let written = writeln!(self.out, ">> {message}");
        self.emit(written);
    }
}
