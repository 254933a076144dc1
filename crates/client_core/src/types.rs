use std::fmt;

use shared::protocol::GuessResponse;

/// One scored guess, as shown in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess: String,
    pub numbers_correct: u32,
    pub positions_correct: u32,
    pub completed: bool,
    pub turn: Option<u32>,
}

impl GuessRecord {
    pub fn new(guess: impl Into<String>, response: &GuessResponse) -> Self {
        Self {
            guess: guess.into(),
            numbers_correct: response.numbers_correct,
            positions_correct: response.positions_correct,
            completed: response.completed,
            turn: response.turns,
        }
    }
}

impl fmt::Display for GuessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guess: {} → In Number: {}, Correct Place: {}",
            self.guess, self.numbers_correct, self.positions_correct
        )
    }
}
