//! The player's side of a game: the controller plus the digit count reused by `:new`.

use client_core::{GameApi, GameSessionController, GameView, GuessRecord, Result};
use shared::domain::{GameId, ScoringMode};

pub struct Session<A, V> {
    controller: GameSessionController<A, V>,
    digits: u32,
    mode: ScoringMode,
}

impl<A, V> Session<A, V>
where
    A: GameApi,
    V: GameView + Send,
{
    pub fn new(controller: GameSessionController<A, V>, digits: u32, mode: ScoringMode) -> Self {
        Self {
            controller,
            digits,
            mode,
        }
    }

    /// Starts a game with `requested` digits, or the last accepted count.
    ///
    /// The count is only remembered once the server has accepted it.
    pub async fn new_game(&mut self, requested: Option<u32>) -> Result<GameId> {
        let digits = requested.unwrap_or(self.digits);
        let game_id = self.controller.start_with_mode(digits, self.mode).await?;
        self.digits = digits;
        Ok(game_id)
    }

    pub async fn guess(&self, guess: &str) -> Result<GuessRecord> {
        self.controller.submit_guess(guess).await
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }
}
