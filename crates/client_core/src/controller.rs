//! Session controller: owns the active game and drives a [`GameView`].

use std::sync::atomic::{AtomicBool, Ordering};

use shared::{
    domain::{GameId, ScoringMode},
    protocol::GuessReply,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::{error::ClientError, types::GuessRecord, view::GameView, GameApi, Result};

pub const WIN_MESSAGE: &str = "Congratulations! You guessed the number!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub game_id: Option<GameId>,
    pub num_digits: Option<u32>,
    pub mode: ScoringMode,
    pub completed: bool,
    pub history_len: usize,
}

/// Held for the duration of one server round trip.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::RequestInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Starts games and submits guesses against a [`GameApi`].
///
/// At most one request is outstanding per controller; a call made while
/// another is pending fails with [`ClientError::RequestInFlight`] and leaves
/// the session untouched.
pub struct GameSessionController<A, V> {
    api: A,
    view: Mutex<V>,
    session: Mutex<SessionState>,
    in_flight: AtomicBool,
}

impl<A, V> GameSessionController<A, V>
where
    A: GameApi,
    V: GameView + Send,
{
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view: Mutex::new(view),
            session: Mutex::new(SessionState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn start(&self, num_digits: u32) -> Result<GameId> {
        self.start_with_mode(num_digits, ScoringMode::Presence).await
    }

    /// Asks the server for a new secret and replaces the current session.
    pub async fn start_with_mode(&self, num_digits: u32, mode: ScoringMode) -> Result<GameId> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let response = self.api.start_game(num_digits, mode).await?;

        *self.session.lock().await = SessionState {
            game_id: Some(response.game_id.clone()),
            num_digits: Some(num_digits),
            mode,
            completed: false,
            history_len: 0,
        };

        let mut view = self.view.lock().await;
        view.show_game();
        view.clear_history();
        view.notify(&format!("Game started with {num_digits} digits!"));

        info!(game_id = %response.game_id, num_digits, ?mode, "game started");
        Ok(response.game_id)
    }

    /// Sends `guess` for the active game and appends the scored result to the history.
    pub async fn submit_guess(&self, guess: &str) -> Result<GuessRecord> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let game_id = self
            .session
            .lock()
            .await
            .game_id
            .clone()
            .ok_or(ClientError::NoActiveGame)?;

        let response = match self.api.guess(&game_id, guess).await? {
            GuessReply::Scored(response) => response,
            GuessReply::Rejected { error } => {
                debug!(%game_id, %error, "guess rejected by server");
                return Err(ClientError::Rejected { message: error });
            }
        };
        let record = GuessRecord::new(guess, &response);

        {
            let mut session = self.session.lock().await;
            session.history_len += 1;
            session.completed |= record.completed;
        }

        let mut view = self.view.lock().await;
        view.append_history(&record);
        if record.completed {
            view.notify(WIN_MESSAGE);
            info!(%game_id, turns = ?record.turn, "game won");
        } else {
            debug!(
                %game_id,
                numbers_correct = record.numbers_correct,
                positions_correct = record.positions_correct,
                "guess scored"
            );
        }

        Ok(record)
    }

    pub async fn game_id(&self) -> Option<GameId> {
        self.session.lock().await.game_id.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.game_id.is_some()
    }

    pub async fn is_completed(&self) -> bool {
        self.session.lock().await.completed
    }

    pub async fn history_len(&self) -> usize {
        self.session.lock().await.history_len
    }

    pub async fn session(&self) -> SessionState {
        self.session.lock().await.clone()
    }

    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
