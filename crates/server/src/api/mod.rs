use shared::{
    error::ApiError,
    protocol::{GuessRequest, GuessResponse, StartGameRequest, StartGameResponse},
};
use storage::{NewGuess, Storage};
use tracing::{debug, info};

use crate::scoring::{generate_secret, score_guess};

/// Upper bound on the secret length a client may ask for.
pub const MAX_DIGITS: u32 = 12;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn start_game(
    ctx: &ApiContext,
    request: &StartGameRequest,
) -> Result<StartGameResponse, ApiError> {
    if request.num_digits == 0 || request.num_digits > MAX_DIGITS {
        return Err(ApiError::validation(format!(
            "num_digits must be between 1 and {MAX_DIGITS}"
        )));
    }

    let mode = request.mode();
    let secret = generate_secret(&mut rand::thread_rng(), request.num_digits);
    let game_id = ctx
        .storage
        .create_game(&secret, mode)
        .await
        .map_err(internal)?;

    info!(%game_id, num_digits = request.num_digits, ?mode, "game started");
    Ok(StartGameResponse { game_id })
}

pub async fn submit_guess(
    ctx: &ApiContext,
    request: &GuessRequest,
) -> Result<GuessResponse, ApiError> {
    let game = ctx
        .storage
        .load_game(&request.game_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found("game not found"))?;

    let secret_len = game.secret_number.chars().count();
    if request.guess.chars().count() != secret_len {
        return Err(ApiError::validation(format!(
            "Your guess must have exactly {secret_len} digits."
        )));
    }

    let score = score_guess(&game.secret_number, &request.guess, game.mode);
    let completed = score.is_exact(secret_len);
    let turns = ctx
        .storage
        .record_guess(
            &game.game_id,
            NewGuess {
                guess: &request.guess,
                numbers_correct: score.numbers_correct,
                positions_correct: score.positions_correct,
                completed,
            },
        )
        .await
        .map_err(internal)?;

    debug!(
        game_id = %game.game_id,
        turns,
        numbers_correct = score.numbers_correct,
        positions_correct = score.positions_correct,
        "guess scored"
    );
    if completed {
        info!(game_id = %game.game_id, turns, "game completed");
    }

    Ok(GuessResponse {
        numbers_correct: score.numbers_correct,
        positions_correct: score.positions_correct,
        completed,
        turns: Some(turns),
    })
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::internal(err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
