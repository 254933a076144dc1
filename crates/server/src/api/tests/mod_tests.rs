use super::*;
use shared::{
    domain::{GameId, ScoringMode},
    error::ErrorCode,
};

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext { storage }
}

async fn seeded_game(ctx: &ApiContext, secret: &str, mode: ScoringMode) -> GameId {
    ctx.storage.create_game(secret, mode).await.expect("game")
}

fn guess(game_id: &GameId, value: &str) -> GuessRequest {
    GuessRequest {
        game_id: game_id.clone(),
        guess: value.to_string(),
    }
}

#[tokio::test]
async fn start_game_persists_secret_of_requested_length() {
    let ctx = setup().await;
    let response = start_game(&ctx, &StartGameRequest::new(5, ScoringMode::Traditional))
        .await
        .expect("start");

    let game = ctx
        .storage
        .load_game(&response.game_id)
        .await
        .expect("load")
        .expect("game");
    assert_eq!(game.secret_number.len(), 5);
    assert_eq!(game.mode, ScoringMode::Traditional);
}

#[tokio::test]
async fn start_game_rejects_out_of_range_digit_counts() {
    let ctx = setup().await;
    for num_digits in [0, MAX_DIGITS + 1] {
        let err = start_game(&ctx, &StartGameRequest::new(num_digits, ScoringMode::Presence))
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
    }
}

#[tokio::test]
async fn guess_against_unknown_game_is_not_found() {
    let ctx = setup().await;
    let err = submit_guess(&ctx, &guess(&GameId::from("nope"), "1234"))
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn wrong_length_guess_is_rejected_without_using_a_turn() {
    let ctx = setup().await;
    let game_id = seeded_game(&ctx, "1234", ScoringMode::Presence).await;

    let err = submit_guess(&ctx, &guess(&game_id, "123"))
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "Your guess must have exactly 4 digits.");

    let game = ctx
        .storage
        .load_game(&game_id)
        .await
        .expect("load")
        .expect("game");
    assert_eq!(game.turns, 0);
}

#[tokio::test]
async fn guesses_are_scored_with_the_game_mode_and_count_turns() {
    let ctx = setup().await;
    let presence = seeded_game(&ctx, "1123", ScoringMode::Presence).await;
    let traditional = seeded_game(&ctx, "1123", ScoringMode::Traditional).await;

    let scored = submit_guess(&ctx, &guess(&presence, "1111"))
        .await
        .expect("guess");
    assert_eq!(
        scored,
        GuessResponse {
            numbers_correct: 4,
            positions_correct: 2,
            completed: false,
            turns: Some(1),
        }
    );

    let scored = submit_guess(&ctx, &guess(&traditional, "1111"))
        .await
        .expect("guess");
    assert_eq!(scored.numbers_correct, 2);
    assert_eq!(scored.positions_correct, 2);
}

#[tokio::test]
async fn exact_guess_completes_the_game() {
    let ctx = setup().await;
    let game_id = seeded_game(&ctx, "9081", ScoringMode::Presence).await;

    submit_guess(&ctx, &guess(&game_id, "1111"))
        .await
        .expect("first");
    let winning = submit_guess(&ctx, &guess(&game_id, "9081"))
        .await
        .expect("second");
    assert!(winning.completed);
    assert_eq!(winning.turns, Some(2));

    let history = ctx.storage.list_guesses(&game_id).await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].guess, "9081");

    let game = ctx
        .storage
        .load_game(&game_id)
        .await
        .expect("load")
        .expect("game");
    assert!(game.is_completed);
}
