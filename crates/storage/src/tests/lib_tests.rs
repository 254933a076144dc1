use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("numguess_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("storage.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn stores_and_loads_game() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let game_id = storage
        .create_game("0427", ScoringMode::Traditional)
        .await
        .expect("game");

    let game = storage
        .load_game(&game_id)
        .await
        .expect("load")
        .expect("game exists");
    assert_eq!(game.game_id, game_id);
    assert_eq!(game.secret_number, "0427");
    assert_eq!(game.num_digits, 4);
    assert_eq!(game.mode, ScoringMode::Traditional);
    assert_eq!(game.turns, 0);
    assert!(!game.is_completed);
}

#[tokio::test]
async fn load_game_returns_none_for_unknown_id() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let missing = storage
        .load_game(&GameId::from("does-not-exist"))
        .await
        .expect("load");
    assert!(missing.is_none());
}

#[tokio::test]
async fn record_guess_increments_turns_and_keeps_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let game_id = storage
        .create_game("1234", ScoringMode::Presence)
        .await
        .expect("game");

    let first = storage
        .record_guess(
            &game_id,
            NewGuess {
                guess: "5678",
                numbers_correct: 0,
                positions_correct: 0,
                completed: false,
            },
        )
        .await
        .expect("first guess");
    let second = storage
        .record_guess(
            &game_id,
            NewGuess {
                guess: "1243",
                numbers_correct: 4,
                positions_correct: 2,
                completed: false,
            },
        )
        .await
        .expect("second guess");
    assert_eq!((first, second), (1, 2));

    let guesses = storage.list_guesses(&game_id).await.expect("list");
    let values: Vec<_> = guesses.iter().map(|g| g.guess.as_str()).collect();
    assert_eq!(values, vec!["5678", "1243"]);
    assert_eq!(guesses[1].numbers_correct, 4);
    assert_eq!(guesses[1].positions_correct, 2);

    let game = storage
        .load_game(&game_id)
        .await
        .expect("load")
        .expect("game");
    assert_eq!(game.turns, 2);
    assert!(!game.is_completed);
}

#[tokio::test]
async fn winning_guess_marks_game_completed() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let game_id = storage
        .create_game("42", ScoringMode::Presence)
        .await
        .expect("game");

    let turns = storage
        .record_guess(
            &game_id,
            NewGuess {
                guess: "42",
                numbers_correct: 2,
                positions_correct: 2,
                completed: true,
            },
        )
        .await
        .expect("guess");
    assert_eq!(turns, 1);

    let game = storage
        .load_game(&game_id)
        .await
        .expect("load")
        .expect("game");
    assert!(game.is_completed);
}

#[tokio::test]
async fn record_guess_fails_for_unknown_game() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let result = storage
        .record_guess(
            &GameId::from("missing"),
            NewGuess {
                guess: "1",
                numbers_correct: 0,
                positions_correct: 0,
                completed: false,
            },
        )
        .await;
    assert!(result.is_err());
}

#[test]
fn memory_urls_have_no_parent_directory() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert_eq!(
        sqlite_path("sqlite://./data/games.db?mode=rwc"),
        Some(PathBuf::from("./data/games.db"))
    );
}
