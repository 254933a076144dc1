use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{GameId, ScoringMode};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredGame {
    pub game_id: GameId,
    pub secret_number: String,
    pub num_digits: u32,
    pub mode: ScoringMode,
    pub turns: u32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoredGuess {
    pub guess: String,
    pub numbers_correct: u32,
    pub positions_correct: u32,
    pub created_at: DateTime<Utc>,
}

/// A scored guess about to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct NewGuess<'a> {
    pub guess: &'a str,
    pub numbers_correct: u32,
    pub positions_correct: u32,
    pub completed: bool,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_game(&self, secret_number: &str, mode: ScoringMode) -> Result<GameId> {
        let game_id = GameId::generate();
        sqlx::query(
            "INSERT INTO games (id, secret_number, num_digits, traditional, turns, is_completed, created_at)
             VALUES (?, ?, ?, ?, 0, 0, ?)",
        )
        .bind(game_id.as_str())
        .bind(secret_number)
        .bind(secret_number.chars().count() as i64)
        .bind(mode.is_traditional())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("failed to insert game")?;
        Ok(game_id)
    }

    pub async fn load_game(&self, game_id: &GameId) -> Result<Option<StoredGame>> {
        let row = sqlx::query(
            "SELECT id, secret_number, num_digits, traditional, turns, is_completed, created_at
             FROM games WHERE id = ?",
        )
        .bind(game_id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| game_from_row(&row)).transpose()
    }

    /// Stores a guess and bumps the game's turn counter atomically.
    /// Returns the turn number assigned to this guess.
    pub async fn record_guess(&self, game_id: &GameId, guess: NewGuess<'_>) -> Result<u32> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO guesses (game_id, guess, numbers_correct, positions_correct, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(game_id.as_str())
        .bind(guess.guess)
        .bind(i64::from(guess.numbers_correct))
        .bind(i64::from(guess.positions_correct))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .context("failed to insert guess")?;

        let turns: i64 = sqlx::query_scalar(
            "UPDATE games
             SET turns = turns + 1,
                 is_completed = CASE WHEN ? THEN 1 ELSE is_completed END
             WHERE id = ?
             RETURNING turns",
        )
        .bind(guess.completed)
        .bind(game_id.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .with_context(|| format!("game {game_id} disappeared while recording a guess"))?;

        tx.commit().await?;
        u32::try_from(turns).context("turn counter out of range")
    }

    pub async fn list_guesses(&self, game_id: &GameId) -> Result<Vec<StoredGuess>> {
        let rows = sqlx::query(
            "SELECT guess, numbers_correct, positions_correct, created_at
             FROM guesses WHERE game_id = ? ORDER BY id ASC",
        )
        .bind(game_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(StoredGuess {
                    guess: row.try_get("guess")?,
                    numbers_correct: read_u32(&row, "numbers_correct")?,
                    positions_correct: read_u32(&row, "positions_correct")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }
}

fn game_from_row(row: &SqliteRow) -> Result<StoredGame> {
    let traditional: bool = row.try_get("traditional")?;
    Ok(StoredGame {
        game_id: GameId(row.try_get("id")?),
        secret_number: row.try_get("secret_number")?,
        num_digits: read_u32(row, "num_digits")?,
        mode: ScoringMode::from_traditional_flag(traditional),
        turns: read_u32(row, "turns")?,
        is_completed: row.try_get("is_completed")?,
        created_at: row.try_get("created_at")?,
    })
}

fn read_u32(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).with_context(|| format!("column {column} out of range: {value}"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
