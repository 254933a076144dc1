use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{GameId, ScoringMode};

/// Form body of `POST /start_game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub num_digits: u32,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub traditional: bool,
}

impl StartGameRequest {
    pub fn new(num_digits: u32, mode: ScoringMode) -> Self {
        Self {
            num_digits,
            traditional: mode.is_traditional(),
        }
    }

    pub fn mode(&self) -> ScoringMode {
        ScoringMode::from_traditional_flag(self.traditional)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub game_id: GameId,
}

/// Form body of `POST /guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub game_id: GameId,
    pub guess: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub numbers_correct: u32,
    pub positions_correct: u32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<u32>,
}

/// Body of a `/guess` reply. Older servers answer a bad guess with
/// `200 {"error": "..."}` instead of an error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuessReply {
    Scored(GuessResponse),
    Rejected { error: String },
}

/// Accepts `true`, `1`, `yes` and `on` (any case) as true; every other value is false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_flag(&raw))
}
