use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier the server hands out for one guessing session.
///
/// Always serialized as a string. Servers that issue integer ids are
/// accepted too; the number is kept in its decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawGameId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawGameId::deserialize(deserializer)? {
            RawGameId::Text(id) => Self(id),
            RawGameId::Signed(id) => Self(id.to_string()),
            RawGameId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

impl GameId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How "numbers correct" is counted for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Every guessed digit that occurs anywhere in the secret counts, repeats included.
    #[default]
    Presence,
    /// Only the multiset overlap between guess and secret counts.
    Traditional,
}

impl ScoringMode {
    pub fn from_traditional_flag(traditional: bool) -> Self {
        if traditional {
            Self::Traditional
        } else {
            Self::Presence
        }
    }

    pub fn is_traditional(self) -> bool {
        self == Self::Traditional
    }
}
