use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{GameId, ScoringMode},
    error::ApiError,
    protocol::{GuessReply, GuessRequest, StartGameRequest, StartGameResponse},
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod error;
pub mod types;
pub mod view;

pub use controller::{GameSessionController, SessionState, WIN_MESSAGE};
pub use error::ClientError;
pub use types::GuessRecord;
pub use view::{GameView, RecordingView};

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// The two calls a game server answers.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn start_game(&self, num_digits: u32, mode: ScoringMode) -> Result<StartGameResponse>;
    async fn guess(&self, game_id: &GameId, guess: &str) -> Result<GuessReply>;
}

/// `GameApi` over HTTP with form-encoded request bodies.
pub struct HttpGameApi {
    http: Client,
    base_url: Url,
}

impl HttpGameApi {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(server_url)?;
        // Keep any path prefix when joining endpoint names.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_form<F, R>(&self, endpoint: &str, form: &F) -> Result<R>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base_url.join(endpoint)?;
        debug!(%url, "posting form");
        let response = self.http.post(url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(error) => ClientError::Api { status, error },
                Err(_) => ClientError::Status { status, body },
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn start_game(&self, num_digits: u32, mode: ScoringMode) -> Result<StartGameResponse> {
        self.post_form("start_game", &StartGameRequest::new(num_digits, mode))
            .await
    }

    async fn guess(&self, game_id: &GameId, guess: &str) -> Result<GuessReply> {
        let request = GuessRequest {
            game_id: game_id.clone(),
            guess: guess.to_string(),
        };
        self.post_form("guess", &request).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
