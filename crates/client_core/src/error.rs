use reqwest::StatusCode;
use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidServerUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {}", .error.message)]
    Api { status: StatusCode, error: ApiError },
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("guess rejected: {message}")]
    Rejected { message: String },
    #[error("no game has been started")]
    NoActiveGame,
    #[error("another request is still in flight")]
    RequestInFlight,
}
