use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{GuessRequest, GuessResponse, StartGameRequest, StartGameResponse},
};
use storage::Storage;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod scoring;

use api::ApiContext;
use app_state::AppState;
use config::{load_settings, prepare_database_url};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/start_game", post(http_start_game))
        .route("/guess", post(http_guess))
        .with_state(state)
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.api.storage.health_check().await.map_err(|e| {
        error!(error = %e, "storage health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::internal(e.to_string())),
        )
    })?;
    Ok("ok")
}

async fn http_start_game(
    State(state): State<Arc<AppState>>,
    form: Result<Form<StartGameRequest>, FormRejection>,
) -> ApiResult<StartGameResponse> {
    let Form(req) = form.map_err(malformed)?;
    api::start_game(&state.api, &req)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_guess(
    State(state): State<Arc<AppState>>,
    form: Result<Form<GuessRequest>, FormRejection>,
) -> ApiResult<GuessResponse> {
    let Form(req) = form.map_err(malformed)?;
    api::submit_guess(&state.api, &req)
        .await
        .map(Json)
        .map_err(reject)
}

/// Undecodable forms answer with the same envelope as business validation.
fn malformed(rejection: FormRejection) -> (StatusCode, Json<ApiError>) {
    reject(ApiError::validation(rejection.body_text()))
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(message = %err.message, "request failed");
    } else {
        warn!(code = ?err.code, message = %err.message, "request rejected");
    }
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
