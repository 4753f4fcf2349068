use std::future::Future;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    application::state::SharedState,
    domain::{dispatch::CAT_SOUND, error::DomainError},
    interfaces::slack_events,
};

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(healthz_handler))
        .route("/bot", post(slack_events::bot_handler))
        .with_state(state)
}

pub async fn serve(
    listener: TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DomainError> {
    let local_addr = listener.local_addr().map_err(|error| {
        DomainError::Unavailable(format!("failed to read listener address: {error}"))
    })?;

    info!(
        "slack-httpcat listening on http://{}:{}, slack_api={}",
        local_addr.ip(),
        local_addr.port(),
        state.config().slack_api_base_url,
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| DomainError::Unavailable(format!("server runtime error: {error}")))
}

async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, CAT_SOUND)
}

async fn healthz_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
