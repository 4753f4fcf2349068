use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::{
    application::state::SharedState,
    domain::dispatch::{Dispatch, OutboundMessage, SkipReason, SlackRequest, dispatch},
};

/// `POST /bot`: entry point for Slack Events API deliveries.
///
/// Replies go out through `chat.postMessage` on a spawned task, so a
/// callback is acknowledged with an empty 200 before Slack is contacted.
pub async fn bot_handler(State(state): State<SharedState>, body: Bytes) -> Response {
    let request = match serde_json::from_slice::<SlackRequest>(&body) {
        Ok(request) => request,
        Err(error) => {
            warn!("rejected slack event payload: {error}");
            return bad_request(format!("invalid slack event payload: {error}")).into_response();
        }
    };

    match dispatch(&request) {
        Dispatch::Challenge(challenge) => {
            info!("answered slack url verification");
            (StatusCode::OK, Json(json!({ "challenge": challenge }))).into_response()
        }
        Dispatch::Reply(message) => {
            info!(
                "replying to slack channel={} text={}",
                message.channel, message.text
            );
            spawn_reply(state, message);
            StatusCode::OK.into_response()
        }
        Dispatch::Skip(reason @ SkipReason::MissingChannel) => {
            warn!("skipped slack event callback: {}", reason.label());
            StatusCode::OK.into_response()
        }
        Dispatch::Skip(reason) => {
            debug!(
                "ignored slack request type={:?}: {}",
                request.r#type,
                reason.label()
            );
            StatusCode::OK.into_response()
        }
    }
}

fn spawn_reply(state: SharedState, message: OutboundMessage) {
    tokio::spawn(async move {
        if let Err(error) = state.slack().post_message(&message).await {
            warn!(
                "dropped reply to slack channel={}: {error}",
                message.channel
            );
        }
    });
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "ok": false,
            "error": {
                "code": "INVALID_REQUEST",
                "message": message.into(),
            }
        })),
    )
}
