//! Chat endpoints: `POST /chat`, `POST /reset`.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, Result, WebError};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Missing message is treated as empty and sent as-is.
    #[serde(default)]
    pub message: String,
    /// Present and non-empty: the session's history is used and extended.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub ok: bool,
}

pub fn chat_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/reset", post(reset))
}

fn non_empty(session_id: Option<String>) -> Option<String> {
    session_id.filter(|id| !id.trim().is_empty())
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let session_id = non_empty(req.session_id);
    info!(
        message_len = req.message.len(),
        multi_turn = session_id.is_some(),
        "Received chat request"
    );

    let reply = match session_id {
        Some(session_id) => {
            state
                .sessions
                .turn(&state.chat, &session_id, &req.message)
                .await
        }
        None => state.chat.reply(&req.message).await,
    };

    if let Err(e) = state.history.append(&req.message, &reply).await {
        error!(error = %e, "Failed to persist chat exchange, reply still returned");
    }

    Ok(Json(ChatResponse { reply }))
}

async fn reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ResetResponse>> {
    let session_id = non_empty(req.session_id)
        .ok_or_else(|| WebError::BadRequest("session_id is required".to_string()))?;

    let existed = state.sessions.reset(&session_id).await;
    info!(existed = existed, "Session history cleared");

    Ok(Json(ResetResponse { ok: true }))
}
