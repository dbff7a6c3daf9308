//! History endpoints: the HTML page and its JSON counterpart.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use minijinja::context;
use storage::ChatHistoryRecord;

use crate::templates::INDEX_TEMPLATE;
use crate::{AppState, Result};

pub fn history_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/history", get(list_history))
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let chat_history = state.history.list_all().await?;
    let page = state
        .templates
        .get_template(INDEX_TEMPLATE)?
        .render(context! { chat_history => chat_history })?;
    Ok(Html(page))
}

async fn list_history(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ChatHistoryRecord>>> {
    Ok(Json(state.history.list_all().await?))
}
