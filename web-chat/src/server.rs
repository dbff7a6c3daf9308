use std::sync::Arc;

use axum::Router;
use conversation::ChatService;
use llm_client::LlmClient;
use storage::ChatHistoryRepository;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{chat_routes, history_routes};
use crate::{AppState, Result, WebConfig};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(history_routes())
        .merge(chat_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Opens the history database, binds `config.bind_addr` and serves until the process stops.
pub async fn serve(config: WebConfig, llm: Arc<dyn LlmClient>) -> Result<()> {
    let history = ChatHistoryRepository::new(&config.database_url).await?;
    let state = Arc::new(AppState::new(ChatService::new(llm), history)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Starting web server on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
