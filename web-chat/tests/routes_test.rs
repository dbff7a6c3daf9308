//! Route tests: the router is driven in-process with `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use conversation::ChatService;
use llm_client::{LlmClient, LlmError};
use prompt::ChatMessage;
use serde_json::{json, Value};
use storage::ChatHistoryRepository;
use tempfile::TempDir;
use tower::ServiceExt;
use web_chat::{build_router, AppState};

/// Echoes the message back and records the history length it was given.
struct EchoLlm {
    fail: bool,
    history_lens: Mutex<Vec<usize>>,
}

#[async_trait]
impl LlmClient for EchoLlm {
    fn model(&self) -> &str {
        "echo"
    }

    async fn try_chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, LlmError> {
        self.history_lens.lock().unwrap().push(history.len());
        if self.fail {
            return Err(LlmError::Transport("connection refused".to_string()));
        }
        Ok(format!("echo: {}", message))
    }
}

struct TestApp {
    router: Router,
    llm: Arc<EchoLlm>,
    database_url: String,
    _dir: TempDir,
}

async fn app(fail: bool) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let database_url = format!("sqlite://{}", dir.path().join("site.db").display());
    let history = ChatHistoryRepository::new(&database_url).await.unwrap();
    let llm = Arc::new(EchoLlm {
        fail,
        history_lens: Mutex::new(Vec::new()),
    });
    let state = AppState::new(ChatService::new(llm.clone()), history).unwrap();
    TestApp {
        router: build_router(Arc::new(state)),
        llm,
        database_url,
        _dir: dir,
    }
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// **Test: POST /chat replies and persists the exchange; without session_id every call is single-turn.**
#[tokio::test]
async fn test_chat_single_turn_and_persisted() {
    let app = app(false).await;

    let (status, body) = post_json(&app.router, "/chat", json!({ "message": "hello" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "echo: hello" }));

    post_json(&app.router, "/chat", json!({ "message": "again" })).await;
    assert_eq!(app.llm.history_lens.lock().unwrap().clone(), vec![0, 0]);

    let (status, history) = get(&app.router, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    let history: Value = serde_json::from_str(&history).unwrap();
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["user_message"], "hello");
    assert_eq!(records[0]["llm_reply"], "echo: hello");
    assert_eq!(records[1]["user_message"], "again");
}

/// **Test: With a session_id the history grows per session; reset clears it.**
#[tokio::test]
async fn test_chat_with_session_and_reset() {
    let app = app(false).await;

    post_json(&app.router, "/chat", json!({ "message": "a", "session_id": "s1" })).await;
    post_json(&app.router, "/chat", json!({ "message": "b", "session_id": "s1" })).await;
    post_json(&app.router, "/chat", json!({ "message": "c", "session_id": "s2" })).await;

    let (status, body) = post_json(&app.router, "/reset", json!({ "session_id": "s1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    post_json(&app.router, "/chat", json!({ "message": "d", "session_id": "s1" })).await;

    assert_eq!(app.llm.history_lens.lock().unwrap().clone(), vec![0, 2, 0, 0]);
}

/// **Test: POST /reset without a session_id is a 400 with an error body.**
#[tokio::test]
async fn test_reset_requires_session_id() {
    let app = app(false).await;

    let (status, body) = post_json(&app.router, "/reset", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "session_id is required");
}

/// **Test: Provider failure is a 200 with the error text as reply, and is persisted.**
#[tokio::test]
async fn test_provider_failure_is_reply_text() {
    let app = app(true).await;

    let (status, body) = post_json(&app.router, "/chat", json!({ "message": "hello" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("An error occurred:"));
    let (_, history) = get(&app.router, "/api/history").await;
    assert!(history.contains("An error occurred:"));
}

/// **Test: Missing message is sent as an empty string.**
#[tokio::test]
async fn test_missing_message_is_empty() {
    let app = app(false).await;

    let (status, body) = post_json(&app.router, "/chat", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "echo: ");
}

/// **Test: GET / renders persisted exchanges oldest first, HTML-escaped.**
#[tokio::test]
async fn test_index_renders_history() {
    let app = app(false).await;
    post_json(&app.router, "/chat", json!({ "message": "first" })).await;
    post_json(&app.router, "/chat", json!({ "message": "<b>second</b>" })).await;

    let (status, page) = get(&app.router, "/").await;

    assert_eq!(status, StatusCode::OK);
    let first = page.find("echo: first").unwrap();
    let second = page.find("&lt;b&gt;second").unwrap();
    assert!(first < second);
    assert!(!page.contains("<b>second</b>"));
}

async fn drop_history_table(database_url: &str) {
    let pool = sqlx::SqlitePool::connect(database_url).await.unwrap();
    sqlx::query("DROP TABLE chat_history")
        .execute(&pool)
        .await
        .unwrap();
}

/// **Test: Persistence failure still returns the reply; the session history matches what was shown.**
#[tokio::test]
async fn test_persistence_failure_keeps_reply_and_session() {
    let app = app(false).await;
    drop_history_table(&app.database_url).await;

    let (status, body) = post_json(&app.router, "/chat", json!({ "message": "a", "session_id": "s" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "echo: a" }));

    let (status, body) = post_json(&app.router, "/chat", json!({ "message": "b", "session_id": "s" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "echo: b" }));

    assert_eq!(app.llm.history_lens.lock().unwrap().clone(), vec![0, 2]);
}

/// **Test: Storage failure on read maps to 500 with a generic error body.**
#[tokio::test]
async fn test_history_storage_failure_is_500() {
    let app = app(false).await;
    drop_history_table(&app.database_url).await;

    let (status, body) = get(&app.router, "/api/history").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "internal server error" })
    );
}
