//! # web-chat
//!
//! Browser front-end over [`conversation`].
//!
//! - `GET /` – page listing every persisted exchange, oldest first
//! - `POST /chat` – `{message, session_id?}` → `{reply}`; single-turn unless a session id is given
//! - `POST /reset` – `{session_id}` → `{ok}`; drops that session's history
//! - `GET /api/history` – persisted exchanges as JSON
//!
//! Every completed exchange is appended to the `chat_history` table ([`storage`]).

pub mod config;
pub mod routes;
pub mod server;

mod error;
mod state;
mod templates;

pub use config::WebConfig;
pub use error::{Result, WebError};
pub use server::{build_router, serve};
pub use state::AppState;
