mod chat;
mod history;

pub use chat::{chat_routes, ChatRequest, ChatResponse, ResetRequest, ResetResponse};
pub use history::history_routes;
