use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
