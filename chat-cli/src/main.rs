//! llmchat CLI: run the Telegram bot or the web chat, list stored web history.
//! Config comes from the env file (`--env-file`, default `.env`) and the process environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llm_client::{EnvLlmConfig, GenerationParams};
use storage::ChatHistoryRepository;
use telegram_bot::{run_bot, TelegramConfig};
use tracing::info;
use web_chat::WebConfig;

const DEFAULT_LOG_FILE: &str = "logs/llmchat.log";

#[derive(Parser)]
#[command(name = "llmchat")]
#[command(about = "LLM chat front-ends: telegram, web, history", long_about = None)]
#[command(version)]
struct Cli {
    /// Environment file loaded before anything else; missing file is an error.
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot (token can override TELEGRAM_BOT_TOKEN).
    Telegram {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run the web chat (address can override WEB_BIND_ADDR).
    Web {
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the last N exchanges stored by the web chat, oldest first.
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::from_path(&cli.env_file)
        .with_context(|| format!("Failed to load env file {}", cli.env_file.display()))?;

    match cli.command {
        Commands::Telegram { token } => {
            init_logging()?;
            let config = TelegramConfig::from_env(token)?;
            let llm = EnvLlmConfig::from_env()?.build_client(GenerationParams::BOT_CHAT)?;
            info!(model = %llm.model(), "LLM client ready");
            run_bot(config, llm).await
        }
        Commands::Web { bind } => {
            init_logging()?;
            let config = WebConfig::from_env(bind)?;
            let llm = EnvLlmConfig::from_env()?.build_client(GenerationParams::WEB_CHAT)?;
            info!(model = %llm.model(), "LLM client ready");
            web_chat::serve(config, llm).await?;
            Ok(())
        }
        Commands::History { limit } => handle_history(limit).await,
    }
}

fn init_logging() -> Result<()> {
    let log_file = std::env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    chat_core::init_tracing(&log_file)
}

async fn handle_history(limit: usize) -> Result<()> {
    let config = WebConfig::from_env(None)?;
    let repo = ChatHistoryRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open chat history at {}", config.database_url))?;

    let records = repo.list_all().await.context("Query chat history")?;
    if records.is_empty() {
        println!("No records (database: {}).", config.database_url);
        return Ok(());
    }

    const PREVIEW_LEN: usize = 60;
    let preview = |s: &str| -> String {
        let line = s.replace('\n', " ");
        match line.char_indices().nth(PREVIEW_LEN) {
            Some((idx, _)) => format!("{}...", &line[..idx]),
            None => line,
        }
    };

    let skip = records.len().saturating_sub(limit);
    println!("{:<6} {:<20} {:<64} {}", "id", "timestamp", "user_message", "llm_reply");
    println!("{}", "-".repeat(120));
    for r in &records[skip..] {
        println!(
            "{:<6} {:<20} {:<64} {}",
            r.id,
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            preview(&r.user_message),
            preview(&r.llm_reply)
        );
    }

    Ok(())
}
