//! AI Summary CLI
//!
//! Summarizes text from the command line or stdin using the configured
//! OpenAI-compatible endpoint

use aisummary::config::{JsonFileStore, LoggingConfig, Settings};
use aisummary::{AppError, Language, OpenAISummarizer, ReqwestClient};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

/// Summarize text in a target language
#[derive(Debug, Parser)]
#[command(name = "aisummary", version, about)]
struct Cli {
    /// Source language code
    #[arg(long, default_value = "en")]
    from: Language,

    /// Target language code (zh-cn, zh-tw, yue, ja, en, ko, fr, es, ru, de)
    #[arg(long, default_value = "en")]
    to: Language,

    /// Configuration store file, overrides AISUMMARY_STORE
    #[arg(long)]
    store: Option<PathBuf>,

    /// Text to summarize, read from stdin when omitted
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new().context("Failed to load settings")?;
    init_logging(&settings.logging)?;

    info!("{}", aisummary::version_info());

    let store_path = settings.resolve_store_path(cli.store)?;
    debug!("Using config store {:?}", store_path);

    let store = Arc::new(JsonFileStore::new(store_path));
    let http = Arc::new(
        ReqwestClient::with_config(&settings.http).context("Failed to create HTTP client")?,
    );
    let summarizer = OpenAISummarizer::new(http, store);

    let text = if cli.text.is_empty() {
        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("Failed to read stdin")?;
        input
    } else {
        cli.text.join(" ")
    };

    if text.trim().is_empty() {
        anyhow::bail!("Nothing to summarize");
    }

    let mut stream = summarizer
        .summarize_deltas(&text, cli.from, cli.to)
        .await
        .map_err(report)?;

    let mut stdout = tokio::io::stdout();
    while let Some(delta) = stream.next().await {
        let delta = delta.map_err(report)?;
        stdout.write_all(delta.as_bytes()).await?;
        stdout.flush().await?;
    }
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    Ok(())
}

/// Log a summary failure and hand it back for the exit status
fn report(err: AppError) -> anyhow::Error {
    if err.should_log_details() {
        error!(error_type = err.error_type(), status = ?err.status(), "Summary failed: {:?}", err);
    } else {
        warn!(error_type = err.error_type(), "Summary not started");
    }
    anyhow::Error::new(err)
}

/// Initialize logging system
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(config.level.as_str())
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    debug!("Logging system initialized");
    Ok(())
}
