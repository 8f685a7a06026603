//! Concise News summarization service entry point.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use concise_news::api::{create_router, AppState};
use concise_news::config::Config;
use concise_news::metrics;
use concise_news::summarizer::{SummarizeRequest, Summarizer};
use concise_news::utils::{read_input, shutdown_signal};

/// Text summarization service.
#[derive(Parser, Debug)]
#[command(name = "concise-news")]
#[command(about = "Summarize text through the Hugging Face inference API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Summarize text once and print the result.
    Summarize {
        /// Text to summarize. Read from stdin when omitted.
        text: Option<String>,

        /// Read the text from a file.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so RUST_LOG and VERBOSE from .env apply to logging
    let loaded = Config::load();

    // Initialize logging
    let fallback = Config::default();
    let directive = loaded.as_ref().unwrap_or(&fallback).log_filter(args.verbose);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if args.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(loaded, port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(loaded).await,
        Some(Command::Summarize { text, file }) => cmd_summarize(loaded, text, file).await,
        None => cmd_serve(loaded, args.port).await,
    }
}

/// Validate loaded configuration, logging failures.
fn validated(loaded: Result<Config, envy::Error>) -> concise_news::Result<Config> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e);
    }

    Ok(config)
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    loaded: Result<Config, envy::Error>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    let mut config = validated(loaded)?;

    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Hugging Face API token configured: {}", config.has_token());
    if !config.has_token() {
        warn!(
            policy = %config.credential_policy,
            "HF_API_TOKEN is not set; requests follow the credential policy"
        );
    }

    let mut app_state = AppState::new(&config)?;

    if config.metrics_enabled {
        let handle = metrics::install_prometheus().context("failed to install metrics recorder")?;
        app_state = app_state.with_metrics(handle);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server starting on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CONCISE NEWS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    let retry = config.retry_policy();

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  API Token: {}", if config.has_token() { "present" } else { "missing" });
    println!("  Credential Policy: {}", config.credential_policy);
    println!("  Endpoint: {}", config.hf_api_url);
    println!("  Timeout: {}s per attempt", config.http_timeout_secs);
    println!("  Retries: {} attempts, {}ms apart", retry.max_attempts, retry.delay.as_millis());
    println!("  Port: {}", config.port);
    println!("  Index: {}", config.index_path);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Summarize text from an argument, a file, or stdin.
async fn cmd_summarize(
    loaded: Result<Config, envy::Error>,
    text: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = validated(loaded)?;
    let summary = summarize_once(&config, text, file.as_deref()).await?;

    println!("{}", summary);

    Ok(())
}

async fn summarize_once(
    config: &Config,
    text: Option<String>,
    file: Option<&Path>,
) -> concise_news::Result<String> {
    let text = read_input(text, file).await?;
    let summarizer = Summarizer::new(config)?;
    let response = summarizer.summarize(&SummarizeRequest::new(text)).await?;
    Ok(response.summary)
}
