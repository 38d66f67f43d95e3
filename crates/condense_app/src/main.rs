use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use condense_app::{
    build_orchestrator, build_router, logging, serve, AppConfig, AppState, CompressionStats,
    DEFAULT_CONFIG_FILENAME,
};
use condense_logging::{condense_info, condense_warn};

#[derive(Debug, Parser)]
#[command(name = "condense", version, about = "Summarize documents of any length")]
struct Cli {
    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// Overrides `server.bind_addr`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Summarize a UTF-8 text file and print the result.
    Summarize { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    logging::initialize(&config.logging);

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => run_server(config, bind).await,
        Command::Summarize { file } => summarize_file(config, file).await,
    }
}

async fn run_server(config: AppConfig, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let bind_addr = match bind {
        Some(addr) => addr,
        None => config
            .server
            .bind_addr
            .parse()
            .context("invalid server.bind_addr")?,
    };

    let orchestrator = build_orchestrator(&config).context("building summarizer")?;
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        request_timeout: config.server.request_timeout(),
    };
    let router = build_router(state, config.server.cors);

    serve(router, bind_addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            condense_warn!("Could not listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
        condense_info!("Shutdown requested");
    })
    .await
    .context("HTTP server error")
}

async fn summarize_file(config: AppConfig, file: PathBuf) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
    let orchestrator = build_orchestrator(&config).context("building summarizer")?;

    let result = tokio::time::timeout(
        config.server.request_timeout(),
        orchestrator.summarize_document(&text),
    )
    .await
    .context("summarization timed out")??;

    let stats = CompressionStats::measure(&text, &result.summary);
    println!("{}", result.summary);
    eprintln!(
        "Input: {} words, {} chars; compressed {} -> {} words ({:.1}%) in {} rounds",
        stats.input_words,
        stats.input_chars,
        stats.input_words,
        stats.summary_words,
        stats.ratio_percent,
        result.rounds.len()
    );
    Ok(())
}
