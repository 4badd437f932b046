//! Homework Bot daemon.
//!
//! Reads `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` from the
//! environment (a `.env` file in the working directory is loaded first),
//! then polls the review API until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use homework_bot::config::DEFAULT_RETRY_SECS;
use homework_bot::logging::DEFAULT_LOG_FILE;
use homework_bot::{logging, Config, PracticumClient, Poller, RetryPolicy, TelegramNotifier};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seconds to wait between polls (at least 1)
    #[arg(long, default_value_t = DEFAULT_RETRY_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    retry_secs: u64,

    /// Log file (appended to)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Run a single poll iteration and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    logging::init(&cli.log_file)?;
    info!("📚 Homework Bot v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config.with_retry(RetryPolicy::from_secs(cli.retry_secs)),
        Err(e) => {
            error!(critical = true, "{}", e);
            std::process::exit(1);
        }
    };
    info!(?config, "Configuration loaded");

    let client = PracticumClient::new(&config.endpoint, &config.practicum_token)
        .context("Failed to build review API client")?;
    let notifier = TelegramNotifier::new(&config.telegram_token, &config.telegram_chat_id);
    let mut poller = Poller::new(client, notifier, config.retry);

    if cli.once {
        poller.tick().await;
        return Ok(());
    }

    poller
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await;

    Ok(())
}
