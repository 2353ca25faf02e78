//! Gleaner CLI
//!
//! Harvests users and their repositories from a forge catalog into a
//! local SQLite store, one resumable pass per invocation.

mod config;

use anyhow::anyhow;
use clap::Parser;
use dotenvy::dotenv;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use gleaner_client::ForgeClient;
use gleaner_core::error::AppError;
use gleaner_core::traits::RecordStore;
use gleaner_core::{ConsoleReporter, HarvestService};
use gleaner_db::SqliteStore;

use config::{Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::parse();

    // Diagnostics go to stderr; the progress tally owns stdout.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(config.verbosity))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let result = match config.command {
        Command::Harvest => run_harvest(&config).await,
        Command::Status => show_status(&config).await,
    };

    // AppError knows how to phrase itself for people; exit code 1 either way.
    result.map_err(|e| anyhow!(e.user_message()))
}

/// One harvest pass: open the store, wire the client, run until the page
/// is done or Ctrl+C fires.
async fn run_harvest(config: &Config) -> Result<(), AppError> {
    info!("Opening record store at {}", config.db.display());
    let store = SqliteStore::open(&config.db).await?;
    let client = ForgeClient::new(&config.api_url)?;
    let reporter = ConsoleReporter::new(config.verbosity);
    let service = HarvestService::new(store, client);

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after in-flight work unwinds");
            signal_token.cancel();
        }
    });

    let result = service.run_cancellable(&reporter, cancel_token).await?;

    if result.is_cancelled() {
        info!("Progress so far is saved; rerun to resume from the new cursor");
    }

    Ok(())
}

/// Store counts plus the cursor the next pass will resume from.
async fn show_status(config: &Config) -> Result<(), AppError> {
    let store = SqliteStore::open(&config.db).await?;

    let users = store.count_users().await?;
    let repos = store.count_repos().await?;
    let cursor = store.last_user_id().await?;

    println!("store:  {}", config.db.display());
    println!("users:  {users}");
    println!("repos:  {repos}");
    println!("cursor: {cursor}");

    Ok(())
}

/// Maps the -v level to a stderr diagnostic level.
///
/// The reporter's stdout output scales with the same flag, so the two
/// streams stay in step without sharing any state.
fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        _ => Level::DEBUG,
    }
}
