use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::LazyLock;

static VERSION_INFO: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");

    // Use VERGEN_GIT_SHA for the commit hash (with safe slicing)
    let commit = option_env!("VERGEN_GIT_SHA")
        .map(|s| s.chars().take(7).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown"); // YYYY-MM-DD
    let target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");
    let rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");

    format!("{version}\ncommit: {commit}\nbuilt: {built}\ntarget: {target}\nrustc: {rustc}")
});

pub fn version_info() -> &'static str {
    &VERSION_INFO
}

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(
    author,
    version = version_info(),
    about = "Incremental harvester for a forge catalog"
)]
#[command(after_help = "Examples:
  gleaner harvest                          # One pass, resuming from the stored cursor
  gleaner -v 2 harvest                     # Same, printing every harvested record
  gleaner --db ./mirror.sqlite status      # Counts and cursor of a specific store

Environment:
  GLEANER_DB       store path (same as --db)
  GLEANER_API_URL  catalog root (same as --api-url)")]
pub struct Config {
    /// Path to the SQLite store file
    #[arg(long, env = "GLEANER_DB", default_value = "./data.sqlite")]
    pub db: PathBuf,

    /// Base URL of the forge catalog API
    #[arg(long, env = "GLEANER_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Progress detail: 0 silent, 1 tally, 2 one line per record
    #[arg(
        short = 'v',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one harvest pass against the catalog
    #[command(after_help = "Each pass fetches the next page of users past the
highest stored user ID and all of their repositories. Rerun to keep
going; Ctrl+C stops a pass without losing what it already stored.")]
    Harvest,
    /// Show store counts and the resume cursor
    Status,
}
