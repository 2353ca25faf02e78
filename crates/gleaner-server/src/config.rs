use clap::Parser;
use std::path::PathBuf;

/// Server configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "gleaner-server")]
#[command(author, version, about = "REST API over the gleaner record store")]
pub struct ServerConfig {
    /// Path to the SQLite store file
    #[arg(long, env = "GLEANER_DB", default_value = "./data.sqlite")]
    pub db: PathBuf,

    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
}
