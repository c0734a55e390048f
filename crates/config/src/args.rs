//! Config given as command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct ArgsConfig {
    #[command(flatten)]
    pub server: ServerModeArgs,

    #[command(subcommand)]
    pub mode: Option<AppMode>,
}

#[derive(Args, Debug, Clone)]
pub struct ServerModeArgs {
    /// Set data directory. Overrides config file value.
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use in RAM mode for SQLite.
    #[arg(short, long)]
    pub sqlite_in_ram: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AppMode {
    /// Print API documentation JSON to standard output.
    OpenApi,
}
