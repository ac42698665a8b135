//! Command line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use drivesync_types::FileId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drivesync", version)]
#[command(about = "Repairs syncRootId tags below a Google Drive sync root")]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// OAuth2 access token
    #[arg(long, env = "DRIVESYNC_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// OAuth2 refresh token
    #[arg(long, env = "DRIVESYNC_REFRESH_TOKEN", global = true, hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fix syncRootId tags below a sync root
    #[command(alias = "fix")]
    FixHierarchy(FixHierarchyArgs),

    /// Print the OAuth consent URL
    AuthUrl,

    /// Exchange an OAuth authorization code for tokens
    AuthExchange(AuthExchangeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FixHierarchyArgs {
    /// Id of the sync root directory
    #[arg(long, value_parser = FileId::parse)]
    pub root_id: FileId,

    /// Plan corrections without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Run against a JSON listing snapshot instead of Google Drive
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AuthExchangeArgs {
    /// Authorization code from the consent page
    #[arg(long)]
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
