//! drivesync: repairs `syncRootId` tags below a Google Drive sync root.
//!
//! Usage:
//!   drivesync fix-hierarchy --root-id <ID> [--dry-run]
//!
//! Output goes to stdout, progress logs to stderr. Any failure exits non-zero.

use anyhow::Result;
use clap::Parser;
use drivesync_cli::commands::{run_auth_exchange, run_auth_url, run_fix_hierarchy};
use drivesync_cli::{Cli, CliConfig, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = CliConfig::resolve(
        cli.config.as_deref(),
        cli.access_token.clone(),
        cli.refresh_token.clone(),
    )?;

    let mut out = std::io::stdout().lock();
    match &cli.command {
        Command::FixHierarchy(args) => {
            run_fix_hierarchy(args, &config, &mut out).await?;
        }
        Command::AuthUrl => run_auth_url(&config, &mut out)?,
        Command::AuthExchange(args) => run_auth_exchange(args, &config, &mut out).await?,
    }

    Ok(())
}
