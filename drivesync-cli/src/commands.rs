//! Subcommand implementations.
//!
//! Each command writes its human-readable output to `out`; progress goes to
//! the log.

use crate::cli::{AuthExchangeArgs, FixHierarchyArgs};
use crate::config::CliConfig;
use crate::report::write_report;
use anyhow::{bail, Context, Result};
use drivesync_drive::{GoogleDriveStore, MemoryStore, RemoteStore};
use drivesync_reconcile::{ReconcileOptions, ReconcileReport, Reconciler};
use std::io::Write;
use tracing::info;

/// Builds a Google Drive store from config credentials.
pub async fn google_drive_store(config: &CliConfig) -> Result<GoogleDriveStore> {
    let store = GoogleDriveStore::new(config.drive.clone())?;

    match (&config.access_token, &config.refresh_token) {
        (Some(access), refresh) => store.set_tokens(access.clone(), refresh.clone()).await,
        (None, Some(refresh)) => store.set_refresh_token(refresh.clone()).await,
        (None, None) => bail!(
            "no Google Drive credentials; pass --access-token or --refresh-token \
             (see `drivesync auth-url`)"
        ),
    }

    Ok(store)
}

/// Runs the hierarchy fix and prints its report.
pub async fn run_fix_hierarchy<W: Write>(
    args: &FixHierarchyArgs,
    config: &CliConfig,
    out: &mut W,
) -> Result<ReconcileReport> {
    let store: Box<dyn RemoteStore> = match &args.snapshot {
        Some(path) => {
            info!(path = %path.display(), "Using listing snapshot");
            Box::new(
                MemoryStore::load(path)
                    .await
                    .with_context(|| format!("failed to load snapshot {}", path.display()))?,
            )
        }
        None => Box::new(google_drive_store(config).await?),
    };

    writeln!(out, "Starting fixing the sync hierarchy...")?;
    if args.dry_run {
        writeln!(out, "This is a dry run!")?;
    }

    let options = ReconcileOptions {
        dry_run: args.dry_run,
    };
    // Corrections are printed as they go out, so a failed run still shows
    // which writes were attempted.
    let mut write_error = None;
    let result = Reconciler::new(store.as_ref(), options)
        .run_with_progress(&args.root_id, |correction| {
            if write_error.is_none() {
                write_error = writeln!(out, "{correction}").err();
            }
        })
        .await;
    if let Some(err) = write_error {
        return Err(err.into());
    }

    let report = result?;
    write_report(out, &report)?;
    Ok(report)
}

/// Prints the OAuth consent URL.
pub fn run_auth_url<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    if config.drive.client_id.is_empty() {
        bail!("drive.client_id is not set in the config file");
    }
    let store = GoogleDriveStore::new(config.drive.clone())?;
    writeln!(out, "{}", store.auth_url())?;
    Ok(())
}

/// Exchanges an authorization code and prints the tokens as JSON.
pub async fn run_auth_exchange<W: Write>(
    args: &AuthExchangeArgs,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let store = GoogleDriveStore::new(config.drive.clone())?;
    let tokens = store.complete_auth(&args.code).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&tokens)?)?;
    Ok(())
}
