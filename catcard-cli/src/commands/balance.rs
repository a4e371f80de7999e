//! Balance command - query the portal and display the card balance.

use anyhow::Result;
use catcard_fetch::{
    should_refresh, BalanceSession, HttpConnector, KeychainCredentials, PortalConfig,
};
use catcard_store::BalanceCache;
use chrono::Utc;
use clap::Args;
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the balance command.
#[derive(Args, Default)]
pub struct BalanceArgs {
    /// Query the portal even if the cached balance is still fresh.
    #[arg(long)]
    pub force: bool,

    /// Show the cached balance without touching the network.
    #[arg(long, conflicts_with = "force")]
    pub cached: bool,
}

/// Runs the balance command.
pub async fn run(args: &BalanceArgs, cli: &Cli) -> Result<()> {
    let cache = BalanceCache::new();
    let previous = cache.load().await?;

    let snapshot = if args.cached {
        previous.ok_or_else(|| anyhow::anyhow!("No cached balance; run without --cached first"))?
    } else {
        match previous {
            Some(prev) if !args.force && !should_refresh(Some(&prev), Utc::now()) => {
                debug!("Cached balance still fresh");
                prev
            }
            previous => {
                info!(force = args.force, "Querying portal");
                let session = BalanceSession::new(
                    PortalConfig::default(),
                    HttpConnector,
                    KeychainCredentials,
                );
                let snapshot = session.query(previous.as_ref()).await;
                cache.store(&snapshot).await?;
                snapshot
            }
        }
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_balance(&snapshot));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_balance(&snapshot)?);
        }
    }

    if !snapshot.outcome.is_success() {
        std::process::exit(ExitCode::QueryFailed as i32);
    }
    Ok(())
}
