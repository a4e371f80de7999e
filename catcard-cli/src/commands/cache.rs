//! Cache command - inspect or clear the persisted balance.

use anyhow::Result;
use catcard_store::{default_cache_path, BalanceCache};
use clap::Args;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the cache command.
#[derive(Args, Default)]
pub struct CacheArgs {
    /// Remove the cached balance file.
    #[arg(long)]
    pub clear: bool,
}

/// Runs the cache command.
pub async fn run(args: &CacheArgs, cli: &Cli) -> Result<()> {
    let cache = BalanceCache::new();

    if args.clear {
        cache.clear().await?;
        if !cli.quiet {
            println!("Cache cleared");
        }
        return Ok(());
    }

    match cache.load().await? {
        Some(snapshot) => match cli.format {
            OutputFormat::Text => {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("Cache file: {}", default_cache_path().display());
                println!("{}", formatter.format_balance(&snapshot));
            }
            OutputFormat::Json => {
                println!("{}", JsonFormatter::format_balance(&snapshot)?);
            }
        },
        None => {
            if !cli.quiet {
                println!("No cached balance");
            }
        }
    }

    Ok(())
}
