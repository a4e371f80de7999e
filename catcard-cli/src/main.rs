// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! CatCard CLI - campus card balances and dining hours from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Show the current balance (cached when fresh)
//! catcard balance
//!
//! # Force a fresh query against the portal
//! catcard balance --force
//!
//! # Hours for one location
//! catcard hours harris
//!
//! # All dining halls, open first
//! catcard locations
//!
//! # JSON output
//! catcard balance --format json
//!
//! # Store credentials in the system keychain
//! catcard login
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{balance, cache, hours, locations, login};

// ============================================================================
// CLI Definition
// ============================================================================

/// CatCard CLI - campus card balance and dining hours.
#[derive(Parser)]
#[command(name = "catcard")]
#[command(about = "Campus card balance and dining hours CLI")]
#[command(long_about = r#"
CatCard queries the campus SSO portal for card balances and answers
dining-hours questions from a bundled schedule.

Examples:
  catcard balance                # Current balance (cached when fresh)
  catcard balance --force        # Force a fresh portal query
  catcard hours harris           # Hours for one location
  catcard locations              # All dining halls, open first
  catcard login                  # Store credentials in the keychain
  catcard cache --clear          # Drop the cached balance
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'balance' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the card balance (default if no command specified).
    #[command(visible_alias = "b")]
    Balance(balance::BalanceArgs),

    /// Show hours for one location.
    #[command(visible_alias = "h")]
    Hours(hours::HoursArgs),

    /// List locations with their current status.
    #[command(visible_alias = "l")]
    Locations(locations::LocationsArgs),

    /// Store NetID credentials in the system keychain.
    Login,

    /// Remove stored credentials.
    Logout,

    /// Inspect or clear the cached balance.
    Cache(cache::CacheArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The balance query ran but ended in a failure outcome.
    QueryFailed = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("catcard=debug,info")
    } else {
        EnvFilter::new("catcard=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Balance(args)) => balance::run(args, &cli).await,
        Some(Commands::Hours(args)) => hours::run(args, &cli),
        Some(Commands::Locations(args)) => locations::run(args, &cli),
        Some(Commands::Login) => login::run_login(&cli),
        Some(Commands::Logout) => login::run_logout(&cli),
        Some(Commands::Cache(args)) => cache::run(args, &cli).await,
        None => balance::run(&balance::BalanceArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
