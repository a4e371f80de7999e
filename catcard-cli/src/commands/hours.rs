//! Hours command - weekly hours for a single location.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Args;

use crate::commands::load_book;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the hours command.
#[derive(Args)]
pub struct HoursArgs {
    /// Location to look up (id, name, or alias prefix).
    pub location: String,

    /// Wall-clock time to evaluate, "YYYY-MM-DD HH:MM". Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

/// Runs the hours command.
pub fn run(args: &HoursArgs, cli: &Cli) -> Result<()> {
    let book = load_book()?;
    let at = parse_at(args.at.as_deref())?;

    let matches = book.search(&args.location);
    let Some(location) = matches.first() else {
        bail!("No location matches '{}'", args.location);
    };
    if matches.len() > 1 && !cli.quiet {
        let names: Vec<&str> = matches.iter().map(|l| l.name.as_str()).collect();
        eprintln!("Multiple matches ({}); showing first", names.join(", "));
    }

    let status = book.status_of(&location.id, at);
    let entries = book.entries(&location.id);
    let (row_index, entry_index) = book.nearest_section_of(&location.id, at);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!(
                "{}",
                formatter.format_hours(location, status, entries, row_index, entry_index)
            );
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_hours(location, status, entries)?);
        }
    }

    Ok(())
}

/// Parses the `--at` override, defaulting to the local wall clock.
pub fn parse_at(at: Option<&str>) -> Result<NaiveDateTime> {
    match at {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M")
            .with_context(|| format!("Invalid time '{text}'; expected YYYY-MM-DD HH:MM")),
        None => Ok(Local::now().naive_local()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_at_explicit() {
        let at = parse_at(Some("2024-09-04 12:30")).unwrap();
        assert_eq!(at.format("%H:%M").to_string(), "12:30");
    }

    #[test]
    fn test_parse_at_rejects_garbage() {
        assert!(parse_at(Some("yesterday")).is_err());
    }
}
