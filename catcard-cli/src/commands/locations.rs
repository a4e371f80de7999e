//! Locations command - list locations with their current status.

use anyhow::{bail, Result};
use catcard_schedule::LocationClass;
use clap::Args;

use crate::commands::{hours::parse_at, load_book};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the locations command.
#[derive(Args, Default)]
pub struct LocationsArgs {
    /// Filter by a search query (token prefixes of names and aliases).
    pub query: Option<String>,

    /// Location class to list (dining, retail, office).
    #[arg(long, short, default_value = "dining")]
    pub class: String,

    /// Wall-clock time to evaluate, "YYYY-MM-DD HH:MM". Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

/// Runs the locations command.
pub fn run(args: &LocationsArgs, cli: &Cli) -> Result<()> {
    let book = load_book()?;
    let at = parse_at(args.at.as_deref())?;
    let class = parse_class(&args.class)?;

    // A query overrides the class filter; statuses keep the same ordering.
    let mut statuses: Vec<_> = match &args.query {
        Some(query) => book
            .search(query)
            .into_iter()
            .map(|location| (location, book.status_of(&location.id, at)))
            .collect(),
        None => book.statuses_for_all(class, at),
    };
    if args.query.is_some() {
        statuses.sort_by(|(a, sa), (b, sb)| sa.rank().cmp(&sb.rank()).then(a.name.cmp(&b.name)));
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if statuses.is_empty() {
                println!("No matching locations");
            } else {
                println!("{}", formatter.format_statuses(&statuses));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_statuses(&statuses)?);
        }
    }

    Ok(())
}

/// Parses a location class name.
fn parse_class(s: &str) -> Result<LocationClass> {
    match s.to_lowercase().as_str() {
        "dining" | "dining_hall" | "dining-hall" => Ok(LocationClass::DiningHall),
        "retail" => Ok(LocationClass::Retail),
        "office" => Ok(LocationClass::Office),
        _ => bail!("Unknown class: {s}. Valid options: dining, retail, office"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class() {
        assert_eq!(parse_class("dining").unwrap(), LocationClass::DiningHall);
        assert_eq!(parse_class("Retail").unwrap(), LocationClass::Retail);
        assert_eq!(parse_class("office").unwrap(), LocationClass::Office);
    }

    #[test]
    fn test_parse_class_invalid() {
        assert!(parse_class("gym").is_err());
    }
}
