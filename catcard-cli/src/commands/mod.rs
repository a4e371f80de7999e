//! CLI command implementations.

pub mod balance;
pub mod cache;
pub mod hours;
pub mod locations;
pub mod login;

use anyhow::Result;
use catcard_schedule::ScheduleBook;

/// Bundled weekly hours for campus locations.
const HOURS_JSON: &str = include_str!("../../data/hours.json");

/// Loads and validates the bundled schedule book.
pub fn load_book() -> Result<ScheduleBook> {
    ScheduleBook::from_json(HOURS_JSON).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_hours_are_valid() {
        let book = load_book().unwrap();
        assert!(!book.locations().is_empty());
    }
}
