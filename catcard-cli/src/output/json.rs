//! JSON output formatting for scripting.

use catcard_core::BalanceSnapshot;
use catcard_schedule::{Location, ScheduleEntry, Status};
use serde_json::json;

/// JSON formatter. Output is always pretty-printed.
pub struct JsonFormatter;

impl JsonFormatter {
    /// Serializes a balance snapshot.
    pub fn format_balance(snapshot: &BalanceSnapshot) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(snapshot)
    }

    /// Serializes a status listing.
    pub fn format_statuses(
        statuses: &[(&Location, Status)],
    ) -> Result<String, serde_json::Error> {
        let records: Vec<_> = statuses
            .iter()
            .map(|(location, status)| {
                json!({
                    "id": location.id,
                    "name": location.name,
                    "class": location.class,
                    "status": status,
                })
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }

    /// Serializes one location's hours and current status.
    pub fn format_hours(
        location: &Location,
        status: Status,
        entries: &[ScheduleEntry],
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&json!({
            "location": location,
            "status": status,
            "entries": entries,
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catcard_core::QueryErrorKind;
    use catcard_schedule::LocationClass;

    #[test]
    fn test_format_balance_failure_tags_outcome() {
        let failed = BalanceSnapshot::from_failure(None, QueryErrorKind::Connection);
        let text = JsonFormatter::format_balance(&failed).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcome"]["result"], "failure");
        assert_eq!(value["outcome"]["kind"], "connection");
    }

    #[test]
    fn test_format_statuses() {
        let location = Location {
            id: "harris-millis".to_string(),
            name: "Harris Millis".to_string(),
            class: LocationClass::DiningHall,
            aliases: vec![],
        };
        let text = JsonFormatter::format_statuses(&[(&location, Status::Open)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["id"], "harris-millis");
        assert_eq!(value[0]["status"], "open");
        assert_eq!(value[0]["class"], "dining_hall");
    }
}
