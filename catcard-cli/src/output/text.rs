//! Text output formatting with colors.

use catcard_core::{BalanceSnapshot, BoardMeals};
use catcard_schedule::{Location, ScheduleEntry, Status, StoredStatus};
use chrono::{DateTime, Local, Utc};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

/// Marker for the current row in an hours listing.
const CURRENT_ROW_MARKER: &str = "▸";

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ------------------------------------------------------------------
    // Balance
    // ------------------------------------------------------------------

    /// Formats a balance snapshot for display.
    pub fn format_balance(&self, snapshot: &BalanceSnapshot) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {}",
            self.bold(&snapshot.name),
            self.blue(&format!("({})", snapshot.plan_name))
        ));

        let meals = match snapshot.board_meals {
            BoardMeals::Unlimited => "unlimited".to_string(),
            BoardMeals::Count(n) => {
                let label = if n == 1 { "meal" } else { "meals" };
                format!("{n} {label} left")
            }
        };
        lines.push(format!("Meals:     {meals}"));
        lines.push(format!("Exchanges: {}", snapshot.secondary_meals));
        lines.push(format!("Points:    ${}", snapshot.points));
        lines.push(format!("Cat Cash:  ${}", snapshot.cat_cash));
        if let Some(bonus) = snapshot.bonus {
            lines.push(format!("Bonus:     ${bonus}"));
            lines.push(format!("Total:     ${}", snapshot.total_cash()));
        }

        if let Some(updated_at) = snapshot.updated_at {
            lines.push(self.dim(&format!("Updated:   {}", local_time(updated_at))));
        }
        lines.push(self.dim(&format!(
            "Retrieved: {}",
            local_time(snapshot.retrieved_at)
        )));

        if let Some(kind) = snapshot.outcome.error_kind() {
            lines.push(self.red(&format!("Query failed ({kind}): {}", kind.user_hint())));
        }

        lines.join("\n")
    }

    // ------------------------------------------------------------------
    // Hours
    // ------------------------------------------------------------------

    /// Formats one location's weekly hours, marking the current row.
    pub fn format_hours(
        &self,
        location: &Location,
        status: Status,
        entries: &[ScheduleEntry],
        row_index: Option<usize>,
        entry_index: usize,
    ) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "{}  {}",
            self.bold(&location.name),
            self.status_word(status)
        ));

        for (i, entry) in entries.iter().enumerate() {
            lines.push(day_span_label(entry.start_day, entry.end_day));
            for (j, row) in entry.rows.iter().enumerate() {
                let marker = if i == entry_index && row_index == Some(j) {
                    CURRENT_ROW_MARKER
                } else {
                    " "
                };
                let word = match row.status {
                    StoredStatus::Open => "Open",
                    StoredStatus::Closed => "Closed",
                };
                lines.push(format!(
                    "{marker} {} - {}  {word}",
                    format_minute(row.start_minute),
                    format_minute(row.end_minute),
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats a status listing, one location per line.
    pub fn format_statuses(&self, statuses: &[(&Location, Status)]) -> String {
        statuses
            .iter()
            .map(|(location, status)| {
                format!("{:<28} {}", location.name, self.status_word(*status))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status_word(&self, status: Status) -> String {
        match status {
            Status::Open => self.green("Open"),
            Status::ClosingSoon => self.yellow("Closing soon"),
            Status::Closed => self.red("Closed"),
        }
    }

    // ------------------------------------------------------------------
    // Color helpers
    // ------------------------------------------------------------------

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Formats a UTC instant in the local timezone.
fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Formats a minute-of-day as a 12-hour clock label. 1440 reads as midnight.
pub fn format_minute(minute: u16) -> String {
    let minute = minute % 1440;
    let (hour, min) = (minute / 60, minute % 60);
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{min:02} {meridiem}")
}

/// Labels a (possibly wrapping) day-of-week span, 1=Sunday..7=Saturday.
pub fn day_span_label(start_day: u8, end_day: u8) -> String {
    let name = |day: u8| DAY_NAMES[usize::from((day - 1) % 7)];
    if start_day == end_day {
        name(start_day).to_string()
    } else {
        format!("{} - {}", name(start_day), name(end_day))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catcard_core::{BalanceFields, Cents, QueryErrorKind};
    use chrono::TimeZone;

    fn sample_snapshot() -> BalanceSnapshot {
        BalanceSnapshot::from_success_at(
            BalanceFields {
                name: "Catamount, Rufus".to_string(),
                plan_name: "Block 160".to_string(),
                board_meals: BoardMeals::Count(37),
                secondary_meals: 3,
                points: Cents(0),
                cat_cash: Cents(195),
                bonus: None,
                updated_at: None,
            },
            Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_format_balance_plain() {
        let text = TextFormatter::new(false).format_balance(&sample_snapshot());
        assert!(text.contains("Catamount, Rufus"));
        assert!(text.contains("37 meals left"));
        assert!(text.contains("Cat Cash:  $1.95"));
        assert!(!text.contains("\x1b["));
        assert!(!text.contains("Query failed"));
    }

    #[test]
    fn test_format_balance_singular_meal() {
        let mut snapshot = sample_snapshot();
        snapshot.board_meals = BoardMeals::Count(1);
        let text = TextFormatter::new(false).format_balance(&snapshot);
        assert!(text.contains("1 meal left"));
    }

    #[test]
    fn test_format_balance_failure_hint() {
        let failed = BalanceSnapshot::from_failure(None, QueryErrorKind::Authentication);
        let text = TextFormatter::new(false).format_balance(&failed);
        assert!(text.contains("Query failed (authentication error)"));
        assert!(text.contains("check your NetID and password"));
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(0), "12:00 AM");
        assert_eq!(format_minute(420), "7:00 AM");
        assert_eq!(format_minute(720), "12:00 PM");
        assert_eq!(format_minute(1260), "9:00 PM");
        assert_eq!(format_minute(1440), "12:00 AM");
    }

    #[test]
    fn test_day_span_label() {
        assert_eq!(day_span_label(2, 6), "Mon - Fri");
        assert_eq!(day_span_label(7, 1), "Sat - Sun");
        assert_eq!(day_span_label(4, 4), "Wed");
    }
}
