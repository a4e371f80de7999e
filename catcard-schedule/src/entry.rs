//! Schedule entries and status derivation.
//!
//! Days of week are numbered 1=Sunday..7=Saturday. Rows are minute-of-day
//! ranges; a full day runs 0..1440. Entry rows are validated to be sorted,
//! gap-free, and to cover the whole day, so any wall-clock instant inside
//! an entry's day span lands in exactly one row.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// An open row reads as closing-soon within this many minutes of its end,
/// provided the next row is closed.
pub const CLOSING_SOON_THRESHOLD_MINUTES: u16 = 60;

/// Past this hour, a day with no matching row is treated as "over" and the
/// nearest-section lookup advances to the next entry.
const END_OF_DAY_HOUR: u32 = 18;

// ============================================================================
// Status
// ============================================================================

/// Status stored in schedule rows. `ClosingSoon` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredStatus {
    /// The location is open during this row.
    Open,
    /// The location is closed during this row.
    Closed,
}

/// Derived status reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Open, with more than an hour left (or no closed row following).
    Open,
    /// Open, but the current window ends within the threshold and the next
    /// row is closed.
    ClosingSoon,
    /// Closed.
    Closed,
}

impl Status {
    /// Sort rank: open-like statuses first, closed last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::ClosingSoon => 1,
            Self::Closed => 2,
        }
    }

    /// True for `Open` or `ClosingSoon`.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

// ============================================================================
// Rows and Entries
// ============================================================================

/// One contiguous minute-of-day range with a stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Inclusive start, minutes since midnight.
    pub start_minute: u16,
    /// Exclusive end, minutes since midnight (1440 = end of day).
    pub end_minute: u16,
    /// Status during this range.
    pub status: StoredStatus,
}

impl ScheduleRow {
    /// True when the given minute-of-day falls inside this row.
    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start_minute && minute < self.end_minute
    }
}

/// One location's hours for a contiguous day-of-week range.
///
/// The range may wrap (e.g. Friday..Monday = 6..=2). Rows apply identically
/// to every day in the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// First day of the span, 1=Sunday..7=Saturday.
    pub start_day: u8,
    /// Last day of the span, inclusive; may be less than `start_day`.
    pub end_day: u8,
    /// Sorted, gap-free rows covering 0..1440.
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleEntry {
    /// Builds a validated entry.
    pub fn new(start_day: u8, end_day: u8, rows: Vec<ScheduleRow>) -> Result<Self, ScheduleError> {
        let entry = Self {
            start_day,
            end_day,
            rows,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks the day-range and gap-free row invariants.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for day in [self.start_day, self.end_day] {
            if !(1..=7).contains(&day) {
                return Err(ScheduleError::InvalidDay(day));
            }
        }
        let Some(first) = self.rows.first() else {
            return Err(ScheduleError::EmptyEntry {
                start_day: self.start_day,
                end_day: self.end_day,
            });
        };
        if first.start_minute != 0 {
            return Err(ScheduleError::NonContiguousRows {
                minute: first.start_minute,
                expected: 0,
            });
        }
        let mut cursor = 0u16;
        for row in &self.rows {
            if row.end_minute <= row.start_minute {
                return Err(ScheduleError::InvertedRow {
                    start: row.start_minute,
                    end: row.end_minute,
                });
            }
            if row.start_minute != cursor {
                return Err(ScheduleError::NonContiguousRows {
                    minute: row.start_minute,
                    expected: cursor,
                });
            }
            cursor = row.end_minute;
        }
        if cursor != MINUTES_PER_DAY {
            return Err(ScheduleError::NonContiguousRows {
                minute: cursor,
                expected: MINUTES_PER_DAY,
            });
        }
        Ok(())
    }

    /// True when the (possibly wrapping) day span contains the given day.
    pub fn contains_day(&self, day: u8) -> bool {
        if self.start_day <= self.end_day {
            (self.start_day..=self.end_day).contains(&day)
        } else {
            day >= self.start_day || day <= self.end_day
        }
    }

    /// Index of the row containing the given minute-of-day.
    pub fn row_at(&self, minute: u16) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(minute))
    }

    /// Derived status at a minute-of-day within this entry.
    fn status_at_minute(&self, minute: u16) -> Status {
        let Some(index) = self.row_at(minute) else {
            return Status::Closed;
        };
        let row = &self.rows[index];
        match row.status {
            StoredStatus::Closed => Status::Closed,
            StoredStatus::Open => {
                let remaining = row.end_minute - minute;
                let next_closed = self
                    .rows
                    .get(index + 1)
                    .is_some_and(|next| next.status == StoredStatus::Closed);
                if remaining <= CLOSING_SOON_THRESHOLD_MINUTES && next_closed {
                    Status::ClosingSoon
                } else {
                    Status::Open
                }
            }
        }
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Day of week for a wall-clock time, 1=Sunday..7=Saturday.
fn day_of_week(at: NaiveDateTime) -> u8 {
    u8::try_from(at.date().weekday().num_days_from_sunday() + 1).unwrap_or(1)
}

/// Minute of day for a wall-clock time.
fn minute_of_day(at: NaiveDateTime) -> u16 {
    u16::try_from(at.hour() * 60 + at.minute()).unwrap_or(0)
}

/// Derived status for a location's entries at a wall-clock time.
///
/// Falls back to `Closed` when no entry covers the weekday. With validated
/// gap-free entries a covered weekday always lands in a row.
pub fn status_at(entries: &[ScheduleEntry], at: NaiveDateTime) -> Status {
    let day = day_of_week(at);
    let minute = minute_of_day(at);
    entries
        .iter()
        .find(|entry| entry.contains_day(day))
        .map_or(Status::Closed, |entry| entry.status_at_minute(minute))
}

/// Selects "today's" section for a detail view: `(row index, entry index)`.
///
/// When an entry covers the weekday and a row matches, both are returned.
/// When the weekday matches but no row does and the hour is 18 or later,
/// the day is treated as over and the lookup advances to the next entry
/// (wrapping) with no row selected. When no entry covers the weekday, the
/// next entry whose span starts after the weekday (wrapping) is returned.
pub fn nearest_section(entries: &[ScheduleEntry], at: NaiveDateTime) -> (Option<usize>, usize) {
    if entries.is_empty() {
        return (None, 0);
    }
    let day = day_of_week(at);
    let minute = minute_of_day(at);

    if let Some(entry_index) = entries.iter().position(|entry| entry.contains_day(day)) {
        let entry = &entries[entry_index];
        if let Some(row_index) = entry.row_at(minute) {
            return (Some(row_index), entry_index);
        }
        if at.hour() >= END_OF_DAY_HOUR {
            return (None, (entry_index + 1) % entries.len());
        }
        return (None, entry_index);
    }

    // No entry covers today: pick the entry with the soonest upcoming start.
    let upcoming = entries
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| (entry.start_day + 7 - day) % 7)
        .map_or(0, |(index, _)| index);
    (None, upcoming)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn row(start: u16, end: u16, status: StoredStatus) -> ScheduleRow {
        ScheduleRow {
            start_minute: start,
            end_minute: end,
            status,
        }
    }

    /// Weekday entry: closed until 7:00, open until 20:00, closed after.
    fn weekday_entry() -> ScheduleEntry {
        ScheduleEntry::new(
            2,
            6,
            vec![
                row(0, 420, StoredStatus::Closed),
                row(420, 1200, StoredStatus::Open),
                row(1200, 1440, StoredStatus::Closed),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_validation_rejects_gaps() {
        let err = ScheduleEntry::new(
            1,
            7,
            vec![
                row(0, 400, StoredStatus::Closed),
                row(420, 1440, StoredStatus::Open),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::NonContiguousRows { minute: 420, expected: 400 }));
    }

    #[test]
    fn test_validation_rejects_short_day() {
        let err = ScheduleEntry::new(1, 7, vec![row(0, 1200, StoredStatus::Open)]).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::NonContiguousRows { minute: 1200, expected: 1440 }
        ));
    }

    #[test]
    fn test_validation_rejects_bad_day() {
        let err = ScheduleEntry::new(0, 7, vec![row(0, 1440, StoredStatus::Open)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDay(0)));
    }

    #[test]
    fn test_wrapping_day_span() {
        // Friday..Monday = 6..=2
        let entry = ScheduleEntry::new(6, 2, vec![row(0, 1440, StoredStatus::Open)]).unwrap();
        assert!(entry.contains_day(6));
        assert!(entry.contains_day(7));
        assert!(entry.contains_day(1));
        assert!(entry.contains_day(2));
        assert!(!entry.contains_day(3));
        assert!(!entry.contains_day(5));
    }

    #[test]
    fn test_status_open_and_closed() {
        let entries = vec![weekday_entry()];
        // 2024-09-04 is a Wednesday (day 4).
        assert_eq!(status_at(&entries, at(2024, 9, 4, 12, 0)), Status::Open);
        assert_eq!(status_at(&entries, at(2024, 9, 4, 6, 0)), Status::Closed);
        assert_eq!(status_at(&entries, at(2024, 9, 4, 21, 0)), Status::Closed);
    }

    #[test]
    fn test_closing_soon_within_threshold() {
        let entries = vec![weekday_entry()];
        // Open window ends 20:00; 19:10 is within 60 minutes of a closed row.
        assert_eq!(status_at(&entries, at(2024, 9, 4, 19, 10)), Status::ClosingSoon);
        // Exactly at the threshold counts.
        assert_eq!(status_at(&entries, at(2024, 9, 4, 19, 0)), Status::ClosingSoon);
        // Just before the threshold does not.
        assert_eq!(status_at(&entries, at(2024, 9, 4, 18, 59)), Status::Open);
    }

    #[test]
    fn test_all_day_open_never_closing_soon() {
        // Single all-day open row: no next row, so ClosingSoon never fires,
        // even at the end of the day.
        let entries =
            vec![ScheduleEntry::new(1, 7, vec![row(0, 1440, StoredStatus::Open)]).unwrap()];
        assert_eq!(status_at(&entries, at(2024, 9, 4, 0, 0)), Status::Open);
        assert_eq!(status_at(&entries, at(2024, 9, 4, 23, 30)), Status::Open);
        assert_eq!(status_at(&entries, at(2024, 9, 4, 23, 59)), Status::Open);
    }

    #[test]
    fn test_no_matching_day_is_closed() {
        let entries = vec![weekday_entry()];
        // 2024-09-01 is a Sunday (day 1), outside 2..=6.
        assert_eq!(status_at(&entries, at(2024, 9, 1, 12, 0)), Status::Closed);
    }

    #[test]
    fn test_nearest_section_matching_row() {
        let entries = vec![weekday_entry()];
        let (row_index, entry_index) = nearest_section(&entries, at(2024, 9, 4, 12, 0));
        assert_eq!(entry_index, 0);
        assert_eq!(row_index, Some(1));
    }

    #[test]
    fn test_nearest_section_advances_after_hours() {
        // Sunday-only entry plus weekday entry; Sunday evening with no row
        // match would advance. Build an entry set where Sunday matches no
        // entry to exercise the upcoming-entry fallback instead.
        let weekend = ScheduleEntry::new(1, 1, vec![row(0, 1440, StoredStatus::Open)]).unwrap();
        let entries = vec![weekend.clone(), weekday_entry()];

        // Wednesday matches the weekday entry normally.
        let (_, entry_index) = nearest_section(&entries, at(2024, 9, 4, 12, 0));
        assert_eq!(entry_index, 1);

        // Saturday (day 7) matches nothing: weekday entry is 2..=6, weekend
        // entry is Sunday only. The soonest upcoming start is Sunday.
        let (row_index, entry_index) = nearest_section(&entries, at(2024, 9, 7, 12, 0));
        assert_eq!(row_index, None);
        assert_eq!(entry_index, 0);
    }

    #[test]
    fn test_nearest_section_hour_threshold() {
        // A truncated entry (rows not covering the evening) exercises the
        // after-hours advance: row lookup fails, and past 18:00 the lookup
        // moves on to the next entry.
        let truncated = ScheduleEntry {
            start_day: 2,
            end_day: 6,
            rows: vec![row(420, 1020, StoredStatus::Open)],
        };
        let weekend = ScheduleEntry::new(7, 1, vec![row(0, 1440, StoredStatus::Open)]).unwrap();
        let entries = vec![truncated, weekend];

        // Wednesday 19:00: no row, hour >= 18 -> next entry.
        assert_eq!(nearest_section(&entries, at(2024, 9, 4, 19, 0)), (None, 1));
        // Wednesday 06:00: no row, before 18 -> stay on today's entry.
        assert_eq!(nearest_section(&entries, at(2024, 9, 4, 6, 0)), (None, 0));
    }

    #[test]
    fn test_nearest_section_empty() {
        assert_eq!(nearest_section(&[], at(2024, 9, 4, 12, 0)), (None, 0));
    }
}
