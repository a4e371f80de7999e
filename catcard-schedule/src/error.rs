//! Schedule error types.

use thiserror::Error;

/// Error type for schedule table construction and loading.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Day-of-week value outside 1..=7.
    #[error("Invalid day of week: {0} (expected 1=Sunday..7=Saturday)")]
    InvalidDay(u8),

    /// An entry has no rows.
    #[error("Entry for days {start_day}..={end_day} has no rows")]
    EmptyEntry {
        /// First day of the entry's span.
        start_day: u8,
        /// Last day of the entry's span.
        end_day: u8,
    },

    /// Rows do not start at minute 0, end at 1440, or leave a gap/overlap.
    #[error("Rows are not contiguous at minute {minute} (expected {expected})")]
    NonContiguousRows {
        /// The offending row boundary.
        minute: u16,
        /// The boundary the invariant requires.
        expected: u16,
    },

    /// A row's end does not come after its start.
    #[error("Row range is empty or inverted: {start}..{end}")]
    InvertedRow {
        /// Row start minute.
        start: u16,
        /// Row end minute.
        end: u16,
    },

    /// A location id appears twice in the source data.
    #[error("Duplicate location id: {0}")]
    DuplicateLocation(String),

    /// Schedule source JSON failed to parse.
    #[error("Schedule source error: {0}")]
    Source(#[from] serde_json::Error),
}
