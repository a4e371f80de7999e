//! The load-once schedule book.
//!
//! Static source data (bundled JSON) is parsed and validated a single time
//! at startup; every invariant violation is a load error, not a runtime
//! surprise. After loading the book is read-only.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::entry::{nearest_section, status_at, ScheduleEntry, Status};
use crate::error::ScheduleError;
use crate::location::{Location, LocationClass};
use crate::search::location_matches;

/// One location's record in the JSON source.
#[derive(Debug, Deserialize)]
struct LocationSource {
    #[serde(flatten)]
    location: Location,
    entries: Vec<ScheduleEntry>,
}

/// Top-level JSON source document.
#[derive(Debug, Deserialize)]
struct BookSource {
    locations: Vec<LocationSource>,
}

/// All locations and their weekly hours, keyed by location id.
#[derive(Debug, Default)]
pub struct ScheduleBook {
    locations: Vec<Location>,
    entries: HashMap<String, Vec<ScheduleEntry>>,
}

impl ScheduleBook {
    /// Parses and validates a JSON schedule source.
    pub fn from_json(source: &str) -> Result<Self, ScheduleError> {
        let source: BookSource = serde_json::from_str(source)?;

        let mut locations = Vec::with_capacity(source.locations.len());
        let mut entries = HashMap::new();
        for record in source.locations {
            for entry in &record.entries {
                entry.validate()?;
            }
            if entries.contains_key(&record.location.id) {
                return Err(ScheduleError::DuplicateLocation(record.location.id.clone()));
            }
            entries.insert(record.location.id.clone(), record.entries);
            locations.push(record.location);
        }

        debug!(locations = locations.len(), "Loaded schedule book");
        Ok(Self { locations, entries })
    }

    /// All locations, in source order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Looks up a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Schedule entries for a location id.
    pub fn entries(&self, id: &str) -> &[ScheduleEntry] {
        self.entries.get(id).map_or(&[], Vec::as_slice)
    }

    /// Derived status for one location at a wall-clock time.
    ///
    /// Unknown ids report `Closed`.
    pub fn status_of(&self, id: &str, at: NaiveDateTime) -> Status {
        status_at(self.entries(id), at)
    }

    /// Statuses for every location of a class, ordered for display:
    /// open-like statuses first, then closing-soon, then closed, with
    /// alphabetical name as the tie-break.
    pub fn statuses_for_all(
        &self,
        class: LocationClass,
        at: NaiveDateTime,
    ) -> Vec<(&Location, Status)> {
        let mut statuses: Vec<(&Location, Status)> = self
            .locations
            .iter()
            .filter(|location| location.class == class)
            .map(|location| (location, self.status_of(&location.id, at)))
            .collect();
        statuses.sort_by(|(a, sa), (b, sb)| sa.rank().cmp(&sb.rank()).then(a.name.cmp(&b.name)));
        statuses
    }

    /// Today's section for a location's detail view.
    pub fn nearest_section_of(&self, id: &str, at: NaiveDateTime) -> (Option<usize>, usize) {
        nearest_section(self.entries(id), at)
    }

    /// Locations matching a token-prefix search query, in source order.
    pub fn search(&self, query: &str) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|location| location_matches(location, query))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
