// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CatCard` Schedule
//!
//! Weekly hours tables for campus dining and retail locations, with
//! authoritative open/closed status derivation.
//!
//! The schedule data is static: it is loaded and validated once at startup
//! (see [`ScheduleBook::from_json`]) and read-only afterwards. Each
//! location carries one or more [`ScheduleEntry`] values, each covering a
//! contiguous (possibly wrapping) day-of-week range with a gap-free
//! sequence of minute-of-day rows spanning the whole day.
//!
//! Status lookup ([`status_at`]) derives [`Status::ClosingSoon`] rather
//! than storing it: an open row reads as closing-soon when it ends within
//! 60 minutes and the next row of the same entry is closed.

pub mod book;
pub mod entry;
pub mod error;
pub mod location;
pub mod search;

pub use book::ScheduleBook;
pub use entry::{
    nearest_section, status_at, ScheduleEntry, ScheduleRow, Status, StoredStatus,
};
pub use error::ScheduleError;
pub use location::{Location, LocationClass};
pub use search::{location_matches, normalize_tokens};
