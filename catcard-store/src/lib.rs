// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CatCard` Store
//!
//! Persistence for the last known balance snapshot.
//!
//! The cache format is a versioned, tagged record ([`cache::CachedBalance`])
//! with forward-compatible field defaults, deliberately decoupled from the
//! in-memory snapshot type so the persisted schema can evolve without
//! breaking old caches. Only successful snapshots are persisted; the
//! carried-forward display state of a failed attempt is an in-memory
//! concern.

pub mod cache;
pub mod error;
pub mod persistence;

pub use cache::{BalanceCache, CachedBalance, CACHE_VERSION};
pub use error::StoreError;
pub use persistence::{default_cache_dir, default_cache_path, load_json, save_json};
