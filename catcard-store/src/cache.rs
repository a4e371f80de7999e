//! The versioned balance cache record.
//!
//! The on-disk schema is independent of the in-memory snapshot type.
//! Every field past the version tag carries a serde default, so a record
//! written by an older build (or a newer one that only added fields) still
//! loads.

use std::path::PathBuf;

use catcard_core::{BalanceFields, BalanceSnapshot, BoardMeals, Cents};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::persistence::{default_cache_path, load_json, save_json};

/// Current cache schema version.
pub const CACHE_VERSION: u32 = 1;

fn current_version() -> u32 {
    CACHE_VERSION
}

// ============================================================================
// Cached record
// ============================================================================

/// One persisted successful balance result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedBalance {
    /// Schema version tag.
    #[serde(default = "current_version")]
    pub version: u32,
    /// When the snapshot was retrieved.
    #[serde(default)]
    pub retrieved_at: Option<DateTime<Utc>>,
    /// Cardholder name.
    #[serde(default)]
    pub name: String,
    /// Plan name.
    #[serde(default)]
    pub plan_name: String,
    /// Board meals; `None` means unlimited.
    #[serde(default)]
    pub board_meals: Option<u32>,
    /// Whether the plan is unlimited.
    #[serde(default)]
    pub unlimited: bool,
    /// Equivalency/exchange meals.
    #[serde(default)]
    pub secondary_meals: u32,
    /// Points balance in cents.
    #[serde(default)]
    pub points_cents: u64,
    /// Cat Cash balance in cents.
    #[serde(default)]
    pub cat_cash_cents: u64,
    /// Bonus balance in cents, when the plan has one.
    #[serde(default)]
    pub bonus_cents: Option<u64>,
    /// Server-reported update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CachedBalance {
    /// Builds a cache record from a successful snapshot.
    ///
    /// Returns `None` for failure snapshots: only successes are persisted.
    pub fn from_snapshot(snapshot: &BalanceSnapshot) -> Option<Self> {
        if !snapshot.outcome.is_success() {
            return None;
        }
        Some(Self {
            version: CACHE_VERSION,
            retrieved_at: Some(snapshot.retrieved_at),
            name: snapshot.name.clone(),
            plan_name: snapshot.plan_name.clone(),
            board_meals: snapshot.board_meals.count(),
            unlimited: snapshot.board_meals == BoardMeals::Unlimited,
            secondary_meals: snapshot.secondary_meals,
            points_cents: snapshot.points.0,
            cat_cash_cents: snapshot.cat_cash.0,
            bonus_cents: snapshot.bonus.map(|c| c.0),
            updated_at: snapshot.updated_at,
        })
    }

    /// Rebuilds an in-memory snapshot from this record.
    pub fn to_snapshot(&self) -> BalanceSnapshot {
        let board_meals = if self.unlimited {
            BoardMeals::Unlimited
        } else {
            BoardMeals::Count(self.board_meals.unwrap_or(0))
        };
        BalanceSnapshot::from_success_at(
            BalanceFields {
                name: self.name.clone(),
                plan_name: self.plan_name.clone(),
                board_meals,
                secondary_meals: self.secondary_meals,
                points: Cents(self.points_cents),
                cat_cash: Cents(self.cat_cash_cents),
                bonus: self.bonus_cents.map(Cents),
                updated_at: self.updated_at,
            },
            self.retrieved_at.unwrap_or_else(Utc::now),
        )
    }
}

// ============================================================================
// Cache store
// ============================================================================

/// File-backed store for the last known balance.
#[derive(Debug, Clone)]
pub struct BalanceCache {
    path: PathBuf,
}

impl BalanceCache {
    /// Cache at the default platform path.
    pub fn new() -> Self {
        Self {
            path: default_cache_path(),
        }
    }

    /// Cache at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the cached snapshot, if one exists and is readable.
    ///
    /// A missing or corrupt cache reads as "no prior result" rather than
    /// an error; a cache from a newer schema is refused.
    pub async fn load(&self) -> Result<Option<BalanceSnapshot>, StoreError> {
        let record: CachedBalance = match load_json(&self.path).await {
            Ok(record) => record,
            Err(StoreError::Io(_)) => return Ok(None),
            Err(StoreError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt balance cache");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if record.version > CACHE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: record.version,
                supported: CACHE_VERSION,
            });
        }
        debug!(path = %self.path.display(), "Loaded balance cache");
        Ok(Some(record.to_snapshot()))
    }

    /// Persists a snapshot. Failure snapshots are ignored.
    pub async fn store(&self, snapshot: &BalanceSnapshot) -> Result<(), StoreError> {
        let Some(record) = CachedBalance::from_snapshot(snapshot) else {
            debug!("Not persisting failure snapshot");
            return Ok(());
        };
        save_json(&self.path, &record).await
    }

    /// Removes the cache file if present.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for BalanceCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
