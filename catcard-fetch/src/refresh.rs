//! The refresh-policy gate.
//!
//! Decides whether a new query attempt should start, balancing staleness
//! against server load and error back-off. Failed attempts retry sooner
//! than successful ones go stale.

use catcard_core::BalanceSnapshot;
use chrono::{DateTime, Duration, Utc};

use crate::credentials::CredentialStore;

/// How long a successful result stays fresh, measured from the
/// server-reported update time.
const SUCCESS_STALE_AFTER_MINUTES: i64 = 30;

/// How long to back off after a failed attempt, measured from when the
/// attempt finished.
const FAILURE_RETRY_AFTER_MINUTES: i64 = 5;

/// True when a new query attempt is warranted at `now`.
///
/// - No prior result: refresh.
/// - Prior failure: refresh once the back-off window has passed.
/// - Prior success: refresh once the server-reported update time is stale
///   (falling back to the retrieval time when the server reported none).
pub fn should_refresh(last: Option<&BalanceSnapshot>, now: DateTime<Utc>) -> bool {
    let Some(last) = last else {
        return true;
    };
    if last.outcome.is_success() {
        let reference = last.updated_at.unwrap_or(last.retrieved_at);
        now - reference > Duration::minutes(SUCCESS_STALE_AFTER_MINUTES)
    } else {
        now - last.retrieved_at > Duration::minutes(FAILURE_RETRY_AFTER_MINUTES)
    }
}

/// [`should_refresh`] additionally gated on stored credentials: without a
/// complete credential pair there is nothing to auto-refresh with.
pub fn should_auto_refresh(
    store: &dyn CredentialStore,
    last: Option<&BalanceSnapshot>,
    now: DateTime<Utc>,
) -> bool {
    store.can_query() && should_refresh(last, now)
}

// ============================================================================
// Tests
// ============================================================================
