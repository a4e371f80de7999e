//! Balance snapshot types.
//!
//! A [`BalanceSnapshot`] is built exactly once per query attempt, success
//! or failure, and never mutated afterwards. The caller keeps the last
//! snapshot around; a failed attempt copies the previous snapshot's display
//! fields so the UI never has to render a null balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cents::Cents;
use super::outcome::{QueryErrorKind, QueryOutcome};

/// Plan-name markers that indicate an unlimited board plan.
///
/// Matched by case-insensitive substring containment; the marker wording
/// changed between portal generations.
const UNLIMITED_PLAN_MARKERS: &[&str] = &["unlimited", "open access"];

/// Placeholder shown for text fields when a query fails with no prior
/// successful snapshot to carry forward.
const PLACEHOLDER_TEXT: &str = "--";

// ============================================================================
// Board Meals
// ============================================================================

/// Remaining board meals for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardMeals {
    /// A counted plan with this many meals left.
    Count(u32),
    /// An unlimited plan; the portal reports no count.
    Unlimited,
}

impl BoardMeals {
    /// The remaining count, if the plan is counted.
    pub fn count(self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unlimited => None,
        }
    }

    /// Whether a count-based label for this value takes the plural form.
    /// Unlimited plans always read as plural.
    pub fn needs_plural_label(self) -> bool {
        match self {
            Self::Count(n) => needs_plural_label(n),
            Self::Unlimited => true,
        }
    }
}

impl Default for BoardMeals {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Whether a count-based label takes the plural form.
///
/// Pure function of the count; the label text itself is a localization
/// concern of the consumer.
pub fn needs_plural_label(count: u32) -> bool {
    count != 1
}

// ============================================================================
// Balance Fields
// ============================================================================

/// The full set of fields scraped from a balance page.
///
/// All fields here are required for a successful outcome; `bonus` and
/// `updated_at` are optional because older portal generations omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceFields {
    /// Cardholder name as printed on the balance page.
    pub name: String,
    /// Meal plan name.
    pub plan_name: String,
    /// Remaining board meals.
    pub board_meals: BoardMeals,
    /// Remaining equivalency/exchange meals (schema varies by generation).
    pub secondary_meals: u32,
    /// Dining dollars / points balance.
    pub points: Cents,
    /// Cat Cash balance.
    pub cat_cash: Cents,
    /// Bonus cash balance, when the plan has one.
    pub bonus: Option<Cents>,
    /// Server-reported time the balances were last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Balance Snapshot
// ============================================================================

/// The immutable result of one balance query attempt.
///
/// Exactly one of two shapes: a success with every display field freshly
/// scraped, or a failure whose display fields are carried forward from the
/// previous snapshot (placeholders when there is none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// When this attempt finished.
    pub retrieved_at: DateTime<Utc>,
    /// Cardholder name.
    pub name: String,
    /// Meal plan name.
    pub plan_name: String,
    /// Remaining board meals.
    pub board_meals: BoardMeals,
    /// Remaining equivalency/exchange meals.
    pub secondary_meals: u32,
    /// Dining dollars / points balance.
    pub points: Cents,
    /// Cat Cash balance.
    pub cat_cash: Cents,
    /// Bonus cash balance, when present.
    pub bonus: Option<Cents>,
    /// Server-reported update time. A failure never claims a new one.
    pub updated_at: Option<DateTime<Utc>>,
    /// How the attempt ended.
    pub outcome: QueryOutcome,
}

impl BalanceSnapshot {
    /// Builds a successful snapshot from freshly scraped fields.
    pub fn from_success(fields: BalanceFields) -> Self {
        Self::from_success_at(fields, Utc::now())
    }

    /// Builds a successful snapshot with an explicit retrieval time.
    pub fn from_success_at(fields: BalanceFields, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            retrieved_at,
            name: fields.name,
            plan_name: fields.plan_name,
            board_meals: fields.board_meals,
            secondary_meals: fields.secondary_meals,
            points: fields.points,
            cat_cash: fields.cat_cash,
            bonus: fields.bonus,
            updated_at: fields.updated_at,
            outcome: QueryOutcome::Success,
        }
    }

    /// Builds a failure snapshot, carrying display fields forward.
    ///
    /// `updated_at` is copied unchanged from `previous`: a failed attempt
    /// does not claim a new server-confirmed update time.
    pub fn from_failure(previous: Option<&BalanceSnapshot>, kind: QueryErrorKind) -> Self {
        Self::from_failure_at(previous, kind, Utc::now())
    }

    /// Builds a failure snapshot with an explicit retrieval time.
    pub fn from_failure_at(
        previous: Option<&BalanceSnapshot>,
        kind: QueryErrorKind,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        match previous {
            Some(prev) => Self {
                retrieved_at,
                name: prev.name.clone(),
                plan_name: prev.plan_name.clone(),
                board_meals: prev.board_meals,
                secondary_meals: prev.secondary_meals,
                points: prev.points,
                cat_cash: prev.cat_cash,
                bonus: prev.bonus,
                updated_at: prev.updated_at,
                outcome: QueryOutcome::Failure(kind),
            },
            None => Self {
                retrieved_at,
                name: PLACEHOLDER_TEXT.to_string(),
                plan_name: PLACEHOLDER_TEXT.to_string(),
                board_meals: BoardMeals::default(),
                secondary_meals: 0,
                points: Cents::ZERO,
                cat_cash: Cents::ZERO,
                bonus: None,
                updated_at: None,
                outcome: QueryOutcome::Failure(kind),
            },
        }
    }

    /// True when the plan name carries an unlimited-plan marker.
    ///
    /// Substring containment, case-insensitive; the marker wording varies
    /// by deployment generation.
    pub fn is_unlimited_plan(&self) -> bool {
        let plan = self.plan_name.to_lowercase();
        UNLIMITED_PLAN_MARKERS
            .iter()
            .any(|marker| plan.contains(marker))
    }

    /// Cat Cash plus bonus cash.
    pub fn total_cash(&self) -> Cents {
        self.cat_cash + self.bonus.unwrap_or(Cents::ZERO)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_fields() -> BalanceFields {
        BalanceFields {
            name: "Rufus Catamount".to_string(),
            plan_name: "Retro Unlimited".to_string(),
            board_meals: BoardMeals::Unlimited,
            secondary_meals: 3,
            points: Cents(1500),
            cat_cash: Cents(195),
            bonus: Some(Cents(250)),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_success_populates_all_fields() {
        let snapshot = BalanceSnapshot::from_success(sample_fields());
        assert_eq!(snapshot.outcome, QueryOutcome::Success);
        assert_eq!(snapshot.name, "Rufus Catamount");
        assert_eq!(snapshot.board_meals, BoardMeals::Unlimited);
        assert_eq!(snapshot.cat_cash, Cents(195));
        assert!(snapshot.updated_at.is_some());
    }

    #[test]
    fn test_failure_carries_previous_display_fields() {
        let prev = BalanceSnapshot::from_success(sample_fields());
        let failed = BalanceSnapshot::from_failure(Some(&prev), QueryErrorKind::Connection);

        assert_eq!(failed.outcome, QueryOutcome::Failure(QueryErrorKind::Connection));
        assert_eq!(failed.name, prev.name);
        assert_eq!(failed.cat_cash, prev.cat_cash);
        // The failed attempt does not claim a new server update time.
        assert_eq!(failed.updated_at, prev.updated_at);
        assert!(failed.retrieved_at >= prev.retrieved_at);
    }

    #[test]
    fn test_failure_without_previous_uses_placeholders() {
        let failed = BalanceSnapshot::from_failure(None, QueryErrorKind::Authentication);
        assert_eq!(failed.name, "--");
        assert_eq!(failed.plan_name, "--");
        assert_eq!(failed.cat_cash, Cents::ZERO);
        assert_eq!(failed.board_meals, BoardMeals::Count(0));
        assert_eq!(failed.updated_at, None);
    }

    #[test]
    fn test_unlimited_plan_markers() {
        let mut snapshot = BalanceSnapshot::from_success(sample_fields());
        assert!(snapshot.is_unlimited_plan());

        snapshot.plan_name = "OPEN ACCESS PLUS".to_string();
        assert!(snapshot.is_unlimited_plan());

        snapshot.plan_name = "Block 160".to_string();
        assert!(!snapshot.is_unlimited_plan());
    }

    #[test]
    fn test_total_cash() {
        let snapshot = BalanceSnapshot::from_success(sample_fields());
        assert_eq!(snapshot.total_cash(), Cents(445));

        let mut no_bonus = sample_fields();
        no_bonus.bonus = None;
        let snapshot = BalanceSnapshot::from_success(no_bonus);
        assert_eq!(snapshot.total_cash(), Cents(195));
    }

    #[test]
    fn test_pluralization() {
        assert!(needs_plural_label(0));
        assert!(!needs_plural_label(1));
        assert!(needs_plural_label(2));
        assert!(BoardMeals::Unlimited.needs_plural_label());
        assert!(!BoardMeals::Count(1).needs_plural_label());
    }
}
