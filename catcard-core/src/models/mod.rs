//! Domain models for `CatCard`.
//!
//! ## Submodules
//!
//! - [`balance`] - Balance snapshot and its construction rules
//! - [`outcome`] - Query outcome and error-kind taxonomy

mod balance;
mod outcome;

// Re-export everything at the models level
pub use balance::{needs_plural_label, BalanceFields, BalanceSnapshot, BoardMeals};
pub use outcome::{QueryErrorKind, QueryOutcome};
