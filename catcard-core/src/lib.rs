// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CatCard` Core
//!
//! Core types and models for the `CatCard` balance engine.
//!
//! This crate provides the foundational types used across all other
//! `CatCard` crates:
//!
//! - [`Cents`] - exact minor-unit currency representation
//! - [`BalanceSnapshot`] - the typed result of one balance query attempt
//! - [`QueryOutcome`] / [`QueryErrorKind`] - success/failure taxonomy
//! - [`BoardMeals`] - board meal count with an unlimited-plan flag
//!
//! A snapshot is constructed exactly once per query attempt and is
//! immutable thereafter. On failure, display fields are carried forward
//! from the previous successful snapshot so consumers always have
//! something to show.

pub mod cents;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export model types
pub use cents::Cents;
pub use models::{
    needs_plural_label, BalanceFields, BalanceSnapshot, BoardMeals, QueryErrorKind, QueryOutcome,
};
