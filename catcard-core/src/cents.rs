//! Exact minor-unit currency representation.
//!
//! Balances come off the wire as decimal strings with exactly two fraction
//! digits ("1.95"). They are stored as integer cents so arithmetic and
//! round-trips never pick up floating-point drift.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A non-negative currency amount in cents.
///
/// Invariant: `Cents::parse(&c.to_string()) == Some(c)` for every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Cents = Cents(0);

    /// Parses a decimal string with exactly two fraction digits.
    ///
    /// Accepts `"<digits>.<two digits>"` and nothing else: no sign, no
    /// grouping separators, no missing or extra fraction digits.
    /// Returns `None` on malformed input.
    pub fn parse(s: &str) -> Option<Cents> {
        let (whole, fraction) = s.split_once('.')?;
        if whole.is_empty() || fraction.len() != 2 {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let whole: u64 = whole.parse().ok()?;
        let fraction: u64 = fraction.parse().ok()?;
        Some(Cents(whole.checked_mul(100)?.checked_add(fraction)?))
    }

    /// The whole-currency part (dollars).
    pub fn whole(self) -> u64 {
        self.0 / 100
    }

    /// The fractional part (0..=99).
    pub fn fraction(self) -> u64 {
        self.0 % 100
    }
}

impl fmt::Display for Cents {
    /// Renders as `"<whole>.<two-digit fraction>"`, zero-padded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.whole(), self.fraction())
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}
