//! Query outcome taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of failure a query attempt ended in.
///
/// Each kind carries a different caller-side policy: connection failures
/// are retried sooner, authentication failures need new credentials, and
/// parse failures mean the upstream markup changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryErrorKind {
    /// Transport failure, timeout, or an unexpected HTTP status.
    Connection,
    /// Missing credentials, the portal's invalid-login marker, or a 401.
    Authentication,
    /// A structural expectation was violated: missing field, missing table
    /// row, or too many hand-off hops.
    Parse,
}

impl QueryErrorKind {
    /// A short hint for the user, per error kind.
    ///
    /// The actual message text shown to users is a localization concern of
    /// the consumer; this is the contract for which hint to show.
    pub fn user_hint(self) -> &'static str {
        match self {
            Self::Connection => "check your network connection",
            Self::Authentication => "check your NetID and password",
            Self::Parse => "the portal page changed; try again later",
        }
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connection => "connection error",
            Self::Authentication => "authentication error",
            Self::Parse => "parse error",
        };
        write!(f, "{name}")
    }
}

/// The outcome of one balance query attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "kind")]
pub enum QueryOutcome {
    /// The attempt produced a full set of balance fields.
    Success,
    /// The attempt failed; display fields are carried forward.
    Failure(QueryErrorKind),
}

impl QueryOutcome {
    /// Returns true for a successful outcome.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the failure kind, if any.
    pub fn error_kind(self) -> Option<QueryErrorKind> {
        match self {
            Self::Success => None,
            Self::Failure(kind) => Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(QueryOutcome::Success.is_success());
        assert_eq!(QueryOutcome::Success.error_kind(), None);

        let failed = QueryOutcome::Failure(QueryErrorKind::Parse);
        assert!(!failed.is_success());
        assert_eq!(failed.error_kind(), Some(QueryErrorKind::Parse));
    }

    #[test]
    fn test_error_kind_serde_round_trip() {
        let json = serde_json::to_string(&QueryErrorKind::Authentication).unwrap();
        assert_eq!(json, "\"authentication\"");
        let back: QueryErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QueryErrorKind::Authentication);
    }
}
