//! Fetch error types.
//!
//! Internal errors are richer than the three-way taxonomy the caller sees;
//! [`FetchError::kind`] collapses each variant into the
//! [`QueryErrorKind`] that drives retry/refresh policy.

use catcard_core::QueryErrorKind;
use thiserror::Error;

// ============================================================================
// Fetch Error
// ============================================================================

/// Error type for one balance query attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The attempt exceeded its wall-clock budget.
    #[error("Attempt timed out after {0} seconds")]
    Timeout(u64),

    /// Unexpected HTTP status from the portal.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// The portal answered 401.
    #[error("Portal rejected the session")]
    Unauthorized,

    /// No stored credentials, or an incomplete set.
    #[error("No stored credentials")]
    MissingCredentials,

    /// The portal's invalid-login marker appeared in the response.
    #[error("Invalid NetID or password")]
    InvalidCredentials,

    /// A required hidden form field was absent.
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// A required balance-table row was absent.
    #[error("Missing balance row: {0}")]
    MissingTableRow(&'static str),

    /// A scraped value failed numeric parsing.
    #[error("Malformed value for {field}: {value:?}")]
    MalformedValue {
        /// Which balance field was being parsed.
        field: &'static str,
        /// The raw cell text.
        value: String,
    },

    /// The hand-off loop exceeded its hop limit.
    #[error("Hand-off loop exceeded {0} hops")]
    TooManyHops(u8),

    /// Keychain error.
    #[error("Keychain error: {0}")]
    Keychain(#[from] KeychainError),
}

impl FetchError {
    /// Collapses this error into the caller-visible taxonomy.
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            Self::Http(_) | Self::Timeout(_) | Self::Status(_) => QueryErrorKind::Connection,
            Self::Unauthorized
            | Self::MissingCredentials
            | Self::InvalidCredentials
            | Self::Keychain(_) => QueryErrorKind::Authentication,
            Self::MissingField(_)
            | Self::MissingTableRow(_)
            | Self::MalformedValue { .. }
            | Self::TooManyHops(_) => QueryErrorKind::Parse,
        }
    }
}

// ============================================================================
// Keychain Error
// ============================================================================

/// Error type for keychain operations.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Credential not found.
    #[error("Credential not found for {service}/{account}")]
    NotFound {
        /// Service name.
        service: String,
        /// Account name.
        account: String,
    },

    /// Access denied.
    #[error("Access denied to keychain")]
    AccessDenied,

    /// Platform error.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Generic error.
    #[error("Keychain error: {0}")]
    Other(String),
}

impl From<keyring::Error> for KeychainError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoEntry => KeychainError::NotFound {
                service: String::new(),
                account: String::new(),
            },
            keyring::Error::Ambiguous(_) => {
                KeychainError::Other("Ambiguous credential entry".to_string())
            }
            keyring::Error::PlatformFailure(e) => KeychainError::Platform(e.to_string()),
            keyring::Error::NoStorageAccess(_) => KeychainError::AccessDenied,
            _ => KeychainError::Other(err.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(FetchError::Timeout(30).kind(), QueryErrorKind::Connection);
        assert_eq!(FetchError::Status(503).kind(), QueryErrorKind::Connection);
        assert_eq!(
            FetchError::MissingCredentials.kind(),
            QueryErrorKind::Authentication
        );
        assert_eq!(
            FetchError::InvalidCredentials.kind(),
            QueryErrorKind::Authentication
        );
        assert_eq!(FetchError::Unauthorized.kind(), QueryErrorKind::Authentication);
        assert_eq!(
            FetchError::MissingField("encoded").kind(),
            QueryErrorKind::Parse
        );
        assert_eq!(FetchError::TooManyHops(5).kind(), QueryErrorKind::Parse);
        assert_eq!(
            FetchError::MalformedValue {
                field: "board",
                value: "n/a".to_string()
            }
            .kind(),
            QueryErrorKind::Parse
        );
    }
}
