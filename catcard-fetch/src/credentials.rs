//! Credential storage.
//!
//! The engine treats the credential store as an external collaborator:
//! reads happen once at the start of an attempt, writes come from the
//! login flow. The keychain implementation maps onto the platform secret
//! service; the in-memory implementation exists for tests.

use std::sync::Mutex;

use keyring::Entry;
use tracing::debug;

use crate::error::KeychainError;

/// Keychain service name for `CatCard` credentials.
const SERVICE: &str = "catcard";

/// Keychain account holding the NetID.
const ACCOUNT_NET_ID: &str = "net_id";

/// Keychain account holding the password.
const ACCOUNT_PASSWORD: &str = "password";

// ============================================================================
// Credentials
// ============================================================================

/// A NetID/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Campus NetID.
    pub net_id: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(net_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            net_id: net_id.into(),
            password: password.into(),
        }
    }

    /// True when both parts are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.net_id.is_empty() && !self.password.is_empty()
    }
}

// Never derive Debug output containing the password.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("net_id", &self.net_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Store trait
// ============================================================================

/// Secret store collaborator for the query engine.
pub trait CredentialStore: Send + Sync {
    /// Reads the stored credentials, if any.
    fn get(&self) -> Option<Credentials>;

    /// Stores a credential pair, replacing any previous one.
    fn set(&self, credentials: &Credentials) -> Result<(), KeychainError>;

    /// Removes stored credentials.
    fn clear(&self) -> Result<(), KeychainError>;

    /// True when a complete credential pair is stored.
    fn can_query(&self) -> bool {
        self.get().is_some_and(|c| c.is_complete())
    }
}

// ============================================================================
// Keychain store
// ============================================================================

/// Credential store backed by the system keychain.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeychainCredentials;

impl KeychainCredentials {
    fn entry(account: &str) -> Result<Entry, KeychainError> {
        Entry::new(SERVICE, account).map_err(KeychainError::from)
    }

    fn read(account: &str) -> Option<String> {
        match Self::entry(account).and_then(|e| e.get_password().map_err(KeychainError::from)) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

impl CredentialStore for KeychainCredentials {
    fn get(&self) -> Option<Credentials> {
        let net_id = Self::read(ACCOUNT_NET_ID)?;
        let password = Self::read(ACCOUNT_PASSWORD)?;
        Some(Credentials { net_id, password })
    }

    fn set(&self, credentials: &Credentials) -> Result<(), KeychainError> {
        Self::entry(ACCOUNT_NET_ID)?
            .set_password(&credentials.net_id)
            .map_err(KeychainError::from)?;
        Self::entry(ACCOUNT_PASSWORD)?
            .set_password(&credentials.password)
            .map_err(KeychainError::from)?;
        debug!(net_id = %credentials.net_id, "Stored credentials in keychain");
        Ok(())
    }

    fn clear(&self) -> Result<(), KeychainError> {
        for account in [ACCOUNT_NET_ID, ACCOUNT_PASSWORD] {
            match Self::entry(account)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(KeychainError::from(e)),
            }
        }
        debug!("Cleared stored credentials");
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    inner: Mutex<Option<Credentials>>,
}

impl MemoryCredentials {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with credentials.
    pub fn with(net_id: &str, password: &str) -> Self {
        Self {
            inner: Mutex::new(Some(Credentials::new(net_id, password))),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self) -> Option<Credentials> {
        self.inner.lock().ok()?.clone()
    }

    fn set(&self, credentials: &Credentials) -> Result<(), KeychainError> {
        *self
            .inner
            .lock()
            .map_err(|_| KeychainError::Other("poisoned lock".to_string()))? =
            Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), KeychainError> {
        *self
            .inner
            .lock()
            .map_err(|_| KeychainError::Other("poisoned lock".to_string()))? = None;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(Credentials::new("rcatamount", "hunter2").is_complete());
        assert!(!Credentials::new("", "hunter2").is_complete());
        assert!(!Credentials::new("rcatamount", "").is_complete());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCredentials::new();
        assert!(store.get().is_none());
        assert!(!store.can_query());

        store
            .set(&Credentials::new("rcatamount", "hunter2"))
            .unwrap();
        assert!(store.can_query());
        assert_eq!(store.get().unwrap().net_id, "rcatamount");

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("rcatamount", "hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("rcatamount"));
    }
}
