// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `CatCard` Fetch
//!
//! The balance-query engine: a stateful, multi-hop web-scraping client for
//! the campus SSO and balance portal.
//!
//! ## Modules
//!
//! - [`extract`] - regex/markup field extraction tolerant of whitespace
//!   and case variance
//! - [`transport`] - the [`PortalTransport`] seam and its reqwest
//!   implementation with per-attempt cookie jars
//! - [`credentials`] - credential store abstraction (system keychain)
//! - [`portal`] - the wire contract: endpoint config, hidden-field names,
//!   balance-table labels, page parsers
//! - [`session`] - the probe → login → handshake → parse state machine
//! - [`refresh`] - the staleness gate deciding when to start an attempt
//!
//! One query attempt is a single sequential chain of requests sharing one
//! cookie jar; the jar is discarded when the attempt finishes, whatever
//! the outcome. The engine never propagates errors past
//! [`session::BalanceSession::query`]: every failure folds into a
//! [`catcard_core::BalanceSnapshot`] with the matching error kind.

pub mod credentials;
pub mod error;
pub mod extract;
pub mod portal;
pub mod refresh;
pub mod session;
pub mod transport;

// Errors
pub use error::{FetchError, KeychainError};

// Credential store
pub use credentials::{CredentialStore, Credentials, KeychainCredentials, MemoryCredentials};

// Portal contract & session
pub use portal::{PortalConfig, ProbeFields};
pub use refresh::{should_auto_refresh, should_refresh};
pub use session::BalanceSession;
pub use transport::{HttpConnector, HttpTransport, PortalConnector, PortalTransport};
