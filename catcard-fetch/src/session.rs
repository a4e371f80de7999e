//! The session orchestrator.
//!
//! Drives one query attempt through its phases:
//!
//! ```text
//! Probe -> Login -> Handshake(n) -> Parse
//! ```
//!
//! Each attempt gets a fresh transport (and therefore a fresh cookie jar)
//! from the connector, so no session state survives past the attempt. The
//! orchestrator holds a single-flight lock: concurrent callers serialize
//! behind the running attempt rather than interleaving cookie state.
//!
//! [`BalanceSession::query`] never returns an error. Every failure path is
//! folded into a failure [`BalanceSnapshot`] carrying the previous
//! snapshot's display fields.

use std::time::Duration;

use catcard_core::{BalanceSnapshot, QueryErrorKind};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::credentials::{CredentialStore, Credentials};
use crate::error::FetchError;
use crate::portal::{
    find_token, has_invalid_login_marker, parse_balance_page, parse_probe_page, PortalConfig,
    ProbeFields, FIELD_TOKEN,
};
use crate::transport::{PortalConnector, PortalTransport};

/// Hand-off hop limit; the loop is forced to terminate here.
pub const MAX_HANDSHAKE_HOPS: u8 = 5;

/// Wall-clock budget for one whole attempt (probe through parse).
const ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Phases of one query attempt, each carrying what the next needs.
enum Phase {
    /// GET the SSO entry page and extract its hidden fields.
    Probe,
    /// POST credentials plus the probed fields to the login endpoint.
    Login(ProbeFields),
    /// Follow the hand-off token chain; `hop` counts completed hops.
    Handshake {
        /// Page to search for a token.
        html: String,
        /// Completed hop count.
        hop: u8,
    },
    /// Scrape the balance page.
    Parse(String),
}

/// The balance-query engine.
pub struct BalanceSession<N, C> {
    config: PortalConfig,
    connector: N,
    credentials: C,
    in_flight: Mutex<()>,
}

impl<N, C> BalanceSession<N, C>
where
    N: PortalConnector,
    C: CredentialStore,
{
    /// Creates a session over a connector and credential store.
    pub fn new(config: PortalConfig, connector: N, credentials: C) -> Self {
        Self {
            config,
            connector,
            credentials,
            in_flight: Mutex::new(()),
        }
    }

    /// The credential store this session reads from.
    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Runs one query attempt and always produces a snapshot.
    ///
    /// `previous` supplies the carried-forward display fields when the
    /// attempt fails. The attempt is capped by a wall-clock timeout; a cap
    /// hit reads as a connection failure.
    #[instrument(skip_all)]
    pub async fn query(&self, previous: Option<&BalanceSnapshot>) -> BalanceSnapshot {
        let _guard = self.in_flight.lock().await;

        let budget = Duration::from_secs(ATTEMPT_TIMEOUT_SECS);
        match tokio::time::timeout(budget, self.attempt()).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(error)) => {
                warn!(error = %error, kind = %error.kind(), "Query attempt failed");
                BalanceSnapshot::from_failure(previous, error.kind())
            }
            Err(_) => {
                warn!(budget_secs = ATTEMPT_TIMEOUT_SECS, "Query attempt timed out");
                BalanceSnapshot::from_failure(previous, QueryErrorKind::Connection)
            }
        }
    }

    /// One attempt, driven phase by phase. Cookie state lives in the
    /// transport created here and dies with it.
    async fn attempt(&self) -> Result<BalanceSnapshot, FetchError> {
        let credentials = self
            .credentials
            .get()
            .filter(Credentials::is_complete)
            .ok_or(FetchError::MissingCredentials)?;

        let transport = self.connector.connect()?;
        let mut phase = Phase::Probe;

        loop {
            phase = match phase {
                Phase::Probe => {
                    let url = self.config.timestamped_probe_url(chrono::Utc::now());
                    debug!("Probing SSO entry page");
                    let html = transport.get(&url).await?;
                    Phase::Login(parse_probe_page(&html)?)
                }

                Phase::Login(fields) => {
                    debug!("Posting credentials to SSO");
                    let form = fields.login_form(&credentials.net_id, &credentials.password);
                    let html = transport.post_form(&self.config.login_url, &form).await?;
                    Phase::Handshake { html, hop: 0 }
                }

                Phase::Handshake { html, hop } => {
                    if has_invalid_login_marker(&html) {
                        return Err(FetchError::InvalidCredentials);
                    }
                    match find_token(&html) {
                        None if hop == 0 => return Err(FetchError::MissingField(FIELD_TOKEN)),
                        // A hop response without a token is the balance page.
                        None => Phase::Parse(html),
                        Some(token) => {
                            debug!(hop, "Posting hand-off token");
                            let response = transport
                                .post_form(&self.config.balance_url, &[(FIELD_TOKEN, &token)])
                                .await?;
                            let next_hop = hop + 1;
                            if find_token(&response).is_some() {
                                if next_hop >= MAX_HANDSHAKE_HOPS {
                                    return Err(FetchError::TooManyHops(next_hop));
                                }
                                Phase::Handshake {
                                    html: response,
                                    hop: next_hop,
                                }
                            } else {
                                Phase::Parse(response)
                            }
                        }
                    }
                }

                Phase::Parse(html) => {
                    debug!("Scraping balance page");
                    let fields = parse_balance_page(&html)?;
                    return Ok(BalanceSnapshot::from_success(fields));
                }
            };
        }
    }
}
