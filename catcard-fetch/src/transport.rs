//! HTTP transport for the portal.
//!
//! [`PortalTransport`] is the seam between the session state machine and
//! the network: one GET/POST pair with form encoding and cookie-jar
//! semantics. [`PortalConnector`] hands out a fresh transport per attempt
//! so session cookies never leak across attempts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::FetchError;

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Transport trait
// ============================================================================

/// One attempt's view of the network: cookie-carrying GET and form POST.
#[async_trait]
pub trait PortalTransport: Send + Sync {
    /// Performs a GET and returns the response body.
    async fn get(&self, url: &str) -> Result<String, FetchError>;

    /// Performs a form-encoded POST and returns the response body.
    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// Creates a fresh transport for each query attempt.
pub trait PortalConnector: Send + Sync {
    /// The transport type handed out per attempt.
    type Transport: PortalTransport;

    /// Builds a transport with an empty cookie jar.
    fn connect(&self) -> Result<Self::Transport, FetchError>;
}

// ============================================================================
// reqwest implementation
// ============================================================================

/// reqwest-backed transport with an attempt-scoped cookie jar.
#[derive(Debug)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh cookie jar.
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("catcard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner })
    }

    fn check_status(status: StatusCode) -> Result<(), FetchError> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl PortalTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "GET");
        let response = self.inner.get(url).send().await?;
        Self::check_status(response.status())?;
        Ok(response.text().await?)
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, FetchError> {
        debug!(url = %url, fields = fields.len(), "POST form");
        let response = self.inner.post(url).form(fields).send().await?;
        Self::check_status(response.status())?;
        Ok(response.text().await?)
    }
}

/// Connector producing [`HttpTransport`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl PortalConnector for HttpConnector {
    type Transport = HttpTransport;

    fn connect(&self) -> Result<HttpTransport, FetchError> {
        HttpTransport::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(HttpTransport::check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            HttpTransport::check_status(StatusCode::UNAUTHORIZED),
            Err(FetchError::Unauthorized)
        ));
        assert!(matches!(
            HttpTransport::check_status(StatusCode::BAD_GATEWAY),
            Err(FetchError::Status(502))
        ));
    }

    #[test]
    fn test_connector_builds() {
        assert!(HttpConnector.connect().is_ok());
    }
}
