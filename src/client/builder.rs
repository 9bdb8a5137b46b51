//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`ElmoClient`]
//! instances.
//!
//! # Example
//!
//! ```no_run
//! use econnect::ElmoClient;
//!
//! # fn example() -> econnect::Result<()> {
//! let client = ElmoClient::builder()
//!     .base_url("https://metronet.iessonline.com")
//!     .domain("vendor")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::api::Router;
use crate::error::Result;

use super::core::ElmoClient;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring an [`ElmoClient`] instance.
///
/// Use [`ElmoClient::builder()`] to create a new builder. Every option has a
/// working default: the base URL falls back to the Elmo e-Connect cloud
/// service, the domain is omitted, and the request timeout is 30 seconds.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Base URL of the vendor installation.
    base_url: Option<String>,
    /// Optional vendor domain for multi-tenant installations.
    domain: Option<String>,
    /// Per-request timeout for the HTTP transport.
    request_timeout: Option<Duration>,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new client builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the remote installation.
    ///
    /// Known vendors: [`ELMO_E_CONNECT`] (the default) and [`IESS_METRONET`].
    ///
    /// [`ELMO_E_CONNECT`]: crate::api::ELMO_E_CONNECT
    /// [`IESS_METRONET`]: crate::api::IESS_METRONET
    #[inline]
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the vendor domain sent with the login request.
    ///
    /// Multi-tenant installations use the domain to route the account; most
    /// e-Connect systems do not need it.
    #[inline]
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the per-request timeout enforced by the HTTP transport.
    #[inline]
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the client with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the base URL does not parse
    /// - [`Error::Config`] if the base URL is not HTTPS
    /// - [`Error::Transport`] if the HTTP client cannot be constructed
    ///
    /// [`Error::InvalidUrl`]: crate::Error::InvalidUrl
    /// [`Error::Config`]: crate::Error::Config
    /// [`Error::Transport`]: crate::Error::Transport
    pub fn build(self) -> Result<ElmoClient> {
        let router = match self.base_url {
            Some(url) => Router::new(&url)?,
            None => Router::default_vendor(),
        };

        let timeout = self.request_timeout.unwrap_or(Duration::from_secs(30));
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ElmoClient::from_parts(http, router, self.domain))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ClientBuilder::new();
        assert!(builder.base_url.is_none());
        assert!(builder.domain.is_none());
        assert!(builder.request_timeout.is_none());
    }

    #[test]
    fn test_build_defaults_to_elmo() {
        let client = ClientBuilder::new().build().expect("default config");
        assert_eq!(
            client.base_url().as_str(),
            "https://connect.elmospa.com/"
        );
    }

    #[test]
    fn test_base_url_is_applied() {
        let client = ClientBuilder::new()
            .base_url("https://metronet.iessonline.com")
            .build()
            .expect("valid config");
        assert_eq!(
            client.base_url().as_str(),
            "https://metronet.iessonline.com/"
        );
    }

    #[test]
    fn test_build_rejects_plain_http() {
        let result = ClientBuilder::new().base_url("http://example.com").build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_rejects_garbage_url() {
        let result = ClientBuilder::new().base_url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = ClientBuilder::new().domain("vendor");
        let cloned = builder.clone();
        assert_eq!(builder.domain, cloned.domain);
    }
}
