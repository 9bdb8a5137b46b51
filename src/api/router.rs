//! Endpoint routing for the e-Connect API.
//!
//! The [`Router`] holds a validated base URL and derives the full URL for
//! every endpoint the client talks to. Vendor installations differ only by
//! base URL; the path layout is the same everywhere.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Vendor Defaults
// ============================================================================

/// Base URL of the Elmo e-Connect cloud service (primary supported vendor).
pub const ELMO_E_CONNECT: &str = "https://connect.elmospa.com";

/// Base URL of the IESS Metronet cloud service.
pub const IESS_METRONET: &str = "https://metronet.iessonline.com";

// ============================================================================
// Router
// ============================================================================

/// API router that derives endpoint URLs from a validated base URL.
///
/// The base URL must use HTTPS; plain HTTP is accepted only for loopback
/// hosts so that integration tests can run against a local stub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    base_url: Url,
}

impl Router {
    /// Creates a router for the given base URL.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the URL does not parse
    /// - [`Error::Config`] if the scheme is not HTTPS (non-loopback hosts)
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;

        match url.scheme() {
            "https" => {}
            "http" if is_loopback(&url) => {}
            _ => {
                return Err(Error::config(format!(
                    "the base URL must use HTTPS: {base_url}"
                )));
            }
        }

        Ok(Self { base_url: url })
    }

    /// Creates a router for the default vendor ([Elmo e-Connect]).
    ///
    /// [Elmo e-Connect]: ELMO_E_CONNECT
    #[inline]
    pub fn default_vendor() -> Self {
        // The constant is a valid HTTPS URL.
        Self {
            base_url: Url::parse(ELMO_E_CONNECT).unwrap_or_else(|_| unreachable!()),
        }
    }

    /// Returns the configured base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Login endpoint, returns the short-lived session token.
    #[inline]
    #[must_use]
    pub fn auth(&self) -> String {
        self.endpoint("/api/login")
    }

    /// Sector/input description strings.
    #[inline]
    #[must_use]
    pub fn descriptions(&self) -> String {
        self.endpoint("/api/strings")
    }

    /// Long-polling endpoint reporting status changes.
    #[inline]
    #[must_use]
    pub fn updates(&self) -> String {
        self.endpoint("/api/updates")
    }

    /// Panel lock acquisition (exclusive control).
    #[inline]
    #[must_use]
    pub fn lock(&self) -> String {
        self.endpoint("/api/panel/syncLogin")
    }

    /// Panel lock release.
    #[inline]
    #[must_use]
    pub fn unlock(&self) -> String {
        self.endpoint("/api/panel/syncLogout")
    }

    /// Arm/disarm/bypass command dispatch.
    #[inline]
    #[must_use]
    pub fn send_command(&self) -> String {
        self.endpoint("/api/panel/syncSendCommand")
    }

    /// Sector (area) status query.
    #[inline]
    #[must_use]
    pub fn sectors(&self) -> String {
        self.endpoint("/api/areas")
    }

    /// Input (sensor) status query.
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> String {
        self.endpoint("/api/inputs")
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base_url() {
        let router = Router::new("https://example.com").expect("valid url");

        assert_eq!(router.auth(), "https://example.com/api/login");
        assert_eq!(router.descriptions(), "https://example.com/api/strings");
        assert_eq!(router.updates(), "https://example.com/api/updates");
        assert_eq!(router.lock(), "https://example.com/api/panel/syncLogin");
        assert_eq!(router.unlock(), "https://example.com/api/panel/syncLogout");
        assert_eq!(
            router.send_command(),
            "https://example.com/api/panel/syncSendCommand"
        );
        assert_eq!(router.sectors(), "https://example.com/api/areas");
        assert_eq!(router.inputs(), "https://example.com/api/inputs");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let router = Router::new("https://example.com/").expect("valid url");
        assert_eq!(router.auth(), "https://example.com/api/login");
    }

    #[test]
    fn test_default_vendor_is_elmo() {
        let router = Router::default_vendor();
        assert_eq!(router.auth(), "https://connect.elmospa.com/api/login");
    }

    #[test]
    fn test_metronet_base_url_is_valid() {
        let router = Router::new(IESS_METRONET).expect("valid url");
        assert_eq!(
            router.auth(),
            "https://metronet.iessonline.com/api/login"
        );
    }

    #[test]
    fn test_http_is_rejected() {
        let result = Router::new("http://example.com");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_http_loopback_is_allowed() {
        assert!(Router::new("http://127.0.0.1:8080").is_ok());
        assert!(Router::new("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_garbage_url_is_rejected() {
        let result = Router::new("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
