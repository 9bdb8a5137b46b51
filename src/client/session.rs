//! Access token lifecycle.
//!
//! The remote system issues a bearer-style token on login, valid for a fixed
//! 10-minute window. The [`Session`] tracks the token and its validity;
//! protected calls check it before touching the transport and fail with
//! `AuthenticationRequired` once it has elapsed. Re-authentication replaces
//! the session wholesale; credentials are never cached for silent refresh.

// ============================================================================
// Imports
// ============================================================================

use std::time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Validity window of an access token, fixed by the remote system.
pub const SESSION_TTL: Duration = Duration::from_secs(600);

// ============================================================================
// Session
// ============================================================================

/// An authenticated session: the access token and its validity window.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    issued_at: Instant,
    ttl: Duration,
}

impl Session {
    /// Creates a session for a freshly issued token.
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_ttl(token, SESSION_TTL)
    }

    /// Creates a session with a custom validity window.
    #[must_use]
    pub(crate) fn with_ttl(token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: token.into(),
            issued_at: Instant::now(),
            ttl,
        }
    }

    /// Returns the opaque access token.
    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `true` iff the validity window has not elapsed.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issued_at.elapsed() < self.ttl
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_valid() {
        let session = Session::new("token");
        assert!(session.is_valid());
        assert_eq!(session.token(), "token");
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let session = Session::with_ttl("token", Duration::ZERO);
        assert!(!session.is_valid());
    }

    #[test]
    fn test_default_ttl_is_ten_minutes() {
        assert_eq!(SESSION_TTL, Duration::from_secs(600));
    }
}
