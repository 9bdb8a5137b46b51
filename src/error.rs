//! Error types for the e-Connect client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use econnect::{ElmoClient, Result};
//!
//! async fn example(client: &ElmoClient) -> Result<()> {
//!     client.auth("username", "password").await?;
//!     let guard = client.lock("1234").await?;
//!     client.arm(&[]).await?;
//!     guard.release().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] |
//! | Authentication | [`Error::Authentication`], [`Error::AuthenticationRequired`] |
//! | Locking | [`Error::Lock`], [`Error::InvalidCode`], [`Error::LockRequired`] |
//! | Commands | [`Error::Command`] |
//! | Remote responses | [`Error::Parsing`], [`Error::Http`], [`Error::Json`] |
//! | Transport | [`Error::Transport`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging. No automatic retries
/// or recovery happens inside the crate: every failure surfaces to the caller
/// with the HTTP status or message needed to decide whether to retry manually.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Client configuration error.
    ///
    /// Returned when builder inputs are invalid (for example a base URL
    /// that is not served over HTTPS).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Base URL failed to parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ========================================================================
    // Authentication Errors
    // ========================================================================
    /// Authentication against the login endpoint failed.
    ///
    /// A 403 from the login endpoint means the username or password is
    /// not correct; any other non-2xx status is carried through as-is.
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status returned by the login endpoint.
        status: StatusCode,
        /// Detail reported by the remote system, if any.
        message: String,
    },

    /// A protected call was attempted without a usable session.
    ///
    /// The access token is either missing (no prior [`auth`]) or its
    /// 10-minute validity window has elapsed. Credentials are never cached,
    /// so the caller must re-authenticate explicitly.
    ///
    /// [`auth`]: crate::ElmoClient::auth
    #[error("Authentication required: {reason}")]
    AuthenticationRequired {
        /// Why the session is unusable.
        reason: &'static str,
    },

    // ========================================================================
    // Lock Errors
    // ========================================================================
    /// The remote system refused to assign the panel lock.
    ///
    /// A 403 from the lock endpoint usually means another client is holding
    /// the lock; the operation can be retried once the other client releases.
    #[error("Unable to obtain the panel lock ({status}): {message}")]
    Lock {
        /// HTTP status returned by the lock endpoint.
        status: StatusCode,
        /// Detail reported by the remote system, if any.
        message: String,
    },

    /// The lock is already held by this client instance.
    ///
    /// Acquiring is only valid from the unlocked state; release the current
    /// [`LockGuard`] first.
    ///
    /// [`LockGuard`]: crate::LockGuard
    #[error("The panel lock is already held by this client")]
    AlreadyLocked,

    /// The panel code used to acquire the lock is not correct.
    ///
    /// The remote system reports a wrong code as a 200 response with a
    /// failed command outcome, not as an HTTP error.
    #[error("Panel code is not correct")]
    InvalidCode,

    /// A protected command was attempted without holding the lock.
    ///
    /// Raised locally before any request is sent: arm, disarm, include and
    /// exclude all require a lock acquired via [`lock`].
    ///
    /// [`lock`]: crate::ElmoClient::lock
    #[error("A panel lock must be acquired via `lock()` before this command")]
    LockRequired,

    // ========================================================================
    // Command Errors
    // ========================================================================
    /// The remote system reported failure for one or more element indexes.
    ///
    /// Returned when a sector or input command targets elements that do not
    /// exist on the panel. Commands for valid elements are still applied
    /// remotely before this error is raised.
    #[error("Command failed for element indexes: {}", format_indexes(.failed_indexes))]
    Command {
        /// Indexes the remote system rejected.
        failed_indexes: Vec<u32>,
    },

    // ========================================================================
    // Response Errors
    // ========================================================================
    /// The remote response did not have the expected shape.
    #[error("Unexpected response shape: {message}")]
    Parsing {
        /// Description of the parsing failure.
        message: String,
    },

    /// Non-2xx HTTP status not otherwise classified.
    ///
    /// The e-Connect convention of using 403 for both missing locks and bad
    /// credentials is surfaced as-is for endpoints where the meaning is
    /// ambiguous, rather than being reinterpreted by this client.
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status of the response.
        status: StatusCode,
        /// URL the request was sent to.
        url: String,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Network-level failure reported by the HTTP transport.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

fn format_indexes(indexes: &[u32]) -> String {
    indexes
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an authentication error from a login response status.
    #[inline]
    pub fn authentication(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Authentication {
            status,
            message: message.into(),
        }
    }

    /// Creates an authentication-required error.
    #[inline]
    pub fn authentication_required(reason: &'static str) -> Self {
        Self::AuthenticationRequired { reason }
    }

    /// Creates a lock acquisition error.
    #[inline]
    pub fn lock(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Lock {
            status,
            message: message.into(),
        }
    }

    /// Creates a command error for rejected element indexes.
    #[inline]
    pub fn command(failed_indexes: Vec<u32>) -> Self {
        Self::Command { failed_indexes }
    }

    /// Creates a parsing error.
    #[inline]
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    #[inline]
    pub fn http(status: StatusCode, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is an authentication error.
    #[inline]
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::AuthenticationRequired { .. }
        )
    }

    /// Returns `true` if this is a lock error.
    #[inline]
    #[must_use]
    pub fn is_lock_error(&self) -> bool {
        matches!(
            self,
            Self::Lock { .. } | Self::AlreadyLocked | Self::InvalidCode | Self::LockRequired
        )
    }

    /// Returns `true` if this error may succeed on a manual retry.
    ///
    /// A refused lock can be retried once the other client releases it;
    /// transport failures are typically transient.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Lock { .. } | Self::Transport(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
