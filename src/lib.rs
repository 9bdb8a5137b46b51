//! Async client for Elmo e-Connect and IESS Metronet alarm systems.
//!
//! This library wraps the proprietary HTTP API exposed by Elmo-like home
//! alarm systems. It authenticates, acquires the exclusive panel control
//! lock, arms/disarms sectors, bypasses inputs and queries sector/input
//! status.
//!
//! # Model
//!
//! The remote system allows one controlling client at a time:
//!
//! - authentication issues a bearer-style token valid for 10 minutes;
//! - arm/disarm commands require the panel lock, acquired with the numeric
//!   panel code and released when done;
//! - exclusivity is enforced by the remote system. The client's lock state
//!   is its local belief about that remote state, not a distributed lock.
//!
//! No state persists between processes; session and lock live in memory for
//! the process lifetime. Failures surface to the caller without automatic
//! retries.
//!
//! # Quick Start
//!
//! ```no_run
//! use econnect::{ElmoClient, Query, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ElmoClient::builder().build()?;
//!
//!     // Authenticate (read-only mode)
//!     client.auth("username", "password").await?;
//!     let report = client.check().await?;
//!     println!("{} sectors armed", report.sectors_armed.len());
//!
//!     // Acquire the panel lock to send commands (write mode)
//!     let guard = client.lock("1234").await?;
//!     client.arm(&[]).await?;       // arm ALL sectors
//!     client.disarm(&[3, 4]).await?; // disarm sectors 3 and 4
//!     guard.release().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Wire-level endpoint routing and payload/response shapes |
//! | [`client`] | [`ElmoClient`], session and lock management |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`query`] | Status queries, [`ElementStatus`] and [`CheckReport`] |

// ============================================================================
// Modules
// ============================================================================

/// Wire-level description of the e-Connect HTTP API.
///
/// Internal building blocks; most callers only need [`ELMO_E_CONNECT`] and
/// [`IESS_METRONET`] from here.
pub mod api;

/// Client facade: session, lock and command coordination.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Status queries and their result types.
pub mod query;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{ClientBuilder, ElmoClient, LockGuard, Session, SESSION_TTL};

// Error types
pub use error::{Error, Result};

// Query types
pub use query::{CheckReport, ElementStatus, PollUpdate, Query};

// Vendor base URLs
pub use api::{ELMO_E_CONNECT, IESS_METRONET};
