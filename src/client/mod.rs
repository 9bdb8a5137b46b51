//! Client facade: session, lock and command coordination.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ElmoClient`] | Facade over authentication, locking, commands and queries |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`Session`] | Access token with its 10-minute validity window |
//! | [`LockGuard`] | RAII handle over the acquired panel lock |
//!
//! # Example
//!
//! ```no_run
//! use econnect::{ElmoClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = ElmoClient::builder().build()?;
//! client.auth("username", "password").await?;
//!
//! let guard = client.lock("1234").await?;
//! client.arm(&[]).await?;
//! guard.release().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Core client implementation.
pub mod core;

/// Panel lock state machine and RAII guard.
pub mod lock;

/// Access token lifecycle.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use core::ElmoClient;
pub use lock::LockGuard;
pub use session::{Session, SESSION_TTL};
