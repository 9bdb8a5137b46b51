//! Panel lock state and the RAII acquisition guard.
//!
//! The remote system accepts arm/disarm commands from one client at a time;
//! a lock must be acquired (with the panel code) before any command. The
//! [`LockState`] here is the client's *belief* about that remote state, not a
//! distributed lock: the server is the actual arbiter between independent
//! processes, and this module only mirrors and requests its state.
//!
//! [`LockGuard`] guarantees the local state returns to unlocked on every exit
//! path. Prefer the explicit async [`release`](LockGuard::release); the
//! `Drop` fallback can only release the remote lock best-effort.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use super::core::ElmoClient;

// ============================================================================
// LockState
// ============================================================================

/// Local belief about the remote panel lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LockState {
    /// No lock held by this client.
    #[default]
    Unlocked,
    /// This client believes it holds the remote lock.
    Locked,
}

impl LockState {
    /// Returns `true` if this client believes it holds the lock.
    #[inline]
    #[must_use]
    pub(crate) fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

// ============================================================================
// LockGuard
// ============================================================================

/// Scoped handle over an acquired panel lock.
///
/// Returned by [`ElmoClient::lock`]. While the guard is alive the client can
/// send arm/disarm/bypass commands. Releasing happens on every exit path:
///
/// - [`release`](Self::release) performs the remote logout and surfaces its
///   outcome;
/// - dropping the guard resets the local state unconditionally and, when a
///   Tokio runtime is available, spawns the remote logout as a best-effort
///   task. Without a runtime the remote lock stays held until the server
///   expires it, which is logged as a warning.
#[must_use = "dropping the guard releases the panel lock"]
pub struct LockGuard {
    client: ElmoClient,
    released: bool,
}

impl LockGuard {
    pub(crate) fn new(client: ElmoClient) -> Self {
        Self {
            client,
            released: false,
        }
    }

    /// Returns the client this guard belongs to.
    ///
    /// Convenience for closures that capture only the guard.
    #[inline]
    #[must_use]
    pub fn client(&self) -> &ElmoClient {
        &self.client
    }

    /// Releases the panel lock.
    ///
    /// The local state transitions to unlocked even when the remote logout
    /// fails; in that case the error is returned so the caller knows the
    /// remote system may still consider the lock held.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the remote logout call.
    pub async fn release(mut self) -> crate::Result<()> {
        self.released = true;
        self.client.unlock().await
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        // Local state first: the client object must never stay stranded in
        // the locked state, whatever happens to the remote call.
        self.client.release_local();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("lock guard dropped without release; spawning remote logout");
                let client = self.client.clone();
                handle.spawn(async move {
                    if let Err(err) = client.remote_unlock().await {
                        warn!(error = %err, "best-effort panel unlock failed; the remote lock expires server-side");
                    }
                });
            }
            Err(_) => {
                warn!("lock guard dropped outside a runtime; the remote lock expires server-side");
            }
        }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_unlocked() {
        assert!(!LockState::default().is_locked());
    }

    #[test]
    fn test_locked_state() {
        assert!(LockState::Locked.is_locked());
        assert!(!LockState::Unlocked.is_locked());
    }
}
