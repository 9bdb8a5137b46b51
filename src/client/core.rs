//! The e-Connect client facade.
//!
//! [`ElmoClient`] ties the pieces together: it authenticates against the
//! login endpoint, acquires the exclusive panel lock, sends arm/disarm and
//! bypass commands, and answers status queries. Usage is sequential within
//! one logical session:
//!
//! ```no_run
//! use econnect::{ElmoClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = ElmoClient::builder().build()?;
//! client.auth("username", "password").await?;
//!
//! let guard = client.lock("1234").await?;
//! client.arm(&[]).await?;       // arm ALL sectors
//! client.disarm(&[3, 4]).await?; // disarm sectors 3 and 4
//! guard.release().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Exclusivity between independent processes is enforced by the remote
//! system, not locally: this client only reflects and requests that remote
//! state.

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::payload::{
    AuthQuery, CommandPayload, CommandType, ElementClass, LockPayload, PollPayload, SessionPayload,
};
use crate::api::response::{
    AuthResponse, CommandOutcome, DescriptionEntry, InputRecord, SectorRecord, UpdateState,
};
use crate::api::Router;
use crate::error::{Error, Result};
use crate::query::{CheckReport, ElementStatus, PollUpdate, Query};

use super::builder::ClientBuilder;
use super::lock::{LockGuard, LockState};
use super::session::Session;

// ============================================================================
// Types
// ============================================================================

/// Element names keyed by (element class code, panel index).
type DescriptionMap = HashMap<(u8, u32), String>;

/// Internal shared state for the client.
struct ClientInner {
    /// HTTP transport.
    http: reqwest::Client,

    /// Optional vendor domain sent with the login request.
    domain: Option<String>,

    /// Endpoint router; rewritten when the login handshake redirects.
    router: Mutex<Router>,

    /// Current session, replaced wholesale on re-authentication.
    session: Mutex<Option<Session>>,

    /// Local belief about the remote panel lock.
    lock: Mutex<LockState>,

    /// Element descriptions, fetched once per client lifetime.
    descriptions: Mutex<Option<DescriptionMap>>,
}

// ============================================================================
// ElmoClient
// ============================================================================

/// Client for Elmo e-Connect and IESS Metronet alarm systems.
///
/// The client is cheap to clone; clones share the session, the lock state and
/// the description cache. It is designed for sequential use
/// (authenticate, lock, command, unlock) within one logical session, not for
/// concurrent command dispatch from multiple tasks.
#[derive(Clone)]
pub struct ElmoClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for ElmoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElmoClient")
            .field("base_url", &self.base_url().as_str())
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ElmoClient - Construction
// ============================================================================

impl ElmoClient {
    /// Creates a configuration builder for the client.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use econnect::ElmoClient;
    ///
    /// # fn example() -> econnect::Result<()> {
    /// let client = ElmoClient::builder()
    ///     .base_url("https://metronet.iessonline.com")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client for the default vendor (Elmo e-Connect).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        router: Router,
        domain: Option<String>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                domain,
                router: Mutex::new(router),
                session: Mutex::new(None),
                lock: Mutex::new(LockState::Unlocked),
                descriptions: Mutex::new(None),
            }),
        }
    }
}

// ============================================================================
// ElmoClient - State Accessors
// ============================================================================

impl ElmoClient {
    /// Returns the base URL currently in use.
    ///
    /// Differs from the configured URL after a login redirect.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.inner.router.lock().base_url().clone()
    }

    /// Returns `true` if the stored session token is still valid.
    #[inline]
    #[must_use]
    pub fn has_valid_session(&self) -> bool {
        self.inner
            .session
            .lock()
            .as_ref()
            .is_some_and(Session::is_valid)
    }

    /// Returns `true` if this client believes it holds the panel lock.
    ///
    /// This is the client's local belief, not a remote observation: another
    /// process cannot be detected here, and a remote lock that expired
    /// server-side is not reflected either.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.lock.lock().is_locked()
    }

    /// Extracts the current token, failing when the session is unusable.
    fn session_token(&self) -> Result<String> {
        let session = self.inner.session.lock();
        match session.as_ref() {
            None => Err(Error::authentication_required(
                "no session token; call auth() first",
            )),
            Some(session) if !session.is_valid() => Err(Error::authentication_required(
                "session token expired; call auth() again",
            )),
            Some(session) => Ok(session.token().to_owned()),
        }
    }

    fn router(&self) -> Router {
        self.inner.router.lock().clone()
    }

    pub(crate) fn release_local(&self) {
        *self.inner.lock.lock() = LockState::Unlocked;
    }

    #[cfg(test)]
    pub(crate) fn inject_session(&self, session: Session) {
        *self.inner.session.lock() = Some(session);
    }
}

// ============================================================================
// ElmoClient - Authentication
// ============================================================================

impl ElmoClient {
    /// Authenticates and stores a fresh access token.
    ///
    /// The token is valid for 10 minutes; once it expires every protected
    /// call fails with [`Error::AuthenticationRequired`] until `auth` is
    /// called again. Credentials are not cached for silent re-authentication.
    ///
    /// Installations migrated to another cluster answer with a redirect; the
    /// login request is re-issued once against the new base URL, which then
    /// becomes the client's base URL for all further calls.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] on a non-2xx login response (403 means
    ///   wrong username or password)
    /// - [`Error::Parsing`] / [`Error::Json`] on an unexpected body
    /// - [`Error::Transport`] on network failure
    pub async fn auth(&self, username: &str, password: &str) -> Result<String> {
        let mut auth = self.login_request(username, password).await?;

        if auth.redirect {
            let target = auth
                .redirect_to
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| Error::parsing("login redirect without a RedirectTo URL"))?;
            let router = Router::new(target)?;
            info!(base_url = %router.base_url(), "following login redirect");

            *self.inner.router.lock() = router;
            auth = self.login_request(username, password).await?;
        }

        let token = auth.session_id;
        *self.inner.session.lock() = Some(Session::new(token.as_str()));
        debug!("authenticated; session token refreshed");
        Ok(token)
    }

    async fn login_request(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let url = self.router().auth();
        let query = AuthQuery {
            username,
            password,
            domain: self.inner.domain.as_deref(),
        };

        let response = self.inner.http.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::authentication(status, detail(status, message)));
        }

        parse_json(response).await
    }
}

// ============================================================================
// ElmoClient - Locking
// ============================================================================

impl ElmoClient {
    /// Acquires the exclusive panel lock with the given panel code.
    ///
    /// The remote system allows one controlling client at a time; the lock is
    /// mandatory before arm/disarm/bypass commands. The returned [`LockGuard`]
    /// releases on every exit path: call [`LockGuard::release`] for the
    /// checked path, or let the guard drop for best-effort release.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyLocked`] if this client already holds the lock
    /// - [`Error::Lock`] if the remote system refuses (403: usually another
    ///   client holds the lock; retry is reasonable)
    /// - [`Error::InvalidCode`] if the panel code is wrong (reported as a 200
    ///   with a failed outcome)
    /// - [`Error::AuthenticationRequired`] without a valid session
    ///
    /// On any failure the local state remains unlocked.
    pub async fn lock(&self, code: &str) -> Result<LockGuard> {
        let token = self.session_token()?;
        if self.is_locked() {
            return Err(Error::AlreadyLocked);
        }

        let url = self.router().lock();
        let payload = LockPayload::new(code, &token);
        let response = self.inner.http.post(&url).form(&payload).send().await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::lock(status, detail(status, message)));
        }
        if !status.is_success() {
            return Err(Error::http(status, url));
        }

        let outcomes: Vec<CommandOutcome> = parse_json(response).await?;
        if !CommandOutcome::first(outcomes)?.successful {
            return Err(Error::InvalidCode);
        }

        *self.inner.lock.lock() = LockState::Locked;
        debug!("panel lock acquired");
        Ok(LockGuard::new(self.clone()))
    }

    /// Releases the panel lock.
    ///
    /// Idempotent: calling while unlocked is a no-op. The local state
    /// transitions to unlocked unconditionally, even when the remote logout
    /// call fails; in that case a warning is logged, the error is returned,
    /// and the remote system keeps the lock until it expires server-side.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the remote logout call. Local state is
    /// already unlocked when this returns an error.
    pub async fn unlock(&self) -> Result<()> {
        {
            let mut state = self.inner.lock.lock();
            if !state.is_locked() {
                return Ok(());
            }
            // Unlock locally before the remote call: a failed release must
            // never strand this client in the locked state.
            *state = LockState::Unlocked;
        }

        match self.remote_unlock().await {
            Ok(()) => {
                debug!("panel lock released");
                Ok(())
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "remote unlock failed; local state is unlocked but the remote lock may persist until it expires"
                );
                Err(err)
            }
        }
    }

    /// Sends the panel logout without touching the local lock state.
    pub(crate) async fn remote_unlock(&self) -> Result<()> {
        let token = self.session_token()?;
        let url = self.router().unlock();
        let payload = SessionPayload {
            session_id: &token,
        };

        let response = self.inner.http.post(&url).form(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status, url));
        }
        Ok(())
    }
}

// ============================================================================
// ElmoClient - Commands
// ============================================================================

impl ElmoClient {
    /// Arms sectors without activation delay.
    ///
    /// An empty slice arms ALL sectors; otherwise exactly the given sector
    /// indexes are armed, one command request per index.
    ///
    /// # Errors
    ///
    /// - [`Error::LockRequired`] without a held lock (checked locally, before
    ///   any request is sent)
    /// - [`Error::AuthenticationRequired`] without a valid session
    /// - [`Error::Command`] when the remote system rejects some indexes
    /// - [`Error::Http`] on any non-2xx response, surfaced as-is
    pub async fn arm(&self, sectors: &[u32]) -> Result<()> {
        debug!(?sectors, "arming");
        self.send_elements(CommandType::Activate, ElementClass::Sectors, sectors)
            .await
    }

    /// Disarms sectors.
    ///
    /// An empty slice disarms ALL sectors; otherwise exactly the given sector
    /// indexes are disarmed. Same error contract as [`arm`](Self::arm).
    pub async fn disarm(&self, sectors: &[u32]) -> Result<()> {
        debug!(?sectors, "disarming");
        self.send_elements(CommandType::Deactivate, ElementClass::Sectors, sectors)
            .await
    }

    /// Excludes (bypasses) the given inputs.
    ///
    /// Bypassed inputs do not alarm when their sector is armed, matching the
    /// idle-to-bypassed toggle of the e-Connect web UI. An empty slice sends
    /// nothing, but the session and lock preconditions still apply. Same
    /// error contract as [`arm`](Self::arm).
    pub async fn exclude(&self, inputs: &[u32]) -> Result<()> {
        if inputs.is_empty() {
            self.command_token()?;
            return Ok(());
        }
        debug!(?inputs, "excluding inputs");
        self.send_elements(CommandType::Deactivate, ElementClass::Inputs, inputs)
            .await
    }

    /// Includes previously bypassed inputs.
    ///
    /// An empty slice sends nothing, but the session and lock preconditions
    /// still apply. Same error contract as [`arm`](Self::arm).
    pub async fn include(&self, inputs: &[u32]) -> Result<()> {
        if inputs.is_empty() {
            self.command_token()?;
            return Ok(());
        }
        debug!(?inputs, "including inputs");
        self.send_elements(CommandType::Activate, ElementClass::Inputs, inputs)
            .await
    }

    /// Checks the session and lock preconditions shared by every protected
    /// command, returning the session token on success.
    fn command_token(&self) -> Result<String> {
        let token = self.session_token()?;
        if !self.is_locked() {
            return Err(Error::LockRequired);
        }
        Ok(token)
    }

    /// Dispatches one command per element, or the whole-system shape when no
    /// indexes are given.
    async fn send_elements(
        &self,
        command: CommandType,
        class: ElementClass,
        indexes: &[u32],
    ) -> Result<()> {
        let token = self.command_token()?;

        let url = self.router().send_command();
        let payloads: Vec<CommandPayload<'_>> = if indexes.is_empty() {
            vec![CommandPayload::whole_system(command, &token)]
        } else {
            indexes
                .iter()
                .map(|&index| CommandPayload::new(command, class, index, &token))
                .collect()
        };

        // The panel reports a missing element as a 200 with a failed outcome;
        // valid elements in the same batch are still applied.
        let mut failed = Vec::new();
        for payload in &payloads {
            let response = self.inner.http.post(&url).form(payload).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::http(status, url.clone()));
            }

            let outcomes: Vec<CommandOutcome> = parse_json(response).await?;
            if !CommandOutcome::first(outcomes)?.successful {
                failed.push(payload.elements_indexes);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::command(failed))
        }
    }
}

// ============================================================================
// ElmoClient - Queries
// ============================================================================

impl ElmoClient {
    /// Queries the current status of sectors or inputs.
    ///
    /// Returns the in-use elements in panel order, with names resolved via
    /// the description strings (fetched once and cached for the client
    /// lifetime). Does not require the panel lock.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthenticationRequired`] without a valid session
    /// - [`Error::Parsing`] / [`Error::Json`] on an unexpected body
    /// - [`Error::Http`] on any non-2xx response
    pub async fn query(&self, query: Query) -> Result<Vec<ElementStatus>> {
        let token = self.session_token()?;
        let names = self.descriptions().await?;

        let router = self.router();
        let url = match query {
            Query::Sectors => router.sectors(),
            Query::Inputs => router.inputs(),
        };
        let payload = SessionPayload {
            session_id: &token,
        };

        let response = self.inner.http.post(&url).form(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status, url));
        }
        let body = response.text().await?;

        let class = query.element_class().code();
        let name_of = |index: u32| -> Result<String> {
            names.get(&(class, index)).cloned().ok_or_else(|| {
                Error::parsing(format!(
                    "missing description for element class {class}, index {index}"
                ))
            })
        };

        match query {
            Query::Sectors => {
                let records: Vec<SectorRecord> = serde_json::from_str(&body)?;
                records
                    .iter()
                    .filter(|record| record.in_use)
                    .map(|record| Ok(ElementStatus::from_sector(record, name_of(record.index)?)))
                    .collect()
            }
            Query::Inputs => {
                let records: Vec<InputRecord> = serde_json::from_str(&body)?;
                records
                    .iter()
                    .filter(|record| record.in_use)
                    .map(|record| Ok(ElementStatus::from_input(record, name_of(record.index)?)))
                    .collect()
            }
        }
    }

    /// Composes a sector query and an input query into a [`CheckReport`].
    ///
    /// The report partitions sectors into armed/disarmed and inputs into
    /// alerted/wait. Status reflects the remote state at query time, not a
    /// local cache.
    pub async fn check(&self) -> Result<CheckReport> {
        let sectors = self.query(Query::Sectors).await?;
        let inputs = self.query(Query::Inputs).await?;
        Ok(CheckReport::from_queries(sectors, inputs))
    }

    /// Long-polls the updates endpoint for status changes.
    ///
    /// Blocks the task for up to ~15 seconds until the remote system reports
    /// a change past the given last-seen record ids (the `id` of the last
    /// [`ElementStatus`] of each family). After a reported change, run
    /// [`check`](Self::check) or [`query`](Self::query) to refresh the ids,
    /// otherwise the next poll returns immediately with the same stale
    /// result.
    pub async fn poll(&self, sectors_last_id: u64, inputs_last_id: u64) -> Result<PollUpdate> {
        let token = self.session_token()?;
        let url = self.router().updates();
        let payload = PollPayload::new(&token, sectors_last_id, inputs_last_id);

        let response = self.inner.http.post(&url).form(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status, url));
        }

        let state: UpdateState = parse_json(response).await?;
        Ok(PollUpdate {
            sectors: state.areas,
            inputs: state.inputs,
        })
    }

    /// Fetches the element description strings, cached per client lifetime.
    async fn descriptions(&self) -> Result<DescriptionMap> {
        if let Some(cached) = self.inner.descriptions.lock().clone() {
            return Ok(cached);
        }

        let token = self.session_token()?;
        let url = self.router().descriptions();
        let payload = SessionPayload {
            session_id: &token,
        };

        let response = self.inner.http.post(&url).form(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(status, url));
        }

        let entries: Vec<DescriptionEntry> = parse_json(response).await?;
        let map: DescriptionMap = entries
            .into_iter()
            .map(|entry| ((entry.class, entry.index), entry.description))
            .collect();

        *self.inner.descriptions.lock() = Some(map.clone());
        debug!(count = map.len(), "cached element descriptions");
        Ok(map)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Reads the body and deserializes it, reporting shape mismatches as JSON
/// errors rather than transport errors.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Falls back to the canonical reason when the body carries no detail.
fn detail(status: StatusCode, message: String) -> String {
    if message.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned()
    } else {
        message
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    // Nothing listens here: tests below must fail before any request is sent.
    fn unreachable_client() -> ElmoClient {
        ElmoClient::builder()
            .base_url("http://127.0.0.1:9")
            .request_timeout(Duration::from_millis(100))
            .build()
            .expect("valid config")
    }

    #[tokio::test]
    async fn test_command_without_session_is_local_error() {
        let client = unreachable_client();
        let err = client.arm(&[]).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationRequired { .. }));
    }

    #[tokio::test]
    async fn test_command_with_expired_session_is_local_error() {
        let client = unreachable_client();
        client.inject_session(Session::with_ttl("token", Duration::ZERO));

        let err = client.disarm(&[3]).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationRequired { .. }));
    }

    #[tokio::test]
    async fn test_command_without_lock_never_reaches_transport() {
        let client = unreachable_client();
        client.inject_session(Session::new("token"));

        // A transport error would mean the request was attempted.
        let err = client.arm(&[3, 4]).await.unwrap_err();
        assert!(matches!(err, Error::LockRequired));
    }

    #[tokio::test]
    async fn test_exclude_empty_slice_still_requires_session() {
        let client = unreachable_client();
        let err = client.exclude(&[]).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationRequired { .. }));
    }

    #[tokio::test]
    async fn test_include_empty_slice_still_requires_lock() {
        let client = unreachable_client();
        client.inject_session(Session::new("token"));

        // An empty batch sends nothing, but never sidesteps the lock.
        let err = client.include(&[]).await.unwrap_err();
        assert!(matches!(err, Error::LockRequired));
    }

    #[tokio::test]
    async fn test_unlock_when_unlocked_is_noop() {
        let client = unreachable_client();
        assert!(!client.is_locked());
        client.unlock().await.expect("idempotent release");
    }

    #[tokio::test]
    async fn test_query_without_session_is_local_error() {
        let client = unreachable_client();
        let err = client.query(Query::Sectors).await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationRequired { .. }));
    }

    #[test]
    fn test_client_debug_does_not_leak_state() {
        let client = unreachable_client();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("ElmoClient"));
        assert!(rendered.contains("base_url"));
    }

    #[test]
    fn test_detail_falls_back_to_canonical_reason() {
        assert_eq!(detail(StatusCode::FORBIDDEN, String::new()), "Forbidden");
        assert_eq!(detail(StatusCode::FORBIDDEN, "held".into()), "held");
    }
}
