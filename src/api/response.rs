//! Response shapes returned by the e-Connect API.
//!
//! The remote system reports command failures two ways: a non-2xx status, or
//! a 200 response whose body carries `"Successful": false`. Both paths are
//! handled by the client; the types here only describe the JSON shapes.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;

use crate::error::{Error, Result};

// ============================================================================
// Authentication
// ============================================================================

/// Body of a successful login response.
///
/// Installations migrated to another cluster answer with `Redirect: true`
/// and the new base URL in `RedirectTo`; the client must re-issue the login
/// request against that URL.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Short-lived access token attached to subsequent requests.
    #[serde(rename = "SessionId")]
    pub session_id: String,

    /// Whether the caller must repeat the login elsewhere.
    #[serde(rename = "Redirect", default)]
    pub redirect: bool,

    /// Base URL to repeat the login against, when `redirect` is set.
    #[serde(rename = "RedirectTo", default)]
    pub redirect_to: Option<String>,
}

// ============================================================================
// Command Outcomes
// ============================================================================

/// One entry of a panel command response (`syncLogin`, `syncLogout`,
/// `syncSendCommand` all answer with an array of these).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOutcome {
    /// Whether the panel accepted the command.
    #[serde(rename = "Successful")]
    pub successful: bool,
}

impl CommandOutcome {
    /// Extracts the first outcome of a command response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parsing`] on an empty array.
    pub fn first(outcomes: Vec<CommandOutcome>) -> Result<CommandOutcome> {
        outcomes
            .into_iter()
            .next()
            .ok_or_else(|| Error::parsing("empty command outcome array"))
    }
}

// ============================================================================
// Element Records
// ============================================================================

/// Raw sector (area) record from the `areas` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SectorRecord {
    /// Record identifier, monotonically assigned by the backend.
    #[serde(rename = "Id")]
    pub id: u64,
    /// Zero-based position on the panel.
    #[serde(rename = "Index")]
    pub index: u32,
    /// Numeric element category code.
    #[serde(rename = "Element")]
    pub element: u32,
    /// Whether the sector is armed.
    #[serde(rename = "Active")]
    pub active: bool,
    /// Whether the sector is configured on the panel.
    #[serde(rename = "InUse")]
    pub in_use: bool,
}

/// Raw input (sensor) record from the `inputs` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRecord {
    /// Record identifier, monotonically assigned by the backend.
    #[serde(rename = "Id")]
    pub id: u64,
    /// Zero-based position on the panel.
    #[serde(rename = "Index")]
    pub index: u32,
    /// Numeric element category code.
    #[serde(rename = "Element")]
    pub element: u32,
    /// Whether the input is in alerted state.
    #[serde(rename = "Alarm")]
    pub alarm: bool,
    /// Whether the input is bypassed.
    #[serde(rename = "Excluded", default)]
    pub excluded: bool,
    /// Whether the input is configured on the panel.
    #[serde(rename = "InUse")]
    pub in_use: bool,
}

// ============================================================================
// Descriptions
// ============================================================================

/// One entry of the `strings` endpoint mapping element positions to names.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionEntry {
    /// Element class the description belongs to (9 sectors, 10 inputs).
    #[serde(rename = "Class")]
    pub class: u8,
    /// Zero-based position on the panel.
    #[serde(rename = "Index")]
    pub index: u32,
    /// Human-readable name configured on the panel.
    #[serde(rename = "Description")]
    pub description: String,
}

// ============================================================================
// Updates
// ============================================================================

/// Body of the long-polling `updates` endpoint.
///
/// `HasChanges` is deliberately not consumed: it also covers event classes
/// this client ignores, which would force callers to refresh too often.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateState {
    /// Whether sector status changed since the polled record ids.
    #[serde(rename = "Areas")]
    pub areas: bool,
    /// Whether input status changed since the polled record ids.
    #[serde(rename = "Inputs")]
    pub inputs: bool,
}

// ============================================================================
// Tests
// ============================================================================
