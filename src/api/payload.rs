//! Request payloads sent to the e-Connect API.
//!
//! All panel endpoints take form-encoded bodies; only the login endpoint
//! uses query parameters. Field names follow the remote convention exactly
//! (`sessionId`, `CommandType`, ...), so every struct here is a thin serde
//! view over borrowed client state.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// Command Constants
// ============================================================================

/// Command verb understood by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Arm a sector / include an input.
    Activate,
    /// Disarm a sector / exclude (bypass) an input.
    Deactivate,
}

impl CommandType {
    /// Numeric code used on the wire.
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Activate => 1,
            Self::Deactivate => 2,
        }
    }
}

/// Element class a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// The whole system (ALL sectors).
    System,
    /// A single sector (area).
    Sectors,
    /// A single input (sensor).
    Inputs,
}

impl ElementClass {
    /// Numeric code used on the wire.
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::System => 1,
            Self::Sectors => 9,
            Self::Inputs => 10,
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Query parameters for the login endpoint.
#[derive(Debug, Serialize)]
pub struct AuthQuery<'a> {
    /// Account username.
    pub username: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Optional vendor domain (multi-tenant installations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<&'a str>,
}

/// Form body for the panel lock endpoint.
#[derive(Debug, Serialize)]
pub struct LockPayload<'a> {
    /// Always 1: panels with `LoginWithoutUserID` ignore it.
    #[serde(rename = "userId")]
    pub user_id: u8,
    /// The numeric panel code, sent as the lock password.
    pub password: &'a str,
    /// Current session token.
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

impl<'a> LockPayload<'a> {
    /// Builds a lock payload for the given code and session.
    #[inline]
    #[must_use]
    pub fn new(code: &'a str, session_id: &'a str) -> Self {
        Self {
            user_id: 1,
            password: code,
            session_id,
        }
    }
}

/// Form body for endpoints that only need the session token.
#[derive(Debug, Serialize)]
pub struct SessionPayload<'a> {
    /// Current session token.
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

/// Form body for the command dispatch endpoint.
///
/// One payload targets exactly one element; arming multiple sectors means
/// sending multiple requests.
#[derive(Debug, Serialize)]
pub struct CommandPayload<'a> {
    /// Command verb code (see [`CommandType`]).
    #[serde(rename = "CommandType")]
    pub command_type: u8,
    /// Element class code (see [`ElementClass`]).
    #[serde(rename = "ElementsClass")]
    pub elements_class: u8,
    /// Element index, or 1 when targeting the whole system.
    #[serde(rename = "ElementsIndexes")]
    pub elements_indexes: u32,
    /// Current session token.
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

impl<'a> CommandPayload<'a> {
    /// Builds a command payload targeting a single element.
    #[inline]
    #[must_use]
    pub fn new(
        command: CommandType,
        class: ElementClass,
        index: u32,
        session_id: &'a str,
    ) -> Self {
        Self {
            command_type: command.code(),
            elements_class: class.code(),
            elements_indexes: index,
            session_id,
        }
    }

    /// Builds the ALL-sectors shape (`ElementsClass: 1, ElementsIndexes: 1`).
    #[inline]
    #[must_use]
    pub fn whole_system(command: CommandType, session_id: &'a str) -> Self {
        Self::new(command, ElementClass::System, 1, session_id)
    }
}

/// Form body for the long-polling updates endpoint.
#[derive(Debug, Serialize)]
pub struct PollPayload<'a> {
    /// Current session token.
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
    /// Last sector (area) record id seen by the caller.
    #[serde(rename = "Areas")]
    pub areas: u64,
    /// Last input record id seen by the caller.
    #[serde(rename = "Inputs")]
    pub inputs: u64,
    /// Fixed flag required by the endpoint.
    #[serde(rename = "CanElevate")]
    pub can_elevate: &'a str,
    /// Fixed flag required by the endpoint.
    #[serde(rename = "ConnectionStatus")]
    pub connection_status: &'a str,
}

impl<'a> PollPayload<'a> {
    /// Builds a poll payload for the given last-seen record ids.
    #[inline]
    #[must_use]
    pub fn new(session_id: &'a str, areas: u64, inputs: u64) -> Self {
        Self {
            session_id,
            areas,
            inputs,
            can_elevate: "1",
            connection_status: "1",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
