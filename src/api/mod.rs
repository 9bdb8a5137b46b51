//! Wire-level description of the e-Connect HTTP API.
//!
//! # Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`router`] | Endpoint URLs derived from a validated base URL |
//! | [`payload`] | Form/query payloads sent to the API |
//! | [`response`] | JSON shapes returned by the API |
//!
//! The API itself is an opaque external collaborator: these types mirror its
//! conventions (PascalCase field names, 200-with-failure command outcomes)
//! without reinterpreting them.

// ============================================================================
// Submodules
// ============================================================================

/// Request payload types.
pub mod payload;

/// Response body types.
pub mod response;

/// Endpoint routing.
pub mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use payload::{
    AuthQuery, CommandPayload, CommandType, ElementClass, LockPayload, PollPayload, SessionPayload,
};
pub use response::{
    AuthResponse, CommandOutcome, DescriptionEntry, InputRecord, SectorRecord, UpdateState,
};
pub use router::{ELMO_E_CONNECT, IESS_METRONET, Router};
