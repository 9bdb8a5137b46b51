//! Status queries and their result types.
//!
//! A [`Query`] selects which element family to read ([sectors] or [inputs]);
//! the client answers with ordered [`ElementStatus`] snapshots. [`CheckReport`]
//! composes both families, partitioned by armed/alerted state.
//!
//! [sectors]: Query::Sectors
//! [inputs]: Query::Inputs

// ============================================================================
// Imports
// ============================================================================

use crate::api::payload::ElementClass;
use crate::api::response::{InputRecord, SectorRecord};

// ============================================================================
// Query
// ============================================================================

/// Element family a status query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Sectors (configurable alarm zones).
    Sectors,
    /// Inputs (door/window/motion sensors).
    Inputs,
}

impl Query {
    /// Element class used by the descriptions endpoint for this family.
    #[inline]
    #[must_use]
    pub fn element_class(self) -> ElementClass {
        match self {
            Self::Sectors => ElementClass::Sectors,
            Self::Inputs => ElementClass::Inputs,
        }
    }
}

// ============================================================================
// ElementStatus
// ============================================================================

/// Immutable status snapshot of a sector or input.
///
/// Snapshots reflect the remote state at query time; nothing is cached or
/// mutated locally beyond the lifetime of a single query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementStatus {
    /// Record identifier assigned by the backend.
    pub id: u64,
    /// Zero-based position on the panel.
    pub index: u32,
    /// Numeric element category code.
    pub element: u32,
    /// Human-readable name configured on the panel.
    pub name: String,
    /// Armed (sectors) or alerted (inputs).
    pub status: bool,
    /// Bypassed. Always `false` for sectors, which cannot be excluded.
    pub excluded: bool,
}

impl ElementStatus {
    pub(crate) fn from_sector(record: &SectorRecord, name: String) -> Self {
        Self {
            id: record.id,
            index: record.index,
            element: record.element,
            name,
            status: record.active,
            excluded: false,
        }
    }

    pub(crate) fn from_input(record: &InputRecord, name: String) -> Self {
        Self {
            id: record.id,
            index: record.index,
            element: record.element,
            name,
            status: record.alarm,
            excluded: record.excluded,
        }
    }
}

// ============================================================================
// CheckReport
// ============================================================================

/// Snapshot of the whole system, partitioned by status.
///
/// Produced by [`ElmoClient::check`], which composes a sector query and an
/// input query and splits each result set in two.
///
/// [`ElmoClient::check`]: crate::ElmoClient::check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Sectors currently armed.
    pub sectors_armed: Vec<ElementStatus>,
    /// Sectors currently disarmed.
    pub sectors_disarmed: Vec<ElementStatus>,
    /// Inputs in alerted state.
    pub inputs_alerted: Vec<ElementStatus>,
    /// Inputs waiting (not alerted).
    pub inputs_wait: Vec<ElementStatus>,
}

impl CheckReport {
    /// Builds a report from the two query result sets.
    ///
    /// Partitioning is by the `status` flag: armed/disarmed for sectors,
    /// alerted/wait for inputs. Input ordering is preserved.
    #[must_use]
    pub fn from_queries(sectors: Vec<ElementStatus>, inputs: Vec<ElementStatus>) -> Self {
        let (sectors_armed, sectors_disarmed) = partition_by_status(sectors);
        let (inputs_alerted, inputs_wait) = partition_by_status(inputs);

        Self {
            sectors_armed,
            sectors_disarmed,
            inputs_alerted,
            inputs_wait,
        }
    }
}

/// Splits a result set into (status on, status off), keeping order.
fn partition_by_status(items: Vec<ElementStatus>) -> (Vec<ElementStatus>, Vec<ElementStatus>) {
    items.into_iter().partition(|item| item.status)
}

// ============================================================================
// PollUpdate
// ============================================================================

/// Outcome of a long poll against the updates endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollUpdate {
    /// Whether sector status changed.
    pub sectors: bool,
    /// Whether input status changed.
    pub inputs: bool,
}

impl PollUpdate {
    /// Returns `true` if anything this client tracks has changed.
    #[inline]
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.sectors || self.inputs
    }
}

// ============================================================================
// Tests
// ============================================================================
