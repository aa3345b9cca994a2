//! Pending-estimate state: one AI estimate at a time awaits user
//! confirm/discard. The slot is an explicit value owned by the caller
//! (the presentation layer), never ambient state the core reads.

use crate::types::FoodEntry;
use healthsheet_client::EstimateResponse;
use serde::Serialize;

/// One estimate waiting for confirmation, already resolved to a concrete
/// food entry. The raw response is kept around for display.
#[derive(Clone, Debug, Serialize)]
pub struct PendingEstimate {
    pub entry: FoodEntry,
    #[serde(skip)]
    pub raw: EstimateResponse,
}

/// Single-slot holder: a new estimate displaces any previous one.
#[derive(Debug, Default)]
pub struct PendingSlot(Option<PendingEstimate>);

impl PendingSlot {
    pub fn new() -> Self {
        Self(None)
    }

    /// Put a new estimate in the slot, returning the one it displaced.
    pub fn replace(&mut self, pending: PendingEstimate) -> Option<PendingEstimate> {
        self.0.replace(pending)
    }

    /// Empty the slot, yielding its content (confirm and discard both go
    /// through here).
    pub fn take(&mut self) -> Option<PendingEstimate> {
        self.0.take()
    }

    pub fn peek(&self) -> Option<&PendingEstimate> {
        self.0.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
