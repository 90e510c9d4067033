//! Usage and placement bookkeeping
//!
//! Gem attributes never change, but the slot planner needs to know how often
//! each gem is consumed and where it ended up. Those counters live here,
//! keyed by gem id, so a search can clone the ledger per branch.

use serde::{Deserialize, Serialize};

use gemforge_core::{GemId, SlotIndex};

/// Mutable bookkeeping for one gem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of fusions that took this gem as an input
    pub use_count: u32,
    /// Current placement, `None` when not slotted
    pub slot: Option<SlotIndex>,
    /// Placement a base gem started in
    pub original_slot: Option<SlotIndex>,
}

impl Usage {
    /// Consumed by a fusion but not placed yet
    pub fn is_needed(&self) -> bool {
        self.slot.is_none() && self.use_count > 0
    }
}

/// Per-gem usage table, index-aligned with a gem pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    entries: Vec<Usage>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a fresh entry for a newly built gem.
    pub(crate) fn register(&mut self, id: GemId) {
        self.cover(id.index() + 1);
    }

    /// Make sure the first `len` gems have an entry.
    pub(crate) fn cover(&mut self, len: usize) {
        if len > self.entries.len() {
            self.entries.resize(len, Usage::default());
        }
    }

    pub(crate) fn record_use(&mut self, id: GemId) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.use_count += 1;
        }
    }

    pub(crate) fn release_use(&mut self, id: GemId) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.use_count = entry.use_count.saturating_sub(1);
        }
    }

    /// Drop the entries of every gem from `len` on.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn get(&self, id: GemId) -> Option<&Usage> {
        self.entries.get(id.index())
    }

    pub fn use_count(&self, id: GemId) -> u32 {
        self.get(id).map_or(0, |u| u.use_count)
    }

    pub fn slot(&self, id: GemId) -> Option<SlotIndex> {
        self.get(id).and_then(|u| u.slot)
    }

    pub fn original_slot(&self, id: GemId) -> Option<SlotIndex> {
        self.get(id).and_then(|u| u.original_slot)
    }

    /// Place a gem, or clear its placement with `None`. Returns `false` for unknown ids.
    pub fn set_slot(&mut self, id: GemId, slot: Option<SlotIndex>) -> bool {
        match self.entries.get_mut(id.index()) {
            Some(entry) => {
                entry.slot = slot;
                true
            }
            None => false,
        }
    }

    pub fn set_original_slot(&mut self, id: GemId, slot: Option<SlotIndex>) -> bool {
        match self.entries.get_mut(id.index()) {
            Some(entry) => {
                entry.original_slot = slot;
                true
            }
            None => false,
        }
    }

    pub fn is_needed(&self, id: GemId) -> bool {
        self.get(id).is_some_and(Usage::is_needed)
    }

    /// Ids of every gem that is consumed but not yet placed
    pub fn needed(&self) -> impl Iterator<Item = GemId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_needed())
            .map(|(i, _)| GemId::from_raw(i as u32))
    }

    /// Reset every placement while keeping use counts.
    pub fn clear_slots(&mut self) {
        for entry in &mut self.entries {
            entry.slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
