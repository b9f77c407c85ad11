// ==========================================
// Retail standard assortment engine - allocation result
// ==========================================
// Common output shape of both allocation strategies for one
// (store, equipment type) group.
// ==========================================

use crate::engine::diagnostics::CapacityShortfall;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SelectedItem - item flagged is_standard = 1
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedItem {
    pub store: String,
    pub item_id: String,
}

// ==========================================
// GroupAllocation - one equipment group's selection
// ==========================================
// prod_counts carries an entry for every category that had
// items in the group, zero-count categories included, so the
// downstream cutoff join never misses a budget row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAllocation {
    pub selected: Vec<SelectedItem>,
    pub prod_counts: BTreeMap<String, u32>,
    pub shortfall: Option<CapacityShortfall>,
}

impl GroupAllocation {
    /// Total slots granted across the group's categories
    pub fn total_slots(&self) -> u32 {
        self.prod_counts.values().sum()
    }
}
