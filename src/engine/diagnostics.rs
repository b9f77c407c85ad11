// ==========================================
// Retail standard assortment engine - run diagnostics
// ==========================================
// Non-fatal findings are collected into an explicit value
// returned alongside the best-effort result, never into
// process-global state or a printed side channel. The caller
// decides whether to accept a partial assortment.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CapacityShortfall - under-supplied equipment group
// ==========================================
// A (store, equipment type) group had fewer qualifying items
// than its quota. The partial selection is still emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityShortfall {
    pub store: String,
    pub equipment_type: String,
    pub quota: u32,
    pub supplied: u32,   // slots actually granted
    pub shortfall: u32,  // quota - supplied
}

// ==========================================
// ConsistencyIssue - cutoff join mismatch
// ==========================================
// A (store, category) had ranked items but no standard-set
// budget row. Its rows are omitted from the assortment output
// rather than silently defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyIssue {
    pub store: String,
    pub category: String,
    pub ranked_items: usize,
}

// ==========================================
// Diagnostics - accumulated per-run findings
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub shortfalls: Vec<CapacityShortfall>,
    pub consistency: Vec<ConsistencyIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// No findings recorded
    pub fn is_clean(&self) -> bool {
        self.shortfalls.is_empty() && self.consistency.is_empty()
    }

    pub fn record_shortfall(&mut self, shortfall: CapacityShortfall) {
        self.shortfalls.push(shortfall);
    }

    pub fn record_consistency(&mut self, issue: ConsistencyIssue) {
        self.consistency.push(issue);
    }
}
