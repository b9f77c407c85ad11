// ==========================================
// Retail standard assortment engine - output domain model
// ==========================================
// Derived tables handed untouched to the persistence
// collaborator. is_standard and is_assort are independent
// passes over different score columns; no subset relation
// between them is enforced.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ProdCount - slots granted per (store, category)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProdCount {
    pub store: String,
    pub category: String,
    pub prod_count: u32,
}

// ==========================================
// StandardFlag - per-item standard membership
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardFlag {
    pub store: String,
    pub item_id: String,
    pub is_standard: bool,
}

// ==========================================
// StandardSet - full standard-selection output
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardSet {
    pub prod_counts: Vec<ProdCount>,
    pub flags: Vec<StandardFlag>,
}

impl StandardSet {
    /// Total slots granted across every (store, category)
    pub fn total_slots(&self) -> u32 {
        self.prod_counts.iter().map(|c| c.prod_count).sum()
    }

    /// Number of items flagged as standard
    pub fn standard_item_count(&self) -> usize {
        self.flags.iter().filter(|f| f.is_standard).count()
    }
}

// ==========================================
// AssortmentRow - final rating-cutoff output
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssortmentRow {
    pub store: String,
    pub item_id: String,
    pub category: String,
    pub final_rank: u32,
    pub is_assort: bool,
}
