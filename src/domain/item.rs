// ==========================================
// Retail standard assortment engine - item domain model
// ==========================================
// Input sales rows and their ranked derivation.
// Immutable inputs: the engine never mutates a loaded
// sales row, it only emits new derived tables.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ItemSales - averaged sales metrics per (store, item)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSales {
    // ===== Identity =====
    pub store: String,       // store code
    pub item_id: String,     // item (SKU) code
    pub category: String,    // cat4 category code

    // ===== Sales metrics =====
    pub avg_units: f64,      // average daily units sold
    pub avg_revenue: f64,    // average daily revenue
    pub margin: f64,         // margin fraction

    // ===== Provenance =====
    // 0-based ingestion index. All rank and selection ties are broken
    // by this key so reruns reproduce ROW_NUMBER semantics exactly.
    pub source_row: usize,
}

impl ItemSales {
    /// Grouping key for rank partitions
    pub fn group_key(&self) -> (String, String) {
        (self.store.clone(), self.category.clone())
    }
}

// ==========================================
// RankedItem - derived view with per-criterion ranks
// ==========================================
// Ranks are 1-based positions inside a (store, category)
// partition; weighted_score is lower-is-better and final_rank
// is a permutation of 1..N per partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    // ===== Identity =====
    pub store: String,
    pub item_id: String,
    pub category: String,

    // ===== Carried metrics =====
    pub avg_units: f64,
    pub avg_revenue: f64,
    pub margin: f64,

    // ===== Ranks =====
    pub sales_pcs_rank: u32,   // rank by avg_units desc
    pub sales_rub_rank: u32,   // rank by avg_revenue desc
    pub margin_rank: u32,      // rank by margin desc
    pub weighted_score: f64,   // blended score, lower is better
    pub final_rank: u32,       // rank by weighted_score asc

    // ===== Provenance =====
    pub source_row: usize,
}

impl RankedItem {
    /// Grouping key for rank partitions
    pub fn group_key(&self) -> (String, String) {
        (self.store.clone(), self.category.clone())
    }
}
