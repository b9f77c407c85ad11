// ==========================================
// Retail standard assortment engine - assortment cutoff
// ==========================================
// Responsibility: final rating cutoff per (store, category)
// Input: ranked items + per-category slot budgets
// Output: assortment rows + consistency issues
// ==========================================
// Pure comparison: is_assort = final_rank <= prod_count.
// final_rank is unique per partition so no tie handling is
// needed here. A partition with ranked items but no budget
// row is a reportable inconsistency, never a silent zero.
// ==========================================

use crate::domain::assortment::AssortmentRow;
use crate::domain::item::RankedItem;
use crate::engine::diagnostics::ConsistencyIssue;
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// AssortmentCutoff
// ==========================================
pub struct AssortmentCutoff {
    // Stateless engine, no dependencies to inject
}

impl AssortmentCutoff {
    /// Constructor
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // Core method
    // ==========================================

    /// Mark the top-ranked items of every (store, category) partition
    ///
    /// Partitions whose budget row is missing are skipped and reported.
    ///
    /// # Arguments
    /// - `ranked`: ranked items, any order
    /// - `prod_counts`: slot budget per (store, category)
    ///
    /// # Returns
    /// (assortment rows in ranked order, consistency issues)
    #[instrument(skip(self, ranked, prod_counts), fields(ranked_count = ranked.len()))]
    pub fn cutoff(
        &self,
        ranked: &[RankedItem],
        prod_counts: &BTreeMap<(String, String), u32>,
    ) -> (Vec<AssortmentRow>, Vec<ConsistencyIssue>) {
        let mut rows = Vec::with_capacity(ranked.len());
        let mut missing: BTreeMap<(String, String), usize> = BTreeMap::new();

        for item in ranked {
            match prod_counts.get(&item.group_key()) {
                Some(&budget) => rows.push(AssortmentRow {
                    store: item.store.clone(),
                    item_id: item.item_id.clone(),
                    category: item.category.clone(),
                    final_rank: item.final_rank,
                    is_assort: item.final_rank <= budget,
                }),
                None => {
                    *missing.entry(item.group_key()).or_insert(0) += 1;
                }
            }
        }

        let issues = missing
            .into_iter()
            .map(|((store, category), ranked_items)| ConsistencyIssue {
                store,
                category,
                ranked_items,
            })
            .collect();

        (rows, issues)
    }
}

// ==========================================
// Default trait implementation
// ==========================================
impl Default for AssortmentCutoff {
    fn default() -> Self {
        Self::new()
    }
}
