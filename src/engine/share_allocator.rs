// ==========================================
// Retail standard assortment engine - cumulative-share allocator
// ==========================================
// Responsibility: quota-bounded selection for one
//                 (store, equipment type) group
// Input: ranked items of the group + the slot quota
// Output: GroupAllocation (selection, per-category counts, shortfall)
// ==========================================
// The priority key is the running cumulative revenue share
// inside each category. It restarts low at every category's
// best item, so the global ascending merge interleaves picks
// proportionally to category revenue weight instead of letting
// one high-volume category exhaust the quota.
// ==========================================

use crate::domain::capacity::EquipmentQuota;
use crate::domain::item::RankedItem;
use crate::engine::allocation::{GroupAllocation, SelectedItem};
use crate::engine::diagnostics::CapacityShortfall;
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// ShareEntry - one item's share of the group revenue
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ShareEntry {
    pub group_index: usize,   // index into the group slice
    pub category: String,
    pub part_sales: f64,      // item revenue / group revenue
    pub cum_share: f64,       // running sum inside the category
}

// ==========================================
// ShareAllocator
// ==========================================
pub struct ShareAllocator {
    // Stateless engine, no dependencies to inject
}

impl ShareAllocator {
    /// Constructor
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // Core methods
    // ==========================================

    /// Fill the group's quota from the global cumulative-share order
    ///
    /// 1) compute part_sales against the group's revenue total
    /// 2) per category, accumulate cum_share along ascending sales_pcs_rank
    /// 3) merge all categories by cum_share ascending (ties: ingestion index)
    /// 4) flag the first `quota` items as standard
    ///
    /// No redistribution happens here: the selection is capacity-bounded
    /// by construction. Under-supply (fewer items than quota) is reported
    /// as a shortfall alongside the full selection.
    ///
    /// # Arguments
    /// - `quota`: the group's slot quota
    /// - `group`: ranked items of one (store, equipment type) group
    #[instrument(skip(self, group), fields(
        store = %quota.store,
        equipment_type = %quota.equipment_type,
        quota = quota.quota,
        group_size = group.len()
    ))]
    pub fn allocate(&self, quota: &EquipmentQuota, group: &[RankedItem]) -> GroupAllocation {
        let entries = self.compute_cumulative_shares(group);

        // Global merge: cum_share ascending, ingestion index on ties
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            entries[a]
                .cum_share
                .total_cmp(&entries[b].cum_share)
                .then_with(|| {
                    group[entries[a].group_index]
                        .source_row
                        .cmp(&group[entries[b].group_index].source_row)
                })
        });

        // Every category present in the group gets a count, zero included
        let mut prod_counts: BTreeMap<String, u32> = BTreeMap::new();
        for item in group {
            prod_counts.entry(item.category.clone()).or_insert(0);
        }

        let mut selected = Vec::with_capacity(order.len().min(quota.quota as usize));
        for &entry_pos in &order {
            if !quota.has_room(selected.len() as u32) {
                break;
            }
            let item = &group[entries[entry_pos].group_index];
            selected.push(SelectedItem {
                store: item.store.clone(),
                item_id: item.item_id.clone(),
            });
            *prod_counts.entry(item.category.clone()).or_insert(0) += 1;
        }

        let supplied = selected.len() as u32;
        let missing = quota.remaining_slots(supplied);
        let shortfall = if missing > 0 {
            Some(CapacityShortfall {
                store: quota.store.clone(),
                equipment_type: quota.equipment_type.clone(),
                quota: quota.quota,
                supplied,
                shortfall: missing,
            })
        } else {
            None
        };

        GroupAllocation {
            selected,
            prod_counts,
            shortfall,
        }
    }

    /// Cumulative revenue shares, per category, along ascending sales_pcs_rank
    ///
    /// A zero or negative group revenue total degrades every part_sales
    /// to 0.0; ordering then falls back to the ingestion index.
    ///
    /// # Returns
    /// Entries grouped by category (ascending), best-ranked item first
    pub fn compute_cumulative_shares(&self, group: &[RankedItem]) -> Vec<ShareEntry> {
        let total_revenue: f64 = group.iter().map(|item| item.avg_revenue).sum();

        // Partition by category; BTreeMap keeps output order deterministic
        let mut by_category: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, item) in group.iter().enumerate() {
            by_category.entry(item.category.as_str()).or_default().push(idx);
        }

        let mut entries = Vec::with_capacity(group.len());
        for members in by_category.values_mut() {
            members.sort_by(|&a, &b| {
                group[a]
                    .sales_pcs_rank
                    .cmp(&group[b].sales_pcs_rank)
                    .then_with(|| group[a].source_row.cmp(&group[b].source_row))
            });

            let mut cum_share = 0.0;
            for &idx in members.iter() {
                let part_sales = if total_revenue > 0.0 {
                    group[idx].avg_revenue / total_revenue
                } else {
                    0.0
                };
                cum_share += part_sales;
                entries.push(ShareEntry {
                    group_index: idx,
                    category: group[idx].category.clone(),
                    part_sales,
                    cum_share,
                });
            }
        }
        entries
    }
}

// ==========================================
// Default trait implementation
// ==========================================
impl Default for ShareAllocator {
    fn default() -> Self {
        Self::new()
    }
}
