// ==========================================
// Retail standard assortment engine - rank-and-rescale allocator
// ==========================================
// Responsibility: quota-bounded per-category slot counts for one
//                 (store, equipment type) group
// Input: ranked items of the group + the slot quota
// Output: GroupAllocation (selection, per-category counts, shortfall)
// ==========================================
// First pass fills the quota greedily along the ordinal rank key
// over qualifying items only. When that undershoots the quota the
// raw counts are rescaled by floor(quota * raw / T) and the rounding
// remainder goes to the largest categories first. Counts are capped
// by each category's distinct-item supply, so the rescaled budget
// can never promise more products than the category holds.
// ==========================================

use crate::domain::capacity::EquipmentQuota;
use crate::domain::item::RankedItem;
use crate::engine::allocation::{GroupAllocation, SelectedItem};
use crate::engine::diagnostics::CapacityShortfall;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// QuotaRedistributor
// ==========================================
pub struct QuotaRedistributor {
    // Items must sell strictly more than this many average daily
    // units to qualify for the first-pass fill
    min_avg_units: f64,
}

impl QuotaRedistributor {
    /// Constructor
    ///
    /// # Arguments
    /// - `min_avg_units`: qualifying-sales threshold (0.0 = any positive sales)
    pub fn new(min_avg_units: f64) -> Self {
        Self { min_avg_units }
    }

    // ==========================================
    // Core method
    // ==========================================

    /// Allocate the group's quota as per-category slot counts
    ///
    /// 1) greedy fill: qualifying items ordered by sales_pcs_rank
    ///    ascending (ties: ingestion index), first `quota` flagged
    ///    standard; raw counts per category, total T
    /// 2) T == quota: done
    /// 3) T < quota: rescale each raw count to floor(quota * raw / T),
    ///    capped by the category's distinct-item supply
    /// 4) remainder goes +1 at a time to categories ordered by rescaled
    ///    count descending, category id ascending on ties, cycling while
    ///    any category still has supply headroom
    /// 5) if total supply < quota the residue is surfaced as a shortfall
    ///
    /// The standard flags always come from the first-pass fill; only the
    /// counts are redistributed.
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
        // Distinct-item supply per category, and zero-initialized counts
        let mut supply: BTreeMap<&str, u32> = BTreeMap::new();
        for item in group {
            *supply.entry(item.category.as_str()).or_insert(0) += 1;
        }
        let mut counts: BTreeMap<String, u32> =
            supply.keys().map(|c| (c.to_string(), 0)).collect();

        // 1. Greedy fill along the ordinal rank key
        let mut qualifying: Vec<usize> = (0..group.len())
            .filter(|&idx| group[idx].avg_units > self.min_avg_units)
            .collect();
        qualifying.sort_by(|&a, &b| {
            group[a]
                .sales_pcs_rank
                .cmp(&group[b].sales_pcs_rank)
                .then_with(|| group[a].source_row.cmp(&group[b].source_row))
        });

        let mut selected = Vec::with_capacity(qualifying.len().min(quota.quota as usize));
        for &idx in &qualifying {
            if !quota.has_room(selected.len() as u32) {
                break;
            }
            let item = &group[idx];
            selected.push(SelectedItem {
                store: item.store.clone(),
                item_id: item.item_id.clone(),
            });
            *counts.get_mut(&item.category).expect("category seen in supply") += 1;
        }

        let assigned_total: u32 = counts.values().sum();

        // 2./3./4. Redistribute when the raw counts undershoot the quota
        if assigned_total > 0 && quota.has_room(assigned_total) {
            debug!(
                assigned_total,
                quota = quota.quota,
                "raw counts undershoot quota, rescaling"
            );
            rescale_counts(&mut counts, &supply, assigned_total, quota.quota);
        }

        let supplied: u32 = counts.values().sum();
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
            prod_counts: counts,
            shortfall,
        }
    }
}

// ==========================================
// Default trait implementation
// ==========================================
impl Default for QuotaRedistributor {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ==========================================
// Rescale helper
// ==========================================

/// Rescale raw counts to floor(quota * raw / T), cap by supply and hand
/// the remainder to the largest rescaled categories first (ties: category
/// id ascending). The ordering is fixed once, on the rescaled counts.
fn rescale_counts(
    counts: &mut BTreeMap<String, u32>,
    supply: &BTreeMap<&str, u32>,
    assigned_total: u32,
    quota: u32,
) {
    for (category, count) in counts.iter_mut() {
        let scaled = (u64::from(quota) * u64::from(*count) / u64::from(assigned_total)) as u32;
        *count = scaled.min(supply[category.as_str()]);
    }

    let mut order: Vec<String> = counts.keys().cloned().collect();
    order.sort_by(|a, b| counts[b].cmp(&counts[a]).then_with(|| a.cmp(b)));

    let mut remainder = quota.saturating_sub(counts.values().sum());
    while remainder > 0 {
        let mut progressed = false;
        for category in &order {
            if remainder == 0 {
                break;
            }
            let count = counts.get_mut(category).expect("ordering built from counts");
            if *count < supply[category.as_str()] {
                *count += 1;
                remainder -= 1;
                progressed = true;
            }
        }
        if !progressed {
            // Total supply below quota; the caller reports the residue
            break;
        }
    }
}
