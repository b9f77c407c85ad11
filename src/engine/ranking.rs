// ==========================================
// Retail standard assortment engine - ranking engine
// ==========================================
// Responsibility: per-(store, category) ordinal ranks on the
//                 independent sales criteria plus the blended score
// Input: sales rows (ingestion order preserved)
// Output: RankedItem rows, final_rank ascending inside each partition
// ==========================================
// ROW_NUMBER semantics throughout: ties are broken by the
// ingestion index, so every rank column is a permutation of
// 1..N inside its partition.
// ==========================================

use crate::domain::item::{ItemSales, RankedItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// RankWeights - blended score coefficients
// ==========================================
// weighted_score = units_weight * sales_pcs_rank
//                + revenue_weight * sales_rub_rank
//                + margin_weight * margin_rank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    #[serde(default = "default_units_weight")]
    pub units_weight: f64,
    #[serde(default = "default_revenue_weight")]
    pub revenue_weight: f64,
    #[serde(default = "default_margin_weight")]
    pub margin_weight: f64,
}

fn default_units_weight() -> f64 {
    0.8
}

fn default_revenue_weight() -> f64 {
    1.0
}

fn default_margin_weight() -> f64 {
    0.5
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            units_weight: default_units_weight(),
            revenue_weight: default_revenue_weight(),
            margin_weight: default_margin_weight(),
        }
    }
}

// ==========================================
// RankingEngine
// ==========================================
pub struct RankingEngine {
    weights: RankWeights,
}

impl RankingEngine {
    /// Constructor
    ///
    /// # Arguments
    /// - `weights`: blended score coefficients
    pub fn new(weights: RankWeights) -> Self {
        Self { weights }
    }

    // ==========================================
    // Core method
    // ==========================================

    /// Rank every (store, category) partition
    ///
    /// Per partition:
    /// 1) sales_pcs_rank: position by avg_units descending
    /// 2) sales_rub_rank: position by avg_revenue descending
    /// 3) margin_rank: position by margin descending
    /// 4) weighted_score, then final_rank by weighted_score ascending
    ///
    /// Empty partitions produce no rows. Output is ordered by
    /// (store, category, final_rank).
    ///
    /// # Arguments
    /// - `items`: sales rows
    ///
    /// # Returns
    /// One RankedItem per input row
    #[instrument(skip(self, items), fields(items_count = items.len()))]
    pub fn rank(&self, items: &[ItemSales]) -> Vec<RankedItem> {
        // Partition by (store, category); BTreeMap keeps group order deterministic
        let mut groups: BTreeMap<(String, String), Vec<usize>> = BTreeMap::new();
        for (idx, item) in items.iter().enumerate() {
            groups.entry(item.group_key()).or_default().push(idx);
        }

        let mut ranked = Vec::with_capacity(items.len());
        for members in groups.values() {
            ranked.extend(self.rank_partition(items, members));
        }
        ranked
    }

    /// Rank one (store, category) partition
    fn rank_partition(&self, items: &[ItemSales], members: &[usize]) -> Vec<RankedItem> {
        let pcs_ranks = ordinal_ranks(items, members, |i| i.avg_units);
        let rub_ranks = ordinal_ranks(items, members, |i| i.avg_revenue);
        let margin_ranks = ordinal_ranks(items, members, |i| i.margin);

        let scores: Vec<f64> = (0..members.len())
            .map(|pos| {
                self.weights.units_weight * f64::from(pcs_ranks[pos])
                    + self.weights.revenue_weight * f64::from(rub_ranks[pos])
                    + self.weights.margin_weight * f64::from(margin_ranks[pos])
            })
            .collect();

        // final_rank: weighted_score ascending, ingestion index breaks ties
        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .total_cmp(&scores[b])
                .then_with(|| items[members[a]].source_row.cmp(&items[members[b]].source_row))
        });

        let mut rows = Vec::with_capacity(members.len());
        for (rank_pos, &pos) in order.iter().enumerate() {
            let item = &items[members[pos]];
            rows.push(RankedItem {
                store: item.store.clone(),
                item_id: item.item_id.clone(),
                category: item.category.clone(),
                avg_units: item.avg_units,
                avg_revenue: item.avg_revenue,
                margin: item.margin,
                sales_pcs_rank: pcs_ranks[pos],
                sales_rub_rank: rub_ranks[pos],
                margin_rank: margin_ranks[pos],
                weighted_score: scores[pos],
                final_rank: (rank_pos + 1) as u32,
                source_row: item.source_row,
            });
        }
        rows
    }
}

// ==========================================
// Default trait implementation
// ==========================================
impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(RankWeights::default())
    }
}

/// 1-based positions of `members` ordered by `metric` descending,
/// ingestion index ascending on ties; aligned with `members`
fn ordinal_ranks<F>(items: &[ItemSales], members: &[usize], metric: F) -> Vec<u32>
where
    F: Fn(&ItemSales) -> f64,
{
    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by(|&a, &b| {
        metric(&items[members[b]])
            .total_cmp(&metric(&items[members[a]]))
            .then_with(|| items[members[a]].source_row.cmp(&items[members[b]].source_row))
    });

    let mut ranks = vec![0u32; members.len()];
    for (rank_pos, &pos) in order.iter().enumerate() {
        ranks[pos] = (rank_pos + 1) as u32;
    }
    ranks
}
