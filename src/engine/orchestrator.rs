// ==========================================
// Retail standard assortment engine - run orchestrator
// ==========================================
// Responsibility: drive one full selection run
// Pipeline: validate -> rank -> allocate per equipment group
//           -> flag standard items -> rating cutoff
// ==========================================
// Groups are processed in sorted (store, equipment type)
// order, so two runs over the same dataset produce identical
// output apart from run_id and timestamp.
// ==========================================

use crate::domain::assortment::{AssortmentRow, ProdCount, StandardFlag, StandardSet};
use crate::domain::dataset::SalesDataset;
use crate::domain::item::RankedItem;
use crate::engine::allocation::{GroupAllocation, SelectedItem};
use crate::engine::cutoff::AssortmentCutoff;
use crate::engine::diagnostics::{CapacityShortfall, Diagnostics};
use crate::engine::quota_redistributor::QuotaRedistributor;
use crate::engine::ranking::{RankWeights, RankingEngine};
use crate::engine::share_allocator::ShareAllocator;
use crate::engine::strategy::AllocationStrategy;
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// AssortmentRun - complete output of one run
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssortmentRun {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub strategy: AllocationStrategy,
    /// Per-item ratings, ordered by (store, category, final_rank)
    pub ranked: Vec<RankedItem>,
    /// Slot budgets and standard flags
    pub standard: StandardSet,
    /// Final rating-cutoff rows
    pub assortment: Vec<AssortmentRow>,
    /// Non-fatal findings accumulated during the run
    pub diagnostics: Diagnostics,
}

// ==========================================
// AssortmentOrchestrator
// ==========================================
pub struct AssortmentOrchestrator {
    strategy: AllocationStrategy,
    ranking: RankingEngine,
    share_allocator: ShareAllocator,
    redistributor: QuotaRedistributor,
    cutoff: AssortmentCutoff,
}

impl AssortmentOrchestrator {
    /// Constructor
    ///
    /// # Arguments
    /// - `strategy`: which allocation policy fills the quotas
    /// - `weights`: blended-score coefficients for ranking
    /// - `min_avg_units`: qualifying threshold for the rank-rescale pass
    pub fn new(strategy: AllocationStrategy, weights: RankWeights, min_avg_units: f64) -> Self {
        Self {
            strategy,
            ranking: RankingEngine::new(weights),
            share_allocator: ShareAllocator::new(),
            redistributor: QuotaRedistributor::new(min_avg_units),
            cutoff: AssortmentCutoff::new(),
        }
    }

    // ==========================================
    // Core method
    // ==========================================

    /// Run the full selection over a dataset
    ///
    /// # Arguments
    /// - `dataset`: validated-on-entry input tables
    ///
    /// # Errors
    /// Schema violations from `SalesDataset::validate`; everything
    /// non-fatal lands in the returned diagnostics instead
    #[instrument(skip(self, dataset), fields(
        strategy = self.strategy.as_str(),
        items = dataset.items.len(),
        quotas = dataset.quotas.len()
    ))]
    pub fn run(&self, dataset: &SalesDataset) -> EngineResult<AssortmentRun> {
        dataset.validate()?;

        info!("Step 1: ranking {} sales rows", dataset.items.len());
        let ranked = self.ranking.rank(&dataset.items);

        // Regroup ranked items by (store, equipment type) for allocation
        let mut groups: BTreeMap<(String, String), Vec<RankedItem>> = BTreeMap::new();
        for item in &ranked {
            let equipment_type = self
                .group_equipment(dataset, &item.category)?
                .to_string();
            groups
                .entry((item.store.clone(), equipment_type))
                .or_default()
                .push(item.clone());
        }

        info!(
            "Step 2: allocating {} equipment groups with strategy {}",
            dataset.quotas.len(),
            self.strategy.as_str()
        );
        let mut diagnostics = Diagnostics::new();
        let mut prod_counts: Vec<ProdCount> = Vec::new();
        let mut selected: HashSet<SelectedItem> = HashSet::new();

        for quota in dataset.quotas_sorted() {
            let key = (quota.store.clone(), quota.equipment_type.clone());
            let group = groups.get(&key).map(Vec::as_slice).unwrap_or(&[]);

            let allocation = if group.is_empty() {
                // No candidate items at all: full-quota shortfall, not an error
                self.record_empty_group(quota.quota, &key, &mut diagnostics);
                continue;
            } else {
                match self.strategy {
                    AllocationStrategy::CumulativeShare => {
                        self.share_allocator.allocate(quota, group)
                    }
                    AllocationStrategy::RankRescale => self.redistributor.allocate(quota, group),
                }
            };

            debug!(
                store = %quota.store,
                equipment_type = %quota.equipment_type,
                granted = allocation.total_slots(),
                quota = quota.quota,
                "group allocated"
            );
            self.collect_group(&quota.store, allocation, &mut prod_counts, &mut selected, &mut diagnostics);
        }

        let flags = Self::build_flags(&ranked, &selected);

        info!("Step 3: rating cutoff over {} ranked items", ranked.len());
        let budget_index: BTreeMap<(String, String), u32> = prod_counts
            .iter()
            .map(|c| ((c.store.clone(), c.category.clone()), c.prod_count))
            .collect();
        let (assortment, issues) = self.cutoff.cutoff(&ranked, &budget_index);
        for issue in issues {
            diagnostics.record_consistency(issue);
        }

        if !diagnostics.is_clean() {
            warn!(
                shortfalls = diagnostics.shortfalls.len(),
                consistency = diagnostics.consistency.len(),
                "run finished with findings"
            );
        }

        Ok(AssortmentRun {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            strategy: self.strategy,
            ranked,
            standard: StandardSet { prod_counts, flags },
            assortment,
            diagnostics,
        })
    }

    // ==========================================
    // Internal helpers
    // ==========================================

    fn group_equipment<'a>(
        &self,
        dataset: &'a SalesDataset,
        category: &str,
    ) -> EngineResult<&'a str> {
        // validate() already checked every category; a miss here is a bug
        dataset
            .category_equipment
            .equipment_for(category)
            .ok_or_else(|| {
                EngineError::InternalError(format!(
                    "category '{category}' lost its equipment mapping after validation"
                ))
            })
    }

    fn record_empty_group(
        &self,
        quota: u32,
        key: &(String, String),
        diagnostics: &mut Diagnostics,
    ) {
        if quota > 0 {
            diagnostics.record_shortfall(CapacityShortfall {
                store: key.0.clone(),
                equipment_type: key.1.clone(),
                quota,
                supplied: 0,
                shortfall: quota,
            });
        }
    }

    fn collect_group(
        &self,
        store: &str,
        allocation: GroupAllocation,
        prod_counts: &mut Vec<ProdCount>,
        selected: &mut HashSet<SelectedItem>,
        diagnostics: &mut Diagnostics,
    ) {
        for (category, prod_count) in allocation.prod_counts {
            prod_counts.push(ProdCount {
                store: store.to_string(),
                category,
                prod_count,
            });
        }
        selected.extend(allocation.selected);
        if let Some(shortfall) = allocation.shortfall {
            diagnostics.record_shortfall(shortfall);
        }
    }

    fn build_flags(ranked: &[RankedItem], selected: &HashSet<SelectedItem>) -> Vec<StandardFlag> {
        ranked
            .iter()
            .map(|item| StandardFlag {
                store: item.store.clone(),
                item_id: item.item_id.clone(),
                is_standard: selected.contains(&SelectedItem {
                    store: item.store.clone(),
                    item_id: item.item_id.clone(),
                }),
            })
            .collect()
    }
}
