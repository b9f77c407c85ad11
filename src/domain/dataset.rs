// ==========================================
// Retail standard assortment engine - input dataset
// ==========================================
// Fully materialized, read-only input tables. Schema
// validation runs before any allocation; a violated
// relationship aborts the whole run.
// ==========================================

use crate::domain::capacity::{CategoryEquipmentMap, EquipmentQuota};
use crate::domain::item::ItemSales;
use crate::error::{EngineError, EngineResult};
use std::collections::HashSet;

// ==========================================
// SalesDataset - the three input tables
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    pub items: Vec<ItemSales>,
    pub quotas: Vec<EquipmentQuota>,
    pub category_equipment: CategoryEquipmentMap,
}

impl SalesDataset {
    /// Assemble a dataset from raw table rows
    ///
    /// # Arguments
    /// - `items`: sales rows (ingestion order preserved)
    /// - `quotas`: capacity rows
    /// - `mappings`: (category, equipment_type) pairs
    ///
    /// # Errors
    /// `EngineError::DuplicateCategoryMapping` when a category appears
    /// twice in the mapping table
    pub fn from_tables(
        items: Vec<ItemSales>,
        quotas: Vec<EquipmentQuota>,
        mappings: Vec<(String, String)>,
    ) -> EngineResult<Self> {
        let mut category_equipment = CategoryEquipmentMap::new();
        for (category, equipment_type) in mappings {
            if !category_equipment.insert(category.clone(), equipment_type) {
                return Err(EngineError::DuplicateCategoryMapping { category });
            }
        }

        Ok(Self {
            items,
            quotas,
            category_equipment,
        })
    }

    // ==========================================
    // Schema validation
    // ==========================================

    /// Validate the relationships the allocation engine relies on
    ///
    /// Checks, in order:
    /// 1. every capacity row is unique per (store, equipment type)
    /// 2. every item's category has an equipment mapping
    /// 3. every (store, equipment type) implied by the items has a quota row
    ///
    /// # Errors
    /// The first violation found, as a fatal `EngineError`
    pub fn validate(&self) -> EngineResult<()> {
        // 1. duplicate quota rows
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for quota in &self.quotas {
            if !seen.insert((quota.store.as_str(), quota.equipment_type.as_str())) {
                return Err(EngineError::DuplicateQuota {
                    store: quota.store.clone(),
                    equipment_type: quota.equipment_type.clone(),
                });
            }
        }

        // 2. unknown categories, 3. missing quota rows
        for item in &self.items {
            let equipment_type = self
                .category_equipment
                .equipment_for(&item.category)
                .ok_or_else(|| EngineError::UnknownCategory {
                    store: item.store.clone(),
                    item_id: item.item_id.clone(),
                    category: item.category.clone(),
                })?;

            if !seen.contains(&(item.store.as_str(), equipment_type)) {
                return Err(EngineError::MissingQuota {
                    store: item.store.clone(),
                    equipment_type: equipment_type.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Capacity rows in deterministic (store, equipment type) order
    pub fn quotas_sorted(&self) -> Vec<&EquipmentQuota> {
        let mut sorted: Vec<&EquipmentQuota> = self.quotas.iter().collect();
        sorted.sort_by(|a, b| {
            (a.store.as_str(), a.equipment_type.as_str())
                .cmp(&(b.store.as_str(), b.equipment_type.as_str()))
        });
        sorted
    }
}
