// ==========================================
// Retail standard assortment engine - capacity domain model
// ==========================================
// Hard constraint: the slot quota per (store, equipment type)
// bounds every selection. Quota is an integer number of
// product slots, not a score.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

// ==========================================
// EquipmentQuota - slot quota per (store, equipment type)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentQuota {
    pub store: String,            // store code
    pub equipment_type: String,   // equipment type code
    pub quota: u32,               // maximum number of item slots
}

impl EquipmentQuota {
    /// Whether one more item fits given the slots already assigned
    pub fn has_room(&self, assigned: u32) -> bool {
        assigned < self.quota
    }

    /// Slots still unassigned
    pub fn remaining_slots(&self, assigned: u32) -> u32 {
        self.quota.saturating_sub(assigned)
    }
}

// ==========================================
// CategoryEquipmentMap - static cat4 -> equipment mapping
// ==========================================
// Many categories map to one equipment type; a category maps
// to exactly one equipment type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryEquipmentMap {
    mapping: HashMap<String, String>,
}

impl CategoryEquipmentMap {
    pub fn new() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }

    /// Register a mapping
    ///
    /// A duplicate category is rejected and the original mapping
    /// is kept untouched.
    ///
    /// # Returns
    /// - `true`: inserted
    /// - `false`: the category was already mapped (duplicate)
    pub fn insert(&mut self, category: impl Into<String>, equipment_type: impl Into<String>) -> bool {
        match self.mapping.entry(category.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(equipment_type.into());
                true
            }
        }
    }

    /// Equipment type owning the category, if mapped
    pub fn equipment_for(&self, category: &str) -> Option<&str> {
        self.mapping.get(category).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
