// ==========================================
// Retail standard assortment engine - domain layer
// ==========================================
// Entities and derived row types. No data access logic,
// no engine logic.
// ==========================================

pub mod assortment;
pub mod capacity;
pub mod dataset;
pub mod item;

// Re-export core types
pub use assortment::{AssortmentRow, ProdCount, StandardFlag, StandardSet};
pub use capacity::{CategoryEquipmentMap, EquipmentQuota};
pub use dataset::SalesDataset;
pub use item::{ItemSales, RankedItem};
