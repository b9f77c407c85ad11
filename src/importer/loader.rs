// ==========================================
// Retail standard assortment engine - CSV input loader
// ==========================================
// Responsibility: read the three input tables into the domain
// model. Numeric cells accept both decimal point and decimal
// comma; the field delimiter comes from configuration.
// ==========================================
// source_row is stamped from the 0-based data-row position at
// ingestion and is the only tie-break key downstream, so load
// order is part of the contract.
// ==========================================

use crate::config::IoConfig;
use crate::domain::capacity::EquipmentQuota;
use crate::domain::dataset::SalesDataset;
use crate::domain::item::ItemSales;
use crate::importer::error::{ImportError, ImportResult};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

// ==========================================
// Raw row shapes (numerics kept as text for decimal-comma handling)
// ==========================================

#[derive(Debug, Deserialize)]
struct RawSalesRow {
    store: String,
    item_id: String,
    category: String,
    avg_units: String,
    avg_revenue: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct RawCapacityRow {
    store: String,
    equipment_type: String,
    quota: u32,
}

#[derive(Debug, Deserialize)]
struct RawMappingRow {
    category: String,
    equipment_type: String,
}

// ==========================================
// DatasetLoader
// ==========================================
pub struct DatasetLoader {
    delimiter: u8,
}

impl DatasetLoader {
    /// Constructor
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    // ==========================================
    // Core methods
    // ==========================================

    /// Load all three input tables into a validated-shape dataset
    #[instrument(skip(self, io))]
    pub fn load_dataset(&self, io: &IoConfig) -> ImportResult<SalesDataset> {
        let items = self.load_sales(&io.sales_path)?;
        let quotas = self.load_quotas(&io.capacity_path)?;
        let mappings = self.load_mappings(&io.category_equipment_path)?;

        info!(
            items = items.len(),
            quotas = quotas.len(),
            mappings = mappings.len(),
            "input tables loaded"
        );

        SalesDataset::from_tables(items, quotas, mappings)
            .map_err(|e| ImportError::Other(e.into()))
    }

    /// Load the sales table: store;item_id;category;avg_units;avg_revenue;margin
    pub fn load_sales(&self, path: &Path) -> ImportResult<Vec<ItemSales>> {
        let mut reader = self.open(path)?;
        let mut items = Vec::new();

        for (row_index, record) in reader.deserialize::<RawSalesRow>().enumerate() {
            let raw = record?;
            items.push(ItemSales {
                store: raw.store,
                item_id: raw.item_id,
                category: raw.category,
                avg_units: parse_decimal(&raw.avg_units, row_index, "avg_units")?,
                avg_revenue: parse_decimal(&raw.avg_revenue, row_index, "avg_revenue")?,
                margin: parse_decimal(&raw.margin, row_index, "margin")?,
                source_row: row_index,
            });
        }

        debug!(path = %path.display(), rows = items.len(), "sales table loaded");
        Ok(items)
    }

    /// Load the capacity table: store;equipment_type;quota
    pub fn load_quotas(&self, path: &Path) -> ImportResult<Vec<EquipmentQuota>> {
        let mut reader = self.open(path)?;
        let mut quotas = Vec::new();

        for record in reader.deserialize::<RawCapacityRow>() {
            let raw = record?;
            quotas.push(EquipmentQuota {
                store: raw.store,
                equipment_type: raw.equipment_type,
                quota: raw.quota,
            });
        }

        debug!(path = %path.display(), rows = quotas.len(), "capacity table loaded");
        Ok(quotas)
    }

    /// Load the mapping table: category;equipment_type
    pub fn load_mappings(&self, path: &Path) -> ImportResult<Vec<(String, String)>> {
        let mut reader = self.open(path)?;
        let mut mappings = Vec::new();

        for record in reader.deserialize::<RawMappingRow>() {
            let raw = record?;
            mappings.push((raw.category, raw.equipment_type));
        }

        debug!(path = %path.display(), rows = mappings.len(), "mapping table loaded");
        Ok(mappings)
    }

    // ==========================================
    // Internal helpers
    // ==========================================

    fn open(&self, path: &Path) -> ImportResult<csv::Reader<std::fs::File>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(path)?)
    }
}

/// Parse a numeric cell, accepting both "1.5" and "1,5"
fn parse_decimal(text: &str, row: usize, field: &str) -> ImportResult<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .map_err(|e| ImportError::TypeConversion {
            row,
            field: field.to_string(),
            message: format!("'{text}': {e}"),
        })
}
