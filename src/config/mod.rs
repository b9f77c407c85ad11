// ==========================================
// Retail standard assortment engine - configuration
// ==========================================
// One serde struct, loadable from a JSON file. Every field
// has a default so the binary runs without a config file.
// ==========================================

use crate::engine::ranking::RankWeights;
use crate::engine::strategy::AllocationStrategy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// EngineConfig - full run configuration
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which allocation policy fills the equipment quotas
    #[serde(default)]
    pub strategy: AllocationStrategy,

    /// Blended-score coefficients for the ranking engine
    #[serde(default)]
    pub rank_weights: RankWeights,

    /// Qualifying-sales threshold for the rank-rescale first pass
    /// (average daily units must be strictly above this value)
    #[serde(default)]
    pub min_avg_units: f64,

    /// File boundary settings
    #[serde(default)]
    pub io: IoConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: AllocationStrategy::default(),
            rank_weights: RankWeights::default(),
            min_avg_units: 0.0,
            io: IoConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// - `path`: JSON file with any subset of the fields
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("cannot parse config file {}", path.display()))?;
        config.io.delimiter_byte()?;
        Ok(config)
    }
}

// ==========================================
// IoConfig - file boundary settings
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Sales table: store;item_id;category;avg_units;avg_revenue;margin
    #[serde(default = "default_sales_path")]
    pub sales_path: PathBuf,

    /// Capacity table: store;equipment_type;quota
    #[serde(default = "default_capacity_path")]
    pub capacity_path: PathBuf,

    /// Mapping table: category;equipment_type
    #[serde(default = "default_category_equipment_path")]
    pub category_equipment_path: PathBuf,

    /// Directory receiving the four output tables
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Field delimiter for input and output files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_sales_path() -> PathBuf {
    PathBuf::from("static/avg_sales.csv")
}

fn default_capacity_path() -> PathBuf {
    PathBuf::from("static/capacity.csv")
}

fn default_category_equipment_path() -> PathBuf {
    PathBuf::from("static/cat_equip.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_delimiter() -> char {
    ';'
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            sales_path: default_sales_path(),
            capacity_path: default_capacity_path(),
            category_equipment_path: default_category_equipment_path(),
            output_dir: default_output_dir(),
            delimiter: default_delimiter(),
        }
    }
}

impl IoConfig {
    /// The csv crate takes a single-byte delimiter
    ///
    /// # Errors
    /// A non-ASCII delimiter cannot be narrowed to one byte
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        anyhow::ensure!(
            self.delimiter.is_ascii(),
            "delimiter must be a single ASCII character, got {:?}",
            self.delimiter
        );
        Ok(self.delimiter as u8)
    }
}
