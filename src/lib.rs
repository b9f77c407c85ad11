// ==========================================
// Retail standard assortment engine - library root
// ==========================================
// Builds the standard assortment of a retail chain: ranks
// item sales per store and category, fills per-equipment
// slot quotas with one of two allocation strategies, and
// cuts the final assortment off at the granted budgets.
// ==========================================
// Module roster:
// - config:   run configuration (JSON)
// - domain:   input and output tables
// - engine:   ranking, allocation, cutoff, orchestration
// - error:    fatal engine errors
// - importer: CSV boundary in both directions
// - logging:  tracing subscriber setup
// ==========================================

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod importer;
pub mod logging;

pub use config::EngineConfig;
pub use engine::{AssortmentOrchestrator, AssortmentRun};
pub use error::{EngineError, EngineResult};

/// Crate version, from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name used in log banners
pub const APP_NAME: &str = "assort-engine";
