// ==========================================
// Retail standard assortment engine - core error types
// ==========================================
// Tool: thiserror derive macro
// Schema errors are fatal and abort the run before
// any allocation happens; recoverable findings travel
// in engine::Diagnostics instead.
// ==========================================

use thiserror::Error;

/// Core engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== Schema errors (fatal) =====
    #[error("unknown category: item {item_id} in store {store} references category {category} with no equipment mapping")]
    UnknownCategory {
        store: String,
        item_id: String,
        category: String,
    },

    #[error("missing quota: store {store}, equipment type {equipment_type} has sales rows but no capacity row")]
    MissingQuota {
        store: String,
        equipment_type: String,
    },

    #[error("duplicate quota: store {store}, equipment type {equipment_type} appears more than once in the capacity table")]
    DuplicateQuota {
        store: String,
        equipment_type: String,
    },

    #[error("duplicate category mapping: category {category} is mapped to more than one equipment type")]
    DuplicateCategoryMapping { category: String },

    // ===== Generic errors =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type EngineResult<T> = Result<T, EngineError>;
