// ==========================================
// Retail standard assortment engine - file boundary
// ==========================================
// CSV in, CSV + JSON summary out. Everything between the two
// is the engine's concern, not this module's.
// ==========================================

pub mod error;
pub mod exporter;
pub mod loader;

pub use error::{ImportError, ImportResult};
pub use exporter::RunExporter;
pub use loader::DatasetLoader;
