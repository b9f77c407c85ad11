// ==========================================
// Retail standard assortment engine - binary entry point
// ==========================================
// Usage: assort-engine [config.json]
// Without an argument every setting falls back to defaults.
// ==========================================

use assort_engine::config::EngineConfig;
use assort_engine::engine::AssortmentOrchestrator;
use assort_engine::importer::{DatasetLoader, RunExporter};
use assort_engine::{logging, APP_NAME, VERSION};
use std::path::Path;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    logging::init();
    info!("{} v{} starting", APP_NAME, VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(Path::new(&path))?,
        None => EngineConfig::default(),
    };
    info!(
        strategy = config.strategy.as_str(),
        min_avg_units = config.min_avg_units,
        "configuration resolved"
    );

    let delimiter = config.io.delimiter_byte()?;
    let loader = DatasetLoader::new(delimiter);
    let dataset = loader.load_dataset(&config.io)?;

    let orchestrator = AssortmentOrchestrator::new(
        config.strategy,
        config.rank_weights,
        config.min_avg_units,
    );
    let run = orchestrator.run(&dataset)?;

    for shortfall in &run.diagnostics.shortfalls {
        warn!(
            store = %shortfall.store,
            equipment_type = %shortfall.equipment_type,
            quota = shortfall.quota,
            supplied = shortfall.supplied,
            "capacity shortfall"
        );
    }
    for issue in &run.diagnostics.consistency {
        warn!(
            store = %issue.store,
            category = %issue.category,
            ranked_items = issue.ranked_items,
            "ranked items without a slot budget"
        );
    }

    let exporter = RunExporter::new(delimiter);
    let written = exporter.export(&run, &config.io.output_dir)?;

    info!(
        run_id = %run.run_id,
        standard_items = run.standard.standard_item_count(),
        assortment_rows = run.assortment.len(),
        files = written.len(),
        "run complete"
    );
    Ok(())
}
