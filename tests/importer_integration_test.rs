// ==========================================
// Retail standard assortment engine - file boundary tests
// ==========================================
// CSV in, full run, CSV + JSON out, all through the public API.
// ==========================================

use assort_engine::config::IoConfig;
use assort_engine::engine::{AllocationStrategy, AssortmentOrchestrator, RankWeights};
use assort_engine::importer::{DatasetLoader, RunExporter};
use std::fs;
use std::path::PathBuf;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn sample_io(dir: &tempfile::TempDir) -> IoConfig {
    IoConfig {
        sales_path: write_file(
            dir,
            "sales.csv",
            "store;item_id;category;avg_units;avg_revenue;margin\n\
             S1;A1;CA;10,0;500,0;0,3\n\
             S1;A2;CA;6.0;300.0;0.3\n\
             S1;B1;CB;9.0;600.0;0.3\n",
        ),
        capacity_path: write_file(dir, "capacity.csv", "store;equipment_type;quota\nS1;E1;2\n"),
        category_equipment_path: write_file(
            dir,
            "cat_equip.csv",
            "category;equipment_type\nCA;E1\nCB;E1\n",
        ),
        output_dir: dir.path().join("out"),
        delimiter: ';',
    }
}

#[test]
fn test_csv_round_trip() {
    assort_engine::logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let io = sample_io(&dir);

    let delimiter = io.delimiter_byte().unwrap();
    let dataset = DatasetLoader::new(delimiter)
        .load_dataset(&io)
        .unwrap();
    assert_eq!(dataset.items.len(), 3);
    // Decimal-comma and decimal-point rows coexist
    assert_eq!(dataset.items[0].avg_revenue, 500.0);
    assert_eq!(dataset.items[1].avg_revenue, 300.0);

    let run = AssortmentOrchestrator::new(
        AllocationStrategy::CumulativeShare,
        RankWeights::default(),
        0.0,
    )
    .run(&dataset)
    .unwrap();
    assert_eq!(run.standard.standard_item_count(), 2);

    let written = RunExporter::new(delimiter)
        .export(&run, &io.output_dir)
        .unwrap();
    assert_eq!(written.len(), 5);

    // Flag columns come out as 0/1 with the configured delimiter
    let flags = fs::read_to_string(io.output_dir.join("standard_flags.csv")).unwrap();
    let standard_rows = flags.lines().filter(|l| l.ends_with(";1")).count();
    assert_eq!(standard_rows, 2);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(io.output_dir.join("run_summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["total_slots"], 2);
    assert_eq!(summary["ranked_items"], 3);
}

#[test]
fn test_loader_surfaces_schema_violations() {
    let dir = tempfile::tempdir().unwrap();
    let mut io = sample_io(&dir);
    // Duplicate category mapping breaks dataset assembly
    io.category_equipment_path = write_file(
        &dir,
        "cat_equip_dup.csv",
        "category;equipment_type\nCA;E1\nCA;E2\nCB;E1\n",
    );

    let result = DatasetLoader::new(io.delimiter_byte().unwrap()).load_dataset(&io);
    assert!(result.is_err());
}
