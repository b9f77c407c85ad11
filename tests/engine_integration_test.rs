// ==========================================
// Retail standard assortment engine - end-to-end engine tests
// ==========================================
// Whole-pipeline scenarios over the public API: dataset in,
// AssortmentRun out. Covers both strategies and the invariants
// the BI consumers rely on.
// ==========================================

use assort_engine::domain::capacity::EquipmentQuota;
use assort_engine::domain::dataset::SalesDataset;
use assort_engine::domain::item::ItemSales;
use assort_engine::engine::{AllocationStrategy, AssortmentOrchestrator, RankWeights};
use assort_engine::error::EngineError;

// ==========================================
// Test helpers
// ==========================================

fn item(
    store: &str,
    item_id: &str,
    category: &str,
    avg_units: f64,
    avg_revenue: f64,
    source_row: usize,
) -> ItemSales {
    ItemSales {
        store: store.to_string(),
        item_id: item_id.to_string(),
        category: category.to_string(),
        avg_units,
        avg_revenue,
        margin: 0.3,
        source_row,
    }
}

fn quota(store: &str, equipment_type: &str, quota: u32) -> EquipmentQuota {
    EquipmentQuota {
        store: store.to_string(),
        equipment_type: equipment_type.to_string(),
        quota,
    }
}

fn mapping(category: &str, equipment_type: &str) -> (String, String) {
    (category.to_string(), equipment_type.to_string())
}

fn orchestrator(strategy: AllocationStrategy) -> AssortmentOrchestrator {
    AssortmentOrchestrator::new(strategy, RankWeights::default(), 0.0)
}

/// Two categories on one equipment type, group revenue 2000.
/// Units follow revenue so every rank agrees.
fn interleaving_dataset(slot_quota: u32) -> SalesDataset {
    SalesDataset::from_tables(
        vec![
            item("S1", "A1", "CA", 10.0, 500.0, 0),
            item("S1", "A2", "CA", 6.0, 300.0, 1),
            item("S1", "A3", "CA", 4.0, 200.0, 2),
            item("S1", "B1", "CB", 9.0, 600.0, 3),
            item("S1", "B2", "CB", 5.0, 400.0, 4),
        ],
        vec![quota("S1", "E1", slot_quota)],
        vec![mapping("CA", "E1"), mapping("CB", "E1")],
    )
    .unwrap()
}

fn standard_ids(run: &assort_engine::AssortmentRun) -> Vec<&str> {
    run.standard
        .flags
        .iter()
        .filter(|f| f.is_standard)
        .map(|f| f.item_id.as_str())
        .collect()
}

// ==========================================
// Cumulative-share strategy
// ==========================================

#[test]
fn test_share_strategy_selects_everything_when_quota_covers_supply() {
    let run = orchestrator(AllocationStrategy::CumulativeShare)
        .run(&interleaving_dataset(5))
        .unwrap();

    assert!(run.diagnostics.is_clean());
    assert_eq!(run.standard.standard_item_count(), 5);
    assert_eq!(run.standard.total_slots(), 5);

    let counts: std::collections::HashMap<&str, u32> = run
        .standard
        .prod_counts
        .iter()
        .map(|c| (c.category.as_str(), c.prod_count))
        .collect();
    assert_eq!(counts["CA"], 3);
    assert_eq!(counts["CB"], 2);
}

#[test]
fn test_share_strategy_interleaves_category_leaders() {
    // cum shares: A1 0.25, B1 0.30, A2 0.40, A3 0.50, B2 0.50
    let run = orchestrator(AllocationStrategy::CumulativeShare)
        .run(&interleaving_dataset(2))
        .unwrap();

    assert_eq!(standard_ids(&run), vec!["A1", "B1"]);
}

#[test]
fn test_share_strategy_reports_shortfall() {
    let run = orchestrator(AllocationStrategy::CumulativeShare)
        .run(&interleaving_dataset(8))
        .unwrap();

    assert_eq!(run.standard.standard_item_count(), 5);
    assert_eq!(run.diagnostics.shortfalls.len(), 1);
    let shortfall = &run.diagnostics.shortfalls[0];
    assert_eq!(shortfall.quota, 8);
    assert_eq!(shortfall.supplied, 5);
    assert_eq!(shortfall.shortfall, 3);
}

// ==========================================
// Rank-rescale strategy
// ==========================================

#[test]
fn test_rescale_strategy_redistributes_to_supplied_categories() {
    // CA: 6 selling + 2 silent items, CB: 2 selling. Quota 10.
    // First pass fills 8, rescale hands CA floor(10*6/8) = 7 plus the
    // remainder, capped at its supply of 8; CB keeps 2.
    let mut items = Vec::new();
    for i in 0..6 {
        items.push(item(
            "S1",
            &format!("A{i}"),
            "CA",
            10.0 - i as f64,
            100.0,
            i,
        ));
    }
    items.push(item("S1", "A6", "CA", 0.0, 0.0, 6));
    items.push(item("S1", "A7", "CA", 0.0, 0.0, 7));
    items.push(item("S1", "B0", "CB", 8.0, 100.0, 8));
    items.push(item("S1", "B1", "CB", 7.0, 100.0, 9));

    let dataset = SalesDataset::from_tables(
        items,
        vec![quota("S1", "E1", 10)],
        vec![mapping("CA", "E1"), mapping("CB", "E1")],
    )
    .unwrap();

    let run = AssortmentOrchestrator::new(AllocationStrategy::RankRescale, RankWeights::default(), 0.0)
        .run(&dataset)
        .unwrap();

    let counts: std::collections::HashMap<&str, u32> = run
        .standard
        .prod_counts
        .iter()
        .map(|c| (c.category.as_str(), c.prod_count))
        .collect();
    assert_eq!(counts["CA"], 8);
    assert_eq!(counts["CB"], 2);
    assert_eq!(run.standard.total_slots(), 10);
    assert!(run.diagnostics.shortfalls.is_empty());
    // Standard flags stay with the first-pass fill
    assert_eq!(run.standard.standard_item_count(), 8);
}

// ==========================================
// Cross-strategy invariants
// ==========================================

#[test]
fn test_total_slots_never_exceed_quota() {
    for strategy in [
        AllocationStrategy::CumulativeShare,
        AllocationStrategy::RankRescale,
    ] {
        for slot_quota in [0u32, 1, 3, 5, 9] {
            let run = orchestrator(strategy)
                .run(&interleaving_dataset(slot_quota))
                .unwrap();
            assert!(
                run.standard.total_slots() <= slot_quota,
                "strategy {strategy:?} quota {slot_quota}"
            );
            // Conservation whenever supply covers the quota
            if slot_quota <= 5 {
                assert_eq!(run.standard.total_slots(), slot_quota);
            }
        }
    }
}

#[test]
fn test_final_rank_is_a_permutation_per_category() {
    let run = orchestrator(AllocationStrategy::CumulativeShare)
        .run(&interleaving_dataset(3))
        .unwrap();

    let mut ca_ranks: Vec<u32> = run
        .ranked
        .iter()
        .filter(|r| r.category == "CA")
        .map(|r| r.final_rank)
        .collect();
    ca_ranks.sort_unstable();
    assert_eq!(ca_ranks, vec![1, 2, 3]);
}

#[test]
fn test_ranks_survive_input_permutation() {
    // Same tie-free rows fed in reversed order produce identical ratings
    let forward = interleaving_dataset(3);
    let mut reversed_items: Vec<ItemSales> = forward.items.iter().rev().cloned().collect();
    for (idx, row) in reversed_items.iter_mut().enumerate() {
        row.source_row = idx;
    }
    let reversed = SalesDataset::from_tables(
        reversed_items,
        forward.quotas.clone(),
        vec![mapping("CA", "E1"), mapping("CB", "E1")],
    )
    .unwrap();

    let engine = orchestrator(AllocationStrategy::CumulativeShare);
    let run_forward = engine.run(&forward).unwrap();
    let run_reversed = engine.run(&reversed).unwrap();

    let rank_of = |run: &assort_engine::AssortmentRun, id: &str| {
        run.ranked
            .iter()
            .find(|r| r.item_id == id)
            .map(|r| r.final_rank)
            .unwrap()
    };
    for id in ["A1", "A2", "A3", "B1", "B2"] {
        assert_eq!(rank_of(&run_forward, id), rank_of(&run_reversed, id), "{id}");
    }
}

#[test]
fn test_assortment_follows_granted_budgets() {
    let run = orchestrator(AllocationStrategy::CumulativeShare)
        .run(&interleaving_dataset(3))
        .unwrap();

    // Every assortment row must respect its category's granted budget
    let budgets: std::collections::HashMap<&str, u32> = run
        .standard
        .prod_counts
        .iter()
        .map(|c| (c.category.as_str(), c.prod_count))
        .collect();
    for row in &run.assortment {
        assert_eq!(
            row.is_assort,
            row.final_rank <= budgets[row.category.as_str()],
            "{}",
            row.item_id
        );
    }
    assert!(run.diagnostics.consistency.is_empty());
}

// ==========================================
// Fatal-path scenarios
// ==========================================

#[test]
fn test_unmapped_category_is_fatal() {
    let dataset = SalesDataset::from_tables(
        vec![item("S1", "A1", "UNMAPPED", 1.0, 10.0, 0)],
        vec![quota("S1", "E1", 3)],
        vec![mapping("CA", "E1")],
    )
    .unwrap();

    let result = orchestrator(AllocationStrategy::CumulativeShare).run(&dataset);
    assert!(matches!(result, Err(EngineError::UnknownCategory { .. })));
}

#[test]
fn test_missing_quota_row_is_fatal() {
    let dataset = SalesDataset::from_tables(
        vec![item("S9", "A1", "CA", 1.0, 10.0, 0)],
        vec![quota("S1", "E1", 3)],
        vec![mapping("CA", "E1")],
    )
    .unwrap();

    let result = orchestrator(AllocationStrategy::CumulativeShare).run(&dataset);
    assert!(matches!(result, Err(EngineError::MissingQuota { .. })));
}
