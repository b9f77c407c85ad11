// ==========================================
// Retail standard assortment engine - CSV output writer
// ==========================================
// Responsibility: persist one run as four delimited tables
// plus a JSON run summary. Boolean flags are written as 0/1
// for downstream BI tooling.
// ==========================================

use crate::engine::orchestrator::AssortmentRun;
use crate::importer::error::ImportResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const RANKED_FILE: &str = "ranked_items.csv";
const PROD_COUNT_FILE: &str = "prod_counts.csv";
const STANDARD_FILE: &str = "standard_flags.csv";
const ASSORTMENT_FILE: &str = "assortment.csv";
const SUMMARY_FILE: &str = "run_summary.json";

// ==========================================
// RunExporter
// ==========================================
pub struct RunExporter {
    delimiter: u8,
}

impl RunExporter {
    /// Constructor
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    // ==========================================
    // Core method
    // ==========================================

    /// Write every output table of a run into `output_dir`
    ///
    /// # Returns
    /// Paths of the files written, in write order
    #[instrument(skip(self, run), fields(run_id = %run.run_id))]
    pub fn export(&self, run: &AssortmentRun, output_dir: &Path) -> ImportResult<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;

        let paths = vec![
            self.write_ranked(run, output_dir)?,
            self.write_prod_counts(run, output_dir)?,
            self.write_standard_flags(run, output_dir)?,
            self.write_assortment(run, output_dir)?,
            self.write_summary(run, output_dir)?,
        ];

        info!(files = paths.len(), dir = %output_dir.display(), "run exported");
        Ok(paths)
    }

    // ==========================================
    // Per-table writers
    // ==========================================

    fn write_ranked(&self, run: &AssortmentRun, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(RANKED_FILE);
        let mut writer = self.open(&path)?;
        writer.write_record([
            "store",
            "item_id",
            "category",
            "avg_units",
            "avg_revenue",
            "margin",
            "sales_pcs_rank",
            "sales_rub_rank",
            "margin_rank",
            "weighted_score",
            "final_rank",
        ])?;
        for item in &run.ranked {
            writer.write_record([
                item.store.as_str(),
                item.item_id.as_str(),
                item.category.as_str(),
                &item.avg_units.to_string(),
                &item.avg_revenue.to_string(),
                &item.margin.to_string(),
                &item.sales_pcs_rank.to_string(),
                &item.sales_rub_rank.to_string(),
                &item.margin_rank.to_string(),
                &item.weighted_score.to_string(),
                &item.final_rank.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    fn write_prod_counts(&self, run: &AssortmentRun, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(PROD_COUNT_FILE);
        let mut writer = self.open(&path)?;
        writer.write_record(["store", "category", "prod_count"])?;
        for count in &run.standard.prod_counts {
            writer.write_record([
                count.store.as_str(),
                count.category.as_str(),
                &count.prod_count.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    fn write_standard_flags(&self, run: &AssortmentRun, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(STANDARD_FILE);
        let mut writer = self.open(&path)?;
        writer.write_record(["store", "item_id", "is_standard"])?;
        for flag in &run.standard.flags {
            writer.write_record([
                flag.store.as_str(),
                flag.item_id.as_str(),
                flag_cell(flag.is_standard),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    fn write_assortment(&self, run: &AssortmentRun, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(ASSORTMENT_FILE);
        let mut writer = self.open(&path)?;
        writer.write_record(["store", "item_id", "category", "final_rank", "is_assort"])?;
        for row in &run.assortment {
            writer.write_record([
                row.store.as_str(),
                row.item_id.as_str(),
                row.category.as_str(),
                &row.final_rank.to_string(),
                flag_cell(row.is_assort),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Run metadata and diagnostics, for audit rather than BI
    fn write_summary(&self, run: &AssortmentRun, dir: &Path) -> ImportResult<PathBuf> {
        let path = dir.join(SUMMARY_FILE);
        let summary = serde_json::json!({
            "run_id": run.run_id,
            "generated_at": run.generated_at,
            "strategy": run.strategy,
            "ranked_items": run.ranked.len(),
            "standard_items": run.standard.standard_item_count(),
            "total_slots": run.standard.total_slots(),
            "diagnostics": run.diagnostics,
        });
        fs::write(&path, serde_json::to_string_pretty(&summary).map_err(anyhow::Error::from)?)?;
        Ok(path)
    }

    fn open(&self, path: &Path) -> ImportResult<csv::Writer<fs::File>> {
        Ok(csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?)
    }
}

fn flag_cell(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
