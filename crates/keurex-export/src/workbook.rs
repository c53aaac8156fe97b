//! CSV rendering for report sections and the pivot summary.
//!
//! The report is a directory of CSV files: `Pivot.csv` first, then one file
//! per section in section order. Writers take `impl Write` so tests render
//! into memory.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use keurex_core::bucket::{Report, Section};
use keurex_core::consolidate::ReportRow;
use keurex_core::pivot::Pivot;

/// Column order for every section file.
pub const REPORT_HEADERS: [&str; 10] = [
    "toezichtgroep",
    "type",
    "match",
    "uuid",
    "naam",
    "naampad",
    "isActief",
    "toestand",
    "datum_laatste_keuring",
    "resultaat_keuring",
];

/// Name of the pivot file within the report directory.
pub const PIVOT_FILE: &str = "Pivot.csv";

/// Write one report section as CSV, header included even when empty.
pub fn write_section<W: Write>(writer: W, section: &Section) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(REPORT_HEADERS)?;

    for row in &section.rows {
        csv.write_record(record_fields(row))?;
    }

    csv.flush()?;
    Ok(())
}

fn record_fields(row: &ReportRow) -> Vec<String> {
    vec![
        row.toezichtgroep.clone(),
        row.asset_type.as_str().to_string(),
        row.match_kind.as_str().to_string(),
        row.uuid.clone(),
        row.naam.clone().unwrap_or_default(),
        row.naampad.clone().unwrap_or_default(),
        row.is_actief.to_string(),
        row.toestand.clone().unwrap_or_default(),
        row.datum_laatste_keuring
            .map(|d| d.to_string())
            .unwrap_or_default(),
        row.resultaat_keuring.clone().unwrap_or_default(),
    ]
}

/// Write the pivot summary as CSV.
///
/// Rows follow `Pivot::row_groups` ordering; a per-row total column and a
/// grand-total row close the table.
pub fn write_pivot<W: Write>(writer: W, pivot: &Pivot) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["toezichtgroep".to_string()];
    header.extend(pivot.result_columns.iter().cloned());
    header.push("Totaal".to_string());
    csv.write_record(&header)?;

    let mut grand_totals = vec![0u64; pivot.result_columns.len()];
    for group in pivot.row_groups() {
        let mut record = vec![group.clone()];
        let mut row_total = 0u64;
        for (i, result) in pivot.result_columns.iter().enumerate() {
            let count = pivot.count(&group, result);
            record.push(count.to_string());
            row_total += count;
            grand_totals[i] += count;
        }
        record.push(row_total.to_string());
        csv.write_record(&record)?;
    }

    let mut total_record = vec!["Totaal".to_string()];
    let mut total_sum = 0u64;
    for total in &grand_totals {
        total_record.push(total.to_string());
        total_sum += total;
    }
    total_record.push(total_sum.to_string());
    csv.write_record(&total_record)?;

    csv.flush()?;
    Ok(())
}

/// Turn a section name into a safe file name.
fn section_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{safe}.csv")
}

/// Write the full report into `out_dir`: pivot first, then every section.
pub fn write_report(out_dir: &Path, report: &Report, pivot: &Pivot) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create report directory {}", out_dir.display()))?;

    let pivot_path = out_dir.join(PIVOT_FILE);
    let pivot_file = File::create(&pivot_path)
        .with_context(|| format!("Failed to create {}", pivot_path.display()))?;
    write_pivot(pivot_file, pivot)?;

    for section in &report.sections {
        let path = out_dir.join(section_file_name(&section.name));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_section(file, section)?;
    }

    info!(
        dir = %out_dir.display(),
        sections = report.sections.len(),
        "report written"
    );
    Ok(())
}
