//! Whole-table CSV read/write for summary data.
//!
//! A summary table is read once into an owned `Vec<SummaryRow>` and passed
//! by reference into the transforms; the augmented result is materialized
//! before anything is written. The output carries the input schema plus the
//! derived `huc10` label and the populated `diff` column.

use crate::summary::SummaryRow;
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem to form the output filename.
pub const OUTPUT_STEM_SUFFIX: &str = "_w_diff";

/// Column order of the augmented output table.
pub const OUTPUT_HEADERS: [&str; 11] = [
    "zone",
    "huc10",
    "summary_basetype",
    "scenario_name",
    "swb_variable_name",
    "weather_data_name",
    "time_period",
    "season_name",
    "month",
    "mean",
    "diff",
];

/// Parse a summary table from CSV text. Enum-like columns are kept raw
/// (unknown labels load fine); a structurally malformed record fails the
/// whole read.
pub fn parse_summary_csv(csv_object: &str) -> anyhow::Result<Vec<SummaryRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_object.as_bytes());
    let mut rows: Vec<SummaryRow> = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        let row: SummaryRow =
            result.with_context(|| format!("malformed summary record at row {}", index + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read a summary table from disk.
pub fn read_summary_csv(path: &Path) -> anyhow::Result<Vec<SummaryRow>> {
    let csv_object = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read summary table {}", path.display()))?;
    let rows = parse_summary_csv(&csv_object)
        .with_context(|| format!("failed to parse summary table {}", path.display()))?;
    info!("Loaded {} summary rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write an augmented summary table to any writer, in `OUTPUT_HEADERS`
/// order. Absent values are written as empty cells.
pub fn write_summary_records<W: io::Write>(wtr: W, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(wtr);
    wtr.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        let record: [String; 11] = [
            row.zone.clone(),
            row.huc10(),
            row.summary_basetype.clone(),
            row.scenario_name.clone(),
            row.swb_variable_name.clone(),
            row.weather_data_name.clone(),
            row.time_period.clone(),
            row.season_name.clone().unwrap_or_default(),
            row.month.map(|m| m.to_string()).unwrap_or_default(),
            row.mean.map(|v| v.to_string()).unwrap_or_default(),
            row.diff.map(|v| v.to_string()).unwrap_or_default(),
        ];
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write an augmented summary table to disk.
pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create output table {}", path.display()))?;
    write_summary_records(file, rows)
        .with_context(|| format!("failed to write output table {}", path.display()))?;
    info!("Wrote {} summary rows to {}", rows.len(), path.display());
    Ok(())
}

/// Derive the augmented-table path from the input path:
/// `<stem>_w_diff.csv`, beside the input file.
pub fn derived_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("summary");
    input.with_file_name(format!("{stem}{OUTPUT_STEM_SUFFIX}.csv"))
}
