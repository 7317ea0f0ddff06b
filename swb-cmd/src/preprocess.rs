//! Preprocessing pipeline: read a summary table, compute
//! scenario-vs-historical diffs, and write the augmented table.

use log::info;
use std::path::{Path, PathBuf};
use swb_core::summary::SummaryRow;
use swb_core::table;
use swb_data::diff::{compute_diffs, DiffConfig};

/// Number of rows shown in the stdout preview.
const PREVIEW_ROWS: usize = 5;

/// Run the preprocess command.
///
/// The whole table is loaded, transformed in one pass, and materialized
/// before anything is written; a failure anywhere leaves no partial
/// output behind.
pub fn run_preprocess(table_csv: &str, output: Option<&str>) -> anyhow::Result<()> {
    let input = Path::new(table_csv);
    let rows = table::read_summary_csv(input)?;

    let augmented = compute_diffs(&rows, &DiffConfig::default())?;
    let with_diff = augmented.iter().filter(|row| row.diff.is_some()).count();
    info!(
        "{} of {} output rows carry a diff",
        with_diff,
        augmented.len()
    );

    print_preview(&augmented);

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => table::derived_output_path(input),
    };
    table::write_summary_csv(&output_path, &augmented)?;
    println!(
        "Wrote {} rows to {}",
        augmented.len(),
        output_path.display()
    );
    Ok(())
}

/// Print the first few augmented rows, aligned by column.
fn print_preview(rows: &[SummaryRow]) {
    println!(
        "{:<12} {:<20} {:<12} {:<12} {:<8} {:>5} {:>10} {:>10}",
        "zone", "summary_basetype", "scenario", "period", "season", "month", "mean", "diff"
    );
    for row in rows.iter().take(PREVIEW_ROWS) {
        println!(
            "{:<12} {:<20} {:<12} {:<12} {:<8} {:>5} {:>10} {:>10}",
            row.zone,
            row.summary_basetype,
            row.scenario_name,
            row.time_period,
            row.season_name.as_deref().unwrap_or(""),
            row.month.map(|m| m.to_string()).unwrap_or_default(),
            row.mean.map(|v| format!("{v:.3}")).unwrap_or_default(),
            row.diff.map(|v| format!("{v:.3}")).unwrap_or_default(),
        );
    }
    if rows.len() > PREVIEW_ROWS {
        println!("... {} more rows", rows.len() - PREVIEW_ROWS);
    }
}
