//! Pivot command: select rows from an augmented table and render the
//! weather-source by scenario matrix the dashboard tables are built from,
//! optionally exporting it as CSV under the derived download filename.

use anyhow::{anyhow, bail};
use log::info;
use std::io;
use std::path::Path;
use swb_core::basetype::SummaryBasetype;
use swb_core::table;
use swb_core::time_period::TimePeriod;
use swb_data::pivot::{
    download_filename, filter_by_selection, month_name, pivot_by_scenario, PivotTable, PivotValue,
    Selection,
};

/// Arguments of one pivot invocation.
pub struct PivotRequest {
    pub table_csv: String,
    pub basetype: String,
    pub period: String,
    pub huc10: Option<String>,
    pub variable: Option<String>,
    pub season: Option<String>,
    pub month: Option<u32>,
    pub diff: bool,
    pub save: bool,
    pub output: Option<String>,
}

/// Run the pivot command.
pub fn run_pivot(request: PivotRequest) -> anyhow::Result<()> {
    let basetype = SummaryBasetype::from_label(&request.basetype)
        .ok_or_else(|| anyhow!("unknown summary basetype: {}", request.basetype))?;
    let period = TimePeriod::from_label(&request.period)
        .ok_or_else(|| anyhow!("unknown time period: {}", request.period))?;
    if period == TimePeriod::Baseline {
        bail!("comparison period must be a future period (2040-2059 or 2080-2099)");
    }

    let rows = table::read_summary_csv(Path::new(&request.table_csv))?;
    let selection = Selection {
        basetype,
        huc10: request.huc10,
        variable: request.variable,
        season: request.season,
        month: request.month,
    };
    let filtered = filter_by_selection(&rows, &selection);
    info!("Selection matched {} of {} rows", filtered.len(), rows.len());

    let value = if request.diff {
        PivotValue::Diff
    } else {
        PivotValue::Mean
    };
    let pivot = pivot_by_scenario(&filtered, period, value);

    println!(
        "{} projections ({}): {}",
        period.title(),
        period.label(),
        selection_title(&selection)
    );
    print_pivot_table(&pivot);

    let export = request
        .output
        .or_else(|| request.save.then(|| download_filename(&selection, period, value)));
    if let Some(path) = export {
        write_pivot_csv(Path::new(&path), &pivot)?;
        println!("Wrote pivot table to {path}");
    }
    Ok(())
}

/// Heading text for a selection, spelling out the conditional dimension.
fn selection_title(selection: &Selection) -> String {
    match selection.basetype {
        SummaryBasetype::MeanAnnual => "mean annual".to_string(),
        SummaryBasetype::MeanGrowingSeason => "mean growing season".to_string(),
        SummaryBasetype::MeanSeasonal => match selection.season.as_deref() {
            Some(season) => format!("mean seasonal ({season})"),
            None => "mean seasonal".to_string(),
        },
        SummaryBasetype::MeanMonthly => match selection.month.and_then(month_name) {
            Some(name) => format!("mean monthly ({name})"),
            None => "mean monthly".to_string(),
        },
    }
}

fn print_pivot_table(pivot: &PivotTable) {
    let name_width = pivot
        .rows
        .iter()
        .map(|row| row.weather_data_name.len())
        .max()
        .unwrap_or(0)
        .max("weather_data_name".len());

    print!("{:<name_width$}", "weather_data_name");
    for scenario in &pivot.scenarios {
        print!("  {scenario:>12}");
    }
    println!();
    for row in &pivot.rows {
        print!("{:<name_width$}", row.weather_data_name);
        for value in &row.values {
            match value {
                Some(v) => print!("  {v:>12.2}"),
                None => print!("  {:>12}", ""),
            }
        }
        println!();
    }
}

/// Write a pivot table as CSV to any writer: one header record, one
/// record per weather source, absent cells empty.
fn write_pivot_records<W: io::Write>(wtr: W, pivot: &PivotTable) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(wtr);
    let mut header = vec!["weather_data_name".to_string()];
    header.extend(pivot.scenarios.iter().cloned());
    wtr.write_record(&header)?;
    for row in &pivot.rows {
        let mut record = vec![row.weather_data_name.clone()];
        record.extend(
            row.values
                .iter()
                .map(|value| value.map(|v| format!("{v:.2}")).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_pivot_csv(path: &Path, pivot: &PivotTable) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    write_pivot_records(file, pivot)
}
