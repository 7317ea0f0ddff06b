//! Info command: summarize the distinct values of a summary table, the
//! first thing to check when a dashboard shows an empty selection.

use std::collections::BTreeSet;
use std::path::Path;
use swb_core::table;

/// Run the info command.
pub fn run_info(table_csv: &str) -> anyhow::Result<()> {
    let rows = table::read_summary_csv(Path::new(table_csv))?;

    let mut periods: BTreeSet<&str> = BTreeSet::new();
    let mut basetypes: BTreeSet<&str> = BTreeSet::new();
    let mut scenarios: BTreeSet<&str> = BTreeSet::new();
    let mut variables: BTreeSet<&str> = BTreeSet::new();
    let mut sources: BTreeSet<&str> = BTreeSet::new();
    let mut zones: BTreeSet<String> = BTreeSet::new();
    for row in &rows {
        periods.insert(&row.time_period);
        basetypes.insert(&row.summary_basetype);
        scenarios.insert(&row.scenario_name);
        variables.insert(&row.swb_variable_name);
        sources.insert(&row.weather_data_name);
        zones.insert(row.huc10());
    }

    println!("Rows: {}", rows.len());
    println!("Time periods: {}", join(&periods));
    println!("Summary basetypes: {}", join(&basetypes));
    println!("Scenarios: {}", join(&scenarios));
    println!("Variables: {}", join(&variables));
    println!("Weather sources: {}", join(&sources));
    println!("Zones: {}", zones.len());

    let with_diff = rows.iter().filter(|row| row.diff.is_some()).count();
    println!("Rows with diff: {} / {}", with_diff, rows.len());
    Ok(())
}

fn join(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<&str>>().join(", ")
}
