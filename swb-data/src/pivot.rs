//! Dashboard-support transforms: equality filtering over an augmented
//! summary table and pivoting the result into a weather-source by scenario
//! matrix for one future period against the baseline.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use swb_core::basetype::SummaryBasetype;
use swb_core::huc10;
use swb_core::summary::SummaryRow;
use swb_core::time_period::TimePeriod;

/// Label of the synthetic across-models average row.
pub const AVERAGE_OF_MODELS: &str = "AVERAGE OF MODELS";

/// The observational weather source. It is excluded from model averaging
/// and listed after the average row.
pub const OBSERVATIONAL_SOURCE: &str = "prism";

/// Which value column a pivot reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotValue {
    Mean,
    Diff,
}

impl PivotValue {
    /// Column name, as used in table schemas and export filenames.
    pub fn column(&self) -> &'static str {
        match self {
            PivotValue::Mean => "mean",
            PivotValue::Diff => "diff",
        }
    }

    fn of(&self, row: &SummaryRow) -> Option<f64> {
        match self {
            PivotValue::Mean => row.mean_value(),
            PivotValue::Diff => row.diff.filter(|d| !d.is_nan()),
        }
    }
}

/// An equality selection over an augmented summary table. The season and
/// month filters only apply at the basetype they belong to; a stale value
/// left in the selection by a consumer is ignored elsewhere.
#[derive(Debug, Clone)]
pub struct Selection {
    pub basetype: SummaryBasetype,
    pub huc10: Option<String>,
    pub variable: Option<String>,
    pub season: Option<String>,
    pub month: Option<u32>,
}

impl Selection {
    pub fn new(basetype: SummaryBasetype) -> Selection {
        Selection {
            basetype,
            huc10: None,
            variable: None,
            season: None,
            month: None,
        }
    }
}

/// Filter rows by a selection. Region values are compared in canonical
/// form, so a raw zone code and a padded HUC10 select the same rows.
pub fn filter_by_selection<'a>(
    rows: &'a [SummaryRow],
    selection: &Selection,
) -> Vec<&'a SummaryRow> {
    let wanted_region = selection.huc10.as_deref().map(huc10::zone_label);
    rows.iter()
        .filter(|row| row.basetype() == Some(selection.basetype))
        .filter(|row| match &wanted_region {
            Some(region) => &row.huc10() == region,
            None => true,
        })
        .filter(|row| match &selection.variable {
            Some(variable) => &row.swb_variable_name == variable,
            None => true,
        })
        .filter(|row| match selection.basetype {
            SummaryBasetype::MeanSeasonal => match &selection.season {
                Some(season) => row.season() == Some(season.as_str()),
                None => true,
            },
            SummaryBasetype::MeanMonthly => match selection.month {
                Some(month) => row.month == Some(month),
                None => true,
            },
            SummaryBasetype::MeanAnnual | SummaryBasetype::MeanGrowingSeason => true,
        })
        .collect()
}

/// One pivot row: a weather source and its per-scenario cells, in the
/// table's scenario order.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub weather_data_name: String,
    pub values: Vec<Option<f64>>,
}

/// A weather-source by scenario matrix. Model sources come first (sorted),
/// then the across-models average, then the observational source.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub scenarios: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Pivot filtered rows into a scenario matrix for one future period.
///
/// Only rows from the baseline period and the requested period
/// participate. Cells hold the mean of matching values, rounded to two
/// decimals; scenarios with no values at all (e.g. `historical` when
/// pivoting diffs) get no column.
pub fn pivot_by_scenario(
    rows: &[&SummaryRow],
    period: TimePeriod,
    value: PivotValue,
) -> PivotTable {
    let mut cells: BTreeMap<(String, String), (f64, u32)> = BTreeMap::new();
    let mut scenarios: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        let Some(row_period) = row.period() else { continue };
        if row_period != TimePeriod::Baseline && row_period != period {
            continue;
        }
        let Some(v) = value.of(row) else { continue };
        scenarios.insert(row.scenario_name.clone());
        let cell = cells
            .entry((row.weather_data_name.clone(), row.scenario_name.clone()))
            .or_insert((0.0, 0));
        cell.0 += v;
        cell.1 += 1;
    }
    let scenarios: Vec<String> = scenarios.into_iter().collect();

    let sources: BTreeSet<&String> = cells.keys().map(|(source, _)| source).collect();
    let mut model_rows: Vec<PivotRow> = Vec::new();
    let mut observational_rows: Vec<PivotRow> = Vec::new();
    for source in sources {
        let values = scenarios
            .iter()
            .map(|scenario| {
                cells
                    .get(&(source.clone(), scenario.clone()))
                    .map(|(sum, n)| round2(sum / *n as f64))
            })
            .collect();
        let pivot_row = PivotRow {
            weather_data_name: source.clone(),
            values,
        };
        if source == OBSERVATIONAL_SOURCE {
            observational_rows.push(pivot_row);
        } else {
            model_rows.push(pivot_row);
        }
    }

    let average = average_of_models(&model_rows, scenarios.len());
    let mut out_rows = model_rows;
    out_rows.push(average);
    out_rows.extend(observational_rows);
    PivotTable {
        scenarios,
        rows: out_rows,
    }
}

/// Per-scenario mean over the model rows, skipping absent cells.
fn average_of_models(model_rows: &[PivotRow], width: usize) -> PivotRow {
    let values = (0..width)
        .map(|column| {
            let cells: Vec<f64> = model_rows
                .iter()
                .filter_map(|row| row.values[column])
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(round2(cells.iter().sum::<f64>() / cells.len() as f64))
            }
        })
        .collect();
    PivotRow {
        weather_data_name: AVERAGE_OF_MODELS.to_string(),
        values,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Calendar name of a month number, e.g. 3 -> "March".
pub fn month_name(month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(1900, month, 1).map(|date| date.format("%B").to_string())
}

/// Derived filename for a pivot export:
/// `{value}_{variable}_for_{region}_{granularity}__{period}.csv`.
pub fn download_filename(selection: &Selection, period: TimePeriod, value: PivotValue) -> String {
    let granularity = match selection.basetype {
        SummaryBasetype::MeanAnnual => format!("mean_annual__{}", period.label()),
        SummaryBasetype::MeanSeasonal => format!(
            "mean_seasonal_{}__{}",
            selection.season.as_deref().unwrap_or_default(),
            period.label()
        ),
        SummaryBasetype::MeanGrowingSeason => {
            format!("mean_growing_season__{}", period.label())
        }
        SummaryBasetype::MeanMonthly => format!(
            "mean_monthly_{}__{}",
            selection
                .month
                .map(|m| m.to_string())
                .unwrap_or_default(),
            period.label()
        ),
    };
    let region = selection
        .huc10
        .as_deref()
        .map(huc10::zone_label)
        .unwrap_or_else(|| "all_zones".to_string());
    let variable = selection.variable.as_deref().unwrap_or("all_variables");
    format!("{}_{}_for_{}_{}.csv", value.column(), variable, region, granularity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        weather: &str,
        scenario: &str,
        period: &str,
        mean: Option<f64>,
        diff: Option<f64>,
    ) -> SummaryRow {
        SummaryRow {
            zone: "401020204".to_string(),
            summary_basetype: "mean_annual".to_string(),
            scenario_name: scenario.to_string(),
            swb_variable_name: "net_infiltration".to_string(),
            weather_data_name: weather.to_string(),
            time_period: period.to_string(),
            season_name: None,
            month: None,
            mean,
            diff,
        }
    }

    #[test]
    fn test_filter_by_selection_basetype_and_region() {
        let mut other_zone = row("CCSM4", "rcp45", "2040-2059", Some(1.0), None);
        other_zone.zone = "701020101".to_string();
        let rows = vec![
            row("CCSM4", "historical", "1995-2014", Some(10.0), None),
            other_zone,
        ];

        let mut selection = Selection::new(SummaryBasetype::MeanAnnual);
        // raw zone codes and padded HUC10 codes select the same rows
        selection.huc10 = Some("401020204".to_string());
        assert_eq!(filter_by_selection(&rows, &selection).len(), 1);
        selection.huc10 = Some("0401020204".to_string());
        assert_eq!(filter_by_selection(&rows, &selection).len(), 1);

        selection.huc10 = None;
        assert_eq!(filter_by_selection(&rows, &selection).len(), 2);

        let seasonal = Selection::new(SummaryBasetype::MeanSeasonal);
        assert!(filter_by_selection(&rows, &seasonal).is_empty());
    }

    #[test]
    fn test_filter_conditional_dimensions() {
        let mut winter = row("CCSM4", "rcp45", "2040-2059", Some(1.0), None);
        winter.summary_basetype = "mean_seasonal".to_string();
        winter.season_name = Some("winter".to_string());
        let mut summer = winter.clone();
        summer.season_name = Some("summer".to_string());
        let rows = vec![winter, summer];

        let mut selection = Selection::new(SummaryBasetype::MeanSeasonal);
        selection.season = Some("winter".to_string());
        assert_eq!(filter_by_selection(&rows, &selection).len(), 1);

        // a stale month value is ignored at a non-monthly basetype
        selection.month = Some(7);
        assert_eq!(filter_by_selection(&rows, &selection).len(), 1);
    }

    #[test]
    fn test_pivot_shape_and_rounding() {
        let rows = vec![
            row("CCSM4", "historical", "1995-2014", Some(10.126), None),
            row("CCSM4", "rcp45", "2040-2059", Some(14.0), Some(3.874)),
            row("MIROC5", "historical", "1995-2014", Some(12.01), None),
            row("MIROC5", "rcp45", "2040-2059", Some(16.0), Some(3.99)),
            row("prism", "historical", "1995-2014", Some(9.0), None),
            // late-century row must not leak into a mid-century pivot
            row("CCSM4", "rcp45", "2080-2099", Some(99.0), Some(89.0)),
        ];
        let refs: Vec<&SummaryRow> = rows.iter().collect();
        let table = pivot_by_scenario(&refs, TimePeriod::MidCentury, PivotValue::Mean);

        assert_eq!(table.scenarios, vec!["historical", "rcp45"]);
        let names: Vec<&str> = table
            .rows
            .iter()
            .map(|r| r.weather_data_name.as_str())
            .collect();
        assert_eq!(names, vec!["CCSM4", "MIROC5", AVERAGE_OF_MODELS, "prism"]);

        assert_eq!(table.rows[0].values, vec![Some(10.13), Some(14.0)]);
        // average excludes prism: (10.13 + 12.01) / 2 and (14.0 + 16.0) / 2
        assert_eq!(table.rows[2].values, vec![Some(11.07), Some(15.0)]);
        // prism has no future-scenario cell
        assert_eq!(table.rows[3].values, vec![Some(9.0), None]);
    }

    #[test]
    fn test_pivot_averages_duplicate_cells() {
        let rows = vec![
            row("CCSM4", "rcp45", "2040-2059", Some(10.0), None),
            row("CCSM4", "rcp45", "2040-2059", Some(20.0), None),
        ];
        let refs: Vec<&SummaryRow> = rows.iter().collect();
        let table = pivot_by_scenario(&refs, TimePeriod::MidCentury, PivotValue::Mean);
        assert_eq!(table.rows[0].values, vec![Some(15.0)]);
    }

    #[test]
    fn test_diff_pivot_drops_valueless_scenarios() {
        let rows = vec![
            row("CCSM4", "historical", "1995-2014", Some(10.0), None),
            row("CCSM4", "rcp45", "2040-2059", Some(14.0), Some(4.0)),
        ];
        let refs: Vec<&SummaryRow> = rows.iter().collect();
        let table = pivot_by_scenario(&refs, TimePeriod::MidCentury, PivotValue::Diff);
        // historical rows carry no diff, so no historical column appears
        assert_eq!(table.scenarios, vec!["rcp45"]);
        assert_eq!(table.rows[0].values, vec![Some(4.0)]);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(3).as_deref(), Some("March"));
        assert_eq!(month_name(12).as_deref(), Some("December"));
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(0), None);
    }

    #[test]
    fn test_download_filename() {
        let mut selection = Selection::new(SummaryBasetype::MeanAnnual);
        selection.huc10 = Some("1".to_string());
        selection.variable = Some("net_infiltration".to_string());
        assert_eq!(
            download_filename(&selection, TimePeriod::MidCentury, PivotValue::Mean),
            "mean_net_infiltration_for_State_of_Minnesota_mean_annual__2040-2059.csv"
        );

        let mut monthly = Selection::new(SummaryBasetype::MeanMonthly);
        monthly.huc10 = Some("401020204".to_string());
        monthly.variable = Some("net_infiltration".to_string());
        monthly.month = Some(7);
        assert_eq!(
            download_filename(&monthly, TimePeriod::LateCentury, PivotValue::Diff),
            "diff_net_infiltration_for_0401020204_mean_monthly_7__2080-2099.csv"
        );
    }
}
