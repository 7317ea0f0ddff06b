//! Baseline-difference computation.
//!
//! Every future-scenario row is assigned a `diff` equal to its mean minus
//! the historical baseline mean of the same group (zone, variable, weather
//! source, and the basetype-specific extra dimension). The single baseline
//! value per group is reused against every future time period.

use log::info;
use std::collections::HashMap;
use std::fmt;
use swb_core::basetype::SummaryBasetype;
use swb_core::summary::{SummaryRow, BASELINE_SCENARIO};
use swb_core::time_period::{TimePeriod, ALL_PERIODS};

/// Labels identifying the baseline against which diffs are computed, and
/// the set of time periods retained in the output.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub relevant_periods: Vec<TimePeriod>,
    pub baseline_period: TimePeriod,
    pub baseline_scenario: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            relevant_periods: ALL_PERIODS.to_vec(),
            baseline_period: TimePeriod::Baseline,
            baseline_scenario: BASELINE_SCENARIO.to_string(),
        }
    }
}

impl DiffConfig {
    fn validate(&self) -> Result<(), DiffError> {
        if self.baseline_scenario.is_empty() {
            return Err(DiffError::MissingBaselineScenario);
        }
        if !self.relevant_periods.contains(&self.baseline_period) {
            return Err(DiffError::BaselinePeriodNotRelevant(self.baseline_period));
        }
        Ok(())
    }
}

/// Errors that make the diff computation meaningless. Partial data
/// (missing fields, missing baselines) is never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffError {
    MissingBaselineScenario,
    BaselinePeriodNotRelevant(TimePeriod),
    ConflictingBaseline(String),
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::MissingBaselineScenario => {
                write!(f, "baseline scenario label is empty")
            }
            DiffError::BaselinePeriodNotRelevant(period) => {
                write!(f, "baseline period {period} is not in the relevant period set")
            }
            DiffError::ConflictingBaseline(group) => {
                write!(f, "conflicting baseline means for group {group}")
            }
        }
    }
}

impl std::error::Error for DiffError {}

/// The active grouping key of a row. `scenario_name` is deliberately not
/// part of the key: the baseline lookup must match rows from every
/// scenario against the historical baseline of the same group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    zone: String,
    basetype: SummaryBasetype,
    variable: String,
    weather: String,
    extra: ExtraKey,
}

/// Basetype-conditional extra grouping dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ExtraKey {
    None,
    Month(u32),
    Season(String),
}

impl GroupKey {
    fn describe(&self) -> String {
        let extra = match &self.extra {
            ExtraKey::None => String::new(),
            ExtraKey::Month(month) => format!(", month {month}"),
            ExtraKey::Season(season) => format!(", season {season}"),
        };
        format!(
            "zone {}, {}, {}, {}{}",
            self.zone, self.basetype, self.variable, self.weather, extra
        )
    }
}

/// Build the active grouping key for a row, or `None` when any required
/// field is missing or unparseable.
fn group_key(row: &SummaryRow) -> Option<GroupKey> {
    let basetype = row.basetype()?;
    if row.zone.is_empty() || row.swb_variable_name.is_empty() || row.weather_data_name.is_empty() {
        return None;
    }
    let extra = match basetype {
        SummaryBasetype::MeanMonthly => ExtraKey::Month(row.month?),
        SummaryBasetype::MeanSeasonal => ExtraKey::Season(row.season()?.to_string()),
        SummaryBasetype::MeanAnnual | SummaryBasetype::MeanGrowingSeason => ExtraKey::None,
    };
    Some(GroupKey {
        zone: row.zone.clone(),
        basetype,
        variable: row.swb_variable_name.clone(),
        weather: row.weather_data_name.clone(),
        extra,
    })
}

/// Compute scenario-vs-historical diffs over a summary table.
///
/// The output holds, in input order, every relevant-period row whose
/// grouping fields and mean are present: baseline rows pass through with
/// `diff` absent, future rows carry `diff = mean - baseline.mean` when a
/// baseline exists for their group and an absent `diff` otherwise
/// (left-join, never dropped). Rows outside the relevant period set and
/// rows with missing grouping fields do not appear at all.
///
/// Duplicate baseline rows with identical means collapse to one lookup
/// value; duplicates with conflicting means abort the whole computation.
pub fn compute_diffs(
    rows: &[SummaryRow],
    config: &DiffConfig,
) -> Result<Vec<SummaryRow>, DiffError> {
    config.validate()?;

    // First pass: one baseline mean per grouping key.
    let mut baselines: HashMap<GroupKey, f64> = HashMap::new();
    for row in rows {
        let Some(period) = row.period() else { continue };
        if !config.relevant_periods.contains(&period) {
            continue;
        }
        if row.scenario_name != config.baseline_scenario || period != config.baseline_period {
            continue;
        }
        let (Some(key), Some(mean)) = (group_key(row), row.mean_value()) else {
            continue;
        };
        match baselines.get(&key) {
            Some(existing) if existing.to_bits() != mean.to_bits() => {
                return Err(DiffError::ConflictingBaseline(key.describe()));
            }
            Some(_) => {}
            None => {
                baselines.insert(key, mean);
            }
        }
    }

    // Second pass: emit surviving rows in input order.
    let mut output: Vec<SummaryRow> = Vec::new();
    let mut diffed = 0usize;
    let mut unmatched = 0usize;
    for row in rows {
        let Some(period) = row.period() else { continue };
        if !config.relevant_periods.contains(&period) {
            continue;
        }
        let Some(key) = group_key(row) else { continue };
        let Some(mean) = row.mean_value() else { continue };

        let mut out = row.clone();
        if row.scenario_name == config.baseline_scenario && period == config.baseline_period {
            out.diff = None;
        } else {
            out.diff = match baselines.get(&key) {
                Some(baseline) => {
                    diffed += 1;
                    Some(mean - baseline)
                }
                None => {
                    unmatched += 1;
                    None
                }
            };
        }
        output.push(out);
    }

    info!(
        "Diffed {} future rows against {} baseline groups ({} future rows without a baseline); {} rows emitted",
        diffed,
        baselines.len(),
        unmatched,
        output.len()
    );
    Ok(output)
}
