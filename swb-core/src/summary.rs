use crate::basetype::SummaryBasetype;
use crate::huc10;
use crate::time_period::TimePeriod;
use serde::{Deserialize, Serialize};

/// Scenario name marking the historical baseline in summary tables.
pub const BASELINE_SCENARIO: &str = "historical";

/// One observation from a climate-scenario water-balance summary table:
/// a grouped mean for one zone, variable, model source, scenario, and
/// time period, at one temporal aggregation granularity.
///
/// The enum-like columns are kept as the raw table strings so that a table
/// containing unknown labels still loads; the typed accessors demote
/// unknown labels to `None`, and downstream transforms treat `None` as a
/// missing grouping field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub zone: String,
    pub summary_basetype: String,
    pub scenario_name: String,
    pub swb_variable_name: String,
    pub weather_data_name: String,
    pub time_period: String,
    #[serde(default)]
    pub season_name: Option<String>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub diff: Option<f64>,
}

impl SummaryRow {
    /// Typed view of `summary_basetype`; `None` for unknown labels.
    pub fn basetype(&self) -> Option<SummaryBasetype> {
        SummaryBasetype::from_label(&self.summary_basetype)
    }

    /// Typed view of `time_period`; `None` for labels outside the
    /// relevant set.
    pub fn period(&self) -> Option<TimePeriod> {
        TimePeriod::from_label(&self.time_period)
    }

    /// The canonical region label for this row's zone: the zero-padded
    /// HUC10 code, or the statewide label for the aggregate sentinel.
    pub fn huc10(&self) -> String {
        huc10::zone_label(&self.zone)
    }

    /// The mean, with NaN demoted to missing. Upstream columnar files
    /// encode absent statistics as NaN.
    pub fn mean_value(&self) -> Option<f64> {
        self.mean.filter(|m| !m.is_nan())
    }

    /// The season name, with the empty string demoted to missing.
    pub fn season(&self) -> Option<&str> {
        self.season_name.as_deref().filter(|s| !s.is_empty())
    }

    /// True if this row belongs to the historical baseline scenario.
    pub fn is_baseline_scenario(&self) -> bool {
        self.scenario_name == BASELINE_SCENARIO
    }
}
