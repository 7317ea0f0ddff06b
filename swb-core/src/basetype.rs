use serde::{Deserialize, Serialize};
use std::fmt;

/// The temporal aggregation granularity of a summary statistic.
///
/// Grouping for the diff computation depends on the basetype: monthly
/// summaries group by `month`, seasonal summaries by `season_name`, and
/// annual/growing-season summaries carry no extra grouping dimension.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SummaryBasetype {
    #[serde(rename = "mean_annual")]
    MeanAnnual,
    #[serde(rename = "mean_seasonal")]
    MeanSeasonal,
    #[serde(rename = "mean_monthly")]
    MeanMonthly,
    #[serde(rename = "mean_growing-season")]
    MeanGrowingSeason,
}

/// All basetypes, in the order the summary tables conventionally list them.
pub const ALL_BASETYPES: [SummaryBasetype; 4] = [
    SummaryBasetype::MeanAnnual,
    SummaryBasetype::MeanSeasonal,
    SummaryBasetype::MeanMonthly,
    SummaryBasetype::MeanGrowingSeason,
];

impl SummaryBasetype {
    /// The column value used for this basetype in summary tables.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryBasetype::MeanAnnual => "mean_annual",
            SummaryBasetype::MeanSeasonal => "mean_seasonal",
            SummaryBasetype::MeanMonthly => "mean_monthly",
            SummaryBasetype::MeanGrowingSeason => "mean_growing-season",
        }
    }

    /// Parse a summary table column value. Unknown labels yield `None`;
    /// rows carrying them are treated as missing a grouping field.
    pub fn from_label(label: &str) -> Option<SummaryBasetype> {
        match label {
            "mean_annual" => Some(SummaryBasetype::MeanAnnual),
            "mean_seasonal" => Some(SummaryBasetype::MeanSeasonal),
            "mean_monthly" => Some(SummaryBasetype::MeanMonthly),
            "mean_growing-season" => Some(SummaryBasetype::MeanGrowingSeason),
            _ => None,
        }
    }
}

impl fmt::Display for SummaryBasetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
