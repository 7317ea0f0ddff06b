use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled twenty-year climate summary window.
///
/// The baseline window is the reference against which both future windows
/// are differenced. Summary tables may contain rows for other windows;
/// those rows are outside the relevant set and are dropped by the diff
/// computation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1995-2014")]
    Baseline,
    #[serde(rename = "2040-2059")]
    MidCentury,
    #[serde(rename = "2080-2099")]
    LateCentury,
}

/// All relevant time periods, baseline first.
pub const ALL_PERIODS: [TimePeriod; 3] = [
    TimePeriod::Baseline,
    TimePeriod::MidCentury,
    TimePeriod::LateCentury,
];

impl TimePeriod {
    /// The year-range value used for this period in summary tables.
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Baseline => "1995-2014",
            TimePeriod::MidCentury => "2040-2059",
            TimePeriod::LateCentury => "2080-2099",
        }
    }

    /// Human title used in headings.
    pub fn title(&self) -> &'static str {
        match self {
            TimePeriod::Baseline => "Historical",
            TimePeriod::MidCentury => "Mid-century",
            TimePeriod::LateCentury => "Late-century",
        }
    }

    /// Parse a summary table column value. Unknown labels yield `None`;
    /// rows carrying them fall outside the relevant period set.
    pub fn from_label(label: &str) -> Option<TimePeriod> {
        match label {
            "1995-2014" => Some(TimePeriod::Baseline),
            "2040-2059" => Some(TimePeriod::MidCentury),
            "2080-2099" => Some(TimePeriod::LateCentury),
            _ => None,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
