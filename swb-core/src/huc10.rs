//! Region-label normalization for HUC10 hydrologic unit codes.
//!
//! Zone identifiers arrive with leading zeros stripped (a side effect of
//! numeric storage upstream) and must be padded back to the canonical
//! ten-digit form. One code is special: the statewide aggregate "zone" is
//! stored as `0000000001` and is displayed under a fixed label instead.

/// Canonical width of a HUC10 code.
pub const HUC10_WIDTH: usize = 10;

/// Zone code standing in for the statewide aggregate region.
pub const STATEWIDE_SENTINEL: &str = "0000000001";

/// Label substituted for the statewide sentinel code.
pub const STATEWIDE_LABEL: &str = "State_of_Minnesota";

/// Pad a raw zone identifier with leading zeros to the canonical HUC10
/// width. Identifiers already at or beyond the width pass through
/// unchanged, so the mapping is idempotent.
pub fn canonical_huc10(zone: &str) -> String {
    if zone.len() >= HUC10_WIDTH {
        zone.to_string()
    } else {
        format!("{:0>width$}", zone, width = HUC10_WIDTH)
    }
}

/// Canonicalize a zone identifier and replace the statewide sentinel with
/// its display label. Total and side-effect-free.
pub fn zone_label(zone: &str) -> String {
    let canonical = canonical_huc10(zone);
    if canonical == STATEWIDE_SENTINEL {
        STATEWIDE_LABEL.to_string()
    } else {
        canonical
    }
}
