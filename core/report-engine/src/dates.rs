//! FILENAME: core/report-engine/src/dates.rs
// PURPOSE: Enumerates the (date, range) keys a normalized report must contain.
// CONTEXT: A single-range report gets one key per day. A comparison report
// walks the ascending union of both ranges' days and, per day, emits the
// ranges in processing order (see `ReportRequest::ranges_in_order`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{format_row_date, RangeTag, ReportRequest};

/// Which (date, range) combinations a comparison report is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapFillMode {
    /// One key per range that actually contains the date.
    Membership,
    /// Every range for every date of the union. Per date, the ranges that
    /// contain it come first, then the others, each group in processing order.
    #[default]
    EveryRange,
}

/// Identifies one row of a normalized report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub date: NaiveDate,
    /// `None` for single-range reports, which carry no range tag.
    pub range: Option<RangeTag>,
}

impl RowKey {
    /// The date as it appears in row dimension values.
    pub fn date_value(&self) -> String {
        format_row_date(self.date)
    }
}

/// Ascending days covered by at least one requested range.
pub fn union_dates(request: &ReportRequest) -> Vec<NaiveDate> {
    let ranges = request.ranges_in_order();
    let first = ranges.iter().map(|(_, range)| range.start()).min();
    let last = ranges.iter().map(|(_, range)| range.end()).max();

    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| ranges.iter().any(|(_, range)| range.contains(*day)))
        .collect()
}

/// Produces the ordered keys the normalized report must contain.
pub fn enumerate_keys(request: &ReportRequest, mode: GapFillMode) -> Vec<RowKey> {
    if !request.is_multi_range() {
        let range = request.range();
        let mut keys = Vec::with_capacity(range.day_count());
        keys.extend(range.days().map(|date| RowKey { date, range: None }));
        return keys;
    }

    let ranges = request.ranges_in_order();
    let dates = union_dates(request);
    let mut keys = Vec::with_capacity(dates.len() * ranges.len());

    for date in dates {
        let mut containing: SmallVec<[RangeTag; 2]> = SmallVec::new();
        let mut others: SmallVec<[RangeTag; 2]> = SmallVec::new();
        for (tag, range) in &ranges {
            if range.contains(date) {
                containing.push(*tag);
            } else {
                others.push(*tag);
            }
        }

        keys.extend(containing.into_iter().map(|tag| RowKey { date, range: Some(tag) }));

        if mode == GapFillMode::EveryRange {
            keys.extend(others.into_iter().map(|tag| RowKey { date, range: Some(tag) }));
        }
    }

    keys
}

// ============================================================================
// TESTS
// ============================================================================
