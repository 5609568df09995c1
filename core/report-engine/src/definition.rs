//! FILENAME: core/report-engine/src/definition.rs
//! Report Request Definition - what the caller asked the upstream service for.
//!
//! This module contains the types needed to DESCRIBE a report request:
//! - `ReportArgs`: the raw, string-typed arguments as the dashboard sends them
//! - `ReportRequest`: the validated form (parsed dates, checked invariants)
//! - `DateRange` / `RangeTag`: one requested window and its row tag

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::error::{NormalizeError, Result};

/// Name of the dimension that carries the row date.
pub const DATE_DIMENSION: &str = "date";

/// Date format used in request arguments ("2023-02-01").
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used in report row dimension values ("20230201").
pub const ROW_DATE_FORMAT: &str = "%Y%m%d";

// ============================================================================
// RANGE TAG
// ============================================================================

/// Identifies which requested window a row belongs to.
/// Rows of a comparison report carry it as an extra dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RangeTag {
    /// The primary range, `date_range_0`.
    Primary,
    /// The comparison range, `date_range_1`.
    Compare,
}

impl RangeTag {
    /// Zero-based index of the range in the upstream request.
    pub fn index(self) -> usize {
        match self {
            RangeTag::Primary => 0,
            RangeTag::Compare => 1,
        }
    }

    /// The dimension value the upstream service uses for this range.
    pub fn as_str(self) -> &'static str {
        match self {
            RangeTag::Primary => "date_range_0",
            RangeTag::Compare => "date_range_1",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date_range_0" => Some(RangeTag::Primary),
            "date_range_1" => Some(RangeTag::Compare),
            _ => None,
        }
    }
}

impl std::fmt::Display for RangeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DATE RANGE
// ============================================================================

/// An inclusive window of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting an end that precedes the start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(NormalizeError::invalid(format!(
                "end date {} is before start date {}",
                end, start
            )));
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included.
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Iterates every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// Dimension list as accepted from the dashboard: a single name, a
/// comma-separated string, or a list mixing names and `{ "name": ... }` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DimensionInput {
    Single(String),
    List(Vec<DimensionEntry>),
}

/// One element of a dimension list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DimensionEntry {
    Name(String),
    Object { name: String },
}

impl DimensionInput {
    /// Flattens the input into trimmed, non-empty dimension names.
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            DimensionInput::Single(value) => value.split(',').collect(),
            DimensionInput::List(entries) => entries
                .iter()
                .map(|entry| match entry {
                    DimensionEntry::Name(name) => name.as_str(),
                    DimensionEntry::Object { name } => name.as_str(),
                })
                .collect(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// REPORT ARGS (raw)
// ============================================================================

/// Report arguments exactly as sent by the dashboard, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportArgs {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub compare_start_date: Option<String>,
    #[serde(default)]
    pub compare_end_date: Option<String>,
    #[serde(default)]
    pub dimensions: Option<DimensionInput>,
}

// ============================================================================
// REPORT REQUEST (validated)
// ============================================================================

/// A validated report request.
///
/// Invariants: `start <= end` for both ranges, and the compare range is either
/// fully present or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    range: DateRange,
    compare: Option<DateRange>,
    dimensions: Vec<String>,
}

impl ReportRequest {
    /// Single-range request over `start..=end`, grouped by `date`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(ReportRequest {
            range: DateRange::new(start, end)?,
            compare: None,
            dimensions: vec![DATE_DIMENSION.to_string()],
        })
    }

    /// Adds a comparison range over `start..=end`.
    pub fn with_compare(mut self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        self.compare = Some(DateRange::new(start, end)?);
        Ok(self)
    }

    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Validates raw dashboard arguments.
    pub fn from_args(args: &ReportArgs) -> Result<Self> {
        let start = parse_request_date("startDate", &args.start_date)?;
        let end = parse_request_date("endDate", &args.end_date)?;

        let compare_start = non_empty(args.compare_start_date.as_deref());
        let compare_end = non_empty(args.compare_end_date.as_deref());

        let mut request = ReportRequest::new(start, end)?;
        request = match (compare_start, compare_end) {
            (None, None) => request,
            (Some(compare_start), Some(compare_end)) => {
                let compare_start = parse_request_date("compareStartDate", compare_start)?;
                let compare_end = parse_request_date("compareEndDate", compare_end)?;
                request.with_compare(compare_start, compare_end)?
            }
            _ => {
                return Err(NormalizeError::invalid(
                    "compareStartDate and compareEndDate must be provided together",
                ))
            }
        };

        let dimensions = args
            .dimensions
            .as_ref()
            .map(DimensionInput::names)
            .unwrap_or_default();

        Ok(request.with_dimensions(dimensions))
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn compare(&self) -> Option<DateRange> {
        self.compare
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn is_multi_range(&self) -> bool {
        self.compare.is_some()
    }

    /// Whether the report is grouped by `date` alone. Only such reports have
    /// exactly one row per (date, range) and can be gap-filled.
    pub fn is_date_only(&self) -> bool {
        self.dimensions.len() == 1 && self.dimensions[0] == DATE_DIMENSION
    }

    /// Position of the range tag in row dimension values of a comparison report.
    /// The upstream service appends it after the requested dimensions.
    pub fn range_tag_index(&self) -> usize {
        self.dimensions.len()
    }

    /// The requested ranges in processing order: ascending start date, with the
    /// compare range first when both start on the same day.
    pub fn ranges_in_order(&self) -> SmallVec<[(RangeTag, DateRange); 2]> {
        match self.compare {
            None => smallvec![(RangeTag::Primary, self.range)],
            Some(compare) if compare.start() <= self.range.start() => smallvec![
                (RangeTag::Compare, compare),
                (RangeTag::Primary, self.range),
            ],
            Some(compare) => smallvec![
                (RangeTag::Primary, self.range),
                (RangeTag::Compare, compare),
            ],
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_request_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REQUEST_DATE_FORMAT).map_err(|_| {
        NormalizeError::invalid(format!(
            "{} must be a date in YYYY-MM-DD format, got {:?}",
            field, value
        ))
    })
}

/// Formats a date the way report rows carry it ("20230201").
pub fn format_row_date(date: NaiveDate) -> String {
    date.format(ROW_DATE_FORMAT).to_string()
}

// ============================================================================
// TESTS
// ============================================================================
