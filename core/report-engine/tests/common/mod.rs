//! FILENAME: tests/common/mod.rs
//! Fixtures for report-engine integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use report_engine::{
    GapFillMode, MetricHeader, MetricType, NormalizerConfig, RangeTag, RawRow, ReportRequest,
    ReportResponse, REQUEST_DATE_FORMAT,
};

/// Metric value given to rows that exist before normalization.
pub const EXISTING_ROW_VALUE: &str = "99";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, REQUEST_DATE_FORMAT).unwrap()
}

/// Two metric columns of different types, as a typical report declares.
pub fn metric_headers() -> Vec<MetricHeader> {
    vec![
        MetricHeader::new("totalUsers", MetricType::TypeInteger),
        MetricHeader::new("distance", MetricType::TypeKilometers),
    ]
}

pub fn single_request(start: &str, end: &str) -> ReportRequest {
    ReportRequest::new(date(start), date(end)).unwrap()
}

pub fn compare_request(start: &str, end: &str, compare_start: &str, compare_end: &str) -> ReportRequest {
    single_request(start, end)
        .with_compare(date(compare_start), date(compare_end))
        .unwrap()
}

/// A row for `date` (and optional range index) with every metric set to `value`.
pub fn report_row(headers: &[MetricHeader], date: &str, range: Option<usize>, value: &str) -> RawRow {
    let mut dimensions = vec![date.to_string()];
    if let Some(index) = range {
        dimensions.push(format!("date_range_{}", index));
    }
    RawRow::new(dimensions, headers.iter().map(|_| value.to_string()))
}

/// Builds a response containing the given `(date, range)` rows, each carrying
/// `EXISTING_ROW_VALUE`.
pub fn response_with_rows(initial: &[(&str, Option<usize>)]) -> ReportResponse {
    let headers = metric_headers();
    let rows = initial
        .iter()
        .map(|(date, range)| report_row(&headers, date, *range, EXISTING_ROW_VALUE))
        .collect();
    ReportResponse::new(headers, rows)
}

pub fn config(mode: GapFillMode) -> NormalizerConfig {
    NormalizerConfig::default().with_gap_fill(mode)
}

/// Renders rows as `date` or `date:range_index` for compact assertions.
pub fn render(rows: &[RawRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let date = row.dimension(0).unwrap_or_default();
            match row.dimension(1).and_then(RangeTag::parse) {
                Some(tag) => format!("{}:{}", date, tag.index()),
                None => date.to_string(),
            }
        })
        .collect()
}

/// Expected metric value for a row: the existing value if the row was part
/// of the initial data, otherwise the default.
pub fn expected_value(row: &RawRow, initial: &[(&str, Option<usize>)]) -> &'static str {
    let date = row.dimension(0).unwrap_or_default();
    let range = row.dimension(1).and_then(RangeTag::parse).map(RangeTag::index);

    let existed = initial
        .iter()
        .any(|(initial_date, initial_range)| *initial_date == date && (initial_range.is_none() || *initial_range == range));

    if existed {
        EXISTING_ROW_VALUE
    } else {
        "0"
    }
}
