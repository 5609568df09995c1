//! FILENAME: core/report-engine/src/engine.rs
//! Report normalization engine.
//!
//! Merges the rows an upstream report actually returned with the keys the
//! request implies (see `dates`), producing a dense row set:
//! 1. Validate every input row against the metric header arity
//! 2. Index input rows by (date, range tag)
//! 3. Walk the enumerated keys, copying matched rows and synthesizing the rest
//!
//! Only reports grouped by `date` alone are densified. Any other dimension
//! makes several rows per date legitimate, so such reports pass through.
//!
//! Everything here is a pure function of its arguments.

use rustc_hash::FxHashMap;

use crate::config::NormalizerConfig;
use crate::dates::{enumerate_keys, GapFillMode, RowKey};
use crate::definition::{RangeTag, ReportRequest};
use crate::error::Result;
use crate::logging::{log_debug, log_enter, log_exit, log_warn};
use crate::metrics::{DefaultValuePolicy, MetricLayout};
use crate::response::{MetricHeader, RawRow, ReportResponse};

const LOG_CAT: &str = "NORMALIZE";

/// Row dimension positions of a date-only report.
const DATE_POSITION: usize = 0;

// ============================================================================
// ROW INDEX
// ============================================================================

type IndexKey = (String, Option<RangeTag>);

/// Input rows addressable by (date value, range tag).
struct RowIndex<'a> {
    rows: FxHashMap<IndexKey, &'a RawRow>,
}

impl<'a> RowIndex<'a> {
    fn build(request: &ReportRequest, rows: &'a [RawRow]) -> Self {
        let multi_range = request.is_multi_range();
        let tag_index = request.range_tag_index();
        let mut index: FxHashMap<IndexKey, &'a RawRow> = FxHashMap::default();

        for (position, row) in rows.iter().enumerate() {
            let date = match row.dimension(DATE_POSITION) {
                Some(date) => date,
                None => {
                    log_debug!(LOG_CAT, "row {} has no date dimension, skipped", position);
                    continue;
                }
            };

            let range = if multi_range {
                // A comparison row without a tag belongs to the primary range.
                match row.dimension(tag_index) {
                    None => Some(RangeTag::Primary),
                    Some(value) => match RangeTag::parse(value) {
                        Some(tag) => Some(tag),
                        None => {
                            log_debug!(LOG_CAT, "row {} has unknown range tag {:?}, skipped", position, value);
                            continue;
                        }
                    },
                }
            } else {
                None
            };

            let key = (date.to_string(), range);
            if index.contains_key(&key) {
                log_warn!(LOG_CAT, "row {} duplicates date {} range {:?}, dropped", position, date, range);
                continue;
            }
            index.insert(key, row);
        }

        RowIndex { rows: index }
    }

    fn get(&self, key: &IndexKey) -> Option<&'a RawRow> {
        self.rows.get(key).copied()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// ============================================================================
// ROW SYNTHESIS
// ============================================================================

/// Builds the zero row for a key with no matching input row.
fn synthesize_row(key: &RowKey, date_value: String, layout: &MetricLayout) -> RawRow {
    let mut dimension_values = vec![date_value];
    if let Some(tag) = key.range {
        dimension_values.push(tag.as_str().to_string());
    }

    RawRow {
        dimension_values,
        metric_values: layout.default_values(),
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Produces the dense, ordered row set for `request`.
///
/// Rows are returned unchanged unless the request is grouped by `date` alone.
pub fn normalize_rows(
    request: &ReportRequest,
    metric_headers: &[MetricHeader],
    rows: &[RawRow],
    policy: &dyn DefaultValuePolicy,
    mode: GapFillMode,
) -> Result<Vec<RawRow>> {
    if !request.is_date_only() {
        log_debug!(LOG_CAT, "dimensions {:?} are not date-only, rows passed through", request.dimensions());
        return Ok(rows.to_vec());
    }

    let layout = MetricLayout::from_headers(metric_headers, policy);
    for (position, row) in rows.iter().enumerate() {
        layout.check_row(position, row)?;
    }

    let index = RowIndex::build(request, rows);
    let keys = enumerate_keys(request, mode);

    let mut normalized = Vec::with_capacity(keys.len());
    let mut matched = 0usize;

    for key in &keys {
        let lookup: IndexKey = (key.date_value(), key.range);
        match index.get(&lookup) {
            Some(row) => {
                matched += 1;
                normalized.push(row.clone());
            }
            None => normalized.push(synthesize_row(key, lookup.0, &layout)),
        }
    }

    if matched < index.len() {
        log_debug!(LOG_CAT, "{} indexed rows fell outside the requested ranges", index.len() - matched);
    }

    Ok(normalized)
}

/// Replaces the response rows with the normalized set and updates `row_count`.
/// All other response fields are left untouched.
pub fn normalize_response_with(
    request: &ReportRequest,
    mut response: ReportResponse,
    policy: &dyn DefaultValuePolicy,
    mode: GapFillMode,
) -> Result<ReportResponse> {
    log_enter!(LOG_CAT, "normalize_response", "rows={} mode={:?}", response.rows.len(), mode);

    if !request.is_date_only() {
        log_exit!(LOG_CAT, "normalize_response", "passed through");
        return Ok(response);
    }

    let rows = normalize_rows(request, &response.metric_headers, &response.rows, policy, mode)?;
    response.row_count = rows.len();
    response.rows = rows;

    log_exit!(LOG_CAT, "normalize_response", "rows={}", response.row_count);
    Ok(response)
}

/// Normalizes a response using the policy and mode from `config`.
pub fn normalize_response(
    request: &ReportRequest,
    response: ReportResponse,
    config: &NormalizerConfig,
) -> Result<ReportResponse> {
    normalize_response_with(request, response, &config.policy(), config.gap_fill)
}

// ============================================================================
// TESTS
// ============================================================================
