//! FILENAME: core/report-engine/src/metrics.rs
//! Metric header interpretation.
//!
//! Turns the report's metric headers into the two facts the row merger needs:
//! how many metric values every row must carry, and which values a synthesized
//! row gets. The default values come from a `DefaultValuePolicy`, so callers
//! can swap the sentinel without touching the merger.

use crate::error::{NormalizeError, Result};
use crate::response::{MetricHeader, RawRow};

/// Sentinel metric value for rows that had no data.
pub const DEFAULT_METRIC_VALUE: &str = "0";

// ============================================================================
// DEFAULT VALUE POLICY
// ============================================================================

/// Supplies the metric value used for a column of a synthesized row.
pub trait DefaultValuePolicy: Send + Sync {
    fn default_value(&self, header: &MetricHeader) -> String;
}

/// Same value for every metric column regardless of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDefault {
    value: String,
}

impl ConstantDefault {
    pub fn new(value: impl Into<String>) -> Self {
        ConstantDefault { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Default for ConstantDefault {
    fn default() -> Self {
        ConstantDefault::new(DEFAULT_METRIC_VALUE)
    }
}

impl DefaultValuePolicy for ConstantDefault {
    fn default_value(&self, _header: &MetricHeader) -> String {
        self.value.clone()
    }
}

// ============================================================================
// METRIC LAYOUT
// ============================================================================

/// Arity and default values derived once per report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLayout {
    defaults: Vec<String>,
}

impl MetricLayout {
    pub fn from_headers(headers: &[MetricHeader], policy: &dyn DefaultValuePolicy) -> Self {
        MetricLayout {
            defaults: headers.iter().map(|header| policy.default_value(header)).collect(),
        }
    }

    /// Number of metric values every row must carry.
    pub fn arity(&self) -> usize {
        self.defaults.len()
    }

    /// Metric values for a row that had no data. Empty when there are no headers.
    pub fn default_values(&self) -> Vec<String> {
        self.defaults.clone()
    }

    /// Rejects an input row whose metric count differs from the header count.
    pub fn check_row(&self, position: usize, row: &RawRow) -> Result<()> {
        if row.metric_values.len() != self.arity() {
            return Err(NormalizeError::MetricArityMismatch {
                row: position,
                expected: self.arity(),
                found: row.metric_values.len(),
            });
        }
        Ok(())
    }
}
