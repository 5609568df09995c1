//! FILENAME: core/report-engine/src/lib.rs
//! Report normalization for date-keyed analytics reports.
//!
//! Upstream reporting services only return rows for days that had data. This
//! crate turns such a sparse response into a dense one: one row per requested
//! day (and per comparison range), in a deterministic order, with zero rows
//! filling the gaps.
//!
//! Layers:
//! - `definition`: Request types (what was asked for)
//! - `response`: Upstream response records (what came back)
//! - `dates`: Key enumeration (which rows must exist)
//! - `metrics`: Metric header arity and default values
//! - `engine`: Row merge and gap filling
//! - `config` / `format`: JSON settings and file I/O

pub mod logging;
pub mod error;
pub mod definition;
pub mod response;
pub mod dates;
pub mod metrics;
pub mod engine;
pub mod config;
pub mod format;

pub use error::NormalizeError;
pub use definition::*;
pub use response::*;
pub use dates::{enumerate_keys, union_dates, GapFillMode, RowKey};
pub use metrics::{ConstantDefault, DefaultValuePolicy, MetricLayout, DEFAULT_METRIC_VALUE};
pub use engine::{normalize_response, normalize_response_with, normalize_rows};
pub use config::NormalizerConfig;
pub use format::{load_response, parse_request_json, parse_response_json, response_to_json, save_response};
