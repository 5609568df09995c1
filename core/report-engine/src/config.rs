//! FILENAME: core/report-engine/src/config.rs
// PURPOSE: Normalizer settings, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dates::GapFillMode;
use crate::error::Result;
use crate::metrics::{ConstantDefault, DEFAULT_METRIC_VALUE};

/// Settings for `normalize_response`. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizerConfig {
    /// Metric value written into rows that had no data.
    pub default_metric_value: String,
    /// Which (date, range) keys a comparison report must contain.
    pub gap_fill: GapFillMode,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            default_metric_value: DEFAULT_METRIC_VALUE.to_string(),
            gap_fill: GapFillMode::default(),
        }
    }
}

impl NormalizerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_gap_fill(mut self, gap_fill: GapFillMode) -> Self {
        self.gap_fill = gap_fill;
        self
    }

    pub fn with_default_metric_value(mut self, value: impl Into<String>) -> Self {
        self.default_metric_value = value.into();
        self
    }

    /// The default-value policy these settings describe.
    pub fn policy(&self) -> ConstantDefault {
        ConstantDefault::new(self.default_metric_value.clone())
    }
}
