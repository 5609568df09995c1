//! FILENAME: core/report-engine/src/response.rs
//! Report Response - the upstream run-report payload.
//!
//! Plain immutable records mirroring the upstream JSON. Row values travel as
//! `{ "value": "..." }` objects on the wire but are held as plain strings here.
//! Top-level fields the normalizer does not touch are kept in `extra` so they
//! survive a load/normalize/save cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// HEADERS
// ============================================================================

/// Value type of a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    TypeInteger,
    TypeFloat,
    TypeSeconds,
    TypeMilliseconds,
    TypeMinutes,
    TypeHours,
    TypeStandard,
    TypeCurrency,
    TypeFeet,
    TypeMiles,
    TypeMeters,
    TypeKilometers,
    #[serde(rename = "METRIC_TYPE_UNSPECIFIED")]
    #[serde(other)]
    Unspecified,
}

impl Default for MetricType {
    fn default() -> Self {
        MetricType::Unspecified
    }
}

/// Describes one metric column of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricHeader {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub metric_type: MetricType,
}

impl MetricHeader {
    pub fn new(name: impl Into<String>, metric_type: MetricType) -> Self {
        MetricHeader {
            name: name.into(),
            metric_type,
        }
    }
}

/// Describes one dimension column of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionHeader {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// ROWS
// ============================================================================

/// A single report row: dimension values followed by metric values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    #[serde(default, with = "wrapped_values")]
    pub dimension_values: Vec<String>,
    #[serde(default, with = "wrapped_values")]
    pub metric_values: Vec<String>,
}

impl RawRow {
    pub fn new<D, M>(dimension_values: D, metric_values: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        RawRow {
            dimension_values: dimension_values.into_iter().map(Into::into).collect(),
            metric_values: metric_values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimension_values.get(index).map(String::as_str)
    }
}

/// (De)serializes `Vec<String>` as `[{ "value": "..." }, ...]`.
mod wrapped_values {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Wrapped<T> {
        #[serde(default)]
        value: T,
    }

    pub fn serialize<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wrapped: Vec<Wrapped<&str>> = values
            .iter()
            .map(|value| Wrapped { value: value.as_str() })
            .collect();
        wrapped.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wrapped: Vec<Wrapped<String>> = Vec::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|item| item.value).collect())
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// A run-report response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<DimensionHeader>,
    #[serde(default)]
    pub metric_headers: Vec<MetricHeader>,
    #[serde(default)]
    pub rows: Vec<RawRow>,
    #[serde(default)]
    pub row_count: usize,
    /// Any other top-level fields (metadata, kind, totals...), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportResponse {
    /// Builds a response whose `row_count` matches `rows`.
    pub fn new(metric_headers: Vec<MetricHeader>, rows: Vec<RawRow>) -> Self {
        ReportResponse {
            dimension_headers: Vec::new(),
            metric_headers,
            row_count: rows.len(),
            rows,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_values_are_wrapped_on_the_wire() {
        let row = RawRow::new(["20230201", "date_range_0"], ["12"]);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "dimensionValues": [{ "value": "20230201" }, { "value": "date_range_0" }],
                "metricValues": [{ "value": "12" }]
            })
        );
    }

    #[test]
    fn test_response_keeps_unknown_fields() {
        let json = r#"{
            "metricHeaders": [{ "name": "totalUsers", "type": "TYPE_INTEGER" }],
            "rows": [{ "dimensionValues": [{ "value": "20230201" }], "metricValues": [{ "value": "3" }] }],
            "rowCount": 1,
            "kind": "analyticsData#runReport",
            "metadata": { "currencyCode": "USD" }
        }"#;

        let response: ReportResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.metric_headers[0].metric_type, MetricType::TypeInteger);
        assert_eq!(response.rows[0].dimension(0), Some("20230201"));
        assert_eq!(response.extra["kind"], "analyticsData#runReport");

        let back = serde_json::to_value(&response).unwrap();
        assert_eq!(back["metadata"]["currencyCode"], "USD");
    }

    #[test]
    fn test_unknown_metric_type_is_unspecified() {
        let header: MetricHeader =
            serde_json::from_str(r#"{ "name": "x", "type": "TYPE_LIGHTYEARS" }"#).unwrap();
        assert_eq!(header.metric_type, MetricType::Unspecified);
    }

    #[test]
    fn test_metric_type_wire_names() {
        let headers: Vec<MetricHeader> = serde_json::from_str(
            r#"[{ "name": "a", "type": "TYPE_KILOMETERS" }, { "name": "b", "type": "METRIC_TYPE_UNSPECIFIED" }]"#,
        )
        .unwrap();
        assert_eq!(headers[0].metric_type, MetricType::TypeKilometers);
        assert_eq!(headers[1].metric_type, MetricType::Unspecified);

        let json = serde_json::to_value(MetricHeader::new("c", MetricType::Unspecified)).unwrap();
        assert_eq!(json["type"], "METRIC_TYPE_UNSPECIFIED");
    }

    #[test]
    fn test_missing_fields_default() {
        let response: ReportResponse = serde_json::from_str("{}").unwrap();
        assert!(response.rows.is_empty());
        assert_eq!(response.row_count, 0);
        assert!(response.extra.is_empty());
    }
}
