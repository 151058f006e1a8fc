//! Analytics record definitions.
//!
//! A record is what the lookup endpoint returns for one identifier. The same
//! type covers both catalog shapes: the detailed one (`trend` plus a list of
//! error flows) and the reduced one (a bare `errors` count). Fields that are
//! not set are left out of the JSON entirely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction indicator for a record or an error flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Impact of an error flow.
///
/// `high` and `low` are the values seen in practice, but the field is free
/// text on the wire, so anything else is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Impact {
    High,
    Low,
    Other(String),
}

impl Impact {
    pub fn as_str(&self) -> &str {
        match self {
            Impact::High => "high",
            Impact::Low => "low",
            Impact::Other(value) => value,
        }
    }
}

impl From<String> for Impact {
    fn from(value: String) -> Self {
        match value.as_str() {
            "high" => Impact::High,
            "low" => Impact::Low,
            _ => Impact::Other(value),
        }
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        match impact {
            Impact::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error pattern observed on a code object.
///
/// Every field is optional: the catalog contains placeholder flows that
/// carry no data at all and must serialise back to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Free-text rate, e.g. "20 per day"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    /// Human-readable error type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Raw stack trace, possibly spanning many lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ErrorFlow {
    /// A flow with every field filled in except the stack trace.
    pub fn new(
        trend: Trend,
        frequency: impl Into<String>,
        impact: Impact,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            trend: Some(trend),
            frequency: Some(frequency.into()),
            impact: Some(impact),
            display_name: Some(display_name.into()),
            stack_trace: None,
        }
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// True for the empty `{}` placeholder entry.
    pub fn is_placeholder(&self) -> bool {
        *self == ErrorFlow::default()
    }
}

/// Analytics attached to a single identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_flows: Option<Vec<ErrorFlow>>,
    /// Error count used by the reduced catalog shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<u64>,
}

impl AnalyticsRecord {
    /// Detailed record: a trend and its error flows.
    pub fn with_flows(trend: Trend, error_flows: Vec<ErrorFlow>) -> Self {
        Self {
            trend: Some(trend),
            error_flows: Some(error_flows),
            errors: None,
        }
    }

    /// Reduced record carrying only an error count.
    pub fn with_error_count(errors: u64) -> Self {
        Self {
            trend: None,
            error_flows: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_flow_serialises_empty() {
        let record = AnalyticsRecord::with_flows(Trend::Up, vec![ErrorFlow::default()]);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"trend": "up", "errorFlows": [{}]}));
        assert!(record.error_flows.unwrap()[0].is_placeholder());
    }

    #[test]
    fn test_empty_flows_are_kept() {
        let record = AnalyticsRecord::with_flows(Trend::Down, vec![]);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"trend": "down", "errorFlows": []}));
    }

    #[test]
    fn test_reduced_record_shape() {
        let value = serde_json::to_value(AnalyticsRecord::with_error_count(15)).unwrap();
        assert_eq!(value, json!({"errors": 15}));
    }

    #[test]
    fn test_full_flow_uses_camel_case() {
        let flow = ErrorFlow::new(Trend::Up, "20 per day", Impact::High, "NullError")
            .with_stack_trace("stack1");
        let value = serde_json::to_value(&flow).unwrap();
        assert_eq!(
            value,
            json!({
                "trend": "up",
                "frequency": "20 per day",
                "impact": "high",
                "displayName": "NullError",
                "stackTrace": "stack1",
            })
        );
        assert!(!flow.is_placeholder());
    }

    #[test]
    fn test_unknown_impact_is_preserved() {
        let flow: ErrorFlow = serde_json::from_value(json!({"impact": "medium"})).unwrap();
        assert_eq!(flow.impact, Some(Impact::Other("medium".to_string())));
        assert_eq!(serde_json::to_value(&flow).unwrap(), json!({"impact": "medium"}));

        let flow: ErrorFlow = serde_json::from_value(json!({"impact": "low"})).unwrap();
        assert_eq!(flow.impact, Some(Impact::Low));
    }

    #[test]
    fn test_unknown_trend_is_rejected() {
        let result = serde_json::from_value::<AnalyticsRecord>(json!({"trend": "sideways"}));
        assert!(result.is_err());
    }
}
