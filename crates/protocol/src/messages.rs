//! Request and response envelopes for the `get_by_ids` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::ProtocolError;
use crate::records::AnalyticsRecord;

/// Body of a lookup request: `{"ids": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetByIdsRequest {
    /// Identifiers to look up. Order and duplicates carry no meaning.
    pub ids: Vec<String>,
}

impl GetByIdsRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a raw request body.
    ///
    /// The body must be a JSON object whose `ids` field is a list of
    /// strings. Any other field is ignored.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ProtocolError::malformed(format!("body is not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Validate an already-decoded JSON body.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut fields) = value else {
            return Err(ProtocolError::malformed("body must be a JSON object"));
        };

        let ids = fields
            .remove("ids")
            .ok_or_else(|| ProtocolError::malformed("missing `ids` field"))?;

        let ids: Vec<String> = serde_json::from_value(ids).map_err(|e| {
            ProtocolError::malformed(format!("`ids` must be a list of strings: {}", e))
        })?;

        Ok(Self { ids })
    }
}

/// Body of a lookup response: `{"analytics": {<id>: <record>, ...}}`.
///
/// Keys are kept sorted so identical lookups render identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetByIdsResponse {
    pub analytics: BTreeMap<String, AnalyticsRecord>,
}

impl GetByIdsResponse {
    pub fn new(analytics: BTreeMap<String, AnalyticsRecord>) -> Self {
        Self { analytics }
    }

    pub fn len(&self) -> usize {
        self.analytics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analytics.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
