//! # Device Shadow Documents

//! Types for the classic device shadow: the document returned by a shadow read, the reported
//! snapshot the change processor works on, and the one-attribute desired patch sent on writes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::models::DigitalLevel;

/// A shadow document as returned by the shadow service. Only `state` is interpreted, and it must be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadowDocument {
    pub state: ShadowState,
    /// Document version, when the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Reported (device-authoritative) and desired (client-requested) sub-states
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadowState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<Map<String, Value>>,
}

impl ShadowDocument {
    /// Parses a raw shadow payload
    pub fn from_slice(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(payload)
    }

    /// Merges reported and desired state into one mapping; desired wins on a name collision
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.state.reported.clone().unwrap_or_default();
        if let Some(desired) = &self.state.desired {
            for (name, value) in desired {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// The reported sub-state as a snapshot, `None` when the document carries no reported section
    pub fn reported(&self) -> Option<ReportedState> {
        self.state.reported.clone().map(ReportedState::new)
    }
}

/// One snapshot of reported signal values, read once per processing pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportedState {
    values: Map<String, Value>,
}

impl ReportedState {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Whether `signal` is reported at all; a reported `null` counts as present
    pub fn contains(&self, signal: &str) -> bool {
        self.values.contains_key(signal)
    }

    /// The reported value of `signal` in string form
    ///
    /// Strings are returned as-is, numbers and booleans are rendered; `null`, objects and arrays have no string form
    pub fn value(&self, signal: &str) -> Option<String> {
        match self.values.get(signal)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The decoded level of a digital signal, `None` when absent or not a recognised code
    pub fn level(&self, signal: &str) -> Option<DigitalLevel> {
        self.value(signal).as_deref().and_then(DigitalLevel::from_code)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ReportedState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Body of a shadow update that patches exactly one desired attribute
#[derive(Debug, Clone, Serialize)]
pub struct DesiredPatch {
    state: DesiredState,
}

#[derive(Debug, Clone, Serialize)]
struct DesiredState {
    desired: Map<String, Value>,
}

impl DesiredPatch {
    pub fn single(attribute: impl Into<String>, value: Value) -> Self {
        let mut desired = Map::new();
        desired.insert(attribute.into(), value);
        Self { state: DesiredState { desired } }
    }
}
