//! Intervention records and the append-only log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterventionKind {
    Ventilator,
    Fluid,
    Medication,
    Other,
}

/// A parameter value: numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// One entry in the intervention log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InterventionKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl Intervention {
    pub fn new(
        id: impl Into<String>,
        kind: InterventionKind,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            timestamp,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }
}

/// Append-only, insertion-ordered record of interventions.
#[derive(Debug, Clone, Default)]
pub struct InterventionLog {
    entries: Vec<Intervention>,
    sequence: u64,
}

impl InterventionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from saved entries; ids keep counting from their length.
    pub fn from_entries(entries: Vec<Intervention>) -> Self {
        let sequence = entries.len() as u64;
        Self { entries, sequence }
    }

    /// Next unique id: `<prefix>-<epoch millis>-<sequence>`.
    pub fn next_id(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        self.sequence += 1;
        format!("{}-{}-{}", prefix, now.timestamp_millis(), self.sequence)
    }

    pub fn push(&mut self, entry: Intervention) -> &Intervention {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.sequence = 0;
    }

    pub fn entries(&self) -> &[Intervention] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn of_kind(&self, kind: InterventionKind) -> impl Iterator<Item = &Intervention> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}
