//! Input records handed to the inference engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One prediction request's attribute selections.
///
/// Keys are attribute names, values the selected category. A record is
/// built fresh per request; values come from user selection and are not
/// guaranteed to match a known category of the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InputRecord(BTreeMap<String, String>);

/// Error for malformed `name=value` assignments.
#[derive(Debug, Error)]
#[error("invalid assignment {input:?}: expected name=value")]
pub struct ParseRecordError {
    pub input: String,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selected value for an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Selected value for an attribute, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse repeated `name=value` assignments, last one wins per name.
    pub fn from_assignments<'a>(
        assignments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ParseRecordError> {
        let mut record = Self::new();
        for assignment in assignments {
            let (name, value) = assignment.split_once('=').ok_or_else(|| ParseRecordError {
                input: assignment.to_string(),
            })?;
            record.set(name, value);
        }
        Ok(record)
    }
}

impl FromIterator<(String, String)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
