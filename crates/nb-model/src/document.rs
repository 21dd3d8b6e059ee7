//! Model document types for categorical Naive Bayes.
//!
//! These types mirror the JSON document written by the training-side
//! exporter. Parsing is deliberately tolerant: every field defaults, extra
//! fields are ignored, and sparse probability tables are a supported state
//! rather than a schema violation. The epsilon floor that makes sparse
//! tables safe to score lives entirely in [`Model::prior`] and
//! [`AttributeDescriptor::likelihood`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Floor used when an export predates the `epsilon` field.
pub const DEFAULT_EPSILON: f64 = 1e-12;

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

/// A trained categorical Naive Bayes model, read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Name of the class attribute in the training data. Display only.
    #[serde(default)]
    pub class_attribute: Option<String>,

    /// Ordered class labels. Order is the tie-break order for prediction.
    #[serde(default)]
    pub classes: Vec<String>,

    /// Prior probability per class label. Classes may be absent.
    #[serde(default)]
    pub class_priors: HashMap<String, f64>,

    /// Ordered attribute descriptors. Order drives form field order.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    /// Positive floor substituted for zero or missing probability mass.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

/// One discrete attribute of the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// Unique identifier; input-record key and form field name.
    #[serde(default)]
    pub name: String,

    /// Ordered discrete values; position is the likelihood-table index.
    #[serde(default)]
    pub values: Vec<String>,

    /// Per-class likelihood row aligned with `values`. Rows may be missing,
    /// short, or carry explicit nulls.
    #[serde(default)]
    pub cond_probs: HashMap<String, Vec<Option<f64>>>,
}

impl Model {
    /// Prior probability for `class`, floored at `epsilon`.
    ///
    /// A class absent from `classPriors` gets the floor, so the logarithm
    /// taken downstream always has a strictly positive argument for any
    /// positive epsilon.
    pub fn prior(&self, class: &str) -> f64 {
        let raw = self.class_priors.get(class).copied().unwrap_or(0.0);
        raw.max(self.epsilon)
    }

    /// Look up an attribute descriptor by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

impl AttributeDescriptor {
    /// Index of `value` within this attribute's value list.
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Class-conditional likelihood of `value`, with the epsilon floor.
    ///
    /// Every fallback collapses here: an absent or unknown value, a
    /// missing class row, a row shorter than the value index, an explicit
    /// null entry, and a zero/negative/non-finite entry all yield
    /// `epsilon`. Stored positive probabilities are returned as-is, even
    /// below epsilon.
    pub fn likelihood(&self, class: &str, value: Option<&str>, epsilon: f64) -> f64 {
        let stored = value
            .and_then(|v| self.value_index(v))
            .and_then(|idx| self.cond_probs.get(class).and_then(|row| row.get(idx)))
            .copied()
            .flatten();
        match stored {
            Some(p) if p > 0.0 && p.is_finite() => p,
            _ => epsilon,
        }
    }
}
