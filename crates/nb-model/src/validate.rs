//! Advisory semantic validation for model documents.
//!
//! Sparse or partially-specified models are a supported degenerate case:
//! the engine floors missing probability mass at epsilon instead of
//! rejecting the document. Validation therefore reports findings for
//! `check`-style tooling and never gates loading or prediction.

use crate::document::Model;
use serde::Serialize;

/// Tolerance for "priors should sum to 1" checks.
const PRIOR_SUM_TOLERANCE: f64 = 0.01;

/// A single advisory finding about a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelWarning {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a model document for conditions worth surfacing to a human.
pub fn validate_model(model: &Model) -> Vec<ModelWarning> {
    let mut warnings = Vec::new();

    if model.classes.is_empty() {
        warn(&mut warnings, "classes", "no classes; every prediction will be the no-class sentinel");
    }
    for (i, class) in model.classes.iter().enumerate() {
        if model.classes[..i].contains(class) {
            warn(&mut warnings, "classes", format!("duplicate class label {class:?}"));
        }
    }

    if !(model.epsilon > 0.0 && model.epsilon.is_finite()) {
        warn(
            &mut warnings,
            "epsilon",
            format!("must be a positive finite float, got {}", model.epsilon),
        );
    }

    if !model.classes.is_empty() {
        let sum: f64 = model
            .classes
            .iter()
            .map(|c| model.class_priors.get(c).copied().unwrap_or(0.0))
            .sum();
        if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            warn(
                &mut warnings,
                "classPriors",
                format!("priors over listed classes sum to {sum}, expected ~1.0"),
            );
        }
    }
    for class in model.class_priors.keys() {
        if !model.classes.contains(class) {
            warn(
                &mut warnings,
                "classPriors",
                format!("prior for unknown class {class:?}"),
            );
        }
    }

    for attr in &model.attributes {
        let field = format!("attributes.{}", attr.name);
        for (i, value) in attr.values.iter().enumerate() {
            if attr.values[..i].contains(value) {
                warn(&mut warnings, field.as_str(), format!("duplicate value {value:?}"));
            }
        }
        for (class, row) in &attr.cond_probs {
            if !model.classes.contains(class) {
                warn(
                    &mut warnings,
                    field.as_str(),
                    format!("condProbs row for unknown class {class:?}"),
                );
            }
            if row.len() != attr.values.len() {
                warn(
                    &mut warnings,
                    field.as_str(),
                    format!(
                        "condProbs[{class:?}] has {} entries for {} values",
                        row.len(),
                        attr.values.len()
                    ),
                );
            }
            for (i, entry) in row.iter().enumerate() {
                match entry {
                    None => warn(
                        &mut warnings,
                        field.as_str(),
                        format!("condProbs[{class:?}][{i}] is null"),
                    ),
                    Some(p) if !(*p >= 0.0 && *p <= 1.0) => warn(
                        &mut warnings,
                        field.as_str(),
                        format!("condProbs[{class:?}][{i}] = {p} outside [0, 1]"),
                    ),
                    Some(_) => {}
                }
            }
        }
    }

    for (i, attr) in model.attributes.iter().enumerate() {
        if model.attributes[..i].iter().any(|a| a.name == attr.name) {
            warn(
                &mut warnings,
                "attributes",
                format!("duplicate attribute name {:?}", attr.name),
            );
        }
    }

    warnings
}

fn warn(warnings: &mut Vec<ModelWarning>, field: impl Into<String>, message: impl Into<String>) {
    warnings.push(ModelWarning {
        field: field.into(),
        message: message.into(),
    });
}
