//! Output format specifications and report rendering.
//!
//! stdout carries exactly one rendered report per command; everything else
//! goes through the logging layer on stderr.

use crate::inference::{EvidenceTerm, Prediction};
use crate::record::InputRecord;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use nb_model::{LoadedModel, ModelSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,

    /// Human-readable Markdown
    Md,

    /// One-line summary for quick status checks
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// A prediction with its provenance, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PredictionReport {
    pub predicted_at: DateTime<Utc>,
    pub model_path: PathBuf,
    pub model_hash: String,
    pub model_source: String,
    pub record: InputRecord,
    pub best_class: Option<String>,
    pub probabilities: BTreeMap<String, f64>,
    pub log_scores: BTreeMap<String, f64>,

    /// Per-attribute evidence contributions; present with `--explain`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<EvidenceTerm>>,
}

impl PredictionReport {
    pub fn new(
        loaded: &LoadedModel,
        source: ModelSource,
        record: InputRecord,
        prediction: Prediction,
        explain: bool,
    ) -> Self {
        Self {
            predicted_at: Utc::now(),
            model_path: loaded.path.clone(),
            model_hash: loaded.hash.clone(),
            model_source: source.to_string(),
            record,
            best_class: prediction.best_class,
            probabilities: prediction.probabilities,
            log_scores: prediction.log_scores,
            terms: explain.then_some(prediction.terms),
        }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Md => self.render_md(),
            OutputFormat::Summary => self.render_summary(),
        }
    }

    fn render_summary(&self) -> String {
        match &self.best_class {
            Some(class) => {
                let p = self.probabilities.get(class).copied().unwrap_or(0.0);
                format!("prediction: {class} (p={p:.3})")
            }
            None => "prediction: none (model lists no classes)".to_string(),
        }
    }

    fn render_md(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Prediction\n");
        match &self.best_class {
            Some(class) => {
                let _ = writeln!(out, "Best class: **{class}**\n");
            }
            None => {
                let _ = writeln!(out, "Best class: _none_ (model lists no classes)\n");
            }
        }
        if !self.probabilities.is_empty() {
            let _ = writeln!(out, "| Class | Probability |");
            let _ = writeln!(out, "|-------|-------------|");
            for (class, p) in &self.probabilities {
                let _ = writeln!(out, "| {class} | {p:.6} |");
            }
        }
        if let Some(terms) = &self.terms {
            let _ = writeln!(out, "\n## Evidence\n");
            for term in terms {
                let _ = writeln!(out, "### {}\n", term.attribute);
                let _ = writeln!(out, "| Class | log-likelihood |");
                let _ = writeln!(out, "|-------|----------------|");
                for (class, ll) in &term.log_likelihood {
                    let _ = writeln!(out, "| {class} | {ll:.6} |");
                }
                let _ = writeln!(out);
            }
        }
        out
    }
}

/// A loaded model summarized for humans and tooling.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InspectReport {
    pub path: PathBuf,
    pub hash: String,
    pub source: String,
    pub class_attribute: Option<String>,
    pub epsilon: f64,
    pub classes: Vec<ClassInfo>,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassInfo {
    pub label: String,
    /// Prior as stored in the document, before any flooring.
    pub prior: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AttributeInfo {
    pub name: String,
    pub values: usize,
    /// Number of classes with a conditional-probability row.
    pub class_rows: usize,
}

impl InspectReport {
    pub fn new(loaded: &LoadedModel, source: ModelSource) -> Self {
        let model = &loaded.model;
        Self {
            path: loaded.path.clone(),
            hash: loaded.hash.clone(),
            source: source.to_string(),
            class_attribute: model.class_attribute.clone(),
            epsilon: model.epsilon,
            classes: model
                .classes
                .iter()
                .map(|label| ClassInfo {
                    label: label.clone(),
                    prior: model.class_priors.get(label).copied(),
                })
                .collect(),
            attributes: model
                .attributes
                .iter()
                .map(|attr| AttributeInfo {
                    name: attr.name.clone(),
                    values: attr.values.len(),
                    class_rows: attr.cond_probs.len(),
                })
                .collect(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Md => self.render_md(),
            OutputFormat::Summary => format!(
                "model: {} classes, {} attributes (epsilon {})",
                self.classes.len(),
                self.attributes.len(),
                self.epsilon
            ),
        }
    }

    fn render_md(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Model\n");
        let _ = writeln!(out, "- Path: `{}` ({})", self.path.display(), self.source);
        let _ = writeln!(out, "- SHA-256: `{}`", self.hash);
        if let Some(class_attribute) = &self.class_attribute {
            let _ = writeln!(out, "- Class attribute: {class_attribute}");
        }
        let _ = writeln!(out, "- Epsilon: {}\n", self.epsilon);

        let _ = writeln!(out, "## Classes\n");
        let _ = writeln!(out, "| Label | Prior |");
        let _ = writeln!(out, "|-------|-------|");
        for class in &self.classes {
            match class.prior {
                Some(p) => {
                    let _ = writeln!(out, "| {} | {:.6} |", class.label, p);
                }
                None => {
                    let _ = writeln!(out, "| {} | (missing) |", class.label);
                }
            }
        }

        let _ = writeln!(out, "\n## Attributes\n");
        let _ = writeln!(out, "| Name | Values | Class rows |");
        let _ = writeln!(out, "|------|--------|------------|");
        for attr in &self.attributes {
            let _ = writeln!(out, "| {} | {} | {} |", attr.name, attr.values, attr.class_rows);
        }
        out
    }
}

fn to_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {e}"}}"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::predict;
    use nb_model::Model;

    fn loaded_fixture() -> LoadedModel {
        let model = Model::from_json_str(
            r#"{
                "classes": ["yes", "no"],
                "classPriors": {"yes": 0.5, "no": 0.5},
                "epsilon": 1e-6,
                "attributes": [
                    {
                        "name": "weather",
                        "values": ["sunny", "rainy"],
                        "condProbs": {"yes": [0.8, 0.2], "no": [0.3, 0.7]}
                    }
                ]
            }"#,
        )
        .expect("fixture parses");
        LoadedModel {
            model,
            path: PathBuf::from("/tmp/model.json"),
            hash: "cafe".repeat(16),
        }
    }

    fn report(explain: bool) -> PredictionReport {
        let loaded = loaded_fixture();
        let mut record = InputRecord::new();
        record.set("weather", "sunny");
        let prediction = predict(&loaded.model, &record);
        PredictionReport::new(&loaded, ModelSource::CliArgument, record, prediction, explain)
    }

    #[test]
    fn summary_names_best_class() {
        let rendered = report(false).render(OutputFormat::Summary);
        assert!(rendered.starts_with("prediction: yes (p="));
    }

    #[test]
    fn json_roundtrips_and_omits_terms_by_default() {
        let rendered = report(false).render(OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(parsed["best_class"], "yes");
        assert!(parsed.get("terms").is_none());
        assert_eq!(parsed["model_source"], "CLI argument");
    }

    #[test]
    fn explain_includes_evidence_terms() {
        let rendered = report(true).render(OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(parsed["terms"][0]["attribute"], "weather");
    }

    #[test]
    fn md_contains_probability_table() {
        let rendered = report(false).render(OutputFormat::Md);
        assert!(rendered.contains("Best class: **yes**"));
        assert!(rendered.contains("| Class | Probability |"));
    }

    #[test]
    fn inspect_counts_model_shape() {
        let inspect = InspectReport::new(&loaded_fixture(), ModelSource::XdgConfig);
        assert_eq!(inspect.classes.len(), 2);
        assert_eq!(inspect.attributes[0].values, 2);
        assert_eq!(inspect.attributes[0].class_rows, 2);
        let summary = inspect.render(OutputFormat::Summary);
        assert_eq!(summary, "model: 2 classes, 1 attributes (epsilon 0.000001)");
    }
}
