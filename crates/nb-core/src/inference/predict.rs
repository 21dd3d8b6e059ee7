//! Core prediction P(C|x) for a categorical Naive Bayes model.
//!
//! Combines class priors with per-attribute likelihoods in log-domain and
//! returns the arg-max class plus a normalized posterior distribution.

use crate::record::InputRecord;
use nb_math::softmax_from_log;
use nb_model::Model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One attribute's log-likelihood contribution per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceTerm {
    pub attribute: String,
    pub log_likelihood: BTreeMap<String, f64>,
}

/// Prediction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Prediction {
    /// Arg-max class label, or None when the model lists no classes.
    pub best_class: Option<String>,

    /// Normalized posterior per class; sums to 1 whenever classes exist.
    pub probabilities: BTreeMap<String, f64>,

    /// Unnormalized log-joint score per class.
    pub log_scores: BTreeMap<String, f64>,

    /// Per-attribute evidence contributions, in attribute order.
    pub terms: Vec<EvidenceTerm>,
}

/// Compute the posterior over classes for one input record.
///
/// Pure and total: the model and record are only read, malformed model
/// data degrades through the epsilon floor instead of failing, and an
/// empty class list yields the no-class sentinel with empty maps.
///
/// Ties between equal log-scores resolve to the class listed first, via
/// strict greater-than against a running maximum.
pub fn predict(model: &Model, record: &InputRecord) -> Prediction {
    let mut scores = Vec::with_capacity(model.classes.len());
    let mut terms: Vec<EvidenceTerm> = model
        .attributes
        .iter()
        .map(|attr| EvidenceTerm {
            attribute: attr.name.clone(),
            log_likelihood: BTreeMap::new(),
        })
        .collect();

    let mut best_class: Option<&String> = None;
    let mut best_score = f64::NEG_INFINITY;

    for class in &model.classes {
        let mut log_score = model.prior(class).ln();
        for (attr, term) in model.attributes.iter().zip(terms.iter_mut()) {
            let log_likelihood = attr
                .likelihood(class, record.get(&attr.name), model.epsilon)
                .ln();
            term.log_likelihood.insert(class.clone(), log_likelihood);
            log_score += log_likelihood;
        }
        if log_score > best_score {
            best_score = log_score;
            best_class = Some(class);
        }
        scores.push(log_score);
    }
    tracing::debug!(
        classes = model.classes.len(),
        attributes = model.attributes.len(),
        best = best_class.map(String::as_str).unwrap_or("<none>"),
        "scored input record"
    );

    let probabilities = model
        .classes
        .iter()
        .cloned()
        .zip(softmax_from_log(&scores))
        .collect();
    let log_scores = model.classes.iter().cloned().zip(scores).collect();

    Prediction {
        best_class: best_class.cloned(),
        probabilities,
        log_scores,
        terms,
    }
}
