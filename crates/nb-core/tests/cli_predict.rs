//! End-to-end prediction tests for the nb-core binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const WEATHER_DOC: &str = r#"{
    "classAttribute": "play",
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
}"#;

/// Get a Command for the nb-core binary.
fn nb_core() -> Command {
    let mut cmd = Command::cargo_bin("nb-core").expect("nb-core binary should exist");
    // Keep the environment fallback chain out of test resolution.
    cmd.env_remove("NBAYES_MODEL");
    cmd
}

fn write_model(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, content).expect("write model fixture");
    path
}

#[test]
fn predict_sunny_reports_yes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    let assert = nb_core()
        .args(["predict", "--set", "weather=sunny"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("JSON payload");
    assert_eq!(report["best_class"], "yes");
    let yes = report["probabilities"]["yes"].as_f64().expect("number");
    let no = report["probabilities"]["no"].as_f64().expect("number");
    assert!(yes > no);
    assert!((yes + no - 1.0).abs() < 1e-9);
}

#[test]
fn unknown_value_still_predicts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    nb_core()
        .args(["predict", "--set", "weather=foggy", "--format", "summary"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("prediction: yes"));
}

#[test]
fn empty_class_list_reports_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, r#"{"classes": []}"#);

    nb_core()
        .args(["predict", "--format", "summary"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("prediction: none"));
}

#[test]
fn explain_adds_evidence_terms() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    let assert = nb_core()
        .args(["predict", "--set", "weather=rainy", "--explain"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("JSON payload");
    assert_eq!(report["terms"][0]["attribute"], "weather");
}

#[test]
fn interactive_predict_reads_menu_selections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    nb_core()
        .args(["predict", "--interactive", "--format", "summary"])
        .arg("--model")
        .arg(&model)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("prediction: yes"))
        .stderr(predicate::str::contains("weather:"))
        .stderr(predicate::str::contains("1) sunny"));
}

#[test]
fn markdown_format_renders_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    nb_core()
        .args(["predict", "--set", "weather=sunny", "-f", "md"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("| Class | Probability |"));
}

#[test]
fn inspect_summarizes_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    nb_core()
        .args(["inspect", "-f", "summary"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 classes, 1 attributes"));
}

#[test]
fn check_warns_on_sparse_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(
        &dir,
        r#"{"classes": ["a", "b"], "classPriors": {"a": 0.9, "b": 0.9}, "epsilon": 1e-6}"#,
    );

    nb_core()
        .args(["check", "-f", "summary"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn check_passes_clean_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    nb_core()
        .args(["check", "-f", "summary"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("model ok"));
}

#[test]
fn schema_prints_document_schema() {
    let assert = nb_core().arg("schema").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let schema: serde_json::Value = serde_json::from_str(&stdout).expect("JSON schema");
    assert!(schema["properties"].get("classPriors").is_some());
    assert!(schema["properties"].get("attributes").is_some());
}

#[test]
fn model_is_resolved_from_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let model = write_model(&dir, WEATHER_DOC);

    Command::cargo_bin("nb-core")
        .expect("nb-core binary should exist")
        .env("NBAYES_MODEL", &model)
        .args(["predict", "--set", "weather=sunny", "-f", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("prediction: yes"));
}
