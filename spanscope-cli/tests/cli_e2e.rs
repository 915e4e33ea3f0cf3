//! End-to-end tests driving the spanscope binary over temp corpus files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_corpus(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp corpus");
    file.write_all(contents.as_bytes()).expect("write corpus");
    file
}

const JSONL_CORPUS: &str = r#"{"tokens": ["The", "cat", "sat", "on", "the", "mat"], "spans": [{"label": "NP", "start": 0, "end": 2}, {"label": "NP", "start": 4, "end": 6}]}
"#;

#[test]
fn test_jsonl_report_has_all_sections() {
    let file = temp_corpus(".jsonl", JSONL_CORPUS);
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Span Type Frequency"))
        .stdout(predicate::str::contains("Span Length"))
        .stdout(predicate::str::contains("Span Distinctiveness"))
        .stdout(predicate::str::contains("Span Boundary Distinctiveness"))
        .stdout(predicate::str::contains("NP"))
        .stdout(predicate::str::contains("Total spans: 2"));
}

#[test]
fn test_json_output_is_machine_readable() {
    let file = temp_corpus(".jsonl", JSONL_CORPUS);
    let output = Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .arg("--json")
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_spans"], 2);
    assert_eq!(report["labels"]["NP"]["frequency"], 2);
    assert_eq!(report["labels"]["NP"]["length"]["mean"], 2.0);
    assert!(report["labels"]["NP"]["span_distinctiveness"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_conll_input() {
    let file = temp_corpus(
        ".conll",
        "West NNP B-NP\nGermany NNP I-NP\nbeat VBD O\nEngland NNP B-NP\n",
    );
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("NP"))
        .stdout(predicate::str::contains("Total spans: 2"));
}

#[test]
fn test_nested_conll_input() {
    let file = temp_corpus(".iob2", "IL-2 B-DNA B-protein\ngene I-DNA O\n");
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .arg("--nested")
        .assert()
        .success()
        .stdout(predicate::str::contains("DNA"))
        .stdout(predicate::str::contains("protein"));
}

#[test]
fn test_verbose_prints_interpretation_notes() {
    let file = temp_corpus(".jsonl", JSONL_CORPUS);
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("KL divergence"));
}

#[test]
fn test_unknown_extension_without_format_fails() {
    let file = temp_corpus(".xyz", JSONL_CORPUS);
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_explicit_format_overrides_extension() {
    let file = temp_corpus(".xyz", JSONL_CORPUS);
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .args(["--format", "jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spans: 2"));
}

#[test]
fn test_missing_file_fails() {
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg("does/not/exist.jsonl")
        .assert()
        .failure();
}

#[test]
fn test_empty_corpus_reports_zero_spans() {
    let file = temp_corpus(".jsonl", "");
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spans: 0"));
}

#[test]
fn test_base2_log_base_accepted() {
    let file = temp_corpus(".jsonl", JSONL_CORPUS);
    Command::cargo_bin("spanscope")
        .unwrap()
        .arg(file.path())
        .args(["--log-base", "base2", "--epsilon", "1e-4"])
        .assert()
        .success();
}
