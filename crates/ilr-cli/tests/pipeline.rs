//! Integration tests for validating files and writing reports.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ilr_cli::pipeline::{validate_file, validate_path};
use ilr_cli::report::{render_json, write_csv, write_csv_to};
use ilr_standards::ReferenceData;
use ilr_validate::{RuleEngine, ValidationOptions};

const FIXTURE: &str = "ILR-10000001-1920-20191001-093000-01.XML";

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../ilr-ingest/tests/fixtures")
        .join(FIXTURE)
}

fn engine(rules: &[&str]) -> RuleEngine {
    RuleEngine::with_default_rules().with_options(
        ValidationOptions::new()
            .with_today(NaiveDate::from_ymd_opt(2019, 10, 2).unwrap())
            .with_include_rules(rules.iter().copied()),
    )
}

#[test]
fn validates_single_file() {
    let reference = ReferenceData::load_embedded().unwrap();
    let file = validate_file(&engine(&["DateOfBirth_01"]), &reference, &fixture()).unwrap();

    assert_eq!(file.file_name.as_deref(), Some(FIXTURE));
    assert_eq!(file.academic_year.code(), "1920");
    assert_eq!(file.report.learner_count, 2);
    assert_eq!(file.report.error_count(), 1);
}

#[test]
fn unreadable_file_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixture(), dir.path().join(FIXTURE)).unwrap();
    std::fs::write(
        dir.path().join("ILR-10000001-1920-20191002-093000-02.XML"),
        "<Message><Header>",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a submission").unwrap();

    let reference = ReferenceData::load_embedded().unwrap();
    let result = validate_path(&engine(&["DateOfBirth_01"]), &reference, dir.path()).unwrap();

    assert_eq!(result.files.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("20191002"));
    assert!(result.has_errors());
    assert!(!result.has_warnings());
}

#[test]
fn missing_path_is_an_error() {
    let reference = ReferenceData::load_embedded().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");
    assert!(validate_path(&engine(&[]), &reference, &missing).is_err());
}

#[test]
fn csv_report_has_one_row_per_error() {
    let reference = ReferenceData::load_embedded().unwrap();
    let result =
        validate_path(&engine(&["DateOfBirth_01", "Sex_01"]), &reference, &fixture()).unwrap();

    let mut buffer = Vec::new();
    write_csv_to(&mut buffer, &result).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(csv, @r"
    File,RuleName,Severity,Category,LearnRefNumber,AimSeqNumber,ErrorMessage,FieldValues
    ILR-10000001-1920-20191001-093000-01.XML,DateOfBirth_01,E,Presence,LRN002,,The Date of birth must be returned for this Funding model,DateOfBirth=
    ");
}

#[test]
fn csv_report_written_to_disk() {
    let reference = ReferenceData::load_embedded().unwrap();
    let result = validate_path(&engine(&["Sex_01"]), &reference, &fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("errors.csv");

    write_csv(&path, &result).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("File,RuleName,"));
}

#[test]
fn json_report_serializes_every_file() {
    let reference = ReferenceData::load_embedded().unwrap();
    let result = validate_path(&engine(&["DateOfBirth_01"]), &reference, &fixture()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
    let file = &json["files"][0];
    assert_eq!(file["file_name"], FIXTURE);
    assert_eq!(file["academic_year"], "1920");
    assert_eq!(file["report"]["learner_count"], 2);
    assert_eq!(file["report"]["errors"][0]["rule_name"], "DateOfBirth_01");
    assert_eq!(file["report"]["errors"][0]["severity"], "Error");
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(0));
}
