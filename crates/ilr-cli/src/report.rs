//! JSON and CSV error reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::RunResult;

/// The full run as pretty-printed JSON.
pub fn render_json(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("serialize report")
}

pub fn write_json(path: &Path, result: &RunResult) -> Result<()> {
    let json = render_json(result)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}

const CSV_HEADER: [&str; 8] = [
    "File",
    "RuleName",
    "Severity",
    "Category",
    "LearnRefNumber",
    "AimSeqNumber",
    "ErrorMessage",
    "FieldValues",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    rule_name: &'a str,
    severity: &'static str,
    category: &'static str,
    learn_ref_number: Option<&'a str>,
    aim_seq_number: Option<i32>,
    error_message: &'a str,
    field_values: String,
}

/// One row per validation error across all files, after a header row.
pub fn write_csv_to<W: Write>(writer: W, result: &RunResult) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(CSV_HEADER).context("write CSV header")?;
    for file in &result.files {
        let name = file.display_name();
        for error in &file.report.errors {
            csv.serialize(CsvRow {
                file: &name,
                rule_name: &error.rule_name,
                severity: error.severity.code(),
                category: error.category.label(),
                learn_ref_number: error.learn_ref_number.as_deref(),
                aim_seq_number: error.aim_seq_number,
                error_message: &error.message,
                field_values: error.field_values(),
            })
            .context("write CSV row")?;
        }
    }
    csv.flush().context("flush CSV report")?;
    Ok(())
}

pub fn write_csv(path: &Path, result: &RunResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv_to(BufWriter::new(file), result)?;
    tracing::info!(path = %path.display(), "Wrote CSV report");
    Ok(())
}
