//! Reading and validating submission files.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{error, info, info_span, warn};

use ilr_ingest::{discover_inputs, file_name_of, read_message};
use ilr_standards::ReferenceData;
use ilr_validate::RuleEngine;

use crate::types::{FileResult, RunResult};

/// Validate one submission file.
pub fn validate_file(
    engine: &RuleEngine,
    reference: &ReferenceData,
    path: &Path,
) -> Result<FileResult> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();

    let message = read_message(path)?;
    let ctx = engine
        .context(reference, &message)
        .ok_or_else(|| anyhow!("cannot determine the academic year of {}", path.display()))?;
    let file_name = file_name_of(path);
    let ctx = match &file_name {
        Some(name) => ctx.with_file_name(name.clone()),
        None => ctx,
    };
    let academic_year = ctx.academic_year;
    let report = engine.validate(&message, &ctx);
    info!(
        learners = report.learner_count,
        errors = report.errors.len(),
        "Validated file"
    );
    Ok(FileResult {
        path: path.to_path_buf(),
        file_name,
        academic_year,
        report,
    })
}

/// Validate a file, or every submission in a directory. A file that cannot
/// be read is recorded in [`RunResult::errors`] and the rest still run.
pub fn validate_path(
    engine: &RuleEngine,
    reference: &ReferenceData,
    path: &Path,
) -> Result<RunResult> {
    let inputs =
        discover_inputs(path).with_context(|| format!("resolve inputs {}", path.display()))?;
    if inputs.is_empty() {
        warn!(path = %path.display(), "No submissions found");
    }

    let mut result = RunResult::default();
    for input in inputs {
        match validate_file(engine, reference, &input) {
            Ok(file) => result.files.push(file),
            Err(err) => {
                error!(path = %input.display(), "{err:#}");
                result.errors.push(format!("{}: {err:#}", input.display()));
            }
        }
    }
    Ok(result)
}
