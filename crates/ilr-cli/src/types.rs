use std::path::PathBuf;

use serde::Serialize;

use ilr_model::{AcademicYear, ValidationReport};

/// Outcome of validating one submission file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub file_name: Option<String>,
    pub academic_year: AcademicYear,
    pub report: ValidationReport,
}

impl FileResult {
    /// Name shown in summaries and reports.
    pub fn display_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcome of a `validate` run over one or more files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    pub files: Vec<FileResult>,
    /// Inputs that could not be read or validated.
    pub errors: Vec<String>,
}

impl RunResult {
    /// True when any file is rejected, has errors or could not be read.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.files.iter().any(|f| f.report.has_errors())
    }

    pub fn has_warnings(&self) -> bool {
        self.files.iter().any(|f| f.report.warning_count() > 0)
    }
}
