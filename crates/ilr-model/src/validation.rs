//! Validation result types shared by the rule engine and its consumers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// The whole file is rejected.
    Fail,
    /// The learner is rejected.
    Error,
    /// Should be reviewed; the learner is still accepted.
    Warning,
}

impl Severity {
    /// Parse severity from a catalog or config value (`F`, `E`, `W` or the full word).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "f" | "fail" => Some(Self::Fail),
            "e" | "error" => Some(Self::Error),
            "w" | "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Single-letter code used in error reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fail => "F",
            Self::Error => "E",
            Self::Warning => "W",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rule category (parsed from the rule catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    /// Field must (or must not) be returned.
    Presence,
    /// Value must exist in a reference lookup.
    Lookup,
    /// Value must match a structural format.
    Format,
    /// Cross-field consistency within a record.
    Consistency,
    /// Value range or occurrence limits.
    Limit,
    /// Reference to an external dataset (LARS, organisations, postcodes).
    CrossReference,
    /// File-level checks on the submission itself.
    File,
    #[default]
    Unknown,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Presence,
            Self::Lookup,
            Self::Format,
            Self::Consistency,
            Self::Limit,
            Self::CrossReference,
            Self::File,
        ]
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "presence" => Self::Presence,
            "lookup" => Self::Lookup,
            "format" => Self::Format,
            "consistency" => Self::Consistency,
            "limit" => Self::Limit,
            "cross reference" | "crossreference" | "cross-reference" => Self::CrossReference,
            "file" => Self::File,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Presence => "Presence",
            Self::Lookup => "Lookup",
            Self::Format => "Format",
            Self::Consistency => "Consistency",
            Self::Limit => "Limit",
            Self::CrossReference => "Cross Reference",
            Self::File => "File",
            Self::Unknown => "Unknown",
        }
    }
}

/// A named field value attached to a violation for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorParameter {
    pub property_name: String,
    pub value: String,
}

impl ErrorParameter {
    pub fn new(property_name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            property_name: property_name.into(),
            value: value.to_string(),
        }
    }
}

/// A resolved validation error, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub rule_name: String,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub learn_ref_number: Option<String>,
    pub aim_seq_number: Option<i32>,
    pub parameters: Vec<ErrorParameter>,
}

impl ValidationError {
    /// Parameters rendered as `Name=Value` pairs joined by `|`.
    pub fn field_values(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{}={}", p.property_name, p.value))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// A rule that could not complete for a learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    pub rule_name: String,
    pub learn_ref_number: Option<String>,
    pub detail: String,
}

/// Count of violations raised by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub rule_name: String,
    pub severity: Severity,
    pub count: usize,
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub learner_count: usize,
    pub rules_run: usize,
    pub failures: Vec<RuleFailure>,
}

impl ValidationReport {
    pub fn new(learner_count: usize, rules_run: usize) -> Self {
        Self {
            errors: Vec::new(),
            learner_count,
            rules_run,
            failures: Vec::new(),
        }
    }

    fn count_of(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    pub fn fail_count(&self) -> usize {
        self.count_of(Severity::Fail)
    }

    pub fn error_count(&self) -> usize {
        self.count_of(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_of(Severity::Warning)
    }

    /// True when the whole file is rejected.
    pub fn is_rejected(&self) -> bool {
        self.fail_count() > 0
    }

    /// True when anything would stop data being accepted.
    pub fn has_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e.severity, Severity::Fail | Severity::Error))
    }

    /// LearnRefNumbers of learners rejected by at least one error.
    pub fn invalid_learners(&self) -> BTreeSet<&str> {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .filter_map(|e| e.learn_ref_number.as_deref())
            .collect()
    }

    /// Learners that would be accepted; zero when the file is rejected.
    pub fn valid_learner_count(&self) -> usize {
        if self.is_rejected() {
            return 0;
        }
        self.learner_count
            .saturating_sub(self.invalid_learners().len())
    }

    /// Violations for one learner.
    pub fn errors_for<'a>(
        &'a self,
        learn_ref_number: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.learn_ref_number.as_deref() == Some(learn_ref_number))
    }

    /// True when the named rule raised at least one violation.
    pub fn has_rule(&self, rule_name: &str) -> bool {
        self.errors.iter().any(|e| e.rule_name == rule_name)
    }

    /// Violation counts grouped by rule, most severe first.
    pub fn summary_by_rule(&self) -> Vec<RuleSummary> {
        let mut counts: BTreeMap<(Severity, &str), usize> = BTreeMap::new();
        for error in &self.errors {
            *counts
                .entry((error.severity, error.rule_name.as_str()))
                .or_default() += 1;
        }
        counts
            .into_iter()
            .map(|((severity, rule_name), count)| RuleSummary {
                rule_name: rule_name.to_string(),
                severity,
                count,
            })
            .collect()
    }
}
