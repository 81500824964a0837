//! The standard error handler: resolves violations against the rule catalog.

use std::collections::BTreeMap;

use ilr_model::{Category, Severity, ValidationError};
use ilr_standards::RuleCatalog;

use crate::rule::{RuleViolation, ValidationErrorHandler};

/// Collects violations as [`ValidationError`]s.
///
/// Severity, category and message come from the catalog entry of the rule;
/// a configured severity override replaces the catalog severity.
#[derive(Debug)]
pub struct ErrorCollector<'a> {
    catalog: &'a RuleCatalog,
    severity_overrides: Option<&'a BTreeMap<String, Severity>>,
    errors: Vec<ValidationError>,
}

impl<'a> ErrorCollector<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
            severity_overrides: None,
            errors: Vec::new(),
        }
    }

    pub fn with_severity_overrides(mut self, overrides: &'a BTreeMap<String, Severity>) -> Self {
        self.severity_overrides = Some(overrides);
        self
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    fn severity_override(&self, rule_name: &str) -> Option<Severity> {
        self.severity_overrides?
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(rule_name))
            .map(|(_, severity)| *severity)
    }
}

impl ValidationErrorHandler for ErrorCollector<'_> {
    fn handle(&mut self, violation: RuleViolation) {
        let (severity, category, message) = match self.catalog.get(violation.rule_name) {
            Some(meta) => (meta.severity, meta.category, meta.message.clone()),
            None => {
                tracing::warn!(rule = violation.rule_name, "Rule missing from catalog");
                (
                    Severity::Error,
                    Category::Unknown,
                    violation.rule_name.to_string(),
                )
            }
        };
        let severity = self
            .severity_override(violation.rule_name)
            .unwrap_or(severity);

        self.errors.push(ValidationError {
            rule_name: violation.rule_name.to_string(),
            severity,
            category,
            message,
            learn_ref_number: violation.learn_ref_number,
            aim_seq_number: violation.aim_seq_number,
            parameters: violation.parameters,
        });
    }
}
