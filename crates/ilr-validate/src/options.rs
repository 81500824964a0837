//! Options controlling a validation run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ilr_model::{AcademicYear, Severity};

/// Options for the rule engine, loadable from a TOML `[validation]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Academic year to validate against. Defaults to the header's year.
    pub academic_year: Option<AcademicYear>,

    /// Run only these rules (all rules when empty).
    pub include_rules: Vec<String>,

    /// Never run these rules.
    pub exclude_rules: Vec<String>,

    /// Replace the catalog severity of individual rules.
    pub severity_overrides: BTreeMap<String, Severity>,

    /// Date used for "not in the future" checks. Defaults to the system date.
    pub today: Option<NaiveDate>,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_academic_year(mut self, year: AcademicYear) -> Self {
        self.academic_year = Some(year);
        self
    }

    pub fn with_include_rules(
        mut self,
        rules: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.include_rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude_rules(
        mut self,
        rules: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.exclude_rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_severity_override(mut self, rule: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides.insert(rule.into(), severity);
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// True when the include/exclude lists allow `rule_name` to run.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        let listed = |rules: &[String]| rules.iter().any(|r| r.eq_ignore_ascii_case(rule_name));
        (self.include_rules.is_empty() || listed(&self.include_rules))
            && !listed(&self.exclude_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_and_exclude_lists() {
        let options = ValidationOptions::new()
            .with_include_rules(["Sex_01", "ULN_04"])
            .with_exclude_rules(["uln_04"]);
        assert!(options.is_rule_enabled("sex_01"));
        assert!(!options.is_rule_enabled("ULN_04"));
        assert!(!options.is_rule_enabled("Ethnicity_01"));
        assert!(ValidationOptions::new().is_rule_enabled("Ethnicity_01"));
    }

    #[test]
    fn deserializes_from_json_shape() {
        let options: ValidationOptions = serde_json::from_str(
            r#"{
                "academic_year": "1920",
                "severity_overrides": { "PlanLearnHours_04": "Error" },
                "today": "2019-10-02"
            }"#,
        )
        .unwrap();
        assert_eq!(options.academic_year.map(|y| y.code()), Some("1920".to_string()));
        assert_eq!(
            options.severity_overrides.get("PlanLearnHours_04"),
            Some(&Severity::Error)
        );
        assert!(options.include_rules.is_empty());
    }
}
