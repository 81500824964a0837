//! Rule catalog metadata.
//!
//! Severity, category and message text of every rule come from
//! `rules.csv`; rule implementations only decide whether a violation exists.

use std::collections::BTreeMap;

use serde::Deserialize;

use ilr_model::{Category, Severity};

use crate::csv_utils::read_records;
use crate::error::{Result, StandardsError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RuleRow {
    rule_name: String,
    entity: String,
    severity: String,
    category: String,
    message: String,
}

/// Catalog entry for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub rule_name: String,
    /// ILR entity the rule inspects (`Learner`, `LearningDelivery`, ...).
    pub entity: String,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
}

/// All rule metadata, keyed case-insensitively by rule name.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: BTreeMap<String, RuleMeta>,
}

impl RuleCatalog {
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        let rows: Vec<RuleRow> = read_records(content, file)?;
        let mut rules = BTreeMap::new();
        for row in rows {
            if row.rule_name.is_empty() {
                continue;
            }
            let severity =
                Severity::parse(&row.severity).ok_or_else(|| StandardsError::InvalidValue {
                    field: "Severity",
                    value: row.severity.clone(),
                    file: file.to_string(),
                })?;
            let category = Category::parse(&row.category);
            if category == Category::Unknown {
                tracing::warn!(
                    file = %file,
                    rule = %row.rule_name,
                    category = %row.category,
                    "Rule has an unrecognised category"
                );
            }
            let meta = RuleMeta {
                rule_name: row.rule_name,
                entity: row.entity,
                severity,
                category,
                message: row.message,
            };
            if let Some(previous) = rules.insert(meta.rule_name.to_lowercase(), meta) {
                tracing::warn!(file = %file, rule = %previous.rule_name, "Duplicate rule entry");
            }
        }
        Ok(Self { rules })
    }

    pub fn get(&self, rule_name: &str) -> Option<&RuleMeta> {
        self.rules.get(&rule_name.to_lowercase())
    }

    pub fn contains(&self, rule_name: &str) -> bool {
        self.get(rule_name).is_some()
    }

    /// Entries sorted by rule name.
    pub fn iter(&self) -> impl Iterator<Item = &RuleMeta> {
        self.rules.values()
    }

    /// Entries for one ILR entity (case-insensitive).
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a RuleMeta> + 'a {
        self.rules
            .values()
            .filter(move |meta| meta.entity.eq_ignore_ascii_case(entity))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
