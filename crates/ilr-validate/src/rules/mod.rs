//! The rule catalog, grouped by the record each rule inspects.

pub mod app_fin;
pub mod contact;
pub mod delivery;
pub mod delivery_dates;
pub mod delivery_fam;
pub mod employment;
pub mod file;
pub mod learner;
pub mod learner_fam;
pub mod learner_he;
pub mod lldd;
pub mod outcome;
pub mod work_placement;

#[cfg(test)]
mod test_support;

use crate::rule::{LearnerCheckRule, LearnerRule, MessageRule};

/// Learner rule groups in registration order.
const LEARNER_RULE_GROUPS: &[&[LearnerCheckRule]] = &[
    learner::RULES,
    contact::RULES,
    lldd::RULES,
    learner_fam::RULES,
    employment::RULES,
    learner_he::RULES,
    delivery::RULES,
    delivery_dates::RULES,
    outcome::RULES,
    delivery_fam::RULES,
    work_placement::RULES,
    app_fin::RULES,
];

/// File-level and cross-learner rules.
pub fn default_message_rules() -> Vec<Box<dyn MessageRule>> {
    file::RULES
        .iter()
        .copied()
        .map(|rule| Box::new(rule) as Box<dyn MessageRule>)
        .collect()
}

/// Every learner rule in the catalog.
pub fn default_learner_rules() -> Vec<Box<dyn LearnerRule>> {
    LEARNER_RULE_GROUPS
        .iter()
        .flat_map(|group| group.iter().copied())
        .map(|rule| Box::new(rule) as Box<dyn LearnerRule>)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn rule_names_are_unique() {
        let mut names = BTreeSet::new();
        let learner_rules = default_learner_rules();
        let message_rules = default_message_rules();
        let all = learner_rules
            .iter()
            .map(|r| r.name())
            .chain(message_rules.iter().map(|r| r.name()));
        for name in all {
            assert!(names.insert(name), "{name} registered twice");
        }
        assert_eq!(names.len(), 153);
    }
}
