//! Learner funding and monitoring (FAM) records and provider monitoring.

use std::collections::BTreeMap;

use ilr_model::Learner;
use ilr_model::codes::{fund_model, learner_fam};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LearnFAMType_01", learn_fam_type_01),
    LearnerCheckRule::new("LearnFAMType_09", learn_fam_type_09),
    LearnerCheckRule::new("LearnFAMType_10", learn_fam_type_10),
    LearnerCheckRule::new("LearnFAMType_16", learn_fam_type_16),
    LearnerCheckRule::new("ProvSpecLearnMonOccur_01", prov_spec_learn_mon_occur_01),
    LearnerCheckRule::new("ProvSpecLearnMonOccur_02", prov_spec_learn_mon_occur_02),
];

/// Learner FAM types that may repeat, with their occurrence limits.
const REPEATABLE_TYPES: &[(&str, usize)] = &[
    (learner_fam::LEARNER_SUPPORT_REASON, 4),
    (learner_fam::NATIONAL_LEARNER_MONITORING, 2),
    (learner_fam::ELIGIBILITY_FOR_DISADVANTAGE_FUNDING, 2),
];

/// Occurrences of each FAM type, keyed by upper-cased type.
fn type_counts(learner: &Learner) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for fam in &learner.learner_fams {
        *counts.entry(fam.learn_fam_type.to_uppercase()).or_default() += 1;
    }
    counts
}

fn learn_fam_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for fam in &learner.learner_fams {
        let known = ctx.reference.lookups.contains_compound(
            names::LEARN_FAM_TYPE,
            &fam.learn_fam_type,
            fam.learn_fam_code,
        );
        if !known {
            out.raise([
                param("LearnFAMType", &fam.learn_fam_type),
                param("LearnFAMCode", fam.learn_fam_code),
            ]);
        }
    }
}

fn learn_fam_type_09(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (fam_type, count) in type_counts(learner) {
        let repeatable = REPEATABLE_TYPES.iter().any(|(t, _)| *t == fam_type);
        if !repeatable && count > 1 {
            out.raise([param("LearnFAMType", fam_type)]);
        }
    }
}

fn learn_fam_type_10(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let counts = type_counts(learner);
    for (fam_type, limit) in REPEATABLE_TYPES {
        if counts.get(*fam_type).is_some_and(|count| count > limit) {
            out.raise([param("LearnFAMType", fam_type)]);
        }
    }
}

fn learn_fam_type_16(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let high_needs = learner
        .learner_fams
        .iter()
        .find(|fam| fam.learn_fam_type.eq_ignore_ascii_case(learner_fam::HIGH_NEEDS_STUDENTS));
    if let Some(fam) = high_needs
        && !learner.has_fund_model(&[fund_model::AGE_16_TO_19])
    {
        out.raise([
            param("LearnFAMType", &fam.learn_fam_type),
            param("LearnFAMCode", fam.learn_fam_code),
        ]);
    }
}

fn prov_spec_learn_mon_occur_01(
    learner: &Learner,
    ctx: &RuleContext<'_>,
    out: &mut Reporter<'_>,
) {
    for monitoring in &learner.provider_spec_learner_monitorings {
        let occur = &monitoring.prov_spec_learn_mon_occur;
        if !ctx
            .reference
            .lookups
            .contains(names::PROV_SPEC_LEARN_MON_OCCUR, occur)
        {
            out.raise([param("ProvSpecLearnMonOccur", occur)]);
        }
    }
}

fn prov_spec_learn_mon_occur_02(
    learner: &Learner,
    _ctx: &RuleContext<'_>,
    out: &mut Reporter<'_>,
) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for monitoring in &learner.provider_spec_learner_monitorings {
        *counts
            .entry(monitoring.prov_spec_learn_mon_occur.trim().to_uppercase())
            .or_default() += 1;
    }
    for (occur, count) in counts {
        if count > 1 {
            out.raise([param("ProvSpecLearnMonOccur", occur)]);
        }
    }
}
