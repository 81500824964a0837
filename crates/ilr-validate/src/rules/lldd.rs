//! Learning difficulty, disability and health problem records.

use chrono::NaiveDate;

use ilr_model::Learner;
use ilr_model::codes::{fund_model, lldd_health_prob};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::{any_delivery, ymd};
use crate::rule::{LearnerCheckRule, Reporter, opt, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LLDDHealthProb_06", lldd_health_prob_06),
    LearnerCheckRule::new("LLDDHealthProb_07", lldd_health_prob_07),
    LearnerCheckRule::new("LLDDCat_01", lldd_cat_01),
    LearnerCheckRule::new("LLDDCat_02", lldd_cat_02),
    LearnerCheckRule::new("PrimaryLLDD_01", primary_lldd_01),
    LearnerCheckRule::new("PrimaryLLDD_03", primary_lldd_03),
    LearnerCheckRule::new("PrimaryLLDD_04", primary_lldd_04),
];

/// LLDD categories and the primary flag are required from 2015/16.
const LLDD_RECORDING_START: NaiveDate = ymd(2015, 8, 1);

const PRIMARY: i32 = 1;

fn has_delivery_from_2015(learner: &Learner) -> bool {
    any_delivery(learner, |d| d.learn_start_date >= LLDD_RECORDING_START)
}

fn lldd_health_prob_06(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let recorded_funding = any_delivery(learner, |d| {
        d.fund_model != fund_model::COMMUNITY_LEARNING
            && d.fund_model != fund_model::NOT_FUNDED
            && d.learn_start_date >= LLDD_RECORDING_START
    });
    if learner.lldd_health_prob == lldd_health_prob::HAS_DISABILITY
        && learner.lldd_and_health_problems.is_empty()
        && recorded_funding
    {
        out.raise([param("LLDDHealthProb", learner.lldd_health_prob)]);
    }
}

fn lldd_health_prob_07(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.lldd_health_prob == lldd_health_prob::NO_DISABILITY
        && !learner.lldd_and_health_problems.is_empty()
    {
        out.raise([param("LLDDHealthProb", learner.lldd_health_prob)]);
    }
}

fn lldd_cat_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for problem in &learner.lldd_and_health_problems {
        if !ctx.reference.lookups.contains(names::LLDD_CAT, problem.lldd_cat) {
            out.raise([param("LLDDCat", problem.lldd_cat)]);
        }
    }
}

fn lldd_cat_02(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(earliest) = learner.earliest_learn_start_date() else {
        return;
    };
    let lookups = &ctx.reference.lookups;
    for problem in &learner.lldd_and_health_problems {
        let code = problem.lldd_cat;
        if lookups.contains(names::LLDD_CAT, code)
            && !lookups.is_valid_at(names::LLDD_CAT, code, earliest)
        {
            out.raise([param("LLDDCat", code), param("LearnStartDate", earliest)]);
        }
    }
}

fn primary_lldd_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for problem in &learner.lldd_and_health_problems {
        if let Some(primary) = problem.primary_lldd
            && !ctx.reference.lookups.contains(names::PRIMARY_LLDD, primary)
        {
            out.raise([param("PrimaryLLDD", primary)]);
        }
    }
}

fn primary_lldd_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let primaries = learner
        .lldd_and_health_problems
        .iter()
        .filter(|p| p.primary_lldd == Some(PRIMARY))
        .count();
    if primaries > 1 {
        out.raise([param("PrimaryLLDD", PRIMARY)]);
    }
}

fn primary_lldd_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let problems = &learner.lldd_and_health_problems;
    if !problems.is_empty()
        && !problems.iter().any(|p| p.primary_lldd == Some(PRIMARY))
        && has_delivery_from_2015(learner)
    {
        let first = problems.first().and_then(|p| p.primary_lldd);
        out.raise([param("PrimaryLLDD", opt(first))]);
    }
}
