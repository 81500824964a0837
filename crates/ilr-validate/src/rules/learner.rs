//! Learner record fields: identifiers, names, date of birth, demographics
//! and planned hours.

use std::collections::BTreeMap;

use ilr_model::{ErrorParameter, Learner};
use ilr_model::codes::fund_model;
use ilr_standards::dates::age_at;
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::{
    any_delivery, is_advanced_learner_loan, is_blank, is_valid_learn_ref_number,
    is_valid_ni_number, is_valid_uln,
};
use crate::rule::{LearnerCheckRule, Reporter, opt, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LearnRefNumber_03", learn_ref_number_03),
    LearnerCheckRule::new("ULN_02", uln_02),
    LearnerCheckRule::new("ULN_04", uln_04),
    LearnerCheckRule::new("FamilyName_01", family_name_01),
    LearnerCheckRule::new("GivenNames_01", given_names_01),
    LearnerCheckRule::new("DateOfBirth_01", date_of_birth_01),
    LearnerCheckRule::new("DateOfBirth_02", date_of_birth_02),
    LearnerCheckRule::new("DateOfBirth_05", date_of_birth_05),
    LearnerCheckRule::new("DateOfBirth_06", date_of_birth_06),
    LearnerCheckRule::new("DateOfBirth_20", date_of_birth_20),
    LearnerCheckRule::new("Sex_01", sex_01),
    LearnerCheckRule::new("Ethnicity_01", ethnicity_01),
    LearnerCheckRule::new("LLDDHealthProb_01", lldd_health_prob_01),
    LearnerCheckRule::new("Accom_01", accom_01),
    LearnerCheckRule::new("PriorAttain_01", prior_attain_01),
    LearnerCheckRule::new("PriorAttain_02", prior_attain_02),
    LearnerCheckRule::new("PlanLearnHours_01", plan_learn_hours_01),
    LearnerCheckRule::new("PlanLearnHours_03", plan_learn_hours_03),
    LearnerCheckRule::new("PlanLearnHours_04", plan_learn_hours_04),
    LearnerCheckRule::new("PlanEEPHours_01", plan_eep_hours_01),
    LearnerCheckRule::new("PMUKPRN_01", pmukprn_01),
    LearnerCheckRule::new("PrevUKPRN_01", prev_ukprn_01),
    LearnerCheckRule::new("NINumber_01", ni_number_01),
    LearnerCheckRule::new("AimSeqNumber_02", aim_seq_number_02),
];

const MINIMUM_AGE: i32 = 13;
const MAXIMUM_AGE: i32 = 115;
const MINIMUM_APPRENTICE_AGE: i32 = 16;
const MAXIMUM_PLANNED_HOURS: i32 = 1000;

fn learn_ref_number_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !is_valid_learn_ref_number(&learner.learn_ref_number) {
        out.raise([param("LearnRefNumber", &learner.learn_ref_number)]);
    }
}

fn uln_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.has_temporary_uln() && learner.has_delivery_outside_community_or_non_funded() {
        out.raise([param("ULN", learner.uln)]);
    }
}

fn uln_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !learner.has_temporary_uln() && !is_valid_uln(learner.uln) {
        out.raise([param("ULN", learner.uln)]);
    }
}

fn family_name_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if is_blank(learner.family_name.as_deref())
        && learner.has_delivery_outside_community_or_non_funded()
    {
        out.raise([param("FamilyName", opt(learner.family_name.as_deref()))]);
    }
}

fn given_names_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if is_blank(learner.given_names.as_deref())
        && learner.has_delivery_outside_community_or_non_funded()
    {
        out.raise([param("GivenNames", opt(learner.given_names.as_deref()))]);
    }
}

fn date_of_birth_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.date_of_birth.is_none() && learner.has_funded_delivery() {
        out.raise([param("DateOfBirth", "")]);
    }
}

fn date_of_birth_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let loan_funded = any_delivery(learner, |d| {
        d.fund_model == fund_model::NOT_FUNDED && is_advanced_learner_loan(d)
    });
    if learner.date_of_birth.is_none() && loan_funded {
        out.raise([
            param("DateOfBirth", ""),
            param("FundModel", fund_model::NOT_FUNDED),
        ]);
    }
}

fn date_of_birth_05(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(dob) = learner.date_of_birth else {
        return;
    };
    if age_at(dob, ctx.academic_year.august_thirty_first()) < MINIMUM_AGE {
        out.raise([param("DateOfBirth", dob)]);
    }
}

fn date_of_birth_06(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(dob) = learner.date_of_birth else {
        return;
    };
    if age_at(dob, ctx.file_preparation_date) > MAXIMUM_AGE {
        out.raise([
            param("DateOfBirth", dob),
            param("FilePreparationDate", ctx.file_preparation_date),
        ]);
    }
}

fn date_of_birth_20(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(dob) = learner.date_of_birth else {
        return;
    };
    for delivery in &learner.learning_deliveries {
        if delivery.is_programme_aim()
            && delivery.is_apprenticeship()
            && age_at(dob, delivery.learn_start_date) < MINIMUM_APPRENTICE_AGE
        {
            out.raise_for_aim(
                delivery.aim_seq_number,
                [
                    param("DateOfBirth", dob),
                    param("LearnStartDate", delivery.learn_start_date),
                    param("ProgType", opt(delivery.prog_type)),
                ],
            );
        }
    }
}

fn sex_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !ctx.reference.lookups.contains(names::SEX, &learner.sex) {
        out.raise([param("Sex", &learner.sex)]);
    }
}

fn ethnicity_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !ctx.reference.lookups.contains(names::ETHNICITY, learner.ethnicity) {
        out.raise([param("Ethnicity", learner.ethnicity)]);
    }
}

fn lldd_health_prob_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let code = learner.lldd_health_prob;
    if !ctx.reference.lookups.contains(names::LLDD_HEALTH_PROB, code) {
        out.raise([param("LLDDHealthProb", code)]);
    }
}

fn accom_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(accom) = learner.accom
        && !ctx.reference.lookups.contains(names::ACCOM, accom)
    {
        out.raise([param("Accom", accom)]);
    }
}

fn prior_attain_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(prior_attain) = learner.prior_attain
        && !ctx.reference.lookups.contains(names::PRIOR_ATTAIN, prior_attain)
    {
        out.raise([param("PriorAttain", prior_attain)]);
    }
}

fn prior_attain_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.prior_attain.is_none() && learner.has_funded_delivery() {
        out.raise([param("PriorAttain", "")]);
    }
}

fn plan_learn_hours_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let models = [fund_model::AGE_16_TO_19, fund_model::OTHER_16_TO_19];
    if learner.plan_learn_hours.is_none() && learner.has_fund_model(&models) {
        out.raise([param("PlanLearnHours", "")]);
    }
}

fn total_planned_hours(learner: &Learner) -> i32 {
    learner
        .plan_learn_hours
        .unwrap_or(0)
        .saturating_add(learner.plan_eep_hours.unwrap_or(0))
}

fn planned_hours_params(learner: &Learner) -> [ErrorParameter; 2] {
    [
        param("PlanLearnHours", opt(learner.plan_learn_hours)),
        param("PlanEEPHours", opt(learner.plan_eep_hours)),
    ]
}

fn plan_learn_hours_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.has_fund_model(&[fund_model::AGE_16_TO_19]) && total_planned_hours(learner) == 0 {
        out.raise(planned_hours_params(learner));
    }
}

fn plan_learn_hours_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if total_planned_hours(learner) > MAXIMUM_PLANNED_HOURS {
        out.raise(planned_hours_params(learner));
    }
}

fn plan_eep_hours_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.plan_eep_hours.is_none() && learner.has_fund_model(&[fund_model::AGE_16_TO_19]) {
        out.raise([param("PlanEEPHours", "")]);
    }
}

fn pmukprn_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(ukprn) = learner.pmukprn
        && !ctx.reference.organisations.exists(ukprn)
    {
        out.raise([param("PMUKPRN", ukprn)]);
    }
}

fn prev_ukprn_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(ukprn) = learner.prev_ukprn
        && !ctx.reference.organisations.exists(ukprn)
    {
        out.raise([param("PrevUKPRN", ukprn)]);
    }
}

fn ni_number_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(ni_number) = learner.ni_number.as_deref()
        && !is_valid_ni_number(ni_number)
    {
        out.raise([param("NINumber", ni_number)]);
    }
}

fn aim_seq_number_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for delivery in &learner.learning_deliveries {
        *counts.entry(delivery.aim_seq_number).or_default() += 1;
    }
    for (aim_seq_number, count) in counts {
        if count > 1 {
            out.raise_for_aim(aim_seq_number, [param("AimSeqNumber", aim_seq_number)]);
        }
    }
}
