//! Postcodes, email and contact preferences.

use ilr_model::Learner;
use ilr_model::codes::fund_model;
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::{is_valid_email, is_valid_postcode_format};
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("Postcode_14", postcode_14),
    LearnerCheckRule::new("PostcodePrior_01", postcode_prior_01),
    LearnerCheckRule::new("PostcodePrior_02", postcode_prior_02),
    LearnerCheckRule::new("LSDPostcode_02", lsd_postcode_02),
    LearnerCheckRule::new("Email_01", email_01),
    LearnerCheckRule::new("ContPrefType_01", cont_pref_type_01),
];

/// Funding models that need the learner's postcode prior to enrolment.
const POSTCODE_PRIOR_FUND_MODELS: &[i32] = &[
    fund_model::AGE_16_TO_19,
    fund_model::ADULT_SKILLS,
    fund_model::APPRENTICESHIPS,
    fund_model::EUROPEAN_SOCIAL_FUND,
    fund_model::OTHER_ADULT,
    fund_model::OTHER_16_TO_19,
];

fn postcode_14(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(postcode) = learner.postcode.as_deref()
        && !is_valid_postcode_format(postcode)
    {
        out.raise([param("Postcode", postcode)]);
    }
}

fn postcode_prior_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if learner.postcode_prior.is_none() && learner.has_fund_model(POSTCODE_PRIOR_FUND_MODELS) {
        out.raise([param("PostcodePrior", "")]);
    }
}

fn postcode_prior_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(postcode) = learner.postcode_prior.as_deref()
        && !is_valid_postcode_format(postcode)
    {
        out.raise([param("PostcodePrior", postcode)]);
    }
}

fn lsd_postcode_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for delivery in &learner.learning_deliveries {
        if let Some(postcode) = delivery.lsd_postcode.as_deref()
            && !is_valid_postcode_format(postcode)
        {
            out.raise_for_aim(delivery.aim_seq_number, [param("LSDPostcode", postcode)]);
        }
    }
}

fn email_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(email) = learner.email.as_deref()
        && !is_valid_email(email)
    {
        out.raise([param("Email", email)]);
    }
}

fn cont_pref_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for preference in &learner.contact_preferences {
        let known = ctx.reference.lookups.contains_compound(
            names::CONT_PREF_TYPE,
            &preference.cont_pref_type,
            preference.cont_pref_code,
        );
        if !known {
            out.raise([
                param("ContPrefType", &preference.cont_pref_type),
                param("ContPrefCode", preference.cont_pref_code),
            ]);
        }
    }
}
