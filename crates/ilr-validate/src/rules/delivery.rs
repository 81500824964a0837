//! Learning delivery fields: aim, programme, partner, location and
//! contract references.

use chrono::NaiveDate;

use ilr_model::Learner;
use ilr_model::codes::{
    OUTSIDE_UK_POSTCODE, PROGRAMME_AIM_REF, aim_type, fund_model, prog_type,
};
use ilr_standards::lookups::names;
use ilr_standards::postcodes::normalize;

use crate::context::RuleContext;
use crate::queries::{is_blank, is_guid, is_restart, lars_category, ymd};
use crate::rule::{LearnerCheckRule, Reporter, opt, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LearnAimRef_01", learn_aim_ref_01),
    LearnerCheckRule::new("LearnAimRef_29", learn_aim_ref_29),
    LearnerCheckRule::new("AimType_01", aim_type_01),
    LearnerCheckRule::new("AimType_05", aim_type_05),
    LearnerCheckRule::new("AimType_07", aim_type_07),
    LearnerCheckRule::new("FundModel_01", fund_model_01),
    LearnerCheckRule::new("FundModel_08", fund_model_08),
    LearnerCheckRule::new("ProgType_01", prog_type_01),
    LearnerCheckRule::new("ProgType_02", prog_type_02),
    LearnerCheckRule::new("ProgType_03", prog_type_03),
    LearnerCheckRule::new("FworkCode_01", fwork_code_01),
    LearnerCheckRule::new("FworkCode_02", fwork_code_02),
    LearnerCheckRule::new("FworkCode_05", fwork_code_05),
    LearnerCheckRule::new("PwayCode_01", pway_code_01),
    LearnerCheckRule::new("PwayCode_02", pway_code_02),
    LearnerCheckRule::new("StdCode_01", std_code_01),
    LearnerCheckRule::new("StdCode_02", std_code_02),
    LearnerCheckRule::new("StdCode_05", std_code_05),
    LearnerCheckRule::new("PartnerUKPRN_01", partner_ukprn_01),
    LearnerCheckRule::new("PartnerUKPRN_02", partner_ukprn_02),
    LearnerCheckRule::new("DelLocPostCode_03", del_loc_post_code_03),
    LearnerCheckRule::new("PriorLearnFundAdj_01", prior_learn_fund_adj_01),
    LearnerCheckRule::new("PHours_01", p_hours_01),
    LearnerCheckRule::new("ConRefNumber_01", con_ref_number_01),
    LearnerCheckRule::new("ConRefNumber_03", con_ref_number_03),
    LearnerCheckRule::new("EPAOrgID_01", epa_org_id_01),
    LearnerCheckRule::new("EPAOrgID_03", epa_org_id_03),
    LearnerCheckRule::new("SWSupAimId_01", sw_sup_aim_id_01),
];

/// Planned hours are collected for standards starting from 2019/20.
const PLANNED_HOURS_START: NaiveDate = ymd(2019, 8, 1);

fn learn_aim_ref_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (!ctx.reference.lars.contains_aim(&d.learn_aim_ref))
            .then(|| [param("LearnAimRef", &d.learn_aim_ref)])
    });
}

fn learn_aim_ref_29(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let lars = &ctx.reference.lars;
    out.check_deliveries(learner, |d| {
        let category = lars_category(d);
        let covered = lars.has_validity(
            &d.learn_aim_ref,
            category,
            d.learn_start_date,
            is_restart(d),
        );
        (lars.contains_aim(&d.learn_aim_ref) && !covered).then(|| {
            [
                param("LearnAimRef", &d.learn_aim_ref),
                param("FundModel", d.fund_model),
                param("LearnStartDate", d.learn_start_date),
                param("ValidityCategory", category),
            ]
        })
    });
}

fn aim_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (!ctx.reference.lookups.contains(names::AIM_TYPE, d.aim_type))
            .then(|| [param("AimType", d.aim_type)])
    });
}

fn is_programme_aim_ref(learn_aim_ref: &str) -> bool {
    learn_aim_ref.trim().eq_ignore_ascii_case(PROGRAMME_AIM_REF)
}

fn aim_type_05(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.is_programme_aim() && !is_programme_aim_ref(&d.learn_aim_ref)).then(|| {
            [
                param("AimType", d.aim_type),
                param("LearnAimRef", &d.learn_aim_ref),
            ]
        })
    });
}

fn aim_type_07(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (is_programme_aim_ref(&d.learn_aim_ref) && !d.is_programme_aim()).then(|| {
            [
                param("AimType", d.aim_type),
                param("LearnAimRef", &d.learn_aim_ref),
            ]
        })
    });
}

fn fund_model_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (!ctx.reference.lookups.contains(names::FUND_MODEL, d.fund_model))
            .then(|| [param("FundModel", d.fund_model)])
    });
}

fn fund_model_08(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.fund_model == fund_model::APPRENTICESHIPS && d.prog_type.is_none())
            .then(|| [param("FundModel", d.fund_model), param("ProgType", "")])
    });
}

fn prog_type_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let in_programme = [aim_type::PROGRAMME_AIM, aim_type::COMPONENT_AIM_IN_A_PROGRAMME];
    out.check_deliveries(learner, |d| {
        (in_programme.contains(&d.aim_type) && d.prog_type.is_none())
            .then(|| [param("AimType", d.aim_type), param("ProgType", "")])
    });
}

fn prog_type_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let prog_type = d.prog_type?;
        (d.aim_type == aim_type::AIM_NOT_PART_OF_A_PROGRAMME)
            .then(|| [param("AimType", d.aim_type), param("ProgType", prog_type)])
    });
}

fn prog_type_03(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let prog_type = d.prog_type?;
        (!ctx.reference.lookups.contains(names::PROG_TYPE, prog_type))
            .then(|| [param("ProgType", prog_type)])
    });
}

fn fwork_code_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.is_framework_apprenticeship() && d.fwork_code.is_none())
            .then(|| [param("ProgType", opt(d.prog_type)), param("FworkCode", "")])
    });
}

fn fwork_code_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let fwork_code = d.fwork_code?;
        (!d.is_framework_apprenticeship()).then(|| {
            [
                param("ProgType", opt(d.prog_type)),
                param("FworkCode", fwork_code),
            ]
        })
    });
}

fn fwork_code_05(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let (prog_type, fwork_code, pway_code) = (d.prog_type?, d.fwork_code?, d.pway_code?);
        (!ctx
            .reference
            .lars
            .framework_exists(prog_type, fwork_code, pway_code))
        .then(|| {
            [
                param("ProgType", prog_type),
                param("FworkCode", fwork_code),
                param("PwayCode", pway_code),
            ]
        })
    });
}

fn pway_code_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let fwork_code = d.fwork_code?;
        d.pway_code
            .is_none()
            .then(|| [param("FworkCode", fwork_code), param("PwayCode", "")])
    });
}

fn pway_code_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let pway_code = d.pway_code?;
        d.fwork_code
            .is_none()
            .then(|| [param("FworkCode", ""), param("PwayCode", pway_code)])
    });
}

fn std_code_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.is_standard() && d.std_code.is_none())
            .then(|| [param("ProgType", opt(d.prog_type)), param("StdCode", "")])
    });
}

fn std_code_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let std_code = d.std_code?;
        (!d.is_standard()).then(|| {
            [
                param("ProgType", opt(d.prog_type)),
                param("StdCode", std_code),
            ]
        })
    });
}

fn std_code_05(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let std_code = d.std_code?;
        ctx.reference
            .lars
            .standard(std_code)
            .is_none()
            .then(|| [param("StdCode", std_code)])
    });
}

fn partner_ukprn_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let partner = d.partner_ukprn?;
        (!ctx.reference.organisations.exists(partner)).then(|| [param("PartnerUKPRN", partner)])
    });
}

fn partner_ukprn_02(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let partner = d.partner_ukprn?;
        (partner == ctx.ukprn)
            .then(|| [param("PartnerUKPRN", partner), param("UKPRN", ctx.ukprn)])
    });
}

fn del_loc_post_code_03(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let outside_uk = normalize(OUTSIDE_UK_POSTCODE);
    out.check_deliveries(learner, |d| {
        let postcode = d.del_loc_post_code.as_deref()?;
        (normalize(postcode) != outside_uk && !ctx.reference.postcodes.exists(postcode))
            .then(|| [param("DelLocPostCode", postcode)])
    });
}

fn prior_learn_fund_adj_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let adjustment = d.prior_learn_fund_adj?;
        (!(1..=99).contains(&adjustment)).then(|| [param("PriorLearnFundAdj", adjustment)])
    });
}

fn p_hours_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.is_programme_aim()
            && d.is_standard()
            && d.learn_start_date >= PLANNED_HOURS_START
            && d.p_hours.is_none())
        .then(|| {
            [
                param("ProgType", prog_type::APPRENTICESHIP_STANDARD),
                param("LearnStartDate", d.learn_start_date),
                param("PHours", ""),
            ]
        })
    });
}

fn con_ref_number_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.fund_model == fund_model::EUROPEAN_SOCIAL_FUND && is_blank(d.con_ref_number.as_deref()))
            .then(|| [param("FundModel", d.fund_model), param("ConRefNumber", "")])
    });
}

fn con_ref_number_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let con_ref_number = d.con_ref_number.as_deref()?;
        (d.fund_model != fund_model::EUROPEAN_SOCIAL_FUND).then(|| {
            [
                param("FundModel", d.fund_model),
                param("ConRefNumber", con_ref_number),
            ]
        })
    });
}

fn epa_org_id_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let epa_org_id = d.epa_org_id.as_deref()?;
        let std_code = d.std_code?;
        let approved =
            ctx.reference
                .epa_organisations
                .is_valid(epa_org_id, std_code, d.learn_plan_end_date);
        (!approved).then(|| {
            [
                param("EPAOrgID", epa_org_id),
                param("StdCode", std_code),
                param("LearnPlanEndDate", d.learn_plan_end_date),
            ]
        })
    });
}

fn epa_org_id_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let epa_org_id = d.epa_org_id.as_deref()?;
        (!d.is_standard()).then(|| {
            [
                param("EPAOrgID", epa_org_id),
                param("ProgType", opt(d.prog_type)),
            ]
        })
    });
}

fn sw_sup_aim_id_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let id = d.sw_sup_aim_id.as_deref()?;
        (!is_guid(id)).then(|| [param("SWSupAimId", id)])
    });
}
