//! Learning delivery dates: start, planned end, original start, actual end
//! and achievement.

use ilr_model::codes::{fund_model, outcome};
use ilr_model::{ErrorParameter, Learner, LearningDelivery};
use ilr_standards::dates::add_years;

use crate::context::RuleContext;
use crate::queries::{is_advanced_learner_loan, is_restart};
use crate::rule::{LearnerCheckRule, Reporter, opt, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LearnStartDate_02", learn_start_date_02),
    LearnerCheckRule::new("LearnStartDate_03", learn_start_date_03),
    LearnerCheckRule::new("LearnStartDate_05", learn_start_date_05),
    LearnerCheckRule::new("LearnStartDate_16", learn_start_date_16),
    LearnerCheckRule::new("LearnPlanEndDate_02", learn_plan_end_date_02),
    LearnerCheckRule::new("LearnPlanEndDate_03", learn_plan_end_date_03),
    LearnerCheckRule::new("OrigLearnStartDate_01", orig_learn_start_date_01),
    LearnerCheckRule::new("OrigLearnStartDate_02", orig_learn_start_date_02),
    LearnerCheckRule::new("OrigLearnStartDate_06", orig_learn_start_date_06),
    LearnerCheckRule::new("LearnActEndDate_01", learn_act_end_date_01),
    LearnerCheckRule::new("LearnActEndDate_04", learn_act_end_date_04),
    LearnerCheckRule::new("AchDate_02", ach_date_02),
    LearnerCheckRule::new("AchDate_03", ach_date_03),
];

/// How far start dates may lie before the year, and planned ends after the start.
const MAXIMUM_SPAN_YEARS: i32 = 10;

fn learn_start_date_02(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let earliest = add_years(ctx.academic_year.start(), -MAXIMUM_SPAN_YEARS);
    out.check_deliveries(learner, |d| {
        (d.learn_start_date < earliest).then(|| [param("LearnStartDate", d.learn_start_date)])
    });
}

fn learn_start_date_03(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let year_end = ctx.academic_year.end();
    out.check_deliveries(learner, |d| {
        (d.learn_start_date > year_end).then(|| [param("LearnStartDate", d.learn_start_date)])
    });
}

fn learn_start_date_05(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(dob) = learner.date_of_birth else {
        return;
    };
    out.check_deliveries(learner, |d| {
        (d.learn_start_date <= dob).then(|| {
            [
                param("DateOfBirth", dob),
                param("LearnStartDate", d.learn_start_date),
            ]
        })
    });
}

fn learn_start_date_16(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        if !d.is_programme_aim() || !d.is_standard() || is_restart(d) {
            return None;
        }
        let std_code = d.std_code?;
        let last_date_starts = ctx.reference.lars.standard(std_code)?.last_date_starts?;
        (d.learn_start_date > last_date_starts).then(|| {
            [
                param("LearnStartDate", d.learn_start_date),
                param("StdCode", std_code),
            ]
        })
    });
}

fn learn_plan_end_date_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.learn_plan_end_date < d.learn_start_date).then(|| start_and_plan_end(d))
    });
}

fn learn_plan_end_date_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.learn_plan_end_date > add_years(d.learn_start_date, MAXIMUM_SPAN_YEARS))
            .then(|| start_and_plan_end(d))
    });
}

fn start_and_plan_end(d: &LearningDelivery) -> [ErrorParameter; 2] {
    [
        param("LearnStartDate", d.learn_start_date),
        param("LearnPlanEndDate", d.learn_plan_end_date),
    ]
}

fn orig_learn_start_date_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let orig = d.orig_learn_start_date?;
        (orig > d.learn_start_date).then(|| {
            [
                param("OrigLearnStartDate", orig),
                param("LearnStartDate", d.learn_start_date),
            ]
        })
    });
}

fn orig_learn_start_date_02(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let earliest = add_years(ctx.academic_year.start(), -MAXIMUM_SPAN_YEARS);
    out.check_deliveries(learner, |d| {
        let orig = d.orig_learn_start_date?;
        (orig < earliest).then(|| [param("OrigLearnStartDate", orig)])
    });
}

/// Deliveries that may carry an original learning start date.
fn may_have_original_start(d: &LearningDelivery) -> bool {
    is_restart(d)
        || d.fund_model == fund_model::APPRENTICESHIPS
        || (d.fund_model == fund_model::NOT_FUNDED && is_advanced_learner_loan(d))
}

fn orig_learn_start_date_06(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let orig = d.orig_learn_start_date?;
        (!may_have_original_start(d)).then(|| {
            [
                param("OrigLearnStartDate", orig),
                param("FundModel", d.fund_model),
            ]
        })
    });
}

fn learn_act_end_date_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let actual_end = d.learn_act_end_date?;
        (actual_end < d.learn_start_date).then(|| {
            [
                param("LearnStartDate", d.learn_start_date),
                param("LearnActEndDate", actual_end),
            ]
        })
    });
}

fn learn_act_end_date_04(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let actual_end = d.learn_act_end_date?;
        (actual_end > ctx.file_preparation_date).then(|| {
            [
                param("LearnActEndDate", actual_end),
                param("FilePreparationDate", ctx.file_preparation_date),
            ]
        })
    });
}

fn ach_date_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let (ach_date, actual_end) = (d.ach_date?, d.learn_act_end_date?);
        (ach_date < actual_end).then(|| {
            [
                param("AchDate", ach_date),
                param("LearnActEndDate", actual_end),
            ]
        })
    });
}

fn ach_date_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let ach_date = d.ach_date?;
        (d.outcome != Some(outcome::ACHIEVED))
            .then(|| [param("AchDate", ach_date), param("Outcome", opt(d.outcome))])
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LearnerRule, RuleViolation};
    use crate::rules::test_support::{
        count, ctx, date, delivery, fam, learner, run, standard_programme, with_delivery,
    };

    #[test]
    fn valid_dates_raise_nothing() {
        let ctx = ctx();
        for learner in [learner(), with_delivery(standard_programme())] {
            for rule in RULES {
                let mut sink: Vec<RuleViolation> = Vec::new();
                rule.validate(&learner, &ctx, &mut sink);
                assert!(sink.is_empty(), "{} raised {sink:?}", rule.name());
            }
        }
    }

    #[test]
    fn start_date_window() {
        let mut learner = learner();
        learner.learning_deliveries[0].learn_start_date = date(2009, 7, 31);
        assert_eq!(count(learn_start_date_02, &learner), 1);
        learner.learning_deliveries[0].learn_start_date = date(2009, 8, 1);
        assert_eq!(count(learn_start_date_02, &learner), 0);

        learner.learning_deliveries[0].learn_start_date = date(2020, 8, 1);
        assert_eq!(count(learn_start_date_03, &learner), 1);
        learner.learning_deliveries[0].learn_start_date = date(2020, 7, 31);
        assert_eq!(count(learn_start_date_03, &learner), 0);
    }

    #[test]
    fn start_after_birth() {
        let mut learner = learner();
        learner.date_of_birth = Some(date(2019, 9, 2));
        assert_eq!(count(learn_start_date_05, &learner), 1);
        learner.date_of_birth = None;
        assert_eq!(count(learn_start_date_05, &learner), 0);
    }

    #[test]
    fn standard_closed_to_new_starts() {
        let mut programme = LearningDelivery {
            std_code: Some(99),
            ..standard_programme()
        };
        let learner = with_delivery(programme.clone());
        let violations = run(learn_start_date_16, &learner);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].parameters[1].value, "99");

        programme.fams.push(fam("RES", "1"));
        assert_eq!(count(learn_start_date_16, &with_delivery(programme)), 0);
    }

    #[test]
    fn planned_end_date() {
        let mut learner = learner();
        learner.learning_deliveries[0].learn_plan_end_date = date(2019, 9, 1);
        assert_eq!(count(learn_plan_end_date_02, &learner), 1);

        learner.learning_deliveries[0].learn_plan_end_date = date(2029, 9, 3);
        assert_eq!(count(learn_plan_end_date_03, &learner), 1);
        learner.learning_deliveries[0].learn_plan_end_date = date(2029, 9, 2);
        assert_eq!(count(learn_plan_end_date_03, &learner), 0);
    }

    #[test]
    fn original_start_date() {
        let mut learner = learner();
        learner.learning_deliveries[0].orig_learn_start_date = Some(date(2019, 9, 3));
        assert_eq!(count(orig_learn_start_date_01, &learner), 1);
        assert_eq!(count(orig_learn_start_date_06, &learner), 1);

        learner.learning_deliveries[0].orig_learn_start_date = Some(date(2008, 1, 1));
        learner.learning_deliveries[0].fams.push(fam("RES", "1"));
        assert_eq!(count(orig_learn_start_date_02, &learner), 1);
        assert_eq!(count(orig_learn_start_date_06, &learner), 0);

        let loan = LearningDelivery {
            fund_model: fund_model::NOT_FUNDED,
            orig_learn_start_date: Some(date(2018, 9, 1)),
            fams: vec![fam("ADL", "1")],
            ..delivery()
        };
        assert_eq!(count(orig_learn_start_date_06, &with_delivery(loan)), 0);
    }

    #[test]
    fn actual_end_and_achievement_dates() {
        let mut learner = learner();
        let aim = &mut learner.learning_deliveries[0];
        aim.learn_act_end_date = Some(date(2019, 9, 1));
        aim.ach_date = Some(date(2019, 8, 31));
        aim.outcome = Some(outcome::PARTIAL_ACHIEVEMENT);
        assert_eq!(count(learn_act_end_date_01, &learner), 1);
        assert_eq!(count(ach_date_02, &learner), 1);
        assert_eq!(count(ach_date_03, &learner), 1);

        learner.learning_deliveries[0].learn_act_end_date = Some(date(2019, 10, 2));
        assert_eq!(count(learn_act_end_date_04, &learner), 1);
    }
}
