//! Completion status, outcome, withdrawal and employment outcome.

use ilr_model::Learner;
use ilr_model::codes::{comp_status, outcome};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("CompStatus_01", comp_status_01),
    LearnerCheckRule::new("CompStatus_02", comp_status_02),
    LearnerCheckRule::new("CompStatus_03", comp_status_03),
    LearnerCheckRule::new("CompStatus_05", comp_status_05),
    LearnerCheckRule::new("Outcome_01", outcome_01),
    LearnerCheckRule::new("Outcome_04", outcome_04),
    LearnerCheckRule::new("Outcome_05", outcome_05),
    LearnerCheckRule::new("WithdrawReason_01", withdraw_reason_01),
    LearnerCheckRule::new("WithdrawReason_02", withdraw_reason_02),
    LearnerCheckRule::new("WithdrawReason_03", withdraw_reason_03),
    LearnerCheckRule::new("EmpOutcome_01", emp_outcome_01),
];

fn comp_status_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (!ctx.reference.lookups.contains(names::COMP_STATUS, d.comp_status))
            .then(|| [param("CompStatus", d.comp_status)])
    });
}

fn comp_status_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.learn_act_end_date.is_none() && d.comp_status != comp_status::CONTINUING).then(|| {
            [
                param("CompStatus", d.comp_status),
                param("LearnActEndDate", ""),
            ]
        })
    });
}

fn comp_status_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let actual_end = d.learn_act_end_date?;
        (d.comp_status == comp_status::CONTINUING).then(|| {
            [
                param("CompStatus", d.comp_status),
                param("LearnActEndDate", actual_end),
            ]
        })
    });
}

fn comp_status_05(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.outcome == Some(outcome::LEARNING_ACTIVITIES_COMPLETE)
            && d.comp_status != comp_status::COMPLETED)
            .then(|| {
                [
                    param("CompStatus", d.comp_status),
                    param("Outcome", outcome::LEARNING_ACTIVITIES_COMPLETE),
                ]
            })
    });
}

fn outcome_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let value = d.outcome?;
        (!ctx.reference.lookups.contains(names::OUTCOME, value))
            .then(|| [param("Outcome", value)])
    });
}

fn outcome_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let actual_end = d.learn_act_end_date?;
        d.outcome
            .is_none()
            .then(|| [param("LearnActEndDate", actual_end), param("Outcome", "")])
    });
}

fn outcome_05(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let value = d.outcome?;
        (d.comp_status == comp_status::WITHDRAWN && value != outcome::NO_ACHIEVEMENT)
            .then(|| [param("CompStatus", d.comp_status), param("Outcome", value)])
    });
}

fn withdraw_reason_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let reason = d.withdraw_reason?;
        (!ctx.reference.lookups.contains(names::WITHDRAW_REASON, reason))
            .then(|| [param("WithdrawReason", reason)])
    });
}

fn withdraw_reason_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.comp_status == comp_status::WITHDRAWN && d.withdraw_reason.is_none())
            .then(|| [param("CompStatus", d.comp_status), param("WithdrawReason", "")])
    });
}

fn withdraw_reason_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let reason = d.withdraw_reason?;
        (d.comp_status != comp_status::WITHDRAWN).then(|| {
            [
                param("CompStatus", d.comp_status),
                param("WithdrawReason", reason),
            ]
        })
    });
}

fn emp_outcome_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let value = d.emp_outcome?;
        (!ctx.reference.lookups.contains(names::EMP_OUTCOME, value))
            .then(|| [param("EmpOutcome", value)])
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LearnerRule, RuleViolation};
    use crate::rules::test_support::{count, ctx, date, delivery, with_delivery};
    use ilr_model::LearningDelivery;

    fn withdrawn() -> LearningDelivery {
        LearningDelivery {
            comp_status: comp_status::WITHDRAWN,
            learn_act_end_date: Some(date(2019, 9, 30)),
            outcome: Some(outcome::NO_ACHIEVEMENT),
            withdraw_reason: Some(40),
            ..delivery()
        }
    }

    #[test]
    fn withdrawn_delivery_is_consistent() {
        let learner = with_delivery(withdrawn());
        let ctx = ctx();
        for rule in RULES {
            let mut sink: Vec<RuleViolation> = Vec::new();
            rule.validate(&learner, &ctx, &mut sink);
            assert!(sink.is_empty(), "{} raised {sink:?}", rule.name());
        }
    }

    #[test]
    fn completion_status_and_end_date() {
        let mut learner = with_delivery(LearningDelivery {
            comp_status: comp_status::COMPLETED,
            ..delivery()
        });
        assert_eq!(count(comp_status_02, &learner), 1);

        learner.learning_deliveries[0] = LearningDelivery {
            learn_act_end_date: Some(date(2019, 9, 30)),
            ..delivery()
        };
        assert_eq!(count(comp_status_03, &learner), 1);
        assert_eq!(count(outcome_04, &learner), 1);

        learner.learning_deliveries[0].comp_status = 4;
        assert_eq!(count(comp_status_01, &learner), 1);
    }

    #[test]
    fn outcome_consistency() {
        let mut learner = with_delivery(LearningDelivery {
            outcome: Some(outcome::LEARNING_ACTIVITIES_COMPLETE),
            ..withdrawn()
        });
        assert_eq!(count(comp_status_05, &learner), 1);
        assert_eq!(count(outcome_05, &learner), 1);

        learner.learning_deliveries[0].outcome = None;
        assert_eq!(count(outcome_05, &learner), 0);

        learner.learning_deliveries[0].outcome = Some(5);
        assert_eq!(count(outcome_01, &learner), 1);
    }

    #[test]
    fn withdrawal_reason() {
        let mut learner = with_delivery(LearningDelivery {
            withdraw_reason: None,
            ..withdrawn()
        });
        assert_eq!(count(withdraw_reason_02, &learner), 1);

        learner.learning_deliveries[0] = LearningDelivery {
            withdraw_reason: Some(1),
            ..delivery()
        };
        assert_eq!(count(withdraw_reason_01, &learner), 1);
        assert_eq!(count(withdraw_reason_03, &learner), 1);
    }

    #[test]
    fn employment_outcome_lookup() {
        let mut learner = with_delivery(delivery());
        learner.learning_deliveries[0].emp_outcome = Some(4);
        assert_eq!(count(emp_outcome_01, &learner), 1);
        learner.learning_deliveries[0].emp_outcome = Some(3);
        assert_eq!(count(emp_outcome_01, &learner), 0);
    }
}
