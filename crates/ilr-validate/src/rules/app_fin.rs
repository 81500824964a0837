//! Apprenticeship financial records (negotiated prices and payments).

use ilr_model::codes::{afin, fund_model};
use ilr_model::{AppFinRecord, ErrorParameter, Learner, LearningDelivery};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("AFinType_01", a_fin_type_01),
    LearnerCheckRule::new("AFinType_04", a_fin_type_04),
    LearnerCheckRule::new("AFinType_10", a_fin_type_10),
    LearnerCheckRule::new("AFinDate_04", a_fin_date_04),
    LearnerCheckRule::new("AFinAmount_01", a_fin_amount_01),
];

fn records(learner: &Learner) -> impl Iterator<Item = (&LearningDelivery, &AppFinRecord)> {
    learner
        .learning_deliveries
        .iter()
        .flat_map(|d| d.app_fin_records.iter().map(move |record| (d, record)))
}

fn record_params(record: &AppFinRecord) -> [ErrorParameter; 2] {
    [
        param("AFinType", &record.a_fin_type),
        param("AFinCode", record.a_fin_code),
    ]
}

fn a_fin_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, record) in records(learner) {
        let known = ctx.reference.lookups.contains_compound(
            names::AFIN_TYPE,
            &record.a_fin_type,
            record.a_fin_code,
        );
        if !known {
            out.raise_for_aim(d.aim_seq_number, record_params(record));
        }
    }
}

fn a_fin_type_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let models = [fund_model::APPRENTICESHIPS, fund_model::OTHER_ADULT];
    out.check_deliveries(learner, |d| {
        let expected = d.is_programme_aim() && models.contains(&d.fund_model);
        (!d.app_fin_records.is_empty() && !expected).then(|| {
            [
                param("AimType", d.aim_type),
                param("FundModel", d.fund_model),
            ]
        })
    });
}

fn a_fin_type_10(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let has_price = d
            .app_fin_records
            .iter()
            .any(|r| r.a_fin_type.eq_ignore_ascii_case(afin::TOTAL_NEGOTIATED_PRICE));
        (d.fund_model == fund_model::APPRENTICESHIPS
            && d.is_programme_aim()
            && d.is_standard()
            && !has_price)
            .then(|| {
                [
                    param("FundModel", d.fund_model),
                    param("AFinType", afin::TOTAL_NEGOTIATED_PRICE),
                ]
            })
    });
}

fn a_fin_date_04(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, record) in records(learner) {
        if record.a_fin_date > ctx.file_preparation_date {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("AFinDate", record.a_fin_date),
                    param("FilePreparationDate", ctx.file_preparation_date),
                ],
            );
        }
    }
}

fn a_fin_amount_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, record) in records(learner) {
        if record.a_fin_amount <= 0 {
            let [fin_type, code] = record_params(record);
            out.raise_for_aim(
                d.aim_seq_number,
                [fin_type, code, param("AFinAmount", record.a_fin_amount)],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LearnerRule, RuleViolation};
    use crate::rules::test_support::{
        count, ctx, date, delivery, run, standard_programme, with_delivery,
    };

    fn record(a_fin_type: &str, a_fin_code: i32, amount: i32) -> AppFinRecord {
        AppFinRecord {
            a_fin_type: a_fin_type.to_string(),
            a_fin_code,
            a_fin_date: date(2019, 9, 2),
            a_fin_amount: amount,
        }
    }

    #[test]
    fn standard_programme_is_valid() {
        let learner = with_delivery(standard_programme());
        let ctx = ctx();
        for rule in RULES {
            let mut sink: Vec<RuleViolation> = Vec::new();
            rule.validate(&learner, &ctx, &mut sink);
            assert!(sink.is_empty(), "{} raised {sink:?}", rule.name());
        }
    }

    #[test]
    fn type_code_and_amount() {
        let mut programme = standard_programme();
        programme.app_fin_records = vec![
            record("TNP", 1, 9000),
            record("TNP", 5, 100),
            record("PMR", 1, 0),
        ];
        let learner = with_delivery(programme);
        assert_eq!(count(a_fin_type_01, &learner), 1);
        let amounts = run(a_fin_amount_01, &learner);
        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].parameters[0].value, "PMR");
    }

    #[test]
    fn records_only_on_apprenticeship_programme_aims() {
        let learner = with_delivery(LearningDelivery {
            app_fin_records: vec![record("TNP", 1, 9000), record("PMR", 1, 500)],
            ..delivery()
        });
        assert_eq!(count(a_fin_type_04, &learner), 1);

        let other_adult = with_delivery(LearningDelivery {
            fund_model: fund_model::OTHER_ADULT,
            ..standard_programme()
        });
        assert_eq!(count(a_fin_type_04, &other_adult), 0);
    }

    #[test]
    fn standard_needs_negotiated_price() {
        let mut programme = standard_programme();
        programme.app_fin_records = vec![record("PMR", 1, 500)];
        assert_eq!(count(a_fin_type_10, &with_delivery(programme)), 1);
    }

    #[test]
    fn record_date_not_in_future() {
        let mut programme = standard_programme();
        programme.app_fin_records[0].a_fin_date = date(2019, 10, 2);
        let violations = run(a_fin_date_04, &with_delivery(programme));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].aim_seq_number, Some(1));
    }
}
