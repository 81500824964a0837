//! Learning delivery funding and monitoring (FAM) records.
//!
//! Most checks run per FAM record and report against the owning delivery.
//! Only ALB, ACT and LSF records carry a date range; the `DateFrom` and
//! `DateTo` rules hold dated and undated types to that split.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use ilr_model::codes::{del_fam, fund_model};
use ilr_model::{ErrorParameter, Learner, LearningDelivery, LearningDeliveryFam};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("LearnDelFAMType_01", learn_del_fam_type_01),
    LearnerCheckRule::new("LearnDelFAMType_02", learn_del_fam_type_02),
    LearnerCheckRule::new("LearnDelFAMType_03", learn_del_fam_type_03),
    LearnerCheckRule::new("LearnDelFAMType_06", learn_del_fam_type_06),
    LearnerCheckRule::new("LearnDelFAMType_07", learn_del_fam_type_07),
    LearnerCheckRule::new("LearnDelFAMType_09", learn_del_fam_type_09),
    LearnerCheckRule::new("LearnDelFAMType_20", learn_del_fam_type_20),
    LearnerCheckRule::new("LearnDelFAMType_39", learn_del_fam_type_39),
    LearnerCheckRule::new("LearnDelFAMType_40", learn_del_fam_type_40),
    LearnerCheckRule::new("LearnDelFAMDateFrom_01", date_from_01),
    LearnerCheckRule::new("LearnDelFAMDateFrom_02", date_from_02),
    LearnerCheckRule::new("LearnDelFAMDateFrom_03", date_from_03),
    LearnerCheckRule::new("LearnDelFAMDateFrom_04", date_from_04),
    LearnerCheckRule::new("LearnDelFAMDateFrom_05", date_from_05),
    LearnerCheckRule::new("LearnDelFAMDateTo_01", date_to_01),
    LearnerCheckRule::new("LearnDelFAMDateTo_02", date_to_02),
    LearnerCheckRule::new("LearnDelFAMDateTo_03", date_to_03),
    LearnerCheckRule::new("LearnDelFAMDateTo_04", date_to_04),
];

/// Types that may be returned at most once per delivery.
const SINGLE_OCCURRENCE_TYPES: &[&str] = &[
    del_fam::ADVANCED_LEARNER_LOAN,
    del_fam::COMMUNITY_LEARNING_PROVISION,
    del_fam::ELIGIBILITY_FOR_ENHANCED_FUNDING,
    del_fam::FULL_OR_CO_FUNDING,
    del_fam::FAMILY_LEARNING,
    del_fam::NATIONAL_SKILLS_ACADEMY,
    del_fam::PERCENTAGE_ONLINE,
    del_fam::RESTART,
    del_fam::SOURCE_OF_FUNDING,
    del_fam::SPECIAL_PROJECTS,
    del_fam::WORKPLACE_PLACEMENT,
];

/// Repeatable types and their occurrence limits.
const OCCURRENCE_LIMITS: &[(&str, usize)] = &[
    (del_fam::LEARNING_DELIVERY_MONITORING, 6),
    (del_fam::DEVOLVED_AREA_MONITORING, 4),
    (del_fam::HE_MONITORING, 3),
    (del_fam::HOUSEHOLD_SITUATION, 2),
];

fn is_dated(fam: &LearningDeliveryFam) -> bool {
    del_fam::DATED
        .iter()
        .any(|t| fam.learn_del_fam_type.eq_ignore_ascii_case(t))
}

/// Every FAM record with its delivery.
fn fams(learner: &Learner) -> impl Iterator<Item = (&LearningDelivery, &LearningDeliveryFam)> {
    learner
        .learning_deliveries
        .iter()
        .flat_map(|d| d.fams.iter().map(move |fam| (d, fam)))
}

fn fam_params(fam: &LearningDeliveryFam) -> [ErrorParameter; 2] {
    [
        param("LearnDelFAMType", &fam.learn_del_fam_type),
        param("LearnDelFAMCode", &fam.learn_del_fam_code),
    ]
}

fn learn_del_fam_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        let known = ctx.reference.lookups.contains_compound(
            names::LEARN_DEL_FAM_TYPE,
            &fam.learn_del_fam_type,
            &fam.learn_del_fam_code,
        );
        if !known {
            out.raise_for_aim(d.aim_seq_number, fam_params(fam));
        }
    }
}

fn learn_del_fam_type_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.is_funded() && !d.has_fam_type(del_fam::SOURCE_OF_FUNDING)).then(|| {
            [
                param("FundModel", d.fund_model),
                param("LearnDelFAMType", del_fam::SOURCE_OF_FUNDING),
            ]
        })
    });
}

fn learn_del_fam_type_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.fund_model == fund_model::ADULT_SKILLS
            && !d.has_fam_type(del_fam::FULL_OR_CO_FUNDING))
        .then(|| {
            [
                param("FundModel", d.fund_model),
                param("LearnDelFAMType", del_fam::FULL_OR_CO_FUNDING),
            ]
        })
    });
}

fn learn_del_fam_type_06(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let lookups = &ctx.reference.lookups;
    for (d, fam) in fams(learner) {
        let (fam_type, code) = (&fam.learn_del_fam_type, &fam.learn_del_fam_code);
        if lookups.contains_compound(names::LEARN_DEL_FAM_TYPE, fam_type, code)
            && !lookups.is_compound_valid_at(
                names::LEARN_DEL_FAM_TYPE,
                fam_type,
                code,
                d.learn_start_date,
            )
        {
            let [fam_type, code] = fam_params(fam);
            out.raise_for_aim(
                d.aim_seq_number,
                [fam_type, code, param("LearnStartDate", d.learn_start_date)],
            );
        }
    }
}

/// Occurrences of each FAM type on one delivery, keyed by upper-cased type.
fn type_counts(d: &LearningDelivery) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for fam in &d.fams {
        *counts.entry(fam.learn_del_fam_type.to_uppercase()).or_default() += 1;
    }
    counts
}

fn learn_del_fam_type_07(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for (fam_type, count) in type_counts(d) {
            if count > 1 && SINGLE_OCCURRENCE_TYPES.contains(&fam_type.as_str()) {
                out.raise_for_aim(d.aim_seq_number, [param("LearnDelFAMType", fam_type)]);
            }
        }
    }
}

fn learn_del_fam_type_09(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        let counts = type_counts(d);
        for (fam_type, limit) in OCCURRENCE_LIMITS {
            if counts.get(*fam_type).is_some_and(|count| count > limit) {
                out.raise_for_aim(d.aim_seq_number, [param("LearnDelFAMType", fam_type)]);
            }
        }
    }
}

fn learn_del_fam_type_20(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.has_fam_type(del_fam::ADVANCED_LEARNER_LOAN) && d.fund_model != fund_model::NOT_FUNDED)
            .then(|| {
                [
                    param("FundModel", d.fund_model),
                    param("LearnDelFAMType", del_fam::ADVANCED_LEARNER_LOAN),
                ]
            })
    });
}

fn learn_del_fam_type_39(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.fund_model == fund_model::APPRENTICESHIPS
            && !d.has_fam_type(del_fam::APPRENTICESHIP_CONTRACT))
        .then(|| {
            [
                param("FundModel", d.fund_model),
                param("LearnDelFAMType", del_fam::APPRENTICESHIP_CONTRACT),
            ]
        })
    });
}

fn learn_del_fam_type_40(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        (d.has_fam_type(del_fam::APPRENTICESHIP_CONTRACT)
            && d.fund_model != fund_model::APPRENTICESHIPS)
            .then(|| {
                [
                    param("FundModel", d.fund_model),
                    param("LearnDelFAMType", del_fam::APPRENTICESHIP_CONTRACT),
                ]
            })
    });
}

fn date_from_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if is_dated(fam) && fam.date_from.is_none() {
            out.raise_for_aim(d.aim_seq_number, fam_params(fam));
        }
    }
}

fn date_from_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let Some(from) = fam.date_from
            && from < d.learn_start_date
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMDateFrom", from),
                    param("LearnStartDate", d.learn_start_date),
                ],
            );
        }
    }
}

fn date_from_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let (Some(from), Some(actual_end)) = (fam.date_from, d.learn_act_end_date)
            && from > actual_end
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMDateFrom", from),
                    param("LearnActEndDate", actual_end),
                ],
            );
        }
    }
}

fn date_from_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let Some(from) = fam.date_from
            && !is_dated(fam)
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMType", &fam.learn_del_fam_type),
                    param("LearnDelFAMDateFrom", from),
                ],
            );
        }
    }
}

/// Start dates of ranges that overlap an earlier range of the same type.
/// Ranges are inclusive and a missing end date is open.
fn overlapping_starts(mut ranges: Vec<(NaiveDate, Option<NaiveDate>)>) -> Vec<NaiveDate> {
    ranges.sort();
    let mut overlapping = Vec::new();
    // Furthest end seen so far; `Some(None)` once an open range has been seen.
    let mut reach: Option<Option<NaiveDate>> = None;
    for (from, to) in ranges {
        if let Some(end) = reach
            && end.is_none_or(|end| from <= end)
        {
            overlapping.push(from);
        }
        reach = match (reach, to) {
            (None, to) => Some(to),
            (Some(None), _) | (_, None) => Some(None),
            (Some(Some(end)), Some(to)) => Some(Some(end.max(to))),
        };
    }
    overlapping
}

fn date_from_05(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for fam_type in del_fam::DATED {
            let ranges = d
                .fams_of_type(fam_type)
                .filter_map(|fam| Some((fam.date_from?, fam.date_to)))
                .collect();
            for from in overlapping_starts(ranges) {
                out.raise_for_aim(
                    d.aim_seq_number,
                    [
                        param("LearnDelFAMType", fam_type),
                        param("LearnDelFAMDateFrom", from),
                    ],
                );
            }
        }
    }
}

fn date_to_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let Some(actual_end) = d.learn_act_end_date
            && is_dated(fam)
            && fam.date_to.is_none()
        {
            let [fam_type, code] = fam_params(fam);
            out.raise_for_aim(
                d.aim_seq_number,
                [fam_type, code, param("LearnActEndDate", actual_end)],
            );
        }
    }
}

fn date_to_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let (Some(from), Some(to)) = (fam.date_from, fam.date_to)
            && to < from
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMDateFrom", from),
                    param("LearnDelFAMDateTo", to),
                ],
            );
        }
    }
}

fn date_to_03(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let (Some(to), Some(actual_end)) = (fam.date_to, d.learn_act_end_date)
            && to > actual_end
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMDateTo", to),
                    param("LearnActEndDate", actual_end),
                ],
            );
        }
    }
}

fn date_to_04(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for (d, fam) in fams(learner) {
        if let Some(to) = fam.date_to
            && !is_dated(fam)
        {
            out.raise_for_aim(
                d.aim_seq_number,
                [
                    param("LearnDelFAMType", &fam.learn_del_fam_type),
                    param("LearnDelFAMDateTo", to),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LearnerRule, RuleViolation};
    use crate::rules::test_support::{
        count, ctx, date, dated_fam, delivery, fam, learner, run, standard_programme,
        with_delivery,
    };

    #[test]
    fn valid_fams_raise_nothing() {
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
    fn type_and_code_lookup() {
        let learner = with_delivery(LearningDelivery {
            fams: vec![fam("SOF", "105"), fam("SOF", "999"), fam("XYZ", "1"), fam("ldm", "034")],
            ..delivery()
        });
        let violations = run(learn_del_fam_type_01, &learner);
        let codes: Vec<_> = violations
            .iter()
            .map(|v| v.parameters[1].value.as_str())
            .collect();
        assert_eq!(codes, vec!["999", "1"]);
    }

    #[test]
    fn required_types() {
        let learner = with_delivery(LearningDelivery {
            fams: Vec::new(),
            ..delivery()
        });
        assert_eq!(count(learn_del_fam_type_02, &learner), 1);
        assert_eq!(count(learn_del_fam_type_03, &learner), 1);

        let programme = with_delivery(LearningDelivery {
            fams: vec![fam("SOF", "105")],
            ..standard_programme()
        });
        assert_eq!(count(learn_del_fam_type_39, &programme), 1);
        assert_eq!(count(learn_del_fam_type_03, &programme), 0);
    }

    #[test]
    fn code_valid_on_start_date() {
        let mut learner = with_delivery(LearningDelivery {
            fams: vec![fam("SOF", "111"), fam("FFI", "1")],
            ..delivery()
        });
        assert_eq!(count(learn_del_fam_type_06, &learner), 0);

        learner.learning_deliveries[0].learn_start_date = date(2019, 7, 31);
        let violations = run(learn_del_fam_type_06, &learner);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].parameters[2].value, "2019-07-31");
    }

    #[test]
    fn occurrence_limits() {
        let mut fams = vec![fam("SOF", "105"), fam("sof", "107"), fam("FFI", "1")];
        fams.extend(["001", "023", "001", "023", "001"].map(|code| fam("DAM", code)));
        fams.extend(["1", "2"].map(|code| fam("HHS", code)));
        let learner = with_delivery(LearningDelivery {
            fams,
            ..delivery()
        });
        let single = run(learn_del_fam_type_07, &learner);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].parameters[0].value, "SOF");

        let limited = run(learn_del_fam_type_09, &learner);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].parameters[0].value, "DAM");
    }

    #[test]
    fn types_tied_to_fund_model() {
        let learner = with_delivery(LearningDelivery {
            fams: vec![
                fam("SOF", "105"),
                fam("FFI", "1"),
                fam("ADL", "1"),
                dated_fam("ACT", "1", Some(date(2019, 9, 2)), None),
            ],
            ..delivery()
        });
        assert_eq!(count(learn_del_fam_type_20, &learner), 1);
        assert_eq!(count(learn_del_fam_type_40, &learner), 1);
    }

    #[test]
    fn dated_types_carry_dates() {
        let mut learner = with_delivery(LearningDelivery {
            learn_act_end_date: Some(date(2020, 3, 31)),
            fams: vec![
                fam("SOF", "105"),
                fam("LSF", "1"),
                dated_fam("FFI", "1", Some(date(2019, 9, 2)), Some(date(2020, 3, 31))),
            ],
            ..delivery()
        });
        assert_eq!(count(date_from_01, &learner), 1);
        assert_eq!(count(date_to_01, &learner), 1);
        assert_eq!(count(date_from_04, &learner), 1);
        assert_eq!(count(date_to_04, &learner), 1);

        learner.learning_deliveries[0].learn_act_end_date = None;
        assert_eq!(count(date_to_01, &learner), 0);
    }

    #[test]
    fn date_range_bounds() {
        let learner = with_delivery(LearningDelivery {
            learn_act_end_date: Some(date(2020, 3, 31)),
            fams: vec![
                dated_fam("LSF", "1", Some(date(2019, 9, 1)), Some(date(2020, 4, 1))),
                dated_fam("ALB", "1", Some(date(2020, 4, 1)), Some(date(2020, 3, 1))),
            ],
            ..delivery()
        });
        assert_eq!(count(date_from_02, &learner), 1);
        assert_eq!(count(date_from_03, &learner), 1);
        assert_eq!(count(date_to_02, &learner), 1);
        assert_eq!(count(date_to_03, &learner), 1);
    }

    #[test]
    fn overlapping_ranges() {
        let d = |y, m, day| date(y, m, day);
        assert!(overlapping_starts(vec![
            (d(2019, 9, 2), Some(d(2019, 12, 31))),
            (d(2020, 1, 1), None),
        ])
        .is_empty());
        assert_eq!(
            overlapping_starts(vec![
                (d(2020, 1, 1), None),
                (d(2019, 9, 2), Some(d(2020, 1, 1))),
            ]),
            vec![d(2020, 1, 1)]
        );
        // An open range overlaps everything after it.
        assert_eq!(
            overlapping_starts(vec![
                (d(2019, 9, 2), None),
                (d(2019, 10, 1), Some(d(2019, 10, 31))),
                (d(2019, 12, 1), Some(d(2019, 12, 31))),
            ]),
            vec![d(2019, 10, 1), d(2019, 12, 1)]
        );
    }

    #[test]
    fn overlapping_contracts_on_a_delivery() {
        let mut programme = standard_programme();
        programme.fams = vec![
            fam("SOF", "105"),
            dated_fam("ACT", "1", Some(date(2019, 9, 2)), Some(date(2019, 11, 30))),
            dated_fam("ACT", "2", Some(date(2019, 11, 1)), None),
            dated_fam("LSF", "1", Some(date(2019, 11, 1)), None),
        ];
        let violations = run(date_from_05, &with_delivery(programme));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].parameters[0].value, "ACT");
        assert_eq!(violations[0].parameters[1].value, "2019-11-01");
    }
}
