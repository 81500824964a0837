//! File-level and cross-learner rules, evaluated once per submission.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Timelike;

use ilr_ingest::IlrFileName;
use ilr_model::Message;
use ilr_model::codes::ULN_TEMPORARY;

use crate::context::RuleContext;
use crate::rule::{MessageCheckRule, Reporter, param};

pub const RULES: &[MessageCheckRule] = &[
    MessageCheckRule::new("Filename_01", filename_01),
    MessageCheckRule::new("Filename_02", filename_02),
    MessageCheckRule::new("Filename_04", filename_04),
    MessageCheckRule::new("Filename_08", filename_08),
    MessageCheckRule::new("Collection_01", collection_01),
    MessageCheckRule::new("Year_01", year_01),
    MessageCheckRule::new("UKPRN_01", ukprn_01),
    MessageCheckRule::new("UKPRN_03", ukprn_03),
    MessageCheckRule::new("FilePreparationDate_01", file_preparation_date_01),
    MessageCheckRule::new("FilePreparationDate_02", file_preparation_date_02),
    MessageCheckRule::new("LearnRefNumber_01", learn_ref_number_01),
    MessageCheckRule::new("ULN_11", uln_11),
];

/// Parsed file name; `None` when no name is known or it does not conform.
fn parsed_file_name(ctx: &RuleContext<'_>) -> Option<IlrFileName> {
    IlrFileName::parse(ctx.file_name.as_deref()?).ok()
}

fn filename_01(_message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(name) = ctx.file_name.as_deref()
        && IlrFileName::parse(name).is_err()
    {
        out.raise([param("Filename", name)]);
    }
}

fn filename_02(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(name) = parsed_file_name(ctx)
        && name.ukprn != message.ukprn()
    {
        out.raise([
            param("Filename", opt_name(ctx)),
            param("UKPRN", message.ukprn()),
        ]);
    }
}

fn filename_04(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let year = &message.header.collection_details.year;
    if let Some(name) = parsed_file_name(ctx)
        && name.year != *year
    {
        out.raise([param("Filename", opt_name(ctx)), param("Year", year)]);
    }
}

fn filename_08(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let date_time = message.header.source.date_time;
    let to_second = date_time.with_nanosecond(0).unwrap_or(date_time);
    if let Some(name) = parsed_file_name(ctx)
        && name.date_time != to_second
    {
        out.raise([
            param("Filename", opt_name(ctx)),
            param("DateTime", date_time.format("%Y-%m-%dT%H:%M:%S")),
        ]);
    }
}

fn opt_name(ctx: &RuleContext<'_>) -> String {
    ctx.file_name.clone().unwrap_or_default()
}

fn collection_01(message: &Message, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let collection = &message.header.collection_details.collection;
    if collection != "ILR" {
        out.raise([param("Collection", collection)]);
    }
}

fn year_01(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let year = &message.header.collection_details.year;
    if *year != ctx.academic_year.code() {
        out.raise([param("Year", year)]);
    }
}

fn ukprn_01(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !ctx.reference.organisations.exists(message.ukprn()) {
        out.raise([param("UKPRN", message.ukprn())]);
    }
}

fn ukprn_03(message: &Message, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(provider) = &message.learning_provider
        && provider.ukprn != message.ukprn()
    {
        out.raise([param("UKPRN", provider.ukprn)]);
    }
}

fn file_preparation_date_01(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let date = message.file_preparation_date();
    let year = ctx.academic_year;
    if date < year.start() || date > year.r14_close() {
        out.raise([param("FilePreparationDate", date)]);
    }
}

fn file_preparation_date_02(message: &Message, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let date = message.file_preparation_date();
    if date > ctx.today {
        out.raise([param("FilePreparationDate", date)]);
    }
}

fn learn_ref_number_01(message: &Message, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for learner in &message.learners {
        *counts.entry(learner.learn_ref_number.as_str()).or_default() += 1;
    }
    for (learn_ref_number, count) in counts {
        if count > 1 {
            out.raise_for_learner(learn_ref_number, [param("LearnRefNumber", learn_ref_number)]);
        }
    }
}

fn uln_11(message: &Message, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let mut learners_by_uln: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
    for learner in message.learners.iter().filter(|l| l.uln != ULN_TEMPORARY) {
        learners_by_uln
            .entry(learner.uln)
            .or_default()
            .insert(learner.learn_ref_number.as_str());
    }
    for (uln, learners) in learners_by_uln {
        if learners.len() > 1 {
            for learn_ref_number in learners {
                out.raise_for_learner(learn_ref_number, [param("ULN", uln)]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{MessageCheck, MessageRule, RuleViolation};
    use crate::rules::test_support::{ctx, date, learner};
    use ilr_model::{CollectionDetails, Header, LearningProvider, Source};

    fn message() -> Message {
        Message {
            header: Header {
                collection_details: CollectionDetails {
                    collection: "ILR".to_string(),
                    year: "1920".to_string(),
                    file_preparation_date: date(2019, 10, 1),
                },
                source: Source {
                    protective_marking: None,
                    ukprn: 10000001,
                    software_supplier: None,
                    software_package: None,
                    release: None,
                    serial_no: "01".to_string(),
                    date_time: date(2019, 10, 1).and_hms_opt(9, 30, 0).unwrap(),
                },
            },
            learning_provider: Some(LearningProvider { ukprn: 10000001 }),
            learners: vec![learner()],
        }
    }

    fn run(check: MessageCheck, message: &Message, file_name: Option<&str>) -> Vec<RuleViolation> {
        let mut ctx = ctx();
        ctx.file_name = file_name.map(str::to_string);
        let mut sink: Vec<RuleViolation> = Vec::new();
        let mut reporter = Reporter::new("Test", None, &mut sink);
        check(message, &ctx, &mut reporter);
        sink
    }

    const GOOD_NAME: &str = "ILR-10000001-1920-20191001-093000-01.XML";

    #[test]
    fn valid_message_raises_nothing() {
        let message = message();
        for rule in RULES {
            let mut sink: Vec<RuleViolation> = Vec::new();
            let ctx = ctx().with_file_name(GOOD_NAME);
            rule.validate(&message, &ctx, &mut sink);
            assert!(sink.is_empty(), "{} raised {sink:?}", rule.name());
        }
    }

    #[test]
    fn file_name_rules() {
        let message = message();
        assert_eq!(run(filename_01, &message, Some("learners.xml")).len(), 1);
        assert!(run(filename_01, &message, None).is_empty());
        // Non-conforming names are reported once, by Filename_01 only.
        assert!(run(filename_02, &message, Some("learners.xml")).is_empty());

        let other_ukprn = "ILR-10000002-1920-20191001-093000-01.XML";
        assert_eq!(run(filename_02, &message, Some(other_ukprn)).len(), 1);
        let other_year = "ILR-10000001-2021-20191001-093000-01.XML";
        assert_eq!(run(filename_04, &message, Some(other_year)).len(), 1);
        let other_time = "ILR-10000001-1920-20191001-093001-01.XML";
        assert_eq!(run(filename_08, &message, Some(other_time)).len(), 1);
    }

    #[test]
    fn header_rules() {
        let mut message = message();
        message.header.collection_details.collection = "ILRX".to_string();
        message.header.collection_details.year = "1819".to_string();
        message.header.source.ukprn = 99999999;
        assert_eq!(run(collection_01, &message, None).len(), 1);
        assert_eq!(run(year_01, &message, None).len(), 1);
        assert_eq!(run(ukprn_01, &message, None).len(), 1);
        assert_eq!(run(ukprn_03, &message, None).len(), 1);

        message.learning_provider = None;
        assert!(run(ukprn_03, &message, None).is_empty());
    }

    #[test]
    fn file_preparation_date_window() {
        let mut message = message();
        message.header.collection_details.file_preparation_date = date(2020, 9, 14);
        assert!(run(file_preparation_date_01, &message, None).is_empty());
        assert_eq!(run(file_preparation_date_02, &message, None).len(), 1);

        message.header.collection_details.file_preparation_date = date(2020, 9, 15);
        assert_eq!(run(file_preparation_date_01, &message, None).len(), 1);
        message.header.collection_details.file_preparation_date = date(2019, 7, 31);
        assert_eq!(run(file_preparation_date_01, &message, None).len(), 1);
    }

    #[test]
    fn duplicate_learners() {
        let mut message = message();
        let mut second = learner();
        second.uln = 9999999999;
        message.learners.push(second);
        let duplicates = run(learn_ref_number_01, &message, None);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].learn_ref_number.as_deref(), Some("LRN001"));
        assert!(run(uln_11, &message, None).is_empty());

        let mut third = learner();
        third.learn_ref_number = "LRN003".to_string();
        message.learners.push(third);
        let shared = run(uln_11, &message, None);
        let learners: Vec<_> = shared
            .iter()
            .filter_map(|v| v.learn_ref_number.as_deref())
            .collect();
        assert_eq!(learners, vec!["LRN001", "LRN003"]);
    }
}
