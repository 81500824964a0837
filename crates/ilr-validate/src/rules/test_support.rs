//! Builders shared by the rule unit tests.

use std::sync::OnceLock;

use chrono::NaiveDate;

use ilr_model::{
    AcademicYear, AppFinRecord, EmploymentStatusMonitoring, Learner, LearnerEmploymentStatus,
    LearningDelivery, LearningDeliveryFam,
};
use ilr_standards::ReferenceData;

use crate::context::RuleContext;
use crate::rule::{LearnerCheck, Reporter, RuleViolation};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn reference() -> &'static ReferenceData {
    static REFERENCE: OnceLock<ReferenceData> = OnceLock::new();
    REFERENCE.get_or_init(|| ReferenceData::load_embedded().expect("embedded reference data"))
}

/// 2019/20, UKPRN 10000001, prepared 1 Oct 2019, validated 2 Oct 2019.
pub fn ctx() -> RuleContext<'static> {
    RuleContext {
        reference: reference(),
        academic_year: AcademicYear::parse("1920").unwrap(),
        ukprn: 10000001,
        file_preparation_date: date(2019, 10, 1),
        file_name: None,
        today: date(2019, 10, 2),
    }
}

pub fn fam(fam_type: &str, code: &str) -> LearningDeliveryFam {
    LearningDeliveryFam {
        learn_del_fam_type: fam_type.to_string(),
        learn_del_fam_code: code.to_string(),
        date_from: None,
        date_to: None,
    }
}

pub fn dated_fam(
    fam_type: &str,
    code: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> LearningDeliveryFam {
    LearningDeliveryFam {
        date_from: from,
        date_to: to,
        ..fam(fam_type, code)
    }
}

/// Adult skills aim that is not part of a programme.
pub fn delivery() -> LearningDelivery {
    LearningDelivery {
        learn_aim_ref: "60133533".to_string(),
        aim_type: 4,
        aim_seq_number: 1,
        learn_start_date: date(2019, 9, 2),
        learn_plan_end_date: date(2020, 6, 30),
        fund_model: 35,
        comp_status: 1,
        fams: vec![fam("SOF", "105"), fam("FFI", "1")],
        ..LearningDelivery::default()
    }
}

/// Apprenticeship standard programme aim funded through FM36.
pub fn standard_programme() -> LearningDelivery {
    LearningDelivery {
        learn_aim_ref: "ZPROG001".to_string(),
        aim_type: 1,
        fund_model: 36,
        prog_type: Some(25),
        std_code: Some(10),
        p_hours: Some(400),
        fams: vec![
            fam("SOF", "105"),
            dated_fam("ACT", "1", Some(date(2019, 9, 2)), None),
        ],
        app_fin_records: vec![AppFinRecord {
            a_fin_type: "TNP".to_string(),
            a_fin_code: 1,
            a_fin_date: date(2019, 9, 2),
            a_fin_amount: 9000,
        }],
        ..delivery()
    }
}

/// Employed adult with one adult skills delivery.
pub fn learner() -> Learner {
    Learner {
        learn_ref_number: "LRN001".to_string(),
        uln: 1000000043,
        family_name: Some("Smith".to_string()),
        given_names: Some("Sam".to_string()),
        date_of_birth: Some(date(1990, 5, 4)),
        ethnicity: 31,
        sex: "F".to_string(),
        lldd_health_prob: 2,
        prior_attain: Some(3),
        postcode_prior: Some("B1 1AA".to_string()),
        postcode: Some("B1 1AA".to_string()),
        learner_employment_statuses: vec![LearnerEmploymentStatus {
            emp_stat: 10,
            date_emp_stat_app: date(2019, 8, 1),
            emp_id: None,
            agree_id: None,
            employment_status_monitorings: vec![EmploymentStatusMonitoring {
                esm_type: "EII".to_string(),
                esm_code: 8,
            }],
        }],
        learning_deliveries: vec![delivery()],
        ..Learner::default()
    }
}

pub fn with_delivery(delivery: LearningDelivery) -> Learner {
    Learner {
        learning_deliveries: vec![delivery],
        ..learner()
    }
}

pub fn run_with(
    check: LearnerCheck,
    learner: &Learner,
    ctx: &RuleContext<'_>,
) -> Vec<RuleViolation> {
    let mut sink: Vec<RuleViolation> = Vec::new();
    let learn_ref_number = Some(learner.learn_ref_number.as_str());
    let mut reporter = Reporter::new("Test", learn_ref_number, &mut sink);
    check(learner, ctx, &mut reporter);
    sink
}

pub fn run(check: LearnerCheck, learner: &Learner) -> Vec<RuleViolation> {
    run_with(check, learner, &ctx())
}

/// Number of violations `check` raises for `learner`.
pub fn count(check: LearnerCheck, learner: &Learner) -> usize {
    run(check, learner).len()
}
