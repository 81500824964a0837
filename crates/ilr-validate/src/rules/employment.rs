//! Employment statuses and their monitoring records.

use std::collections::{BTreeMap, BTreeSet};

use ilr_model::codes::{emp_stat, esm, fund_model};
use ilr_model::{ErrorParameter, Learner, LearnerEmploymentStatus};
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::is_valid_emp_id;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("EmpStat_01", emp_stat_01),
    LearnerCheckRule::new("EmpStat_02", emp_stat_02),
    LearnerCheckRule::new("DateEmpStatApp_01", date_emp_stat_app_01),
    LearnerCheckRule::new("DateEmpStatApp_02", date_emp_stat_app_02),
    LearnerCheckRule::new("EmpId_01", emp_id_01),
    LearnerCheckRule::new("EmpId_02", emp_id_02),
    LearnerCheckRule::new("ESMType_01", esm_type_01),
    LearnerCheckRule::new("ESMType_02", esm_type_02),
    LearnerCheckRule::new("ESMType_08", esm_type_08),
    LearnerCheckRule::new("ESMType_09", esm_type_09),
    LearnerCheckRule::new("ESMType_10", esm_type_10),
];

/// Funding models that need an employment status at the start of learning.
const STATUS_REQUIRED_FUND_MODELS: &[i32] = &[
    fund_model::ADULT_SKILLS,
    fund_model::APPRENTICESHIPS,
    fund_model::EUROPEAN_SOCIAL_FUND,
    fund_model::OTHER_ADULT,
];

fn status_params(status: &LearnerEmploymentStatus) -> [ErrorParameter; 2] {
    [
        param("EmpStat", status.emp_stat),
        param("DateEmpStatApp", status.date_emp_stat_app),
    ]
}

fn emp_stat_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for delivery in &learner.learning_deliveries {
        if STATUS_REQUIRED_FUND_MODELS.contains(&delivery.fund_model)
            && learner
                .employment_status_on(delivery.learn_start_date)
                .is_none()
        {
            out.raise_for_aim(
                delivery.aim_seq_number,
                [
                    param("FundModel", delivery.fund_model),
                    param("LearnStartDate", delivery.learn_start_date),
                ],
            );
        }
    }
}

fn emp_stat_02(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        if !ctx.reference.lookups.contains(names::EMP_STAT, status.emp_stat) {
            out.raise([param("EmpStat", status.emp_stat)]);
        }
    }
}

fn date_emp_stat_app_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        if status.date_emp_stat_app > ctx.file_preparation_date {
            out.raise([
                param("DateEmpStatApp", status.date_emp_stat_app),
                param("FilePreparationDate", ctx.file_preparation_date),
            ]);
        }
    }
}

fn date_emp_stat_app_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let mut counts = BTreeMap::new();
    for status in &learner.learner_employment_statuses {
        *counts.entry(status.date_emp_stat_app).or_insert(0_usize) += 1;
    }
    for (date, count) in counts {
        if count > 1 {
            out.raise([param("DateEmpStatApp", date)]);
        }
    }
}

fn emp_id_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        if let Some(emp_id) = status.emp_id
            && !is_valid_emp_id(emp_id)
        {
            out.raise([param("EmpId", emp_id)]);
        }
    }
}

fn emp_id_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        if let Some(emp_id) = status.emp_id
            && status.emp_stat != emp_stat::IN_PAID_EMPLOYMENT
        {
            out.raise([param("EmpStat", status.emp_stat), param("EmpId", emp_id)]);
        }
    }
}

fn esm_type_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        for monitoring in &status.employment_status_monitorings {
            let known = ctx.reference.lookups.contains_compound(
                names::ESM_TYPE,
                &monitoring.esm_type,
                monitoring.esm_code,
            );
            if !known {
                out.raise([
                    param("ESMType", &monitoring.esm_type),
                    param("ESMCode", monitoring.esm_code),
                ]);
            }
        }
    }
}

fn esm_type_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        let mut seen = BTreeSet::new();
        let mut repeated = BTreeSet::new();
        for monitoring in &status.employment_status_monitorings {
            let esm_type = monitoring.esm_type.to_uppercase();
            if !seen.insert(esm_type.clone()) {
                repeated.insert(esm_type);
            }
        }
        for esm_type in repeated {
            out.raise([
                param("ESMType", esm_type),
                param("DateEmpStatApp", status.date_emp_stat_app),
            ]);
        }
    }
}

fn esm_type_08(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for status in &learner.learner_employment_statuses {
        if status.has_esm_type(esm::LENGTH_OF_EMPLOYMENT)
            && status.emp_stat != emp_stat::IN_PAID_EMPLOYMENT
        {
            out.raise(status_params(status));
        }
    }
}

fn esm_type_09(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let unemployed = [
        emp_stat::NOT_EMPLOYED_SEEKING,
        emp_stat::NOT_EMPLOYED_NOT_SEEKING,
    ];
    for status in &learner.learner_employment_statuses {
        if status.has_esm_type(esm::LENGTH_OF_UNEMPLOYMENT)
            && !unemployed.contains(&status.emp_stat)
        {
            out.raise(status_params(status));
        }
    }
}

fn esm_type_10(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if !learner.has_fund_model(&[fund_model::ADULT_SKILLS]) {
        return;
    }
    for status in &learner.learner_employment_statuses {
        if status.emp_stat == emp_stat::IN_PAID_EMPLOYMENT
            && !status.has_esm_type(esm::EMPLOYMENT_INTENSITY_INDICATOR)
        {
            out.raise(status_params(status));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{count, date, learner, run};
    use ilr_model::EmploymentStatusMonitoring;

    fn esm(esm_type: &str, esm_code: i32) -> EmploymentStatusMonitoring {
        EmploymentStatusMonitoring {
            esm_type: esm_type.to_string(),
            esm_code,
        }
    }

    fn status(emp_stat: i32, y: i32, m: u32, d: u32) -> LearnerEmploymentStatus {
        LearnerEmploymentStatus {
            emp_stat,
            date_emp_stat_app: date(y, m, d),
            emp_id: None,
            agree_id: None,
            employment_status_monitorings: Vec::new(),
        }
    }

    #[test]
    fn status_required_at_start() {
        let mut learner = learner();
        assert_eq!(count(emp_stat_01, &learner), 0);

        learner.learner_employment_statuses = vec![status(10, 2019, 9, 3)];
        let violations = run(emp_stat_01, &learner);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].aim_seq_number, Some(1));

        learner.learning_deliveries[0].fund_model = fund_model::COMMUNITY_LEARNING;
        assert_eq!(count(emp_stat_01, &learner), 0);
    }

    #[test]
    fn status_values_and_dates() {
        let mut learner = learner();
        learner.learner_employment_statuses =
            vec![status(13, 2019, 10, 2), status(11, 2019, 10, 2)];
        assert_eq!(count(emp_stat_02, &learner), 1);
        assert_eq!(count(date_emp_stat_app_01, &learner), 2);
        assert_eq!(count(date_emp_stat_app_02, &learner), 1);
    }

    #[test]
    fn employer_identifier() {
        let mut learner = learner();
        learner.learner_employment_statuses[0].emp_id = Some(12345678);
        assert_eq!(count(emp_id_01, &learner), 1);
        assert_eq!(count(emp_id_02, &learner), 0);

        learner.learner_employment_statuses[0].emp_id = Some(123456789);
        learner.learner_employment_statuses[0].emp_stat = 11;
        assert_eq!(count(emp_id_01, &learner), 0);
        assert_eq!(count(emp_id_02, &learner), 1);
    }

    #[test]
    fn monitoring_lookup_and_repeats() {
        let mut learner = learner();
        learner.learner_employment_statuses[0].employment_status_monitorings =
            vec![esm("EII", 8), esm("eii", 2), esm("LOE", 9), esm("XXX", 1)];
        assert_eq!(count(esm_type_01, &learner), 2);
        let repeated = run(esm_type_02, &learner);
        assert_eq!(repeated.len(), 1);
        assert_eq!(repeated[0].parameters[0].value, "EII");
    }

    #[test]
    fn monitoring_consistent_with_status() {
        let mut learner = learner();
        learner.learner_employment_statuses = vec![status(11, 2019, 8, 1)];
        learner.learner_employment_statuses[0].employment_status_monitorings =
            vec![esm("LOE", 1), esm("LOU", 2)];
        assert_eq!(count(esm_type_08, &learner), 1);
        assert_eq!(count(esm_type_09, &learner), 0);

        learner.learner_employment_statuses[0].emp_stat = 10;
        assert_eq!(count(esm_type_08, &learner), 0);
        assert_eq!(count(esm_type_09, &learner), 1);
    }

    #[test]
    fn employed_adult_skills_learner_needs_intensity() {
        let mut learner = learner();
        assert_eq!(count(esm_type_10, &learner), 0);

        learner.learner_employment_statuses[0]
            .employment_status_monitorings
            .clear();
        assert_eq!(count(esm_type_10, &learner), 1);

        learner.learning_deliveries[0].fund_model = fund_model::OTHER_ADULT;
        assert_eq!(count(esm_type_10, &learner), 0);
    }
}
