//! Provider delivery monitoring and work placements.

use std::collections::BTreeMap;

use ilr_model::Learner;
use ilr_model::codes::WORK_EXPERIENCE_AIM_REF;
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::is_valid_emp_id;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("ProvSpecDelMonOccur_01", prov_spec_del_mon_occur_01),
    LearnerCheckRule::new("ProvSpecDelMonOccur_02", prov_spec_del_mon_occur_02),
    LearnerCheckRule::new("WorkPlaceMode_01", work_place_mode_01),
    LearnerCheckRule::new("WorkPlaceStartDate_01", work_place_start_date_01),
    LearnerCheckRule::new("WorkPlaceStartDate_02", work_place_start_date_02),
    LearnerCheckRule::new("WorkPlaceEndDate_01", work_place_end_date_01),
    LearnerCheckRule::new("WorkPlaceEmpId_01", work_place_emp_id_01),
];

fn prov_spec_del_mon_occur_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for monitoring in &d.provider_spec_delivery_monitorings {
            let occur = &monitoring.prov_spec_del_mon_occur;
            if !ctx
                .reference
                .lookups
                .contains(names::PROV_SPEC_DEL_MON_OCCUR, occur)
            {
                out.raise_for_aim(d.aim_seq_number, [param("ProvSpecDelMonOccur", occur)]);
            }
        }
    }
}

fn prov_spec_del_mon_occur_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for monitoring in &d.provider_spec_delivery_monitorings {
            *counts
                .entry(monitoring.prov_spec_del_mon_occur.trim().to_uppercase())
                .or_default() += 1;
        }
        for (occur, count) in counts {
            if count > 1 {
                out.raise_for_aim(d.aim_seq_number, [param("ProvSpecDelMonOccur", occur)]);
            }
        }
    }
}

fn work_place_mode_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for placement in &d.work_placements {
            let mode = placement.work_place_mode;
            if !ctx.reference.lookups.contains(names::WORK_PLACE_MODE, mode) {
                out.raise_for_aim(d.aim_seq_number, [param("WorkPlaceMode", mode)]);
            }
        }
    }
}

fn work_place_start_date_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for placement in &d.work_placements {
            if placement.work_place_start_date < d.learn_start_date {
                out.raise_for_aim(
                    d.aim_seq_number,
                    [
                        param("WorkPlaceStartDate", placement.work_place_start_date),
                        param("LearnStartDate", d.learn_start_date),
                    ],
                );
            }
        }
    }
}

fn work_place_start_date_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    out.check_deliveries(learner, |d| {
        let is_work_experience = d
            .learn_aim_ref
            .trim()
            .eq_ignore_ascii_case(WORK_EXPERIENCE_AIM_REF);
        (!d.work_placements.is_empty() && !is_work_experience)
            .then(|| [param("LearnAimRef", &d.learn_aim_ref)])
    });
}

fn work_place_end_date_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for placement in &d.work_placements {
            if let Some(end) = placement.work_place_end_date
                && end < placement.work_place_start_date
            {
                out.raise_for_aim(
                    d.aim_seq_number,
                    [
                        param("WorkPlaceStartDate", placement.work_place_start_date),
                        param("WorkPlaceEndDate", end),
                    ],
                );
            }
        }
    }
}

fn work_place_emp_id_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    for d in &learner.learning_deliveries {
        for placement in &d.work_placements {
            if let Some(emp_id) = placement.work_place_emp_id
                && !is_valid_emp_id(emp_id)
            {
                out.raise_for_aim(d.aim_seq_number, [param("WorkPlaceEmpId", emp_id)]);
            }
        }
    }
}
