//! Learner HE data: term-time accommodation, UCAS identifier and
//! financial support.

use std::collections::BTreeSet;

use ilr_model::Learner;
use ilr_standards::lookups::names;

use crate::context::RuleContext;
use crate::queries::is_digits;
use crate::rule::{LearnerCheckRule, Reporter, param};

pub const RULES: &[LearnerCheckRule] = &[
    LearnerCheckRule::new("TTACCOM_01", ttaccom_01),
    LearnerCheckRule::new("UCASPERID_01", ucasperid_01),
    LearnerCheckRule::new("FINTYPE_01", fintype_01),
    LearnerCheckRule::new("FINTYPE_02", fintype_02),
    LearnerCheckRule::new("FINAMOUNT_01", finamount_01),
];

const UCASPERID_LENGTH: usize = 10;

fn ttaccom_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    if let Some(ttaccom) = learner.learner_he.as_ref().and_then(|he| he.ttaccom)
        && !ctx.reference.lookups.contains(names::TTACCOM, ttaccom)
    {
        out.raise([param("TTACCOM", ttaccom)]);
    }
}

fn ucasperid_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let ucasperid = learner
        .learner_he
        .as_ref()
        .and_then(|he| he.ucasperid.as_deref());
    if let Some(ucasperid) = ucasperid
        && !is_digits(ucasperid, UCASPERID_LENGTH)
    {
        out.raise([param("UCASPERID", ucasperid)]);
    }
}

fn fintype_01(learner: &Learner, ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(he) = &learner.learner_he else {
        return;
    };
    for support in &he.financial_support {
        if !ctx.reference.lookups.contains(names::FINTYPE, support.fin_type) {
            out.raise([param("FINTYPE", support.fin_type)]);
        }
    }
}

fn fintype_02(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(he) = &learner.learner_he else {
        return;
    };
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    for support in &he.financial_support {
        if !seen.insert(support.fin_type) {
            repeated.insert(support.fin_type);
        }
    }
    for fin_type in repeated {
        out.raise([param("FINTYPE", fin_type)]);
    }
}

fn finamount_01(learner: &Learner, _ctx: &RuleContext<'_>, out: &mut Reporter<'_>) {
    let Some(he) = &learner.learner_he else {
        return;
    };
    for support in he.financial_support.iter().filter(|s| s.fin_amount <= 0) {
        out.raise([
            param("FINTYPE", support.fin_type),
            param("FINAMOUNT", support.fin_amount),
        ]);
    }
}
