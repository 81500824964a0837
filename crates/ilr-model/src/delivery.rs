//! Learning delivery record and its child entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{aim_type, fund_model, prog_type};

/// A single learning aim undertaken by a learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LearningDelivery {
    pub learn_aim_ref: String,
    pub aim_type: i32,
    pub aim_seq_number: i32,
    pub learn_start_date: NaiveDate,
    #[serde(default)]
    pub orig_learn_start_date: Option<NaiveDate>,
    pub learn_plan_end_date: NaiveDate,
    pub fund_model: i32,
    #[serde(default)]
    pub p_hours: Option<i32>,
    #[serde(default)]
    pub prog_type: Option<i32>,
    #[serde(default)]
    pub fwork_code: Option<i32>,
    #[serde(default)]
    pub pway_code: Option<i32>,
    #[serde(default)]
    pub std_code: Option<i32>,
    #[serde(rename = "PartnerUKPRN", default)]
    pub partner_ukprn: Option<i32>,
    #[serde(default)]
    pub del_loc_post_code: Option<String>,
    #[serde(rename = "LSDPostcode", default)]
    pub lsd_postcode: Option<String>,
    #[serde(default)]
    pub prior_learn_fund_adj: Option<i32>,
    #[serde(default)]
    pub other_fund_adj: Option<i32>,
    #[serde(default)]
    pub con_ref_number: Option<String>,
    #[serde(rename = "EPAOrgID", default)]
    pub epa_org_id: Option<String>,
    #[serde(default)]
    pub emp_outcome: Option<i32>,
    pub comp_status: i32,
    #[serde(default)]
    pub learn_act_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub withdraw_reason: Option<i32>,
    #[serde(default)]
    pub outcome: Option<i32>,
    #[serde(default)]
    pub ach_date: Option<NaiveDate>,
    #[serde(default)]
    pub out_grade: Option<String>,
    #[serde(rename = "SWSupAimId", default)]
    pub sw_sup_aim_id: Option<String>,
    #[serde(rename = "LearningDeliveryFAM", default)]
    pub fams: Vec<LearningDeliveryFam>,
    #[serde(rename = "LearningDeliveryWorkPlacement", default)]
    pub work_placements: Vec<LearningDeliveryWorkPlacement>,
    #[serde(rename = "AppFinRecord", default)]
    pub app_fin_records: Vec<AppFinRecord>,
    #[serde(rename = "ProviderSpecDeliveryMonitoring", default)]
    pub provider_spec_delivery_monitorings: Vec<ProviderSpecDeliveryMonitoring>,
}

impl LearningDelivery {
    pub fn is_programme_aim(&self) -> bool {
        self.aim_type == aim_type::PROGRAMME_AIM
    }

    /// Framework apprenticeship (ProgType 2, 3, 20-23).
    pub fn is_framework_apprenticeship(&self) -> bool {
        self.prog_type
            .is_some_and(|code| prog_type::FRAMEWORKS.contains(&code))
    }

    /// Apprenticeship standard (ProgType 25).
    pub fn is_standard(&self) -> bool {
        self.prog_type == Some(prog_type::APPRENTICESHIP_STANDARD)
    }

    pub fn is_apprenticeship(&self) -> bool {
        self.is_framework_apprenticeship() || self.is_standard()
    }

    pub fn is_funded(&self) -> bool {
        fund_model::FUNDED.contains(&self.fund_model)
    }

    /// All FAM records of the given type (case-insensitive).
    pub fn fams_of_type<'a>(
        &'a self,
        fam_type: &'a str,
    ) -> impl Iterator<Item = &'a LearningDeliveryFam> + 'a {
        self.fams
            .iter()
            .filter(move |fam| fam.learn_del_fam_type.eq_ignore_ascii_case(fam_type))
    }

    pub fn has_fam_type(&self, fam_type: &str) -> bool {
        self.fams_of_type(fam_type).next().is_some()
    }

    pub fn has_fam(&self, fam_type: &str, code: &str) -> bool {
        self.fams_of_type(fam_type)
            .any(|fam| fam.learn_del_fam_code.trim() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningDeliveryFam {
    #[serde(rename = "LearnDelFAMType")]
    pub learn_del_fam_type: String,
    #[serde(rename = "LearnDelFAMCode")]
    pub learn_del_fam_code: String,
    #[serde(rename = "LearnDelFAMDateFrom", default)]
    pub date_from: Option<NaiveDate>,
    #[serde(rename = "LearnDelFAMDateTo", default)]
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LearningDeliveryWorkPlacement {
    pub work_place_start_date: NaiveDate,
    #[serde(default)]
    pub work_place_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub work_place_hours: Option<i32>,
    pub work_place_mode: i32,
    #[serde(default)]
    pub work_place_emp_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppFinRecord {
    pub a_fin_type: String,
    pub a_fin_code: i32,
    pub a_fin_date: NaiveDate,
    pub a_fin_amount: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSpecDeliveryMonitoring {
    pub prov_spec_del_mon_occur: String,
    pub prov_spec_del_mon: String,
}
