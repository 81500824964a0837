//! Learner record and its child entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{ULN_TEMPORARY, fund_model};
use crate::delivery::LearningDelivery;

/// One learner in an ILR submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Learner {
    pub learn_ref_number: String,
    #[serde(default)]
    pub prev_learn_ref_number: Option<String>,
    #[serde(rename = "PrevUKPRN", default)]
    pub prev_ukprn: Option<i32>,
    #[serde(rename = "PMUKPRN", default)]
    pub pmukprn: Option<i32>,
    #[serde(default)]
    pub camp_id: Option<String>,
    #[serde(rename = "ULN")]
    pub uln: i64,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub given_names: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub ethnicity: i32,
    pub sex: String,
    #[serde(rename = "LLDDHealthProb")]
    pub lldd_health_prob: i32,
    #[serde(rename = "NINumber", default)]
    pub ni_number: Option<String>,
    #[serde(default)]
    pub prior_attain: Option<i32>,
    #[serde(default)]
    pub accom: Option<i32>,
    #[serde(rename = "ALSCost", default)]
    pub als_cost: Option<i32>,
    #[serde(default)]
    pub plan_learn_hours: Option<i32>,
    #[serde(rename = "PlanEEPHours", default)]
    pub plan_eep_hours: Option<i32>,
    #[serde(default)]
    pub math_grade: Option<String>,
    #[serde(default)]
    pub eng_grade: Option<String>,
    #[serde(default)]
    pub postcode_prior: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub add_line1: Option<String>,
    #[serde(default)]
    pub tel_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "ContactPreference", default)]
    pub contact_preferences: Vec<ContactPreference>,
    #[serde(rename = "LLDDandHealthProblem", default)]
    pub lldd_and_health_problems: Vec<LlddAndHealthProblem>,
    #[serde(rename = "LearnerFAM", default)]
    pub learner_fams: Vec<LearnerFam>,
    #[serde(rename = "ProviderSpecLearnerMonitoring", default)]
    pub provider_spec_learner_monitorings: Vec<ProviderSpecLearnerMonitoring>,
    #[serde(rename = "LearnerEmploymentStatus", default)]
    pub learner_employment_statuses: Vec<LearnerEmploymentStatus>,
    #[serde(rename = "LearnerHE", default)]
    pub learner_he: Option<LearnerHe>,
    #[serde(rename = "LearningDelivery", default)]
    pub learning_deliveries: Vec<LearningDelivery>,
}

impl Learner {
    /// True when the learner carries the temporary ULN placeholder.
    pub fn has_temporary_uln(&self) -> bool {
        self.uln == ULN_TEMPORARY
    }

    /// True when any delivery uses one of the given funding models.
    pub fn has_fund_model(&self, models: &[i32]) -> bool {
        self.learning_deliveries
            .iter()
            .any(|delivery| models.contains(&delivery.fund_model))
    }

    /// True when any delivery attracts public funding (FM 25, 35, 36, 81, 82).
    pub fn has_funded_delivery(&self) -> bool {
        self.has_fund_model(fund_model::FUNDED)
    }

    /// True when any delivery uses a funding model other than 10 or 99.
    pub fn has_delivery_outside_community_or_non_funded(&self) -> bool {
        self.learning_deliveries.iter().any(|delivery| {
            delivery.fund_model != fund_model::COMMUNITY_LEARNING
                && delivery.fund_model != fund_model::NOT_FUNDED
        })
    }

    /// Earliest learning start date across all deliveries.
    pub fn earliest_learn_start_date(&self) -> Option<NaiveDate> {
        self.learning_deliveries
            .iter()
            .map(|delivery| delivery.learn_start_date)
            .min()
    }

    /// Employment status applicable on the given date (latest status on or before it).
    pub fn employment_status_on(&self, date: NaiveDate) -> Option<&LearnerEmploymentStatus> {
        self.learner_employment_statuses
            .iter()
            .filter(|status| status.date_emp_stat_app <= date)
            .max_by_key(|status| status.date_emp_stat_app)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactPreference {
    pub cont_pref_type: String,
    pub cont_pref_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlddAndHealthProblem {
    #[serde(rename = "LLDDCat")]
    pub lldd_cat: i32,
    #[serde(rename = "PrimaryLLDD", default)]
    pub primary_lldd: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerFam {
    #[serde(rename = "LearnFAMType")]
    pub learn_fam_type: String,
    #[serde(rename = "LearnFAMCode")]
    pub learn_fam_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSpecLearnerMonitoring {
    pub prov_spec_learn_mon_occur: String,
    pub prov_spec_learn_mon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LearnerEmploymentStatus {
    pub emp_stat: i32,
    pub date_emp_stat_app: NaiveDate,
    #[serde(default)]
    pub emp_id: Option<i32>,
    #[serde(default)]
    pub agree_id: Option<String>,
    #[serde(rename = "EmploymentStatusMonitoring", default)]
    pub employment_status_monitorings: Vec<EmploymentStatusMonitoring>,
}

impl LearnerEmploymentStatus {
    /// True when an ESM record of the given type is present.
    pub fn has_esm_type(&self, esm_type: &str) -> bool {
        self.employment_status_monitorings
            .iter()
            .any(|esm| esm.esm_type.eq_ignore_ascii_case(esm_type))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentStatusMonitoring {
    #[serde(rename = "ESMType")]
    pub esm_type: String,
    #[serde(rename = "ESMCode")]
    pub esm_code: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerHe {
    #[serde(rename = "UCASPERID", default)]
    pub ucasperid: Option<String>,
    #[serde(rename = "TTACCOM", default)]
    pub ttaccom: Option<i32>,
    #[serde(rename = "LearnerHEFinancialSupport", default)]
    pub financial_support: Vec<LearnerHeFinancialSupport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerHeFinancialSupport {
    #[serde(rename = "FINTYPE")]
    pub fin_type: i32,
    #[serde(rename = "FINAMOUNT")]
    pub fin_amount: i32,
}
