//! End-point assessment organisations.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::csv_utils::read_records;
use crate::dates::is_between;
use crate::error::Result;

/// Approval of an EPA organisation to assess one standard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EpaOrganisation {
    #[serde(rename = "EPAOrgID")]
    pub epa_org_id: String,
    #[serde(rename = "StdCode")]
    pub std_code: i32,
    #[serde(rename = "EffectiveFrom")]
    pub effective_from: NaiveDate,
    #[serde(rename = "EffectiveTo")]
    pub effective_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct EpaOrganisationService {
    approvals: Vec<EpaOrganisation>,
}

impl EpaOrganisationService {
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        Ok(Self {
            approvals: read_records(content, file)?,
        })
    }

    /// True when `epa_org_id` may assess `std_code` on `date`.
    pub fn is_valid(&self, epa_org_id: &str, std_code: i32, date: NaiveDate) -> bool {
        let epa_org_id = epa_org_id.trim();
        self.approvals.iter().any(|approval| {
            approval.epa_org_id.eq_ignore_ascii_case(epa_org_id)
                && approval.std_code == std_code
                && is_between(date, approval.effective_from, approval.effective_to)
        })
    }

    pub fn len(&self) -> usize {
        self.approvals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvals.is_empty()
    }
}
