//! Learning Aim Reference Service (LARS) data.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use ilr_model::codes::fund_model;

use crate::csv_utils::read_records;
use crate::dates::is_between;
use crate::error::Result;

/// A learning aim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LarsLearningDelivery {
    pub learn_aim_ref: String,
    pub learn_aim_ref_title: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

/// Funding stream a learning aim can be valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum ValidityCategory {
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "ADULT_SKILLS")]
    AdultSkills,
    #[serde(rename = "APPRENTICESHIPS")]
    Apprenticeships,
    #[serde(rename = "16-19_EFA")]
    SixteenToNineteen,
    #[serde(rename = "ESF")]
    EuropeanSocialFund,
    #[serde(rename = "COMM_LEARN")]
    CommunityLearning,
    #[serde(rename = "ADV_LEARNER_LOANS")]
    AdvancedLearnerLoans,
}

impl ValidityCategory {
    /// Category checked for a delivery's funding model.
    ///
    /// Non-funded deliveries financed by an advanced learner loan are
    /// checked against the loans category; other non-funded and other adult
    /// deliveries accept any category.
    pub fn for_fund_model(fund_model: i32, advanced_learner_loan: bool) -> Self {
        match fund_model {
            fund_model::COMMUNITY_LEARNING => Self::CommunityLearning,
            fund_model::AGE_16_TO_19 | fund_model::OTHER_16_TO_19 => Self::SixteenToNineteen,
            fund_model::ADULT_SKILLS => Self::AdultSkills,
            fund_model::APPRENTICESHIPS => Self::Apprenticeships,
            fund_model::EUROPEAN_SOCIAL_FUND => Self::EuropeanSocialFund,
            fund_model::NOT_FUNDED if advanced_learner_loan => Self::AdvancedLearnerLoans,
            _ => Self::Any,
        }
    }

    /// `Any` on either side matches every category.
    pub fn matches(self, requested: Self) -> bool {
        self == Self::Any || requested == Self::Any || self == requested
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::AdultSkills => "ADULT_SKILLS",
            Self::Apprenticeships => "APPRENTICESHIPS",
            Self::SixteenToNineteen => "16-19_EFA",
            Self::EuropeanSocialFund => "ESF",
            Self::CommunityLearning => "COMM_LEARN",
            Self::AdvancedLearnerLoans => "ADV_LEARNER_LOANS",
        }
    }
}

impl fmt::Display for ValidityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Period in which an aim may be funded under a category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LarsValidity {
    pub learn_aim_ref: String,
    pub validity_category: ValidityCategory,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub last_new_start_date: Option<NaiveDate>,
}

impl LarsValidity {
    /// True when a delivery starting on `start` is covered. The last new
    /// start date does not apply to restarts.
    pub fn covers(&self, start: NaiveDate, restart: bool) -> bool {
        is_between(start, self.start_date, self.end_date)
            && (restart || self.last_new_start_date.is_none_or(|last| start <= last))
    }
}

/// A framework pathway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LarsFramework {
    pub fwork_code: i32,
    pub prog_type: i32,
    pub pway_code: i32,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

/// An apprenticeship standard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LarsStandard {
    pub std_code: i32,
    pub standard_name: String,
    pub effective_from: NaiveDate,
    pub last_date_starts: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
}

/// LARS lookups used by the delivery rules.
#[derive(Debug, Clone, Default)]
pub struct LarsService {
    aims: BTreeMap<String, LarsLearningDelivery>,
    validities: BTreeMap<String, Vec<LarsValidity>>,
    frameworks: Vec<LarsFramework>,
    standards: BTreeMap<i32, LarsStandard>,
}

impl LarsService {
    pub fn new(
        aims: Vec<LarsLearningDelivery>,
        validities: Vec<LarsValidity>,
        frameworks: Vec<LarsFramework>,
        standards: Vec<LarsStandard>,
    ) -> Self {
        let mut by_aim: BTreeMap<String, Vec<LarsValidity>> = BTreeMap::new();
        for validity in validities {
            by_aim
                .entry(validity.learn_aim_ref.to_uppercase())
                .or_default()
                .push(validity);
        }
        Self {
            aims: aims
                .into_iter()
                .map(|aim| (aim.learn_aim_ref.to_uppercase(), aim))
                .collect(),
            validities: by_aim,
            frameworks,
            standards: standards.into_iter().map(|s| (s.std_code, s)).collect(),
        }
    }

    /// Parse the four LARS files.
    pub fn from_csv(
        learning_delivery: (&str, &str),
        validity: (&str, &str),
        framework: (&str, &str),
        standard: (&str, &str),
    ) -> Result<Self> {
        Ok(Self::new(
            read_records(learning_delivery.0, learning_delivery.1)?,
            read_records(validity.0, validity.1)?,
            read_records(framework.0, framework.1)?,
            read_records(standard.0, standard.1)?,
        ))
    }

    pub fn aim(&self, learn_aim_ref: &str) -> Option<&LarsLearningDelivery> {
        self.aims.get(&learn_aim_ref.trim().to_uppercase())
    }

    pub fn contains_aim(&self, learn_aim_ref: &str) -> bool {
        self.aim(learn_aim_ref).is_some()
    }

    pub fn validities(&self, learn_aim_ref: &str) -> &[LarsValidity] {
        self.validities
            .get(&learn_aim_ref.trim().to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when the aim has a validity for `category` covering `start`.
    pub fn has_validity(
        &self,
        learn_aim_ref: &str,
        category: ValidityCategory,
        start: NaiveDate,
        restart: bool,
    ) -> bool {
        self.validities(learn_aim_ref)
            .iter()
            .any(|v| v.validity_category.matches(category) && v.covers(start, restart))
    }

    pub fn framework_exists(&self, prog_type: i32, fwork_code: i32, pway_code: i32) -> bool {
        self.frameworks.iter().any(|f| {
            f.prog_type == prog_type && f.fwork_code == fwork_code && f.pway_code == pway_code
        })
    }

    pub fn standard(&self, std_code: i32) -> Option<&LarsStandard> {
        self.standards.get(&std_code)
    }

    pub fn aim_count(&self) -> usize {
        self.aims.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> LarsService {
        LarsService::from_csv(
            (
                "LearnAimRef,LearnAimRefTitle,EffectiveFrom,EffectiveTo\n\
                 ZPROG001,Core aim,2013-08-01,\n\
                 60146364,Customer Service,2016-08-01,\n",
                "lars_learning_delivery.csv",
            ),
            (
                "LearnAimRef,ValidityCategory,StartDate,EndDate,LastNewStartDate\n\
                 ZPROG001,ANY,2013-08-01,,\n\
                 60146364,ADULT_SKILLS,2016-08-01,2020-07-31,2019-07-31\n",
                "lars_validity.csv",
            ),
            (
                "FworkCode,ProgType,PwayCode,EffectiveFrom,EffectiveTo\n403,2,1,2014-08-01,\n",
                "lars_framework.csv",
            ),
            (
                "StdCode,StandardName,EffectiveFrom,LastDateStarts,EffectiveTo\n\
                 10,Engineering Technician,2016-08-01,,\n",
                "lars_standard.csv",
            ),
        )
        .unwrap()
    }

    #[test]
    fn aims_are_case_insensitive() {
        let lars = service();
        assert!(lars.contains_aim("zprog001"));
        assert!(!lars.contains_aim("00000000"));
    }

    #[test]
    fn validity_honours_last_new_start_date_except_for_restarts() {
        let lars = service();
        let category = ValidityCategory::AdultSkills;
        assert!(lars.has_validity("60146364", category, date(2019, 7, 31), false));
        assert!(!lars.has_validity("60146364", category, date(2019, 8, 1), false));
        assert!(lars.has_validity("60146364", category, date(2019, 8, 1), true));
        assert!(!lars.has_validity("60146364", category, date(2020, 8, 1), true));
        assert!(!lars.has_validity(
            "60146364",
            ValidityCategory::Apprenticeships,
            date(2018, 8, 1),
            false
        ));
    }

    #[test]
    fn any_category_matches_every_request() {
        let lars = service();
        assert!(lars.has_validity(
            "ZPROG001",
            ValidityCategory::Apprenticeships,
            date(2019, 9, 1),
            false
        ));
        assert!(ValidityCategory::AdultSkills.matches(ValidityCategory::Any));
    }

    #[test]
    fn fund_model_categories() {
        assert_eq!(
            ValidityCategory::for_fund_model(82, false),
            ValidityCategory::SixteenToNineteen
        );
        assert_eq!(
            ValidityCategory::for_fund_model(99, true),
            ValidityCategory::AdvancedLearnerLoans
        );
        assert_eq!(ValidityCategory::for_fund_model(99, false), ValidityCategory::Any);
    }

    #[test]
    fn frameworks_and_standards() {
        let lars = service();
        assert!(lars.framework_exists(2, 403, 1));
        assert!(!lars.framework_exists(3, 403, 1));
        assert_eq!(
            lars.standard(10).map(|s| s.standard_name.as_str()),
            Some("Engineering Technician")
        );
    }
}
