//! Data model for Individualised Learner Record (ILR) submissions.
//!
//! - [`message`]: the submission envelope (header, provider, learners)
//! - [`learner`]: learner records and their child entities
//! - [`delivery`]: learning deliveries and their child entities
//! - [`codes`]: ILR code values referenced by the rule catalog
//! - [`validation`]: validation errors and reports

pub mod academic_year;
pub mod codes;
pub mod delivery;
pub mod error;
pub mod learner;
pub mod message;
pub mod validation;

pub use academic_year::AcademicYear;
pub use delivery::{
    AppFinRecord, LearningDelivery, LearningDeliveryFam, LearningDeliveryWorkPlacement,
    ProviderSpecDeliveryMonitoring,
};
pub use error::{IlrError, Result};
pub use learner::{
    ContactPreference, EmploymentStatusMonitoring, Learner, LearnerEmploymentStatus, LearnerFam,
    LearnerHe, LearnerHeFinancialSupport, LlddAndHealthProblem, ProviderSpecLearnerMonitoring,
};
pub use message::{CollectionDetails, Header, LearningProvider, Message, Source};
pub use validation::{
    Category, ErrorParameter, RuleFailure, RuleSummary, Severity, ValidationError,
    ValidationReport,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn error(rule: &str, severity: Severity, learner: &str) -> ValidationError {
        ValidationError {
            rule_name: rule.to_string(),
            severity,
            category: Category::Consistency,
            message: format!("{rule} raised"),
            learn_ref_number: Some(learner.to_string()),
            aim_seq_number: None,
            parameters: vec![],
        }
    }

    #[test]
    fn report_counts() {
        let mut report = ValidationReport::new(3, 10);
        report.errors = vec![
            error("Sex_01", Severity::Error, "L1"),
            error("ULN_04", Severity::Error, "L1"),
            error("PlanLearnHours_04", Severity::Warning, "L2"),
        ];
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert!(!report.is_rejected());
        assert_eq!(report.invalid_learners().len(), 1);
        assert_eq!(report.valid_learner_count(), 2);
    }

    #[test]
    fn rejected_file_has_no_valid_learners() {
        let mut report = ValidationReport::new(2, 1);
        report.errors = vec![ValidationError {
            learn_ref_number: None,
            ..error("Filename_01", Severity::Fail, "")
        }];
        assert!(report.is_rejected());
        assert_eq!(report.valid_learner_count(), 0);
    }
}
