//! Data shared by every rule during one validation run.

use chrono::NaiveDate;

use ilr_model::{AcademicYear, Message};
use ilr_standards::ReferenceData;

/// Reference data plus the facts about the submission being validated.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub reference: &'a ReferenceData,
    pub academic_year: AcademicYear,
    /// UKPRN from the file header.
    pub ukprn: i32,
    pub file_preparation_date: NaiveDate,
    /// Name of the submitted file, when validating a file.
    pub file_name: Option<String>,
    pub today: NaiveDate,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        reference: &'a ReferenceData,
        academic_year: AcademicYear,
        message: &Message,
    ) -> Self {
        Self {
            reference,
            academic_year,
            ukprn: message.ukprn(),
            file_preparation_date: message.file_preparation_date(),
            file_name: None,
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Academic year to validate against: the explicit choice, else the
/// header's `Year`, else the year containing the file preparation date.
pub fn resolve_academic_year(
    message: &Message,
    explicit: Option<AcademicYear>,
) -> Option<AcademicYear> {
    explicit
        .or_else(|| AcademicYear::parse(&message.header.collection_details.year).ok())
        .or_else(|| AcademicYear::containing(message.file_preparation_date()))
}
