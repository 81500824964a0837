//! Top-level ILR submission structure.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::learner::Learner;

/// A complete ILR submission file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub header: Header,
    #[serde(default)]
    pub learning_provider: Option<LearningProvider>,
    #[serde(rename = "Learner", default)]
    pub learners: Vec<Learner>,
}

impl Message {
    /// UKPRN of the submitting provider as declared in the header.
    pub fn ukprn(&self) -> i32 {
        self.header.source.ukprn
    }

    /// Date the provider's software prepared the file.
    pub fn file_preparation_date(&self) -> NaiveDate {
        self.header.collection_details.file_preparation_date
    }

    /// Find a learner by reference number.
    pub fn learner(&self, learn_ref_number: &str) -> Option<&Learner> {
        self.learners
            .iter()
            .find(|learner| learner.learn_ref_number == learn_ref_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub collection_details: CollectionDetails,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionDetails {
    /// Always `ILR` for a learner record return.
    pub collection: String,
    /// Four-digit academic year code, e.g. `1920`.
    pub year: String,
    pub file_preparation_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Source {
    #[serde(default)]
    pub protective_marking: Option<String>,
    #[serde(rename = "UKPRN")]
    pub ukprn: i32,
    #[serde(default)]
    pub software_supplier: Option<String>,
    #[serde(default)]
    pub software_package: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    pub serial_no: String,
    pub date_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProvider {
    #[serde(rename = "UKPRN")]
    pub ukprn: i32,
}
