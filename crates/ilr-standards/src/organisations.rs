//! Learning provider organisations keyed by UKPRN.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::csv_utils::read_records;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organisation {
    #[serde(rename = "UKPRN")]
    pub ukprn: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LegalOrgType", default)]
    pub legal_org_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrganisationService {
    organisations: BTreeMap<i32, Organisation>,
}

impl OrganisationService {
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        let rows: Vec<Organisation> = read_records(content, file)?;
        Ok(Self {
            organisations: rows.into_iter().map(|org| (org.ukprn, org)).collect(),
        })
    }

    pub fn get(&self, ukprn: i32) -> Option<&Organisation> {
        self.organisations.get(&ukprn)
    }

    pub fn exists(&self, ukprn: i32) -> bool {
        self.organisations.contains_key(&ukprn)
    }

    pub fn len(&self) -> usize {
        self.organisations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisations.is_empty()
    }
}
