//! Coded-value lookups.
//!
//! Simple lookups are keyed by field name (`Sex`, `FundModel`). Compound
//! lookups pair a type with its codes and are keyed `<Field>.<TYPE>`, for
//! example `LearnDelFAMType.SOF`.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::csv_utils::read_records;
use crate::error::Result;

/// Lookup names used by the rule catalog.
pub mod names {
    pub const SEX: &str = "Sex";
    pub const ETHNICITY: &str = "Ethnicity";
    pub const LLDD_HEALTH_PROB: &str = "LLDDHealthProb";
    pub const LLDD_CAT: &str = "LLDDCat";
    pub const PRIMARY_LLDD: &str = "PrimaryLLDD";
    pub const ACCOM: &str = "Accom";
    pub const PRIOR_ATTAIN: &str = "PriorAttain";
    pub const AIM_TYPE: &str = "AimType";
    pub const FUND_MODEL: &str = "FundModel";
    pub const PROG_TYPE: &str = "ProgType";
    pub const COMP_STATUS: &str = "CompStatus";
    pub const OUTCOME: &str = "Outcome";
    pub const WITHDRAW_REASON: &str = "WithdrawReason";
    pub const EMP_OUTCOME: &str = "EmpOutcome";
    pub const EMP_STAT: &str = "EmpStat";
    pub const WORK_PLACE_MODE: &str = "WorkPlaceMode";
    pub const TTACCOM: &str = "TTACCOM";
    pub const FINTYPE: &str = "FINTYPE";
    pub const PROV_SPEC_LEARN_MON_OCCUR: &str = "ProvSpecLearnMonOccur";
    pub const PROV_SPEC_DEL_MON_OCCUR: &str = "ProvSpecDelMonOccur";

    // Compound type/code lookups.
    pub const LEARN_DEL_FAM_TYPE: &str = "LearnDelFAMType";
    pub const LEARN_FAM_TYPE: &str = "LearnFAMType";
    pub const ESM_TYPE: &str = "ESMType";
    pub const CONT_PREF_TYPE: &str = "ContPrefType";
    pub const AFIN_TYPE: &str = "AFinType";
}

/// One permitted code of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupEntry {
    pub lookup: String,
    pub code: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

impl LookupEntry {
    /// True when the code is in force on `date`.
    pub fn is_valid_at(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= date)
            && self.valid_to.is_none_or(|to| date <= to)
    }
}

/// All lookups, keyed case-insensitively by name and code.
#[derive(Debug, Clone, Default)]
pub struct LookupService {
    lookups: BTreeMap<String, Lookup>,
}

#[derive(Debug, Clone, Default)]
struct Lookup {
    name: String,
    entries: Vec<LookupEntry>,
    by_code: BTreeMap<String, usize>,
}

impl LookupService {
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        let rows: Vec<LookupEntry> = read_records(content, file)?;
        Ok(Self::from_entries(rows))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = LookupEntry>) -> Self {
        let mut lookups: BTreeMap<String, Lookup> = BTreeMap::new();
        for entry in entries {
            let lookup = lookups
                .entry(entry.lookup.to_uppercase())
                .or_insert_with(|| Lookup {
                    name: entry.lookup.clone(),
                    ..Lookup::default()
                });
            lookup
                .by_code
                .insert(entry.code.to_uppercase(), lookup.entries.len());
            lookup.entries.push(entry);
        }
        Self { lookups }
    }

    fn entry(&self, lookup: &str, code: &str) -> Option<&LookupEntry> {
        let lookup = self.lookups.get(&lookup.to_uppercase())?;
        let index = lookup.by_code.get(&code.trim().to_uppercase())?;
        lookup.entries.get(*index)
    }

    /// True when `code` is a member of `lookup`, ignoring validity dates.
    pub fn contains(&self, lookup: &str, code: impl Display) -> bool {
        self.entry(lookup, &code.to_string()).is_some()
    }

    /// True when `code` is a member of `lookup` and in force on `date`.
    pub fn is_valid_at(&self, lookup: &str, code: impl Display, date: NaiveDate) -> bool {
        self.entry(lookup, &code.to_string())
            .is_some_and(|entry| entry.is_valid_at(date))
    }

    /// True when `lookup.<type>` exists, i.e. the type is known.
    pub fn has_type(&self, lookup: &str, type_code: &str) -> bool {
        self.lookups
            .contains_key(&compound_name(lookup, type_code).to_uppercase())
    }

    /// True when `code` is a member of the compound lookup `lookup.<type>`.
    pub fn contains_compound(&self, lookup: &str, type_code: &str, code: impl Display) -> bool {
        self.contains(&compound_name(lookup, type_code), code)
    }

    /// Compound membership honouring validity dates.
    pub fn is_compound_valid_at(
        &self,
        lookup: &str,
        type_code: &str,
        code: impl Display,
        date: NaiveDate,
    ) -> bool {
        self.is_valid_at(&compound_name(lookup, type_code), code, date)
    }

    /// Entries of one lookup in file order (empty when unknown).
    pub fn entries(&self, lookup: &str) -> &[LookupEntry] {
        self.lookups
            .get(&lookup.to_uppercase())
            .map(|l| l.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Lookup names as written in the source file, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.lookups.values().map(|l| l.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

fn compound_name(lookup: &str, type_code: &str) -> String {
    format!("{lookup}.{}", type_code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Lookup,Code,ValidFrom,ValidTo,Description
Sex,F,,,Female
Sex,M,,,Male
LLDDCat,1,,2015-07-31,Emotional/behavioural difficulties
LLDDCat,4,,,Visual impairment
LearnDelFAMType.SOF,105,,,ESFA
LearnDelFAMType.SOF,111,2019-08-01,,Greater Manchester
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn membership_is_case_insensitive() {
        let service = LookupService::from_csv(CSV, "lookups.csv").unwrap();
        assert!(service.contains(names::SEX, "F"));
        assert!(service.contains("sex", "m"));
        assert!(!service.contains(names::SEX, "X"));
        assert!(!service.contains("Unknown", "F"));
    }

    #[test]
    fn validity_dates_are_inclusive() {
        let service = LookupService::from_csv(CSV, "lookups.csv").unwrap();
        assert!(service.is_valid_at(names::LLDD_CAT, 1, date(2015, 7, 31)));
        assert!(!service.is_valid_at(names::LLDD_CAT, 1, date(2015, 8, 1)));
        assert!(service.is_valid_at(names::LLDD_CAT, 4, date(2030, 1, 1)));
    }

    #[test]
    fn compound_lookups() {
        let service = LookupService::from_csv(CSV, "lookups.csv").unwrap();
        assert!(service.has_type(names::LEARN_DEL_FAM_TYPE, "SOF"));
        assert!(!service.has_type(names::LEARN_DEL_FAM_TYPE, "XYZ"));
        assert!(service.contains_compound(names::LEARN_DEL_FAM_TYPE, "sof", "105"));
        assert!(!service.is_compound_valid_at(
            names::LEARN_DEL_FAM_TYPE,
            "SOF",
            "111",
            date(2019, 7, 31)
        ));
        assert_eq!(service.entries("LearnDelFAMType.SOF").len(), 2);
        assert_eq!(
            service.names(),
            vec!["LearnDelFAMType.SOF", "LLDDCat", "Sex"]
        );
    }
}
