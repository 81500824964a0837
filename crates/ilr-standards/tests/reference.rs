//! Tests for loading the complete reference data set.

use chrono::NaiveDate;
use ilr_model::Severity;
use ilr_standards::lookups::names;
use ilr_standards::{ReferenceData, StandardsError, ValidityCategory};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn embedded_reference_data_loads() {
    let reference = ReferenceData::load_embedded().expect("load embedded reference data");

    assert!(reference.lookups.contains(names::SEX, "F"));
    assert!(reference.lookups.contains(names::FUND_MODEL, 36));
    assert!(
        reference
            .lookups
            .contains_compound(names::LEARN_DEL_FAM_TYPE, "SOF", "105")
    );
    assert!(
        !reference
            .lookups
            .is_compound_valid_at(names::LEARN_DEL_FAM_TYPE, "SOF", "111", date(2019, 7, 31))
    );
    assert!(reference.lars.contains_aim("ZPROG001"));
    assert!(reference.lars.has_validity(
        "50086832",
        ValidityCategory::AdultSkills,
        date(2019, 9, 1),
        false
    ));
    assert!(reference.organisations.exists(10000001));
    assert!(reference.postcodes.exists("sw1a 1aa"));
    assert!(reference.epa_organisations.is_valid("EPA0001", 10, date(2020, 1, 1)));

    let sex = reference.catalog.get("Sex_01").expect("Sex_01 in catalog");
    assert_eq!(sex.severity, Severity::Error);
    assert_eq!(
        reference.catalog.get("Filename_01").map(|m| m.severity),
        Some(Severity::Fail)
    );
}

#[test]
fn every_catalog_entry_has_a_message() {
    let reference = ReferenceData::load_embedded().unwrap();
    assert!(reference.catalog.len() > 100);
    for meta in reference.catalog.iter() {
        assert!(!meta.message.is_empty(), "{} has no message", meta.rule_name);
        assert!(!meta.entity.is_empty(), "{} has no entity", meta.rule_name);
    }
}

#[test]
fn directory_overrides_individual_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("organisations.csv"),
        "UKPRN,Name,LegalOrgType\n12345678,Override Provider,Private Company\n",
    )
    .unwrap();

    let reference = ReferenceData::load_dir(dir.path()).expect("load overridden reference data");
    assert!(reference.organisations.exists(12345678));
    assert!(!reference.organisations.exists(10000001));
    // Files not present in the directory come from the embedded set.
    assert!(reference.lookups.contains(names::SEX, "M"));
    assert!(reference.catalog.contains("ULN_04"));
}

#[test]
fn explicit_directory_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("postcodes.csv"), "Postcode\nAB1 2CD\n").unwrap();

    let reference = ReferenceData::load(Some(dir.path())).unwrap();
    assert!(reference.postcodes.exists("AB12CD"));
    assert_eq!(reference.postcodes.len(), 1);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = ReferenceData::load_dir(&missing).unwrap_err();
    assert!(matches!(err, StandardsError::DirectoryNotFound { .. }));
}

#[test]
fn malformed_override_reports_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("epa_organisations.csv"),
        "EPAOrgID,StdCode,EffectiveFrom,EffectiveTo\nEPA9,abc,2019-01-01,\n",
    )
    .unwrap();

    let err = ReferenceData::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("epa_organisations.csv"));
}
