//! Embedded reference data.
//!
//! The default reference data set is embedded at compile time using
//! `include_str!()`, so validation works without any files on disk. A
//! reference directory can override individual files (see [`crate::registry`]).

/// Simple and compound lookup lists.
pub const LOOKUPS: &str = include_str!("../data/lookups.csv");

/// LARS learning aims.
pub const LARS_LEARNING_DELIVERY: &str = include_str!("../data/lars_learning_delivery.csv");

/// LARS validity periods by funding category.
pub const LARS_VALIDITY: &str = include_str!("../data/lars_validity.csv");

/// LARS framework pathways.
pub const LARS_FRAMEWORK: &str = include_str!("../data/lars_framework.csv");

/// LARS apprenticeship standards.
pub const LARS_STANDARD: &str = include_str!("../data/lars_standard.csv");

/// Known learning providers.
pub const ORGANISATIONS: &str = include_str!("../data/organisations.csv");

/// Known valid postcodes.
pub const POSTCODES: &str = include_str!("../data/postcodes.csv");

/// End-point assessment organisations and the standards they assess.
pub const EPA_ORGANISATIONS: &str = include_str!("../data/epa_organisations.csv");

/// Rule catalog: severity, category and message per rule.
pub const RULES: &str = include_str!("../data/rules.csv");

pub const LOOKUPS_FILE: &str = "lookups.csv";
pub const LARS_LEARNING_DELIVERY_FILE: &str = "lars_learning_delivery.csv";
pub const LARS_VALIDITY_FILE: &str = "lars_validity.csv";
pub const LARS_FRAMEWORK_FILE: &str = "lars_framework.csv";
pub const LARS_STANDARD_FILE: &str = "lars_standard.csv";
pub const ORGANISATIONS_FILE: &str = "organisations.csv";
pub const POSTCODES_FILE: &str = "postcodes.csv";
pub const EPA_ORGANISATIONS_FILE: &str = "epa_organisations.csv";
pub const RULES_FILE: &str = "rules.csv";

/// Every reference file name paired with its embedded content.
pub fn all_files() -> [(&'static str, &'static str); 9] {
    [
        (LOOKUPS_FILE, LOOKUPS),
        (LARS_LEARNING_DELIVERY_FILE, LARS_LEARNING_DELIVERY),
        (LARS_VALIDITY_FILE, LARS_VALIDITY),
        (LARS_FRAMEWORK_FILE, LARS_FRAMEWORK),
        (LARS_STANDARD_FILE, LARS_STANDARD),
        (ORGANISATIONS_FILE, ORGANISATIONS),
        (POSTCODES_FILE, POSTCODES),
        (EPA_ORGANISATIONS_FILE, EPA_ORGANISATIONS),
        (RULES_FILE, RULES),
    ]
}
