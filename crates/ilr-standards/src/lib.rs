//! ILR reference data services and loaders.
//!
//! This crate provides:
//!
//! - **Lookups** of coded values, including dated and compound type/code lists
//! - **LARS** learning aims, validities, frameworks and standards
//! - **Organisations**, **postcodes** and **EPA organisations**
//! - The **rule catalog** holding each rule's severity, category and message
//! - **Date arithmetic** used by the rules
//!
//! # Reference Directory Structure
//!
//! ```text
//! reference/
//! ├── lookups.csv
//! ├── lars_learning_delivery.csv
//! ├── lars_validity.csv
//! ├── lars_framework.csv
//! ├── lars_standard.csv
//! ├── organisations.csv
//! ├── postcodes.csv
//! ├── epa_organisations.csv
//! └── rules.csv
//! ```
//!
//! Every file is embedded; a directory only needs the files it overrides.
//!
//! # Example
//!
//! ```rust,ignore
//! use ilr_standards::{ReferenceData, lookups::names};
//!
//! let reference = ReferenceData::load(None)?;
//! assert!(reference.lookups.contains(names::SEX, "F"));
//! ```

pub mod catalog;
pub mod csv_utils;
pub mod dates;
pub mod embedded;
pub mod epa;
pub mod error;
pub mod lars;
pub mod lookups;
pub mod organisations;
pub mod paths;
pub mod postcodes;
pub mod registry;

pub use catalog::{RuleCatalog, RuleMeta};
pub use epa::{EpaOrganisation, EpaOrganisationService};
pub use error::{Result, StandardsError};
pub use lars::{
    LarsFramework, LarsLearningDelivery, LarsService, LarsStandard, LarsValidity,
    ValidityCategory,
};
pub use lookups::{LookupEntry, LookupService};
pub use organisations::{Organisation, OrganisationService};
pub use paths::{REFERENCE_ENV_VAR, reference_dir_from_env};
pub use postcodes::PostcodeService;
pub use registry::ReferenceData;
