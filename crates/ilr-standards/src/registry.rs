//! Loading the complete reference data set.

use std::path::Path;

use crate::catalog::RuleCatalog;
use crate::embedded;
use crate::epa::EpaOrganisationService;
use crate::error::{Result, StandardsError};
use crate::lars::LarsService;
use crate::lookups::LookupService;
use crate::organisations::OrganisationService;
use crate::paths::reference_dir_from_env;
use crate::postcodes::PostcodeService;

/// All reference data needed by the rule catalog. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub lookups: LookupService,
    pub lars: LarsService,
    pub organisations: OrganisationService,
    pub postcodes: PostcodeService,
    pub epa_organisations: EpaOrganisationService,
    pub catalog: RuleCatalog,
}

impl ReferenceData {
    /// Load the embedded reference data.
    pub fn load_embedded() -> Result<Self> {
        Self::from_sources(|name| Ok(embedded_content(name).to_string()))
    }

    /// Load reference data from `dir`. Files missing from the directory
    /// fall back to the embedded defaults.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StandardsError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        Self::from_sources(|name| {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "Using reference file override");
                std::fs::read_to_string(&path).map_err(|source| StandardsError::Io { path, source })
            } else {
                Ok(embedded_content(name).to_string())
            }
        })
    }

    /// Load from an explicit directory, else `ILR_REFERENCE_DIR`, else the
    /// embedded defaults.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = dir {
            return Self::load_dir(dir);
        }
        match reference_dir_from_env() {
            Some(dir) => Self::load_dir(&dir),
            None => Self::load_embedded(),
        }
    }

    fn from_sources(mut read: impl FnMut(&str) -> Result<String>) -> Result<Self> {
        let lookups = read(embedded::LOOKUPS_FILE)?;
        let aims = read(embedded::LARS_LEARNING_DELIVERY_FILE)?;
        let validity = read(embedded::LARS_VALIDITY_FILE)?;
        let frameworks = read(embedded::LARS_FRAMEWORK_FILE)?;
        let standards = read(embedded::LARS_STANDARD_FILE)?;
        let organisations = read(embedded::ORGANISATIONS_FILE)?;
        let postcodes = read(embedded::POSTCODES_FILE)?;
        let epa = read(embedded::EPA_ORGANISATIONS_FILE)?;
        let rules = read(embedded::RULES_FILE)?;

        let data = Self {
            lookups: LookupService::from_csv(&lookups, embedded::LOOKUPS_FILE)?,
            lars: LarsService::from_csv(
                (&aims, embedded::LARS_LEARNING_DELIVERY_FILE),
                (&validity, embedded::LARS_VALIDITY_FILE),
                (&frameworks, embedded::LARS_FRAMEWORK_FILE),
                (&standards, embedded::LARS_STANDARD_FILE),
            )?,
            organisations: OrganisationService::from_csv(
                &organisations,
                embedded::ORGANISATIONS_FILE,
            )?,
            postcodes: PostcodeService::from_csv(&postcodes, embedded::POSTCODES_FILE)?,
            epa_organisations: EpaOrganisationService::from_csv(
                &epa,
                embedded::EPA_ORGANISATIONS_FILE,
            )?,
            catalog: RuleCatalog::from_csv(&rules, embedded::RULES_FILE)?,
        };

        tracing::info!(
            lookups = data.lookups.len(),
            learning_aims = data.lars.aim_count(),
            organisations = data.organisations.len(),
            postcodes = data.postcodes.len(),
            rules = data.catalog.len(),
            "Loaded reference data"
        );
        Ok(data)
    }
}

fn embedded_content(name: &str) -> &'static str {
    embedded::all_files()
        .into_iter()
        .find(|(file, _)| *file == name)
        .map(|(_, content)| content)
        .unwrap_or_default()
}
