//! `ilr.toml` configuration.
//!
//! ```toml
//! reference_dir = "reference"
//!
//! [validation]
//! academic_year = "1920"
//! exclude_rules = ["PlanLearnHours_04"]
//! today = "2019-10-02"
//!
//! [validation.severity_overrides]
//! ULN_02 = "Warning"
//! ```
//!
//! Command-line flags take precedence over every value here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ilr_validate::ValidationOptions;

/// Config file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ilr.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Reference data directory. Relative paths are resolved against the
    /// directory holding the config file.
    pub reference_dir: Option<PathBuf>,
    pub validation: ValidationOptions,
}

impl CliConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    /// Load `path`, else `ilr.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        config.reference_dir = config.reference_dir.map(|dir| match path.parent() {
            Some(parent) if dir.is_relative() => parent.join(dir),
            _ => dir,
        });
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilr_model::Severity;

    #[test]
    fn parses_validation_table() {
        let config = CliConfig::from_toml(
            r#"
            [validation]
            academic_year = "1920"
            include_rules = ["ULN_04", "Sex_01"]
            today = "2019-10-02"

            [validation.severity_overrides]
            ULN_04 = "Warning"
            "#,
        )
        .unwrap();
        let options = &config.validation;
        assert_eq!(options.academic_year.map(|y| y.code()).as_deref(), Some("1920"));
        assert_eq!(options.include_rules, vec!["ULN_04", "Sex_01"]);
        assert_eq!(options.severity_overrides["ULN_04"], Severity::Warning);
        assert!(config.reference_dir.is_none());
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::from_toml("[validation]\nrule = \"ULN_04\"").is_err());
        assert!(CliConfig::from_toml("output = \"x\"").is_err());
    }

    #[test]
    fn relative_reference_dir_follows_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ilr.toml");
        std::fs::write(&path, "reference_dir = \"reference\"\n").unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.reference_dir, Some(dir.path().join("reference")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(error.to_string().starts_with("read config"));
    }
}
