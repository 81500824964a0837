//! Reference data directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference data directory.
pub const REFERENCE_ENV_VAR: &str = "ILR_REFERENCE_DIR";

/// Reference directory selected by `ILR_REFERENCE_DIR`, if set and non-empty.
pub fn reference_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(REFERENCE_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
