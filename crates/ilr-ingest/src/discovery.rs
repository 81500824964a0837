//! Input discovery for files and directories.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::reader::InputFormat;

/// Resolve a command-line input into submission files.
///
/// A file yields itself whatever its extension (so unsupported formats are
/// reported when read). A directory yields its `.xml` and `.json` files
/// sorted by file name; subdirectories are not searched.
pub fn discover_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(path).map_err(|e| IngestError::DirectoryRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file = entry.path();
        if file.is_file() && InputFormat::from_path(&file).is_some() {
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %path.display(), count = files.len(), "Discovered inputs");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_yields_sorted_submissions() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.XML", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.XML", "b.json"]);
    }

    #[test]
    fn file_yields_itself() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ILR.txt");
        std::fs::write(&file, "").unwrap();
        assert_eq!(discover_inputs(&file).unwrap(), vec![file]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_inputs(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IngestError::NotFound { .. }));
    }
}
