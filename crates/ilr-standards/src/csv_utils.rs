//! Shared CSV utilities for loading reference files.

use std::io::Cursor;

use serde::de::DeserializeOwned;

use crate::error::{Result, StandardsError};

/// Deserialize every record of a CSV document.
///
/// Headers may carry a UTF-8 BOM; fields are trimmed and empty optional
/// fields deserialize as `None`.
pub fn read_records<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut records = Vec::new();
    for result in reader.deserialize::<T>() {
        let record = result.map_err(|e| StandardsError::csv(file, &e))?;
        records.push(record);
    }
    Ok(records)
}
