//! Known valid postcodes.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::csv_utils::read_records;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct PostcodeRow {
    #[serde(rename = "Postcode")]
    postcode: String,
}

/// Set of postcodes, compared without whitespace and ignoring case.
#[derive(Debug, Clone, Default)]
pub struct PostcodeService {
    postcodes: BTreeSet<String>,
}

impl PostcodeService {
    pub fn from_csv(content: &str, file: &str) -> Result<Self> {
        let rows: Vec<PostcodeRow> = read_records(content, file)?;
        Ok(Self::from_postcodes(rows.iter().map(|row| row.postcode.as_str())))
    }

    pub fn from_postcodes<'a>(postcodes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            postcodes: postcodes.into_iter().map(normalize).collect(),
        }
    }

    pub fn exists(&self, postcode: &str) -> bool {
        self.postcodes.contains(&normalize(postcode))
    }

    pub fn len(&self) -> usize {
        self.postcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postcodes.is_empty()
    }
}

/// Uppercase with all whitespace removed (`"sw1a 1aa"` becomes `"SW1A1AA"`).
pub fn normalize(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let service = PostcodeService::from_csv("Postcode\nSW1A 1AA\nB1 1AA\n", "postcodes.csv")
            .unwrap();
        assert!(service.exists("sw1a1aa"));
        assert!(service.exists(" B1  1AA "));
        assert!(!service.exists("B1 1AB"));
        assert_eq!(service.len(), 2);
    }
}
