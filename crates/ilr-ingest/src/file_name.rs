//! ILR submission file names.
//!
//! `ILR-<UKPRN>-<YYYY>-<yyyyMMdd>-<HHmmss>-<NN>.XML`, for example
//! `ILR-10000001-1920-20191001-093000-01.XML`.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{IngestError, Result};

static FILE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ILR-(\d{8})-(\d{4})-(\d{8}-\d{6})-(\d{2})\.(?i:xml|json)$")
        .expect("Invalid ILR file name regex")
});

/// Components of a conforming ILR file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlrFileName {
    pub ukprn: i32,
    /// Four-digit academic year code.
    pub year: String,
    pub date_time: NaiveDateTime,
    pub serial_no: String,
}

impl IlrFileName {
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = || IngestError::InvalidFileName {
            name: name.to_string(),
        };
        let captures = FILE_NAME_REGEX.captures(name.trim()).ok_or_else(invalid)?;
        let ukprn = captures[1].parse().map_err(|_| invalid())?;
        let date_time = NaiveDateTime::parse_from_str(&captures[3], "%Y%m%d-%H%M%S")
            .map_err(|_| invalid())?;
        Ok(Self {
            ukprn,
            year: captures[2].to_string(),
            date_time,
            serial_no: captures[4].to_string(),
        })
    }
}

impl fmt::Display for IlrFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ILR-{:08}-{}-{}-{}.XML",
            self.ukprn,
            self.year,
            self.date_time.format("%Y%m%d-%H%M%S"),
            self.serial_no
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_components() {
        let name = IlrFileName::parse("ILR-10000001-1920-20191001-093000-01.XML").unwrap();
        assert_eq!(name.ukprn, 10000001);
        assert_eq!(name.year, "1920");
        assert_eq!(
            name.date_time,
            NaiveDate::from_ymd_opt(2019, 10, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
        assert_eq!(name.serial_no, "01");
        assert_eq!(name.to_string(), "ILR-10000001-1920-20191001-093000-01.XML");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert!(IlrFileName::parse("ILR-10000001-1920-20191001-093000-01.json").is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "ILR-1000001-1920-20191001-093000-01.XML",
            "ILR-10000001-1920-20191001-093000-1.XML",
            "ILR-10000001-1920-20191001-093000-01.CSV",
            "ILR-10000001-1920-20191301-093000-01.XML",
            "ILR-10000001-1920-20191001-256000-01.XML",
            "ilr.xml",
        ] {
            assert!(IlrFileName::parse(name).is_err(), "{name} should be rejected");
        }
    }
}
