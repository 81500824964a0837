//! ILR academic years (1 August to 31 July).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::IlrError;

/// An academic year identified by its four-digit ILR code (`1920` = 2019/20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcademicYear {
    start: NaiveDate,
    end: NaiveDate,
}

impl AcademicYear {
    /// Academic year starting on 1 August of `start_year`.
    pub fn from_start_year(start_year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(start_year, 8, 1)?;
        let end = NaiveDate::from_ymd_opt(start_year + 1, 7, 31)?;
        Some(Self { start, end })
    }

    /// Academic year that contains `date`.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let start_year = if date.month() >= 8 {
            date.year()
        } else {
            date.year() - 1
        };
        Self::from_start_year(start_year)
    }

    /// Parse a four-digit code such as `1920`.
    pub fn parse(code: &str) -> Result<Self, IlrError> {
        let code = code.trim();
        let invalid = || IlrError::InvalidAcademicYear(code.to_string());
        if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let first: i32 = code[..2].parse().map_err(|_| invalid())?;
        let second: i32 = code[2..].parse().map_err(|_| invalid())?;
        if (first + 1) % 100 != second {
            return Err(invalid());
        }
        Self::from_start_year(2000 + first).ok_or_else(invalid)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 31 August of the first calendar year, used for age-at-start-of-year checks.
    pub fn august_thirty_first(&self) -> NaiveDate {
        self.start + chrono::Days::new(30)
    }

    /// Final return date for the year (R14, 14 September after the year ends).
    pub fn r14_close(&self) -> NaiveDate {
        self.end + chrono::Days::new(45)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn code(&self) -> String {
        format!(
            "{:02}{:02}",
            self.start.year() % 100,
            self.end.year() % 100
        )
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for AcademicYear {
    type Err = IlrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AcademicYear {
    type Error = IlrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AcademicYear> for String {
    fn from(year: AcademicYear) -> Self {
        year.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_code_into_boundaries() {
        let year = AcademicYear::parse("1920").unwrap();
        assert_eq!(year.start(), date(2019, 8, 1));
        assert_eq!(year.end(), date(2020, 7, 31));
        assert_eq!(year.august_thirty_first(), date(2019, 8, 31));
        assert_eq!(year.r14_close(), date(2020, 9, 14));
        assert_eq!(year.code(), "1920");
    }

    #[test]
    fn rejects_non_consecutive_years() {
        assert!(AcademicYear::parse("1921").is_err());
        assert!(AcademicYear::parse("19-20").is_err());
        assert!(AcademicYear::parse("").is_err());
    }

    #[test]
    fn century_rollover() {
        let year = AcademicYear::parse("9900").unwrap();
        assert_eq!(year.start(), date(2099, 8, 1));
        assert_eq!(year.code(), "9900");
    }

    #[test]
    fn containing_date() {
        assert_eq!(
            AcademicYear::containing(date(2020, 7, 31)).unwrap().code(),
            "1920"
        );
        assert_eq!(
            AcademicYear::containing(date(2020, 8, 1)).unwrap().code(),
            "2021"
        );
    }
}
