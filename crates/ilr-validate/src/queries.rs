//! Shared predicates over learners, deliveries and field formats.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use ilr_model::codes::{ULN_TEMPORARY, del_fam};
use ilr_model::{Learner, LearningDelivery};
use ilr_standards::ValidityCategory;

static LEARN_REF_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 ]{1,12}$").expect("Invalid LearnRefNumber regex"));

/// UK postcode format, outward and inward code separated by one space.
static POSTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]? [0-9][A-Z]{2}$").expect("Invalid postcode regex")
});

static NI_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-CEGHJ-PR-TW-Z][A-CEGHJ-NPR-TW-Z][0-9]{6}[A-D ]$")
        .expect("Invalid NI number regex")
});

/// Prefixes never allocated as National Insurance numbers.
const NI_INVALID_PREFIXES: &[&str] = &["BG", "GB", "KN", "NK", "NT", "TN", "ZZ"];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("Invalid email regex")
});

static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$",
    )
    .expect("Invalid GUID regex")
});

/// Date constant; an invalid date fails at compile time.
pub const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date constant"),
    }
}

pub fn is_valid_learn_ref_number(value: &str) -> bool {
    LEARN_REF_NUMBER_REGEX.is_match(value)
}

pub fn is_valid_postcode_format(value: &str) -> bool {
    POSTCODE_REGEX.is_match(value)
}

pub fn is_valid_ni_number(value: &str) -> bool {
    NI_NUMBER_REGEX.is_match(value)
        && !NI_INVALID_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix))
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_guid(value: &str) -> bool {
    GUID_REGEX.is_match(value)
}

/// True when `value` is exactly `len` ASCII digits.
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Nine-digit employer identifier.
pub fn is_valid_emp_id(emp_id: i32) -> bool {
    (100_000_000..=999_999_999).contains(&emp_id)
}

/// ULN check digit (modulus 11 over the first nine digits, weights 10..2).
///
/// The tenth digit must equal `10 - (sum % 11)`; a remainder of zero can
/// never be valid. The temporary ULN is not a real ULN and fails.
pub fn is_valid_uln(uln: i64) -> bool {
    if !(1_000_000_000..=9_999_999_999).contains(&uln) || uln == ULN_TEMPORARY {
        return false;
    }
    let digits: Vec<i64> = uln
        .to_string()
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .collect();
    let sum: i64 = digits[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let remainder = sum % 11;
    remainder != 0 && digits[9] == 10 - remainder
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

pub fn is_restart(delivery: &LearningDelivery) -> bool {
    delivery.has_fam_type(del_fam::RESTART)
}

pub fn is_advanced_learner_loan(delivery: &LearningDelivery) -> bool {
    delivery.has_fam(del_fam::ADVANCED_LEARNER_LOAN, "1")
}

/// LARS validity category checked for a delivery.
pub fn lars_category(delivery: &LearningDelivery) -> ValidityCategory {
    ValidityCategory::for_fund_model(delivery.fund_model, is_advanced_learner_loan(delivery))
}

/// True when any delivery matches `predicate`.
pub fn any_delivery(learner: &Learner, predicate: impl Fn(&LearningDelivery) -> bool) -> bool {
    learner.learning_deliveries.iter().any(predicate)
}
