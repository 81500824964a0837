//! Date arithmetic shared by the rule catalog.

use chrono::{Datelike, Months, NaiveDate};

/// Age in whole years on `on`. Negative when `on` precedes the birth date.
pub fn age_at(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// `date` moved by `years`; 29 February lands on 28 February in
/// non-leap years. Saturates at the representable range.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs().saturating_mul(12));
    if years >= 0 {
        date.checked_add_months(months).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_months(months).unwrap_or(NaiveDate::MIN)
    }
}

/// Inclusive range check; an open end means no upper bound.
pub fn is_between(date: NaiveDate, from: NaiveDate, to: Option<NaiveDate>) -> bool {
    from <= date && to.is_none_or(|to| date <= to)
}
