use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format for bed/wake timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| Error::InvalidValue(format!("date '{value}': {err}")))
}

/// Shift a date by whole years, clamping Feb 29 to Feb 28 when needed.
///
/// Negative values move backwards. Out-of-range results saturate to the input.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs() * 12);
    let shifted = if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Completed years between `dob` and `on`.
pub fn age_on(dob: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - dob.year();
    if (on.month(), on.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_on(date(2000, 10, 20), date(2026, 10, 19)), 25);
        assert_eq!(age_on(date(2000, 10, 19), date(2026, 10, 19)), 26);
    }

    #[test]
    fn leap_day_birthday_is_reached_on_march_first() {
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }

    #[test]
    fn add_years_clamps_leap_day() {
        assert_eq!(add_years(date(2008, 2, 29), 18), date(2026, 2, 28));
        assert_eq!(add_years(date(2026, 10, 19), -1), date(2025, 10, 19));
    }

    #[test]
    fn storage_formats() {
        let value = date(2026, 1, 5).and_hms_opt(23, 7, 0).unwrap();
        assert_eq!(format_timestamp(value), "2026-01-05 23:07:00");
        assert_eq!(parse_date("2026-01-05").unwrap(), date(2026, 1, 5));
        assert!(parse_date("05/01/2026").is_err());
    }
}
