use chrono::{Local, NaiveDate};

use crate::error::{Result, TaskError};

/// The only accepted due date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        TaskError::Validation(format!(
            "Invalid date format '{}'. Expected YYYY-MM-DD.",
            input
        ))
    })
}

/// Blank input means "no due date".
pub fn parse_optional_due_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_due_date(s).map(Some),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Signed number of whole calendar days from `today` to `due`.
/// Negative when the due date has passed.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// The user's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("2024-01-01").unwrap(), date(2024, 1, 1));
        assert_eq!(parse_due_date("  2024-02-29 ").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_due_date_rejects_other_formats() {
        for bad in ["not-a-date", "2024/01/01", "01-01-2024", "2023-02-29", "2024-13-01", "tomorrow"] {
            let err = parse_due_date(bad).unwrap_err();
            assert!(err.is_validation(), "{} should be a validation error", bad);
        }
    }

    #[test]
    fn test_parse_optional_due_date() {
        assert_eq!(parse_optional_due_date(None).unwrap(), None);
        assert_eq!(parse_optional_due_date(Some("   ")).unwrap(), None);
        assert_eq!(parse_optional_due_date(Some("2024-01-05")).unwrap(), Some(date(2024, 1, 5)));
        assert!(parse_optional_due_date(Some("soon")).is_err());
    }

    #[test]
    fn test_days_until() {
        let today = date(2024, 1, 10);
        assert_eq!(days_until(date(2024, 1, 10), today), 0);
        assert_eq!(days_until(date(2024, 1, 11), today), 1);
        assert_eq!(days_until(date(2024, 1, 1), today), -9);
        assert_eq!(days_until(date(2024, 2, 10), today), 31);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 3, 7)), "2024-03-07");
    }
}
