//! Tracking validation helpers, reusable checks for dates and input shape.
//!
//! Purpose
//! -------
//! Centralize the small, pure validation routines the tracker and the
//! binding surface rely on: date parsing, date ordering, and column length
//! checks. Higher-level constructors call these helpers to fail fast with
//! structured errors before any table mutation.
//!
//! Conventions
//! -----------
//! - Date strings accept ISO `%Y-%m-%d` first, then the compact `%d%b%Y`
//!   form (e.g. `01Apr2022`).
//! - Helpers return [`TrackResult`] and never panic on invalid inputs.
//! - This module contains no I/O and no logging; it only inspects values.
use crate::tracking::errors::{TrackError, TrackResult};
use chrono::NaiveDate;

/// Accepted date formats, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d%b%Y"];

/// Parse a date string, reporting the field name on failure.
///
/// # Errors
/// - [`TrackError::InvalidDate`] when no accepted format matches; carries
///   the field name and the raw value.
pub fn parse_date(value: &str, field: &'static str) -> TrackResult<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(TrackError::InvalidDate { field, value: value.to_string() })
}

/// Require that `start` does not precede the first recorded date.
///
/// # Errors
/// - [`TrackError::StartBeforeRecords`] when `start < first`.
pub fn validate_start_on_records(start: NaiveDate, first: NaiveDate) -> TrackResult<()> {
    if start < first {
        return Err(TrackError::StartBeforeRecords { start, first });
    }
    Ok(())
}

/// Require that an input column has the expected number of rows.
///
/// # Errors
/// - [`TrackError::ColumnLength`] when `actual != expected`.
pub fn validate_column_length(
    column: &'static str, expected: usize, actual: usize,
) -> TrackResult<()> {
    if actual != expected {
        return Err(TrackError::ColumnLength { column, expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Date parsing over both accepted formats and the failure path.
    // - Start-date ordering against the first recorded date.
    // - Column length validation.
    //
    // They intentionally DO NOT cover:
    // - Contiguity of observation sequences (calendar-table tests).
    // -------------------------------------------------------------------------

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
    }

    #[test]
    // Purpose
    // -------
    // `parse_date` accepts ISO and compact forms and reports failures with
    // the field name.
    //
    // Given
    // -----
    // - "2022-04-01", "01Apr2022", and "April first".
    //
    // Expect
    // ------
    // - The first two parse to the same date; the third yields InvalidDate
    //   with field "today".
    fn parse_date_accepts_both_formats_and_reports_field() {
        // Arrange
        let expected = d(2022, 4, 1);

        // Act & Assert
        assert_eq!(parse_date("2022-04-01", "start").unwrap(), expected);
        assert_eq!(parse_date("01Apr2022", "start").unwrap(), expected);
        match parse_date("April first", "today") {
            Err(TrackError::InvalidDate { field, value }) => {
                assert_eq!(field, "today");
                assert_eq!(value, "April first");
            }
            other => panic!("expected InvalidDate, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_start_on_records` accepts starts on or after the first
    // recorded date and rejects earlier ones.
    //
    // Given
    // -----
    // - First recorded date 2022-04-05.
    //
    // Expect
    // ------
    // - 2022-04-05 and 2022-04-06 pass; 2022-04-04 yields
    //   StartBeforeRecords.
    fn validate_start_on_records_enforces_lower_bound() {
        // Arrange
        let first = d(2022, 4, 5);

        // Act & Assert
        assert!(validate_start_on_records(d(2022, 4, 5), first).is_ok());
        assert!(validate_start_on_records(d(2022, 4, 6), first).is_ok());
        match validate_start_on_records(d(2022, 4, 4), first) {
            Err(TrackError::StartBeforeRecords { start, first: reported }) => {
                assert_eq!(start, d(2022, 4, 4));
                assert_eq!(reported, first);
            }
            other => panic!("expected StartBeforeRecords, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_column_length` rejects mismatched row counts.
    //
    // Given
    // -----
    // - Expected length 5, actual length 4 for column "Confirmed".
    //
    // Expect
    // ------
    // - ColumnLength carrying the column name and both lengths.
    fn validate_column_length_reports_mismatch() {
        // Arrange & Act
        let result = validate_column_length("Confirmed", 5, 4);

        // Assert
        match result {
            Err(TrackError::ColumnLength { column, expected, actual }) => {
                assert_eq!(column, "Confirmed");
                assert_eq!(expected, 5);
                assert_eq!(actual, 4);
            }
            other => panic!("expected ColumnLength, got: {other:?}"),
        }
        assert!(validate_column_length("Confirmed", 5, 5).is_ok());
    }
}
