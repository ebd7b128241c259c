#[cfg(feature = "python-bindings")]
use crate::tracking::{
    core::{
        columns,
        record::Observations,
        validation::{parse_date, validate_column_length},
    },
    errors::TrackResult,
};

#[cfg(feature = "python-bindings")]
use chrono::NaiveDate;

/// Parse a vector of date strings, reporting the field name on failure.
#[cfg(feature = "python-bindings")]
pub fn parse_date_strings(values: &[String], field: &'static str) -> TrackResult<Vec<NaiveDate>> {
    values.iter().map(|value| parse_date(value, field)).collect()
}

/// Zip parallel count columns into dated observation rows.
///
/// `dates` drives the expected row count; every column must match its
/// length. Ordering and contiguity are validated later by the tracker
/// constructor.
#[cfg(feature = "python-bindings")]
pub fn build_observation_rows(
    dates: &[NaiveDate], confirmed: &[u64], infected: &[u64], fatal: &[u64], recovered: &[u64],
    susceptible: &[u64],
) -> TrackResult<Vec<(NaiveDate, Observations)>> {
    let expected = dates.len();
    validate_column_length(columns::CONFIRMED, expected, confirmed.len())?;
    validate_column_length(columns::INFECTED, expected, infected.len())?;
    validate_column_length(columns::FATAL, expected, fatal.len())?;
    validate_column_length(columns::RECOVERED, expected, recovered.len())?;
    validate_column_length(columns::SUSCEPTIBLE, expected, susceptible.len())?;
    Ok(dates
        .iter()
        .enumerate()
        .map(|(row, date)| {
            (
                *date,
                Observations {
                    confirmed: confirmed[row],
                    infected: infected[row],
                    fatal: fatal[row],
                    recovered: recovered[row],
                    susceptible: susceptible[row],
                },
            )
        })
        .collect())
}
