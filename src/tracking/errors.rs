//! Errors for phase tracking (construction checks, date validation, and
//! phase bookkeeping).
//!
//! This module defines [`TrackError`], the error surface of the calendar
//! table and the phase tracker. Model-contract and external-collaborator
//! failures are wrapped via `From` conversions so tracker methods expose a
//! single error type. Implements `Display`/`Error` and converts to `PyErr`
//! for PyO3.
//!
//! ## Conventions
//! - Dates are reported in ISO form (`%Y-%m-%d`).
//! - Every validation failure is raised before any mutation of the calendar
//!   table; a returned error implies the table is unchanged.
use crate::adapter::errors::AdapterError;
use crate::ode::errors::OdeError;
use chrono::NaiveDate;

#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Crate-wide result alias for tracking operations that may produce
/// [`TrackError`].
pub type TrackResult<T> = Result<T, TrackError>;

/// Unified error type for phase tracking.
///
/// Covers construction-time schema checks, date validation, phase
/// bookkeeping preconditions, and wrapped model / collaborator failures.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    // ---- Construction / schema validation ----
    /// The observation sequence is empty.
    EmptyObservations,

    /// Two observation rows share one date.
    DuplicateDate { date: NaiveDate },

    /// The observation sequence skips a calendar day.
    NonContiguousDates { expected: NaiveDate, actual: NaiveDate },

    /// An input column has the wrong number of rows.
    ColumnLength { column: &'static str, expected: usize, actual: usize },

    // ---- Date validation ----
    /// A date string could not be parsed.
    InvalidDate { field: &'static str, value: String },

    /// A span start date lies after its end date.
    InvertedSpan { start: NaiveDate, end: NaiveDate },

    /// A phase start date precedes the first recorded date.
    StartBeforeRecords { start: NaiveDate, first: NaiveDate },

    // ---- Phase bookkeeping ----
    /// Estimation requires at least one registered phase.
    NoRegisteredPhases,

    // ---- Wrapped collaborator errors ----
    /// Model-contract failure (unknown model, bad parameter, bad tau).
    Ode(OdeError),

    /// External trend-detection or estimation failure.
    Adapter(AdapterError),
}

impl std::error::Error for TrackError {}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction / schema validation ----
            TrackError::EmptyObservations => {
                write!(f, "Observation data must contain at least one dated row.")
            }
            TrackError::DuplicateDate { date } => {
                write!(f, "Observation data contains date {date} more than once.")
            }
            TrackError::NonContiguousDates { expected, actual } => {
                write!(
                    f,
                    "Observation dates must be consecutive days: expected {expected}, got {actual}."
                )
            }
            TrackError::ColumnLength { column, expected, actual } => {
                write!(f, "Column {column} must have {expected} rows, got {actual}.")
            }
            // ---- Date validation ----
            TrackError::InvalidDate { field, value } => {
                write!(f, "Could not parse {field} as a date: {value:?}")
            }
            TrackError::InvertedSpan { start, end } => {
                write!(f, "Span start {start} must not come after span end {end}.")
            }
            TrackError::StartBeforeRecords { start, first } => {
                write!(f, "Start date {start} precedes the first recorded date {first}.")
            }
            // ---- Phase bookkeeping ----
            TrackError::NoRegisteredPhases => {
                write!(f, "No phase has been registered; define at least one phase first.")
            }
            // ---- Wrapped collaborator errors ----
            TrackError::Ode(err) => err.fmt(f),
            TrackError::Adapter(err) => err.fmt(f),
        }
    }
}

impl From<OdeError> for TrackError {
    fn from(err: OdeError) -> TrackError {
        TrackError::Ode(err)
    }
}

impl From<AdapterError> for TrackError {
    fn from(err: AdapterError) -> TrackError {
        TrackError::Adapter(err)
    }
}

/// Convert a [`TrackError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<TrackError> for PyErr {
    fn from(err: TrackError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting for representative TrackError variants.
    // - From conversions out of OdeError and AdapterError.
    //
    // They intentionally DO NOT cover:
    // - The operations that raise these errors (covered next to the
    //   operations themselves).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Display output carries the offending dates and field names.
    //
    // Given
    // -----
    // - A NonContiguousDates and an InvalidDate instance.
    //
    // Expect
    // ------
    // - Rendered messages contain the ISO dates / the raw value.
    fn display_reports_offending_values() {
        // Arrange
        let gap = TrackError::NonContiguousDates {
            expected: NaiveDate::from_ymd_opt(2022, 4, 2).unwrap(),
            actual: NaiveDate::from_ymd_opt(2022, 4, 4).unwrap(),
        };
        let bad_date = TrackError::InvalidDate { field: "today", value: "not-a-date".to_string() };

        // Act & Assert
        assert!(gap.to_string().contains("2022-04-02"));
        assert!(gap.to_string().contains("2022-04-04"));
        assert!(bad_date.to_string().contains("today"));
        assert!(bad_date.to_string().contains("not-a-date"));
    }

    #[test]
    // Purpose
    // -------
    // Collaborator errors convert into TrackError wrappers that render the
    // inner message.
    //
    // Given
    // -----
    // - An OdeError::UnknownModel and an AdapterError::Detection.
    //
    // Expect
    // ------
    // - `TrackError::Ode` / `TrackError::Adapter` wrappers whose Display
    //   matches the inner Display.
    fn from_conversions_wrap_collaborator_errors() {
        // Arrange
        let ode = OdeError::UnknownModel { name: "SEIR".to_string() };
        let adapter = AdapterError::Detection { status: "no change points".to_string() };

        // Act
        let wrapped_ode: TrackError = ode.clone().into();
        let wrapped_adapter: TrackError = adapter.clone().into();

        // Assert
        assert_eq!(wrapped_ode.to_string(), ode.to_string());
        assert_eq!(wrapped_adapter.to_string(), adapter.to_string());
        assert!(matches!(wrapped_ode, TrackError::Ode(_)));
        assert!(matches!(wrapped_adapter, TrackError::Adapter(_)));
    }
}
