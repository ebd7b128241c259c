//! Errors for the ODE model contract (model lookup, parameter checks, and
//! time-step validation).
//!
//! This module defines [`OdeError`], used by the model constructors and the
//! tau time-step type. It implements `Display`/`Error` and converts to
//! `PyErr` for PyO3.
//!
//! ## Conventions
//! - Parameter names are reported verbatim (e.g. `rho`, `sigma`).
//! - Tau values are reported in minutes.
//! - Validation happens in constructors; downstream methods assume the
//!   documented invariants and never re-check.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for model-contract operations that may produce [`OdeError`].
pub type OdeResult<T> = Result<T, OdeError>;

/// Unified error type for the ODE model contract.
///
/// Covers model-name lookup, parameter-set validation, and time-step
/// validation. Implements `Display`/`Error` and converts to a Python
/// `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum OdeError {
    // ---- Model lookup ----
    /// A model name did not match any registered variant.
    UnknownModel { name: String },

    // ---- Parameter validation ----
    /// A required parameter is absent from the supplied set.
    MissingParameter { model: &'static str, name: &'static str },

    /// A parameter value is outside its documented domain.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    // ---- Time-step validation ----
    /// Tau must be a positive number of minutes that divides one day.
    InvalidTau { minutes: i64, reason: &'static str },
}

impl std::error::Error for OdeError {}

impl std::fmt::Display for OdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Model lookup ----
            OdeError::UnknownModel { name } => {
                write!(f, "Unknown ODE model name: {name}")
            }
            // ---- Parameter validation ----
            OdeError::MissingParameter { model, name } => {
                write!(f, "Model {model} requires parameter {name}, but it was not supplied.")
            }
            OdeError::InvalidParameter { name, value, reason } => {
                write!(f, "Parameter {name} is invalid ({value}): {reason}")
            }
            // ---- Time-step validation ----
            OdeError::InvalidTau { minutes, reason } => {
                write!(f, "Tau value {minutes} [min] is invalid: {reason}")
            }
        }
    }
}

/// Convert an [`OdeError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<OdeError> for PyErr {
    fn from(err: OdeError) -> PyErr {
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
    // - Display formatting for every OdeError variant (field values must be
    //   visible in the rendered message).
    //
    // They intentionally DO NOT cover:
    // - The constructors that produce these errors (tested next to the
    //   constructors themselves).
    // - PyErr conversion, which is exercised by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every variant's Display output names the offending field and value so
    // callers can diagnose failures without source access.
    //
    // Given
    // -----
    // - One instance of each OdeError variant.
    //
    // Expect
    // ------
    // - The rendered message contains the relevant name and value.
    fn display_includes_field_names_and_values() {
        // Arrange
        let cases: Vec<(OdeError, &str)> = vec![
            (OdeError::UnknownModel { name: "SEIR".to_string() }, "SEIR"),
            (OdeError::MissingParameter { model: "SIR", name: "rho" }, "rho"),
            (
                OdeError::InvalidParameter {
                    name: "sigma",
                    value: -0.1,
                    reason: "rates must be strictly positive",
                },
                "sigma",
            ),
            (OdeError::InvalidTau { minutes: 7, reason: "must divide 1440" }, "7"),
        ];

        // Act & Assert
        for (err, needle) in cases {
            let rendered = err.to_string();
            assert!(rendered.contains(needle), "message {rendered:?} should contain {needle:?}");
        }
    }
}
