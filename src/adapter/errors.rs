//! Errors for external collaborator contracts (trend detection and
//! parameter estimation).
//!
//! Collaborator backends run outside this crate; their failures are
//! normalized to a human-readable status string so the tracker surfaces a
//! uniform error regardless of the backend in use.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for collaborator calls that may produce [`AdapterError`].
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Unified error type for external collaborator contracts.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterError {
    /// Change-point detection failed; includes a human-readable status.
    Detection { status: String },

    /// Parameter estimation failed; includes a human-readable status.
    Estimation { status: String },

    /// The detector does not implement diagnostic rendering.
    RenderNotImplemented,
}

impl std::error::Error for AdapterError {}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::Detection { status } => {
                write!(f, "Trend detection failed with status: {status}")
            }
            AdapterError::Estimation { status } => {
                write!(f, "Parameter estimation failed with status: {status}")
            }
            AdapterError::RenderNotImplemented => {
                write!(f, "This trend detector does not implement diagnostic rendering.")
            }
        }
    }
}

/// Convert an [`AdapterError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<AdapterError> for PyErr {
    fn from(err: AdapterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
