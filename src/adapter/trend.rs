//! Trend detection contract for change-point based phase proposals.
//!
//! Purpose
//! -------
//! Define the interface the tracker uses to ask an external change-point
//! detector for candidate phase boundaries, together with the input it
//! hands over: the past-only observed sub-table restricted to the required
//! compartment columns, plus the area label.
//!
//! Key behaviors
//! -------------
//! - [`TrendDetector`] is user-implemented. `detect` is required; `render`
//!   is optional and defaults to a structured "not implemented" error.
//! - [`ObservationSeries`] carries the compartments as parallel
//!   `Array1<f64>` columns aligned with `dates`.
//!
//! Conventions
//! -----------
//! - The tracker only feeds dates on or before its reference date, in
//!   ascending order, and only dates with an observed block.
//! - Returned spans are fed through phase definition in order; later spans
//!   may overwrite identifiers assigned by earlier ones.
use crate::adapter::errors::{AdapterError, AdapterResult};
use chrono::NaiveDate;
use ndarray::Array1;

/// Past-only observed sub-table handed to a trend detector.
///
/// Column arrays are parallel to `dates`; all have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    /// Area label, like "Japan" or "Japan/Tokyo".
    pub area: String,
    /// Observation dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Cumulative confirmed cases per date.
    pub confirmed: Array1<f64>,
    /// Currently infected cases per date.
    pub infected: Array1<f64>,
    /// Cumulative fatal cases per date.
    pub fatal: Array1<f64>,
    /// Cumulative recovered cases per date.
    pub recovered: Array1<f64>,
    /// Susceptible cases per date.
    pub susceptible: Array1<f64>,
}

impl ObservationSeries {
    /// Number of dated rows in the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// User-implemented change-point detection interface.
///
/// Required:
/// - `detect(&ObservationSeries) -> AdapterResult<Vec<(start, end)>>`:
///   propose phase boundary pairs over the supplied past-only series.
///   - Errors: return [`AdapterError::Detection`] with a descriptive
///     status for backend failures.
///
/// Optional:
/// - `render(&ObservationSeries) -> AdapterResult<()>`: draw a diagnostic
///   figure. If not implemented, [`AdapterError::RenderNotImplemented`] is
///   reported when rendering is requested.
pub trait TrendDetector {
    // Required methods
    fn detect(&self, series: &ObservationSeries) -> AdapterResult<Vec<(NaiveDate, NaiveDate)>>;

    // Optional methods
    fn render(&self, _series: &ObservationSeries) -> AdapterResult<()> {
        Err(AdapterError::RenderNotImplemented)
    }
}
