//! Parameter estimation contract for per-phase model fitting.
//!
//! Purpose
//! -------
//! Define the interface the tracker uses to hand registered phases to an
//! external estimation backend, and the result shape it expects back: one
//! fit record per phase, ready to be broadcast across the phase's dates.
//!
//! Key behaviors
//! -------------
//! - [`PhaseInput`] describes one registered phase: its span and the
//!   observed snapshot at its start date (absent for projected starts).
//! - [`EstimationEngine`] is user-implemented. `estimate_tau` infers the
//!   time-step from the full joint dataset; `estimate_params` fits each
//!   phase independently.
//! - [`PhaseEstimate`] carries the per-phase fit: reproduction number,
//!   parameter values in model order, day-parameters, score metrics, trial
//!   count, and runtime.
//!
//! Conventions
//! -----------
//! - Phases are supplied in dense order (first appearance by date).
//! - Backend failures are normalized to [`AdapterError::Estimation`] with
//!   a human-readable status.
use crate::{
    adapter::errors::AdapterResult,
    ode::{models::ModelKind, tau::Tau},
    tracking::core::record::Observations,
};
use chrono::NaiveDate;

/// One registered phase as handed to the estimation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseInput {
    /// First date of the phase.
    pub start: NaiveDate,
    /// Last date of the phase.
    pub end: NaiveDate,
    /// Observed snapshot at the start date; `None` when the phase starts
    /// on a projected date.
    pub initial: Option<Observations>,
}

/// Per-phase fit result returned by the estimation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEstimate {
    /// First date the fit applies to.
    pub start: NaiveDate,
    /// Last date the fit applies to.
    pub end: NaiveDate,
    /// Phase-dependent reproduction number.
    pub reproduction_number: f64,
    /// Parameter values in the model's declared order.
    pub parameters: Vec<(String, f64)>,
    /// Derived day-parameters in the model's declared order.
    pub day_parameters: Vec<(String, f64)>,
    /// Fit score(s), keyed by metric name (e.g. "RMSLE").
    pub metrics: Vec<(String, f64)>,
    /// Number of optimization trials.
    pub trials: u64,
    /// Optimization runtime, human readable (e.g. "0 min 32 sec").
    pub runtime: String,
}

/// User-implemented parameter estimation interface.
///
/// Required:
/// - `estimate_tau(model, first_date, &[PhaseInput]) -> AdapterResult<Tau>`:
///   infer the time-step from the full joint dataset. Called only when the
///   caller did not supply a tau.
/// - `estimate_params(model, tau, first_date, &[PhaseInput])
///   -> AdapterResult<Vec<PhaseEstimate>>`: fit each phase independently
///   and return one estimate per input phase.
///   - Errors: return [`AdapterError::Estimation`] with a descriptive
///     status for backend failures.
///
/// [`AdapterError::Estimation`]: crate::adapter::errors::AdapterError
pub trait EstimationEngine {
    // Required methods
    fn estimate_tau(
        &self, model: ModelKind, first_date: NaiveDate, phases: &[PhaseInput],
    ) -> AdapterResult<Tau>;

    fn estimate_params(
        &self, model: ModelKind, tau: Tau, first_date: NaiveDate, phases: &[PhaseInput],
    ) -> AdapterResult<Vec<PhaseEstimate>>;
}
