//! epi_phase — phase tracking for epidemic time series.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the phase-tracking engine to Python via the `_epi_phase`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing class and submodule used by the
//! `epi_phase` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules ([`tracking`], [`ode`], [`adapter`])
//!   as the public crate surface.
//! - Define the `#[pyclass]` wrapper and the `#[pymodule]` initializer for
//!   the `_epi_phase` Python extension.
//! - Register the `tracking` submodule under `epi_phase` so dot-notation
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All phase bookkeeping is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible class mirrors
//!   the invariants and signatures of [`tracking::PhaseTracker`].
//!
//! Conventions
//! -----------
//! - Dates cross the Python boundary as strings (ISO `%Y-%m-%d` or the
//!   compact `%d%b%Y`) and are parsed with the validation helpers.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//! - Trend detection and estimation backends plug in at the Rust layer
//!   through the [`adapter`] traits; the Python surface covers
//!   construction, phase editing, manual parameter assignment, and the
//!   two projections.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   the integration tests under `tests/`.
//! - Python-level smoke tests exercise the `_epi_phase` module separately.

pub mod adapter;
pub mod ode;
pub mod tracking;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::{
    ode::{models::ModelKind, tau::Tau},
    tracking::{
        core::{columns, record::Cell, validation::parse_date},
        tracker::{ParamTable, PhaseTracker as CoreTracker},
    },
    utils::{build_observation_rows, parse_date_strings},
};

#[cfg(feature = "python-bindings")]
use std::collections::BTreeMap;

/// PhaseTracker — Python-facing wrapper for the phase-tracking engine.
///
/// Purpose
/// -------
/// Expose construction, phase editing, manual parameter assignment, and
/// the daily / per-phase projections of [`CoreTracker`] to Python callers
/// while preserving the core invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs (date strings, count vectors,
///   parameter dictionaries) into the typed core representations.
/// - Forward all bookkeeping to the inner tracker; no phase logic lives in
///   this wrapper.
/// - Render projections as lists of dictionaries keyed by the shared
///   column labels.
///
/// Notes
/// -----
/// - Estimation and trend detection require Rust-side backend traits and
///   are not part of the Python surface.
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer [`CoreTracker`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "epi_phase.tracking", unsendable)]
pub struct PhaseTracker {
    /// Underlying Rust tracker.
    inner: CoreTracker,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PhaseTracker {
    /// Build a tracker from parallel column vectors.
    ///
    /// `dates` drives the row count; every count column must match its
    /// length, and the rows must form one dense daily sequence.
    #[new]
    #[pyo3(
        text_signature = "(dates, confirmed, infected, fatal, recovered, susceptible, today, \
                          area, /)",
        signature = (dates, confirmed, infected, fatal, recovered, susceptible, today, area)
    )]
    pub fn new(
        dates: Vec<String>, confirmed: Vec<u64>, infected: Vec<u64>, fatal: Vec<u64>,
        recovered: Vec<u64>, susceptible: Vec<u64>, today: &str, area: &str,
    ) -> PyResult<Self> {
        let parsed = parse_date_strings(&dates, columns::DATE)?;
        let rows = build_observation_rows(
            &parsed,
            &confirmed,
            &infected,
            &fatal,
            &recovered,
            &susceptible,
        )?;
        let today = parse_date(today, "today")?;
        let inner = CoreTracker::new(rows, today, area)?;
        Ok(PhaseTracker { inner })
    }

    /// Define an active phase over `[start, end]`.
    pub fn define_phase(&mut self, start: &str, end: &str) -> PyResult<()> {
        let start = parse_date(start, "start")?;
        let end = parse_date(end, "end")?;
        self.inner.define_phase(start, end)?;
        Ok(())
    }

    /// Reset phase identifiers over `[start, end]`.
    pub fn remove_phase(&mut self, start: &str, end: &str) -> PyResult<()> {
        let start = parse_date(start, "start")?;
        let end = parse_date(end, "end")?;
        self.inner.remove_phase(start, end)?;
        Ok(())
    }

    /// Set model parameter values manually for dated rows.
    ///
    /// `rows` maps date strings to parameter dictionaries; `tau` is the
    /// applied time-step in minutes. Returns the applied tau.
    pub fn set_ode(
        &mut self, model: &str, rows: BTreeMap<String, BTreeMap<String, f64>>, tau: i64,
    ) -> PyResult<u32> {
        let model: ModelKind = model.parse()?;
        let tau = Tau::new(tau)?;
        let mut table = ParamTable::new();
        for (date, params) in rows {
            table.insert(parse_date(&date, "rows")?, params);
        }
        let applied = self.inner.set_ode(model, &table, tau)?;
        Ok(applied.minutes())
    }

    /// The full daily record as a list of dictionaries.
    pub fn track<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let mut out = Vec::new();
        for record in self.inner.track() {
            let row = PyDict::new(py);
            row.set_item(columns::DATE, record.date.format("%Y-%m-%d").to_string())?;
            set_observed(&row, record.observed.as_ref())?;
            set_extras(&row, &record.extras)?;
            out.push(row);
        }
        Ok(out)
    }

    /// The per-phase summary as a list of dictionaries.
    pub fn summary<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let mut out = Vec::new();
        for phase in self.inner.summary() {
            let row = PyDict::new(py);
            row.set_item("Phase", phase.name.as_str())?;
            row.set_item(columns::TENSE, phase.tense.to_string())?;
            row.set_item(columns::START, phase.start.format("%Y-%m-%d").to_string())?;
            row.set_item(columns::END, phase.end.format("%Y-%m-%d").to_string())?;
            match phase.population {
                Some(value) => row.set_item(columns::POPULATION, value)?,
                None => row.set_item(columns::POPULATION, py.None())?,
            }
            set_extras(&row, &phase.extras)?;
            out.push(row);
        }
        Ok(out)
    }

    /// The reference date as an ISO string.
    #[getter]
    pub fn today(&self) -> String {
        self.inner.today().format("%Y-%m-%d").to_string()
    }

    /// The area label.
    #[getter]
    pub fn area(&self) -> String {
        self.inner.area().to_string()
    }
}

#[cfg(feature = "python-bindings")]
fn set_observed(
    row: &Bound<'_, PyDict>, observed: Option<&crate::tracking::core::record::Observations>,
) -> PyResult<()> {
    let labels = [
        columns::CONFIRMED,
        columns::INFECTED,
        columns::FATAL,
        columns::RECOVERED,
        columns::SUSCEPTIBLE,
    ];
    match observed {
        Some(block) => {
            let values =
                [block.confirmed, block.infected, block.fatal, block.recovered, block.susceptible];
            for (label, value) in labels.iter().zip(values) {
                row.set_item(label, value)?;
            }
        }
        None => {
            for label in labels {
                row.set_item(label, row.py().None())?;
            }
        }
    }
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn set_extras(row: &Bound<'_, PyDict>, extras: &[(String, Option<Cell>)]) -> PyResult<()> {
    for (column, cell) in extras {
        match cell {
            Some(Cell::Float(value)) => row.set_item(column, *value)?,
            Some(Cell::Int(value)) => row.set_item(column, *value)?,
            Some(Cell::Text(value)) => row.set_item(column, value.as_str())?,
            None => row.set_item(column, row.py().None())?,
        }
    }
    Ok(())
}

/// _epi_phase — PyO3 module initializer for the Python extension.
///
/// Creates the `tracking` submodule, attaches it to the parent module, and
/// registers it in `sys.modules` so it is importable via a dotted path.
/// Invoked automatically by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _epi_phase<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let tracking_mod = PyModule::new(_py, "tracking")?;
    tracking_submodule(_py, m, &tracking_mod)?;

    // Manually add the submodule into sys.modules to allow dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("epi_phase.tracking", tracking_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn tracking_submodule<'py>(
    _py: Python, epi_phase: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PhaseTracker>()?;
    epi_phase.add_submodule(m)?;
    Ok(())
}
