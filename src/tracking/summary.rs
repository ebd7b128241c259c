//! Read-only projections of the calendar table.
//!
//! Purpose
//! -------
//! Define the plain outcome types the tracker's two read operations emit:
//! the full daily record ([`TrackRecord`], one row per date) and the
//! per-phase summary ([`PhaseSummary`], one row per registered phase).
//! Both are snapshots; producing them never mutates the table.
//!
//! Conventions
//! -----------
//! - `extras` vectors follow the table's schema order (first-registration
//!   order of the dynamic estimation columns); blank cells are `None`.
//! - Summary rows are ordered and named by the dense phase ordering, not
//!   by raw identifier magnitudes.
use crate::tracking::core::{
    phase::Tense,
    record::{Cell, Observations},
};
use chrono::NaiveDate;

/// One row of the full daily record emitted by `track`.
///
/// The phase identifier is internal bookkeeping and is not part of this
/// projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed compartment block; `None` for projected dates.
    pub observed: Option<Observations>,
    /// Dynamic estimation columns in schema order; `None` where blank.
    pub extras: Vec<(String, Option<Cell>)>,
}

/// One row of the per-phase summary emitted by `summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSummary {
    /// Phase display name, the ordinal of the dense ordering (`0th`, ...).
    pub name: String,
    /// Past or Future, relative to the tracker's reference date.
    pub tense: Tense,
    /// First date of the phase.
    pub start: NaiveDate,
    /// Last date of the phase.
    pub end: NaiveDate,
    /// Susceptible plus confirmed at the start date; `None` when the start
    /// date has no observed block.
    pub population: Option<u64>,
    /// Dynamic estimation columns in schema order, taken from the phase's
    /// start date; `None` where blank.
    pub extras: Vec<(String, Option<Cell>)>,
}

impl PhaseSummary {
    /// Value of one estimation column for this phase, if populated.
    pub fn extra(&self, column: &str) -> Option<&Cell> {
        self.extras
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, cell)| cell.as_ref())
    }
}
