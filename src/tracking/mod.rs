//! tracking — the phase-tracking engine: calendar table, phase editing,
//! reconciliation, and projections.
//!
//! Purpose
//! -------
//! Provide the core of the crate: a tracker that owns one area's per-date
//! record table, keeps its phase segmentation consistent around an
//! immutable reference date, folds externally computed per-phase parameter
//! estimates back into the table, and projects the table as a daily record
//! or a per-phase summary.
//!
//! Key behaviors
//! -------------
//! - Structural building blocks live in [`core`]: the gap-free
//!   [`CalendarTable`], per-day records, phase identifiers / spans /
//!   tense, column labels, and validation helpers.
//! - The user-facing API lives in [`tracker`] as [`PhaseTracker`]:
//!   `define_phase`, `remove_phase`, `trend`, `estimate`, `set_ode`,
//!   `track`, and `summary`.
//! - Projection row types live in [`summary`]: [`TrackRecord`] and
//!   [`PhaseSummary`].
//! - Errors are centralized in [`errors`] (`TrackError` / `TrackResult`),
//!   wrapping model-contract and collaborator failures behind one surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - The calendar index is contiguous between its bounds; extension keeps
//!   it daily.
//! - Positive identifiers name phases and grow strictly across
//!   definitions; 0 means unregistered; negative values are reserved.
//! - Estimation columns, once registered, persist for all dates (blank
//!   where not applicable); the schema never shrinks.
//! - Validation failures are raised before any table mutation.
//! - Trackers are single-owner; callers serialize concurrent use.
//!
//! Conventions
//! -----------
//! - Dates are `chrono::NaiveDate`; spans are inclusive on both ends.
//! - The engine performs no I/O; the only logging is `debug!`-level at
//!   mutation points. Collaborator calls are synchronous and opaque.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a [`PhaseTracker`] from dated observation rows, a reference
//!      date, and an area label.
//!   2. Segment with `define_phase` / `remove_phase`, or let a
//!      `TrendDetector` propose past phases via `trend`.
//!   3. Fit with `estimate` (through an `EstimationEngine`) or assign
//!      values with `set_ode`.
//!   4. Read the results through `track` / `summary`.
//! - Python bindings wrap this module's surface and rely on the `PyErr`
//!   conversions defined in [`errors`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover table construction / extension, schema
//!   discipline, spans, identifiers, and validators.
//! - Unit tests in [`tracker`] cover the identifier rules, projections,
//!   and merge discipline with stub collaborators.
//! - The full pipeline is exercised in `tests/`.

pub mod core;
pub mod errors;
pub mod summary;
pub mod tracker;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the everyday types most users need. More specialized items
// (column constants, validation helpers, the raw calendar table) remain
// under their respective submodules.

pub use self::core::{
    CalendarTable, Cell, DateSpan, DayRecord, Observations, PhaseId, Tense,
};

pub use self::errors::{TrackError, TrackResult};

pub use self::summary::{PhaseSummary, TrackRecord};

pub use self::tracker::{ParamTable, PhaseTracker};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use epi_phase::tracking::prelude::*;
//
// to import the main tracking surface in a single line, without pulling in
// lower-level internals.

pub mod prelude {
    pub use super::{
        Cell, DateSpan, Observations, ParamTable, PhaseId, PhaseSummary, PhaseTracker, Tense,
        TrackError, TrackRecord, TrackResult,
    };
}
