//! core — building blocks of the phase-tracking engine.
//!
//! Purpose
//! -------
//! Collect the structural pieces the tracker is built from: per-day
//! records, the gap-free calendar table, phase identifiers and date spans,
//! shared column labels, and pure validation helpers. Higher layers
//! (`tracker`, `summary`, bindings) compose these without re-implementing
//! their invariants.
//!
//! Key behaviors
//! -------------
//! - [`record`] defines [`Observations`], [`Cell`], and [`DayRecord`].
//! - [`calendar`] owns the gap-free daily frame with copy-on-extend and
//!   widen-then-copy operations.
//! - [`phase`] defines [`PhaseId`], [`Tense`], [`DateSpan`], and ordinal
//!   phase naming.
//! - [`columns`] holds the shared column-name constants.
//! - [`validation`] holds the pure date/shape validators.
//!
//! Invariants & assumptions
//! ------------------------
//! - The calendar index stays dense between its bounds; the dynamic schema
//!   only grows; observed counts are write-once. Each invariant is
//!   enforced in exactly one module here.

pub mod calendar;
pub mod columns;
pub mod phase;
pub mod record;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::calendar::CalendarTable;
pub use self::phase::{DateSpan, PhaseId, Tense, ordinal};
pub use self::record::{Cell, DayRecord, Observations};
