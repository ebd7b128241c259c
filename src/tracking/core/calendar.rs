//! The calendar table, a gap-free daily frame with a grow-only schema.
//!
//! Purpose
//! -------
//! Own the per-date record map the phase tracker mutates: one [`DayRecord`]
//! per calendar day, spanning continuously from the first observation date
//! to the furthest phase end date ever defined. All span extension and
//! schema widening go through explicit named methods so the gap-free and
//! grow-only invariants live in exactly one place.
//!
//! Key behaviors
//! -------------
//! - [`CalendarTable::from_observations`] validates the construction input
//!   (non-empty, no duplicate days, no missing days) so the daily index is
//!   dense from birth.
//! - [`CalendarTable::extend_through`] appends blank records up to a target
//!   date, keeping the index daily and gap-free (copy-on-extend).
//! - [`CalendarTable::union_columns`] then [`CalendarTable::overwrite_row`]
//!   implement the widen-then-copy discipline for estimation merges: the
//!   schema is unioned first, and row overwrites only touch registered
//!   columns, never the observed block or the phase identifier.
//! - Phase assignment, clearing, maximum lookup, and the unregistered
//!   gap-fill sweep operate on clamped date ranges.
//!
//! Invariants & assumptions
//! ------------------------
//! - The day index is contiguous and sorted ascending; no calendar day is
//!   missing between the minimum and maximum date.
//! - `schema` is insertion-ordered and only ever grows; a column present in
//!   any record's side-table is registered in `schema`.
//! - Observed compartment values are written once at construction and never
//!   altered by any later operation.
//!
//! Downstream usage
//! ----------------
//! - The phase tracker is the only mutator; projections (`track`,
//!   `summary`) read through [`CalendarTable::days`] and
//!   [`CalendarTable::schema`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction validation, extension behavior, the
//!   widen-then-copy discipline, and phase assignment/clearing/gap-fill on
//!   clamped ranges.
use crate::tracking::{
    core::{
        phase::{DateSpan, PhaseId},
        record::{Cell, DayRecord, Observations},
    },
    errors::{TrackError, TrackResult},
};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Gap-free day-indexed record table with a grow-only dynamic schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTable {
    /// One record per calendar day, dense between min and max key.
    days: BTreeMap<NaiveDate, DayRecord>,
    /// Dynamic estimation columns in first-registration order.
    schema: Vec<String>,
}

impl CalendarTable {
    /// Build a table from dated observation rows.
    ///
    /// The rows may arrive in any order; they must form one dense daily
    /// sequence once sorted.
    ///
    /// # Errors
    /// - [`TrackError::EmptyObservations`] when `rows` is empty.
    /// - [`TrackError::DuplicateDate`] when two rows share a date.
    /// - [`TrackError::NonContiguousDates`] when a calendar day is missing.
    pub fn from_observations(rows: Vec<(NaiveDate, Observations)>) -> TrackResult<Self> {
        if rows.is_empty() {
            return Err(TrackError::EmptyObservations);
        }
        let mut days = BTreeMap::new();
        for (date, observations) in rows {
            if days.insert(date, DayRecord::observed(observations)).is_some() {
                return Err(TrackError::DuplicateDate { date });
            }
        }
        let mut expected = None;
        for date in days.keys() {
            if let Some(expected_date) = expected {
                if *date != expected_date {
                    return Err(TrackError::NonContiguousDates {
                        expected: expected_date,
                        actual: *date,
                    });
                }
            }
            expected = date.succ_opt();
        }
        Ok(CalendarTable { days, schema: Vec::new() })
    }

    /// First date of the table.
    pub fn first_date(&self) -> NaiveDate {
        *self.days.keys().next().expect("table holds at least one day by construction")
    }

    /// Last date of the table.
    pub fn last_date(&self) -> NaiveDate {
        *self.days.keys().next_back().expect("table holds at least one day by construction")
    }

    /// Number of days in the table.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; construction requires at least one row.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Record for one date, if the table covers it.
    pub fn record(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Iterate all days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DayRecord)> {
        self.days.iter().map(|(date, record)| (*date, record))
    }

    /// Registered dynamic columns in first-registration order.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Extend the daily index through `end` with blank records.
    ///
    /// New slots carry no observed block and the unregistered identifier;
    /// dates already covered are untouched. A no-op when `end` is within
    /// the current span.
    pub fn extend_through(&mut self, end: NaiveDate) {
        let last = self.last_date();
        if end <= last {
            return;
        }
        let mut date = last;
        while date < end {
            date = match date.succ_opt() {
                Some(next) => next,
                None => return,
            };
            self.days.insert(date, DayRecord::blank());
        }
        debug!("calendar extended through {end} ({} days)", (end - last).num_days());
    }

    /// Assign `id` to every table date inside `span`.
    ///
    /// Dates outside the table bounds are silently skipped.
    pub fn assign_phase(&mut self, span: &DateSpan, id: PhaseId) {
        for (_, record) in self.days.range_mut(span.start..=span.end) {
            record.phase = id;
        }
    }

    /// Reset every table date inside `span` to the unregistered identifier.
    ///
    /// Dates outside the table bounds are silently skipped.
    pub fn clear_phase(&mut self, span: &DateSpan) {
        self.assign_phase(span, PhaseId::UNREGISTERED);
    }

    /// Largest identifier currently present in the table.
    pub fn max_phase_id(&self) -> PhaseId {
        self.days
            .values()
            .map(|record| record.phase)
            .max()
            .unwrap_or(PhaseId::UNREGISTERED)
    }

    /// Sweep every unregistered date up to and including `end` into `id`.
    ///
    /// Returns the number of dates assigned; zero means `id` never
    /// materialized in the table.
    pub fn fill_unregistered_through(&mut self, end: NaiveDate, id: PhaseId) -> usize {
        let mut assigned = 0;
        for (_, record) in self.days.range_mut(..=end) {
            if record.phase == PhaseId::UNREGISTERED {
                record.phase = id;
                assigned += 1;
            }
        }
        assigned
    }

    /// Union the schema with `columns`, preserving first-registration order.
    ///
    /// Existing columns keep their position; new ones are appended in the
    /// order given. The schema never shrinks.
    pub fn union_columns(&mut self, columns: &[String]) {
        for column in columns {
            if !self.schema.iter().any(|existing| existing == column) {
                self.schema.push(column.clone());
            }
        }
    }

    /// Overwrite estimation cells of one row.
    ///
    /// Only columns already registered in the schema are written (callers
    /// union first); dates outside the table are silently ignored, and the
    /// observed block and phase identifier are never touched.
    pub fn overwrite_row(&mut self, date: NaiveDate, cells: &[(String, Cell)]) {
        let Some(record) = self.days.get_mut(&date) else {
            return;
        };
        for (column, cell) in cells {
            if self.schema.iter().any(|registered| registered == column) {
                record.extras.insert(column.clone(), cell.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction validation (empty, duplicate, non-contiguous input).
    // - Extension behavior and the gap-free index invariant.
    // - Phase assignment, clearing, maximum lookup, and gap-fill sweeps on
    //   clamped ranges.
    // - The widen-then-copy schema discipline.
    //
    // They intentionally DO NOT cover:
    // - Tracker-level operation semantics such as the past/future split
    //   (tracker tests).
    // -------------------------------------------------------------------------

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
    }

    fn obs(confirmed: u64) -> Observations {
        Observations {
            confirmed,
            infected: confirmed / 2,
            fatal: 0,
            recovered: confirmed / 2,
            susceptible: 1000 - confirmed,
        }
    }

    fn table(days: u32) -> CalendarTable {
        let rows =
            (0..days).map(|offset| (d(2022, 4, 1 + offset), obs(10 + u64::from(offset)))).collect();
        CalendarTable::from_observations(rows).expect("dense observation rows")
    }

    #[test]
    // Purpose
    // -------
    // Construction accepts dense rows in any order and rejects empty,
    // duplicated, and gapped input.
    //
    // Given
    // -----
    // - Rows for April 1-3 supplied out of order; an empty row set; a
    //   duplicate April 2; a gap at April 3.
    //
    // Expect
    // ------
    // - The dense set builds with the right bounds; the bad sets yield
    //   EmptyObservations, DuplicateDate, and NonContiguousDates.
    fn from_observations_validates_density() {
        // Arrange
        let shuffled =
            vec![(d(2022, 4, 3), obs(12)), (d(2022, 4, 1), obs(10)), (d(2022, 4, 2), obs(11))];
        let duplicated =
            vec![(d(2022, 4, 1), obs(10)), (d(2022, 4, 2), obs(11)), (d(2022, 4, 2), obs(12))];
        let gapped = vec![(d(2022, 4, 1), obs(10)), (d(2022, 4, 2), obs(11)), (d(2022, 4, 4), obs(12))];

        // Act & Assert
        let built = CalendarTable::from_observations(shuffled).expect("dense rows build");
        assert_eq!(built.first_date(), d(2022, 4, 1));
        assert_eq!(built.last_date(), d(2022, 4, 3));
        assert_eq!(built.len(), 3);
        assert_eq!(
            CalendarTable::from_observations(Vec::new()),
            Err(TrackError::EmptyObservations)
        );
        assert_eq!(
            CalendarTable::from_observations(duplicated),
            Err(TrackError::DuplicateDate { date: d(2022, 4, 2) })
        );
        assert_eq!(
            CalendarTable::from_observations(gapped),
            Err(TrackError::NonContiguousDates {
                expected: d(2022, 4, 3),
                actual: d(2022, 4, 4)
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Extension appends blank days and keeps the index gap-free.
    //
    // Given
    // -----
    // - A 3-day table extended through April 7, then through April 5
    //   (already covered).
    //
    // Expect
    // ------
    // - 7 days total, every day present, appended days blank and
    //   unregistered; the second call is a no-op.
    fn extend_through_appends_blank_days_gap_free() {
        // Arrange
        let mut table = table(3);

        // Act
        table.extend_through(d(2022, 4, 7));
        table.extend_through(d(2022, 4, 5));

        // Assert
        assert_eq!(table.len(), 7);
        assert_eq!(table.last_date(), d(2022, 4, 7));
        let mut expected = table.first_date();
        for (date, _) in table.days() {
            assert_eq!(date, expected, "index must stay dense");
            expected = expected.succ_opt().unwrap();
        }
        let appended = table.record(d(2022, 4, 6)).expect("appended day exists");
        assert_eq!(appended.observed, None);
        assert_eq!(appended.phase, PhaseId::UNREGISTERED);
    }

    #[test]
    // Purpose
    // -------
    // Phase assignment and clearing clamp to the table bounds, and the
    // maximum identifier reflects assignments.
    //
    // Given
    // -----
    // - A 5-day table; assignment over April 3 through April 30 (beyond
    //   the last day), then clearing over March 1 through April 3.
    //
    // Expect
    // ------
    // - Only in-table dates change; max_phase_id tracks the assignment and
    //   clearing leaves April 4-5 registered.
    fn assign_and_clear_clamp_to_table_bounds() {
        // Arrange
        let mut table = table(5);
        let wide = DateSpan::new(d(2022, 4, 3), d(2022, 4, 30)).unwrap();
        let early = DateSpan::new(d(2022, 3, 1), d(2022, 4, 3)).unwrap();

        // Act
        table.assign_phase(&wide, PhaseId::new(1));
        table.clear_phase(&early);

        // Assert
        assert_eq!(table.len(), 5, "assignment must not extend the table");
        assert_eq!(table.record(d(2022, 4, 2)).unwrap().phase, PhaseId::UNREGISTERED);
        assert_eq!(table.record(d(2022, 4, 3)).unwrap().phase, PhaseId::UNREGISTERED);
        assert_eq!(table.record(d(2022, 4, 4)).unwrap().phase, PhaseId::new(1));
        assert_eq!(table.record(d(2022, 4, 5)).unwrap().phase, PhaseId::new(1));
        assert_eq!(table.max_phase_id(), PhaseId::new(1));
    }

    #[test]
    // Purpose
    // -------
    // The gap-fill sweep assigns only unregistered dates up to the bound
    // and reports how many it touched.
    //
    // Given
    // -----
    // - A 5-day table with phase 1 on April 2-3; sweep through April 4
    //   with identifier 2.
    //
    // Expect
    // ------
    // - April 1 and April 4 get identifier 2 (2 dates), April 5 stays
    //   unregistered, April 2-3 keep identifier 1; a second sweep over a
    //   fully covered range reports zero.
    fn fill_unregistered_through_sweeps_only_blanks() {
        // Arrange
        let mut table = table(5);
        table.assign_phase(&DateSpan::new(d(2022, 4, 2), d(2022, 4, 3)).unwrap(), PhaseId::new(1));

        // Act
        let swept = table.fill_unregistered_through(d(2022, 4, 4), PhaseId::new(2));
        let swept_again = table.fill_unregistered_through(d(2022, 4, 4), PhaseId::new(3));

        // Assert
        assert_eq!(swept, 2);
        assert_eq!(swept_again, 0);
        assert_eq!(table.record(d(2022, 4, 1)).unwrap().phase, PhaseId::new(2));
        assert_eq!(table.record(d(2022, 4, 2)).unwrap().phase, PhaseId::new(1));
        assert_eq!(table.record(d(2022, 4, 4)).unwrap().phase, PhaseId::new(2));
        assert_eq!(table.record(d(2022, 4, 5)).unwrap().phase, PhaseId::UNREGISTERED);
    }

    #[test]
    // Purpose
    // -------
    // Widen-then-copy: schema union preserves order and never shrinks, row
    // overwrites only touch registered columns and leave the observed
    // block alone.
    //
    // Given
    // -----
    // - Columns [ODE, Rt] unioned, then [Rt, rho]; a row overwrite with a
    //   registered and an unregistered column; an overwrite at an
    //   out-of-table date.
    //
    // Expect
    // ------
    // - Schema is [ODE, Rt, rho]; the registered cell lands, the
    //   unregistered one is dropped, observed counts are unchanged, and
    //   the out-of-table overwrite is a no-op.
    fn union_then_overwrite_respects_schema_and_observed_block() {
        // Arrange
        let mut table = table(3);
        let before = table.record(d(2022, 4, 2)).unwrap().observed;

        // Act
        table.union_columns(&["ODE".to_string(), "Rt".to_string()]);
        table.union_columns(&["Rt".to_string(), "rho".to_string()]);
        table.overwrite_row(
            d(2022, 4, 2),
            &[
                ("Rt".to_string(), Cell::Float(2.5)),
                ("Trials".to_string(), Cell::Int(100)),
            ],
        );
        table.overwrite_row(d(2022, 5, 1), &[("Rt".to_string(), Cell::Float(1.0))]);

        // Assert
        assert_eq!(table.schema(), ["ODE", "Rt", "rho"]);
        let record = table.record(d(2022, 4, 2)).unwrap();
        assert_eq!(record.extra("Rt"), Some(&Cell::Float(2.5)));
        assert_eq!(record.extra("Trials"), None, "unregistered columns must be dropped");
        assert_eq!(record.observed, before);
        assert_eq!(table.len(), 3);
    }
}
