//! The phase tracker: phase editing, reconciliation, and projections over
//! one calendar table.
//!
//! Purpose
//! -------
//! Own the calendar table for one area and keep its phase segmentation
//! consistent around an immutable reference date ("today"): assign and
//! split identifiers when phases are defined, clear them when phases are
//! removed, fold externally computed per-phase parameter estimates back
//! into the table, and project the table as a daily record or a per-phase
//! summary.
//!
//! Key behaviors
//! -------------
//! - [`PhaseTracker::define_phase`] splits a requested range at the
//!   reference date: the past sub-range and the future sub-range each get
//!   a fresh identifier, the table is extended when the end date exceeds
//!   its span, and a final gap-fill sweeps any unregistered date up to the
//!   end date into one more identifier.
//! - [`PhaseTracker::remove_phase`] resets identifiers over a range;
//!   out-of-table portions are silently no-ops.
//! - [`PhaseTracker::trend`] hands the past-only observed series to an
//!   external change-point detector and, when forced, registers each
//!   proposed span in order.
//! - [`PhaseTracker::estimate`] collects registered phases, delegates to
//!   an external estimation engine (inferring tau when absent), and
//!   broadcasts each per-phase result across its dates with the
//!   widen-then-copy discipline. [`PhaseTracker::set_ode`] does the same
//!   from manually supplied parameter values.
//! - [`PhaseTracker::track`] / [`PhaseTracker::summary`] are pure
//!   projections and never mutate the table.
//!
//! Invariants & assumptions
//! ------------------------
//! - The reference date is fixed at construction.
//! - Identifiers introduced by successive definitions are strictly
//!   increasing; overlapping definitions overwrite earlier assignments on
//!   the shared dates (last write wins).
//! - Every validation failure is raised before any table mutation.
//! - Instances are single-owner; no internal synchronization is provided.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the split/overwrite/gap-fill identifier rules, the
//!   removal and projection semantics, and the merge discipline of
//!   `estimate` / `set_ode`.
//! - The end-to-end flow with stub collaborators lives in the integration
//!   tests.
use crate::{
    adapter::{
        estimation::{EstimationEngine, PhaseEstimate, PhaseInput},
        trend::{ObservationSeries, TrendDetector},
    },
    ode::{
        models::{EpiModel, ModelKind},
        tau::Tau,
    },
    tracking::{
        core::{
            calendar::CalendarTable,
            columns,
            phase::{DateSpan, PhaseId, Tense, ordinal},
            record::{Cell, Observations},
            validation::validate_start_on_records,
        },
        errors::{TrackError, TrackResult},
        summary::{PhaseSummary, TrackRecord},
    },
};
use chrono::NaiveDate;
use log::debug;
use ndarray::Array1;
use std::collections::BTreeMap;

/// Date-indexed parameter rows for manual parameter assignment.
///
/// Each row maps parameter names to values for one date; the tracker
/// validates rows against the model's required parameter list before any
/// merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    rows: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl ParamTable {
    /// Empty table.
    pub fn new() -> Self {
        ParamTable::default()
    }

    /// Insert or replace the parameter row for one date.
    pub fn insert(&mut self, date: NaiveDate, params: BTreeMap<String, f64>) {
        self.rows.insert(date, params);
    }

    /// Iterate rows in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &BTreeMap<String, f64>)> {
        self.rows.iter().map(|(date, params)| (*date, params))
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Tracks the phase segmentation of one area's epidemic records.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTracker {
    /// The owned per-date record table.
    table: CalendarTable,
    /// Reference date separating past from future phases.
    today: NaiveDate,
    /// Area label, like "Japan" or "Japan/Tokyo".
    area: String,
    /// Model applied by the last estimation or manual assignment.
    model: Option<ModelKind>,
    /// Tau applied by the last estimation or manual assignment.
    tau: Option<Tau>,
}

impl PhaseTracker {
    /// Construct a tracker from dated observation rows.
    ///
    /// The rows must form one dense daily sequence; the identifier column
    /// starts all-unregistered.
    ///
    /// # Errors
    /// - [`TrackError::EmptyObservations`], [`TrackError::DuplicateDate`],
    ///   or [`TrackError::NonContiguousDates`] when the rows do not form a
    ///   dense daily table.
    pub fn new(
        rows: Vec<(NaiveDate, Observations)>, today: NaiveDate, area: impl Into<String>,
    ) -> TrackResult<Self> {
        let table = CalendarTable::from_observations(rows)?;
        Ok(PhaseTracker { table, today, area: area.into(), model: None, tau: None })
    }

    /// The reference date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The area label.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Model applied by the last `estimate` / `set_ode`, if any.
    pub fn model(&self) -> Option<ModelKind> {
        self.model
    }

    /// Tau applied by the last `estimate` / `set_ode`, if any.
    pub fn tau(&self) -> Option<Tau> {
        self.tau
    }

    /// Define an active phase over `[start, end]`.
    ///
    /// The range is split at the reference date: the past sub-range
    /// `[start, min(today, end)]` and the future sub-range
    /// `[max(today + 1, start), end]` each receive a fresh identifier
    /// (one greater than the current maximum at assignment time), with the
    /// table extended when `end` exceeds its span. A final sweep assigns
    /// one more identifier to every date up to `end` still unregistered.
    /// Dates of previously defined phases inside the range are reassigned
    /// (last write wins).
    ///
    /// # Errors
    /// - [`TrackError::InvertedSpan`] if `start > end`.
    /// - [`TrackError::StartBeforeRecords`] if `start` precedes the first
    ///   recorded date.
    pub fn define_phase(&mut self, start: NaiveDate, end: NaiveDate) -> TrackResult<&mut Self> {
        DateSpan::new(start, end)?;
        validate_start_on_records(start, self.table.first_date())?;
        // Past sub-range: start through min(today, end).
        if start <= self.today {
            let id = self.table.max_phase_id().next();
            let past = DateSpan::new(start, self.today.min(end))?;
            self.table.assign_phase(&past, id);
            debug!("phase {} defined over {} to {}", id.value(), past.start, past.end);
        }
        // Future sub-range: the day after today through end.
        if self.today < end {
            self.table.extend_through(end);
            // today < end, so the successor exists
            let tomorrow = self.today.succ_opt().unwrap_or(end);
            let future = DateSpan::new(tomorrow.max(start), end)?;
            let id = self.table.max_phase_id().next();
            self.table.assign_phase(&future, id);
            debug!("phase {} defined over {} to {}", id.value(), future.start, future.end);
        }
        // Gap-fill: no unregistered date may remain inside the horizon.
        let fill = self.table.max_phase_id().next();
        let swept = self.table.fill_unregistered_through(end, fill);
        if swept > 0 {
            debug!("phase {} filled {swept} unregistered dates through {end}", fill.value());
        }
        Ok(self)
    }

    /// Reset every identifier in `[start, end]` to unregistered.
    ///
    /// Out-of-table portions of the range are silently no-ops.
    ///
    /// # Errors
    /// - [`TrackError::InvertedSpan`] if `start > end`.
    pub fn remove_phase(&mut self, start: NaiveDate, end: NaiveDate) -> TrackResult<&mut Self> {
        let span = DateSpan::new(start, end)?;
        self.table.clear_phase(&span);
        Ok(self)
    }

    /// Propose past phases from change-point trend analysis.
    ///
    /// The past-only observed series (dates on or before the reference
    /// date) is handed to `detector`. When `force` is set, each proposed
    /// span is registered through [`PhaseTracker::define_phase`] in order,
    /// so later spans may overwrite identifiers assigned by earlier ones.
    /// When `show_figure` is set, the detector's rendering hook is
    /// invoked.
    ///
    /// # Errors
    /// - [`TrackError::Adapter`] when detection or rendering fails.
    /// - Any `define_phase` error for a proposed span.
    pub fn trend<D: TrendDetector>(
        &mut self, detector: &D, force: bool, show_figure: bool,
    ) -> TrackResult<&mut Self> {
        let series = self.past_series();
        let spans = detector.detect(&series).map_err(TrackError::from)?;
        if force {
            for (start, end) in spans {
                self.define_phase(start, end)?;
            }
        }
        if show_figure {
            detector.render(&series).map_err(TrackError::from)?;
        }
        Ok(self)
    }

    /// Estimate per-phase parameter values and fold them into the table.
    ///
    /// Registered phases are collected in dense order as
    /// (start, end, initial condition) triples. When `tau` is absent the
    /// engine infers it from the full joint dataset first; parameter
    /// values are then fitted per phase and each result is broadcast
    /// across the phase's dates (widen-then-copy). Records the applied
    /// model and tau on the tracker and returns the tau.
    ///
    /// # Errors
    /// - [`TrackError::NoRegisteredPhases`] when no date carries an active
    ///   identifier.
    /// - [`TrackError::Adapter`] when the engine fails.
    pub fn estimate<E: EstimationEngine>(
        &mut self, model: ModelKind, tau: Option<Tau>, engine: &E,
    ) -> TrackResult<Tau> {
        let phases = self.registered_phases();
        if phases.is_empty() {
            return Err(TrackError::NoRegisteredPhases);
        }
        let first_date = phases[0].start;
        let tau = match tau {
            Some(value) => value,
            None => engine.estimate_tau(model, first_date, &phases).map_err(TrackError::from)?,
        };
        let estimates =
            engine.estimate_params(model, tau, first_date, &phases).map_err(TrackError::from)?;
        for estimate in &estimates {
            self.merge_estimate(model, tau, estimate)?;
        }
        debug!(
            "estimation merged for {} phases of {} with tau {} [min]",
            estimates.len(),
            self.area,
            tau.minutes()
        );
        self.model = Some(model);
        self.tau = Some(tau);
        Ok(tau)
    }

    /// Set model parameter values manually, without estimation.
    ///
    /// Every row of `params` must contain each parameter the model
    /// requires; the reproduction number and day-parameters are derived
    /// per row and merged with the same discipline as estimation. Rows
    /// whose date lies outside the table are ignored. Records the applied
    /// model and tau and returns the tau.
    ///
    /// # Errors
    /// - [`TrackError::Ode`] when a row misses a required parameter or a
    ///   value is outside its domain; raised before any merge.
    pub fn set_ode(
        &mut self, model: ModelKind, params: &ParamTable, tau: Tau,
    ) -> TrackResult<Tau> {
        // Validate and derive everything first; merge only afterwards.
        let mut merged_rows: Vec<(NaiveDate, Vec<(String, Cell)>)> = Vec::with_capacity(params.len());
        for (date, row) in params.rows() {
            let instance = EpiModel::new(model, 1.0, row)?;
            let mut cells: Vec<(String, Cell)> = vec![
                (columns::ODE.to_string(), Cell::Text(model.name().to_string())),
                (columns::RT.to_string(), Cell::Float(instance.reproduction_number())),
            ];
            for name in model.parameters() {
                // EpiModel::new verified presence of every required name
                if let Some(value) = row.get(*name) {
                    cells.push(((*name).to_string(), Cell::Float(*value)));
                }
            }
            cells.push((columns::TAU.to_string(), Cell::Int(i64::from(tau.minutes()))));
            for (label, value) in instance.day_parameters(tau) {
                cells.push((label.to_string(), Cell::Float(value)));
            }
            merged_rows.push((date, cells));
        }
        for (date, cells) in &merged_rows {
            let names: Vec<String> = cells.iter().map(|(name, _)| name.clone()).collect();
            self.table.union_columns(&names);
            self.table.overwrite_row(*date, cells);
        }
        self.model = Some(model);
        self.tau = Some(tau);
        Ok(tau)
    }

    /// The full daily record: one row per date, identifier dropped.
    pub fn track(&self) -> Vec<TrackRecord> {
        self.table
            .days()
            .map(|(date, record)| TrackRecord {
                date,
                observed: record.observed,
                extras: self
                    .table
                    .schema()
                    .iter()
                    .map(|column| (column.clone(), record.extra(column).cloned()))
                    .collect(),
            })
            .collect()
    }

    /// One summary row per registered phase, in dense phase order.
    ///
    /// Identifiers are re-factorized into a dense 0-based ordering by
    /// first appearance; each row carries the ordinal phase name, the
    /// tense relative to the reference date, the start/end dates, the
    /// population at the start date, and the estimation columns populated
    /// for the phase.
    pub fn summary(&self) -> Vec<PhaseSummary> {
        self.phase_bounds()
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                let first = self
                    .table
                    .record(start)
                    .expect("phase bounds come from table dates");
                PhaseSummary {
                    name: ordinal(index),
                    tense: if start <= self.today { Tense::Past } else { Tense::Future },
                    start,
                    end,
                    population: first.observed.map(|observations| observations.population()),
                    extras: self
                        .table
                        .schema()
                        .iter()
                        .map(|column| (column.clone(), first.extra(column).cloned()))
                        .collect(),
                }
            })
            .collect()
    }

    /// First and last date of each active identifier, ordered by first
    /// appearance.
    fn phase_bounds(&self) -> Vec<(NaiveDate, NaiveDate)> {
        let mut order: Vec<PhaseId> = Vec::new();
        let mut bounds: BTreeMap<i32, (NaiveDate, NaiveDate)> = BTreeMap::new();
        for (date, record) in self.table.days() {
            if !record.phase.is_active() {
                continue;
            }
            match bounds.get_mut(&record.phase.value()) {
                Some((_, end)) => *end = date,
                None => {
                    order.push(record.phase);
                    bounds.insert(record.phase.value(), (date, date));
                }
            }
        }
        order
            .into_iter()
            .filter_map(|id| bounds.get(&id.value()).copied())
            .collect()
    }

    /// Registered phases in dense order, with their initial conditions.
    fn registered_phases(&self) -> Vec<PhaseInput> {
        self.phase_bounds()
            .into_iter()
            .map(|(start, end)| PhaseInput {
                start,
                end,
                initial: self.table.record(start).and_then(|record| record.observed),
            })
            .collect()
    }

    /// Past-only observed series handed to trend detection.
    fn past_series(&self) -> ObservationSeries {
        let past: Vec<(NaiveDate, Observations)> = self
            .table
            .days()
            .take_while(|(date, _)| *date <= self.today)
            .filter_map(|(date, record)| record.observed.map(|observations| (date, observations)))
            .collect();
        let column = |pick: fn(&Observations) -> u64| -> Array1<f64> {
            Array1::from_iter(past.iter().map(|(_, observations)| pick(observations) as f64))
        };
        ObservationSeries {
            area: self.area.clone(),
            dates: past.iter().map(|(date, _)| *date).collect(),
            confirmed: column(|observations| observations.confirmed),
            infected: column(|observations| observations.infected),
            fatal: column(|observations| observations.fatal),
            recovered: column(|observations| observations.recovered),
            susceptible: column(|observations| observations.susceptible),
        }
    }

    /// Broadcast one per-phase estimate across its dates and merge it.
    fn merge_estimate(
        &mut self, model: ModelKind, tau: Tau, estimate: &PhaseEstimate,
    ) -> TrackResult<()> {
        let mut cells: Vec<(String, Cell)> = vec![
            (columns::ODE.to_string(), Cell::Text(model.name().to_string())),
            (columns::RT.to_string(), Cell::Float(estimate.reproduction_number)),
        ];
        for (name, value) in &estimate.parameters {
            cells.push((name.clone(), Cell::Float(*value)));
        }
        cells.push((columns::TAU.to_string(), Cell::Int(i64::from(tau.minutes()))));
        for (name, value) in &estimate.day_parameters {
            cells.push((name.clone(), Cell::Float(*value)));
        }
        for (name, value) in &estimate.metrics {
            cells.push((name.clone(), Cell::Float(*value)));
        }
        cells.push((columns::TRIALS.to_string(), Cell::Int(estimate.trials as i64)));
        cells.push((columns::RUNTIME.to_string(), Cell::Text(estimate.runtime.clone())));

        let names: Vec<String> = cells.iter().map(|(name, _)| name.clone()).collect();
        self.table.union_columns(&names);
        let span = DateSpan::new(estimate.start, estimate.end)?;
        for date in span.iter_days() {
            self.table.overwrite_row(date, &cells);
        }
        Ok(())
    }
}
