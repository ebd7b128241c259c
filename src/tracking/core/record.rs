//! Per-day records for the calendar table.
//!
//! Purpose
//! -------
//! Define the record stored for each calendar day: the fixed observed
//! compartment block, the phase identifier, and an extensible side-table of
//! named estimation cells. Making the observed block an `Option` keeps
//! "this date is projected, not observed" a type-checked question, and the
//! side-table keeps "has this date been estimated" one as well.
//!
//! Key behaviors
//! -------------
//! - [`Observations`] carries the five compartment counts and derives the
//!   population value used by phase summaries.
//! - [`Cell`] is the tagged value type for dynamic estimation columns
//!   (model names and runtimes are text, trial counts integers, parameter
//!   values and scores floats).
//! - [`DayRecord`] bundles the observed block, the phase identifier, and
//!   the estimation cells for one date.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observed counts, once set at construction, are never modified by
//!   phase editing or estimation merges.
//! - Estimation cells only appear for columns registered in the owning
//!   table's schema; the table enforces this, not the record.
use crate::tracking::core::phase::PhaseId;
use std::collections::BTreeMap;

/// Observed compartment counts for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observations {
    /// Cumulative confirmed cases.
    pub confirmed: u64,
    /// Currently infected cases.
    pub infected: u64,
    /// Cumulative fatal cases.
    pub fatal: u64,
    /// Cumulative recovered cases.
    pub recovered: u64,
    /// Susceptible cases.
    pub susceptible: u64,
}

impl Observations {
    /// Population value: susceptible plus confirmed.
    pub const fn population(&self) -> u64 {
        self.susceptible + self.confirmed
    }
}

/// Tagged value for one dynamic estimation column on one date.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Floating-point value (parameter values, reproduction numbers, scores).
    Float(f64),
    /// Integer value (tau minutes, trial counts).
    Int(i64),
    /// Text value (model names, runtimes).
    Text(String),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

/// Record stored for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// Observed compartment block; `None` for projected dates appended by
    /// future-phase extension.
    pub observed: Option<Observations>,
    /// Phase identifier (0 = unregistered).
    pub phase: PhaseId,
    /// Estimation cells keyed by schema column name; blank columns are
    /// absent.
    pub extras: BTreeMap<String, Cell>,
}

impl DayRecord {
    /// Record for an observed date, initially unregistered.
    pub fn observed(observations: Observations) -> Self {
        DayRecord {
            observed: Some(observations),
            phase: PhaseId::UNREGISTERED,
            extras: BTreeMap::new(),
        }
    }

    /// Blank record for a projected date appended by extension.
    pub fn blank() -> Self {
        DayRecord { observed: None, phase: PhaseId::UNREGISTERED, extras: BTreeMap::new() }
    }

    /// Value of one estimation column, if populated for this date.
    pub fn extra(&self, column: &str) -> Option<&Cell> {
        self.extras.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Population derivation on Observations.
    // - Construction state of observed vs blank records.
    // - Cell display formatting per variant.
    //
    // They intentionally DO NOT cover:
    // - Schema discipline for extras (calendar-table tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Population sums susceptible and confirmed.
    //
    // Given
    // -----
    // - Observations with susceptible = 990 and confirmed = 10.
    //
    // Expect
    // ------
    // - population() returns 1000.
    fn population_sums_susceptible_and_confirmed() {
        // Arrange
        let obs = Observations {
            confirmed: 10,
            infected: 5,
            fatal: 1,
            recovered: 4,
            susceptible: 990,
        };

        // Act & Assert
        assert_eq!(obs.population(), 1000);
    }

    #[test]
    // Purpose
    // -------
    // Observed and blank records start unregistered with empty extras.
    //
    // Given
    // -----
    // - One record built from observations and one blank record.
    //
    // Expect
    // ------
    // - Both carry PhaseId::UNREGISTERED and no extras; only the observed
    //   record has an observed block.
    fn records_start_unregistered_with_empty_extras() {
        // Arrange
        let obs = Observations {
            confirmed: 1,
            infected: 1,
            fatal: 0,
            recovered: 0,
            susceptible: 99,
        };

        // Act
        let recorded = DayRecord::observed(obs);
        let blank = DayRecord::blank();

        // Assert
        assert_eq!(recorded.phase, PhaseId::UNREGISTERED);
        assert_eq!(blank.phase, PhaseId::UNREGISTERED);
        assert!(recorded.extras.is_empty() && blank.extras.is_empty());
        assert_eq!(recorded.observed, Some(obs));
        assert_eq!(blank.observed, None);
        assert_eq!(blank.extra("Rt"), None);
    }

    #[test]
    // Purpose
    // -------
    // Cell renders each variant as its bare value.
    //
    // Given
    // -----
    // - A Float, an Int, and a Text cell.
    //
    // Expect
    // ------
    // - "2.5", "1440", and "SIR-F" respectively.
    fn cell_display_renders_bare_values() {
        // Arrange & Act & Assert
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Int(1440).to_string(), "1440");
        assert_eq!(Cell::Text("SIR-F".to_string()).to_string(), "SIR-F");
    }
}
