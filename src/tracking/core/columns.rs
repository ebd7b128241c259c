//! Shared column-name constants for tracker inputs, projections, and the
//! binding surface.
//!
//! Notes
//! -----
//! - These are display labels only; the core stores typed fields and a
//!   named side-table, not string-keyed rows.
//! - Estimation column labels (`ODE`, `Rt`, `tau`, …) double as schema keys
//!   in the calendar table's dynamic column set.

/// Observation date.
pub const DATE: &str = "Date";
/// Cumulative confirmed cases.
pub const CONFIRMED: &str = "Confirmed";
/// Currently infected cases.
pub const INFECTED: &str = "Infected";
/// Cumulative fatal cases.
pub const FATAL: &str = "Fatal";
/// Cumulative recovered cases.
pub const RECOVERED: &str = "Recovered";
/// Susceptible cases.
pub const SUSCEPTIBLE: &str = "Susceptible";

/// Phase tense (Past or Future).
pub const TENSE: &str = "Type";
/// Phase start date.
pub const START: &str = "Start";
/// Phase end date.
pub const END: &str = "End";
/// Population value at the phase start date.
pub const POPULATION: &str = "Population";

/// ODE model display name.
pub const ODE: &str = "ODE";
/// Phase-dependent reproduction number.
pub const RT: &str = "Rt";
/// Applied tau value in minutes.
pub const TAU: &str = "tau";
/// Number of optimization trials.
pub const TRIALS: &str = "Trials";
/// Optimization runtime, human readable.
pub const RUNTIME: &str = "Runtime";
