//! ode — the epidemic model contract: families, parameters, and tau.
//!
//! Purpose
//! -------
//! Provide the closed set of epidemic model families the phase tracker can
//! drive, together with the validated time-step type their day-parameter
//! arithmetic depends on. Simulation and parameter search live outside the
//! crate; this module only carries the contract those collaborators and the
//! tracker agree on: parameter names, display names, reproduction numbers,
//! and day-parameters.
//!
//! Key behaviors
//! -------------
//! - [`ModelKind`] enumerates the families (SIR, SIR-D, SIR-F) and exposes
//!   their static metadata (name, parameter list, day-parameter labels).
//! - [`EpiModel`] instantiates one family with validated values and derives
//!   the reproduction number and day-parameters as pure functions.
//! - [`Tau`] validates the discretization step (positive divisor of one
//!   day, in minutes).
//!
//! Invariants & assumptions
//! ------------------------
//! - Rates are finite and strictly positive, fractions lie in `[0, 1]`;
//!   derived quantities are therefore total and finite.
//! - This module performs no I/O and no logging; it only inspects numeric
//!   values and name sets.
//!
//! Testing notes
//! -------------
//! - Unit tests cover parsing, parameter validation, and the formula /
//!   rounding behavior of the derived quantities.

pub mod errors;
pub mod models;
pub mod tau;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{OdeError, OdeResult};
pub use self::models::{EpiModel, ModelKind};
pub use self::tau::{MINUTES_PER_DAY, Tau};
