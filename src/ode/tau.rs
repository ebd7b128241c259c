//! Tau, the discretization time-step for ODE parameter sets.
//!
//! - [`Tau`] declares the step length in minutes used to convert continuous
//!   model rates into per-day dynamics.
//!
//! Notes
//! -----
//! - A valid tau is a positive whole number of minutes that divides one day
//!   (1440 minutes), so that daily records align with an integer number of
//!   steps.
use crate::ode::errors::{OdeError, OdeResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Discretization time-step in minutes.
///
/// Invariant: strictly positive and a divisor of 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tau(u32);

impl Tau {
    /// Construct a validated [`Tau`] from a raw minute count.
    ///
    /// # Errors
    /// - [`OdeError::InvalidTau`] if `minutes` is not strictly positive.
    /// - [`OdeError::InvalidTau`] if `minutes` does not divide 1440.
    pub fn new(minutes: i64) -> OdeResult<Self> {
        if minutes <= 0 {
            return Err(OdeError::InvalidTau { minutes, reason: "must be strictly positive" });
        }
        if MINUTES_PER_DAY % minutes != 0 {
            return Err(OdeError::InvalidTau {
                minutes,
                reason: "must be a divisor of 1440 (one day)",
            });
        }
        Ok(Tau(minutes as u32))
    }

    /// The step length in minutes.
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// The step length expressed in days.
    pub fn days(self) -> f64 {
        f64::from(self.0) / MINUTES_PER_DAY as f64
    }
}
