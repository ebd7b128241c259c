//! Epidemic model variants and the per-variant parameter contract.
//!
//! This module defines [`ModelKind`], which enumerates the supported ODE
//! model families, and [`EpiModel`], a validated instance of one family with
//! concrete parameter values. Each family exposes a fixed ordered parameter
//! list, a display name, a reproduction number, and a set of derived
//! day-length parameters.
//!
//! ## Supported families
//! - [`ModelKind::Sir`]: basic SIR dynamics with parameters `rho`, `sigma`.
//! - [`ModelKind::SirD`]: SIR with a separate fatality compartment,
//!   parameters `kappa`, `rho`, `sigma`.
//! - [`ModelKind::SirF`]: SIR-D with a direct-fatality fraction `theta`,
//!   parameters `theta`, `kappa`, `rho`, `sigma`.
//!
//! ## Numerics
//! - Rates (`rho`, `sigma`, `kappa`) must be finite and strictly positive;
//!   the fraction `theta` must be finite and in `[0, 1]`. Under these
//!   domains every derived quantity is finite.
//! - Reproduction numbers are rounded to 2 decimal places; `theta` is
//!   reported as a day-parameter rounded to 3 decimal places; rate-derived
//!   day-parameters are rounded to whole days.
use crate::ode::{
    errors::{OdeError, OdeResult},
    tau::{MINUTES_PER_DAY, Tau},
};
use std::{collections::BTreeMap, str::FromStr};

/// Day-parameter column labels shared across families.
const ALPHA1: &str = "alpha1 [-]";
const ONE_OVER_ALPHA2: &str = "1/alpha2 [day]";
const ONE_OVER_BETA: &str = "1/beta [day]";
const ONE_OVER_GAMMA: &str = "1/gamma [day]";

/// The closed set of supported epidemic model families.
///
/// Each variant carries no data; concrete parameter values live in
/// [`EpiModel`]. The set is closed because the phase tracker only ever
/// drives these three families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Susceptible-Infected-Recovered.
    Sir,
    /// SIR with a fatality compartment.
    SirD,
    /// SIR-D with a direct-fatality fraction.
    SirF,
}

impl ModelKind {
    /// Fixed display name of the family.
    pub const fn name(self) -> &'static str {
        match self {
            ModelKind::Sir => "SIR",
            ModelKind::SirD => "SIR-D",
            ModelKind::SirF => "SIR-F",
        }
    }

    /// Ordered list of required parameter names.
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            ModelKind::Sir => &["rho", "sigma"],
            ModelKind::SirD => &["kappa", "rho", "sigma"],
            ModelKind::SirF => &["theta", "kappa", "rho", "sigma"],
        }
    }

    /// Ordered list of derived day-parameter labels.
    pub const fn day_parameters(self) -> &'static [&'static str] {
        match self {
            ModelKind::Sir => &[ONE_OVER_BETA, ONE_OVER_GAMMA],
            ModelKind::SirD => &[ONE_OVER_ALPHA2, ONE_OVER_BETA, ONE_OVER_GAMMA],
            ModelKind::SirF => &[ALPHA1, ONE_OVER_ALPHA2, ONE_OVER_BETA, ONE_OVER_GAMMA],
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsing
///
/// Accepts case-insensitive display names, with the hyphen optional
/// (`"SIR-F"`, `"sirf"`). Unknown names return [`OdeError::UnknownModel`].
impl FromStr for ModelKind {
    type Err = OdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SIR" => Ok(ModelKind::Sir),
            "SIRD" => Ok(ModelKind::SirD),
            "SIRF" => Ok(ModelKind::SirF),
            _ => Err(OdeError::UnknownModel { name: s.to_string() }),
        }
    }
}

/// A model family instantiated with a population value and parameter set.
///
/// Variants store validated parameter values; the derived quantities
/// ([`EpiModel::reproduction_number`], [`EpiModel::day_parameters`]) are
/// pure functions of those values and never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum EpiModel {
    /// SIR with infection rate `rho` and recovery rate `sigma`.
    Sir { population: f64, rho: f64, sigma: f64 },
    /// SIR-D adding the mortality rate `kappa`.
    SirD { population: f64, kappa: f64, rho: f64, sigma: f64 },
    /// SIR-F adding the direct-fatality fraction `theta`.
    SirF { population: f64, theta: f64, kappa: f64, rho: f64, sigma: f64 },
}

impl EpiModel {
    /// Instantiate a model family from a named parameter set.
    ///
    /// Parameter lookup follows `kind.parameters()`; every required name
    /// must be present in `params`. Rates must be finite and strictly
    /// positive, `theta` finite and within `[0, 1]`.
    ///
    /// # Errors
    /// - [`OdeError::MissingParameter`] when a required name is absent.
    /// - [`OdeError::InvalidParameter`] when a value is outside its domain.
    pub fn new(kind: ModelKind, population: f64, params: &BTreeMap<String, f64>) -> OdeResult<Self> {
        match kind {
            ModelKind::Sir => {
                let rho = required_rate(kind, params, "rho")?;
                let sigma = required_rate(kind, params, "sigma")?;
                Ok(EpiModel::Sir { population, rho, sigma })
            }
            ModelKind::SirD => {
                let kappa = required_rate(kind, params, "kappa")?;
                let rho = required_rate(kind, params, "rho")?;
                let sigma = required_rate(kind, params, "sigma")?;
                Ok(EpiModel::SirD { population, kappa, rho, sigma })
            }
            ModelKind::SirF => {
                let theta = required_fraction(kind, params, "theta")?;
                let kappa = required_rate(kind, params, "kappa")?;
                let rho = required_rate(kind, params, "rho")?;
                let sigma = required_rate(kind, params, "sigma")?;
                Ok(EpiModel::SirF { population, theta, kappa, rho, sigma })
            }
        }
    }

    /// The family this instance belongs to.
    pub const fn kind(&self) -> ModelKind {
        match self {
            EpiModel::Sir { .. } => ModelKind::Sir,
            EpiModel::SirD { .. } => ModelKind::SirD,
            EpiModel::SirF { .. } => ModelKind::SirF,
        }
    }

    /// Phase-dependent reproduction number, rounded to 2 decimal places.
    ///
    /// - SIR: `rho / sigma`
    /// - SIR-D: `rho / (sigma + kappa)`
    /// - SIR-F: `rho * (1 - theta) / (sigma + kappa)`
    ///
    /// Total under the constructor's domain checks (denominators are sums
    /// of strictly positive rates).
    pub fn reproduction_number(&self) -> f64 {
        let raw = match *self {
            EpiModel::Sir { rho, sigma, .. } => rho / sigma,
            EpiModel::SirD { kappa, rho, sigma, .. } => rho / (sigma + kappa),
            EpiModel::SirF { theta, kappa, rho, sigma, .. } => {
                rho * (1.0 - theta) / (sigma + kappa)
            }
        };
        round_to(raw, 2)
    }

    /// Derived day-length parameters for the given time-step.
    ///
    /// Labels and order follow `self.kind().day_parameters()`. A rate `r`
    /// maps to `round(tau / 1440 / r)` days; `theta` maps to itself rounded
    /// to 3 decimal places under the `alpha1 [-]` label.
    pub fn day_parameters(&self, tau: Tau) -> Vec<(&'static str, f64)> {
        match *self {
            EpiModel::Sir { rho, sigma, .. } => vec![
                (ONE_OVER_BETA, rate_days(rho, tau)),
                (ONE_OVER_GAMMA, rate_days(sigma, tau)),
            ],
            EpiModel::SirD { kappa, rho, sigma, .. } => vec![
                (ONE_OVER_ALPHA2, rate_days(kappa, tau)),
                (ONE_OVER_BETA, rate_days(rho, tau)),
                (ONE_OVER_GAMMA, rate_days(sigma, tau)),
            ],
            EpiModel::SirF { theta, kappa, rho, sigma, .. } => vec![
                (ALPHA1, round_to(theta, 3)),
                (ONE_OVER_ALPHA2, rate_days(kappa, tau)),
                (ONE_OVER_BETA, rate_days(rho, tau)),
                (ONE_OVER_GAMMA, rate_days(sigma, tau)),
            ],
        }
    }
}

/// Look up a required rate parameter and validate its domain.
fn required_rate(
    kind: ModelKind, params: &BTreeMap<String, f64>, name: &'static str,
) -> OdeResult<f64> {
    let value = lookup(kind, params, name)?;
    if !value.is_finite() {
        return Err(OdeError::InvalidParameter { name, value, reason: "rates must be finite" });
    }
    if value <= 0.0 {
        return Err(OdeError::InvalidParameter {
            name,
            value,
            reason: "rates must be strictly positive",
        });
    }
    Ok(value)
}

/// Look up a required fraction parameter and validate its domain.
fn required_fraction(
    kind: ModelKind, params: &BTreeMap<String, f64>, name: &'static str,
) -> OdeResult<f64> {
    let value = lookup(kind, params, name)?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(OdeError::InvalidParameter {
            name,
            value,
            reason: "fractions must lie in [0, 1]",
        });
    }
    Ok(value)
}

fn lookup(kind: ModelKind, params: &BTreeMap<String, f64>, name: &'static str) -> OdeResult<f64> {
    params
        .get(name)
        .copied()
        .ok_or(OdeError::MissingParameter { model: kind.name(), name })
}

/// Days implied by one rate at the given time-step, rounded to whole days.
fn rate_days(rate: f64, tau: Tau) -> f64 {
    (f64::from(tau.minutes()) / MINUTES_PER_DAY as f64 / rate).round()
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10_f64.powi(digits as i32);
    (value * scale).round() / scale
}
