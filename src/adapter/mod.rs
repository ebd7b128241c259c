//! adapter — contracts for external collaborators.
//!
//! Purpose
//! -------
//! Hold the trait seams through which the tracker reaches functionality
//! that lives outside this crate: change-point trend detection and
//! per-phase parameter estimation. The crate ships no implementation of
//! either; callers plug in their own backends.
//!
//! Key behaviors
//! -------------
//! - [`trend`] defines [`TrendDetector`] and the past-only
//!   [`ObservationSeries`] input it receives.
//! - [`estimation`] defines [`EstimationEngine`] with its
//!   [`PhaseInput`] / [`PhaseEstimate`] exchange types.
//! - [`errors`] normalizes backend failures into [`AdapterError`].
//!
//! Conventions
//! -----------
//! - Collaborator calls are synchronous and blocking; the tracker treats
//!   them as opaque and performs no retries.

pub mod errors;
pub mod estimation;
pub mod trend;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{AdapterError, AdapterResult};
pub use self::estimation::{EstimationEngine, PhaseEstimate, PhaseInput};
pub use self::trend::{ObservationSeries, TrendDetector};
