//! Continuous-time Markov cohort simulation for health-state transition
//! models.
//!
//! Simulates individual patients through a closed set of health states
//! with Gillespie's algorithm over a transition rate matrix, then
//! aggregates many independent patients into cohort-level outcomes:
//! mean survival time, mean stroke count, and a population survival
//! curve.
//!
//! Each patient's random stream is seeded from its own id, so runs are
//! reproducible and the per-patient work parallelizes without shared
//! mutable state.
//!
//! # Example
//!
//! ```
//! use markov_cohort::{Cohort, TransitionRateMatrix};
//!
//! # fn main() -> markov_cohort::Result<()> {
//! // Rows/columns in WELL, STROKE, STROKE_DEAD, NATURAL_DEATH order,
//! // rates in events per year.
//! let rates = TransitionRateMatrix::from_rows(vec![
//!     vec![0.0, 0.15, 0.0, 0.02],
//!     vec![0.3, 0.0, 0.1, 0.0],
//!     vec![0.0, 0.0, 0.0, 0.0],
//!     vec![0.0, 0.0, 0.0, 0.0],
//! ])?;
//!
//! let mut cohort = Cohort::new(1, 500);
//! cohort.simulate(&rates, 50.0)?;
//!
//! let outcomes = cohort.outcomes();
//! assert!(outcomes.mean_survival_time().is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod markov;
pub mod rates;
pub mod states;

pub use error::{Result, SimulationError};
pub use markov::{
    Cohort, CohortOutcomes, Gillespie, Patient, PatientOutcome, PatientStateMonitor, SurvivalCurve,
};
pub use rates::TransitionRateMatrix;
pub use states::HealthState;
