//! Continuous-time Markov simulation of patient cohorts.
//!
//! This module provides:
//! - Gillespie: one-step CTMC sampler over the rate matrix
//! - Patient / PatientStateMonitor: per-patient trajectory simulation
//! - Cohort: sequential and parallel cohort drivers
//! - CohortOutcomes / SurvivalCurve: outcome aggregation

pub mod cohort;
pub mod gillespie;
pub mod outcomes;
pub mod patient;

pub use cohort::Cohort;
pub use gillespie::Gillespie;
pub use outcomes::{CohortOutcomes, SurvivalCurve};
pub use patient::{Patient, PatientOutcome, PatientStateMonitor};
