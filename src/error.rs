//! Error types for model validation and cohort aggregation.

use crate::states::HealthState;

/// Errors surfaced by model validation, simulation boundaries, and
/// outcome aggregation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Rate matrix dimensions do not match the health-state set.
    #[error("invalid model: expected a {expected}x{expected} rate matrix, got {rows}x{cols}")]
    DimensionMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    /// A transition rate is negative.
    #[error("invalid model: rate {rate} for {from} -> {to} is negative")]
    NegativeRate {
        from: HealthState,
        to: HealthState,
        rate: f64,
    },
    /// A non-absorbing state has zero total outgoing rate.
    #[error("invalid model: {state} has no outgoing rate but is not absorbing")]
    DeadEndState { state: HealthState },
    /// An absorbing state has a positive outgoing rate.
    #[error("invalid model: absorbing state {state} has positive outgoing rate")]
    AbsorbingOutflow { state: HealthState },
    /// Mean survival time requested but no patient ever died.
    #[error("empty data: no deaths observed, mean survival time is undefined")]
    NoDeathsObserved,
    /// Simulation horizon must be positive and finite.
    #[error("invalid argument: simulation length must be positive, got {0}")]
    NonPositiveHorizon(f64),
    /// Cohort population size must be positive.
    #[error("invalid argument: population size must be positive")]
    EmptyPopulation,
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, SimulationError>;
