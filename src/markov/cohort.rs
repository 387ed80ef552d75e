//! Cohort-level simulation: run N independent patients and aggregate.
//!
//! The map phase produces one independent [`PatientOutcome`] per patient;
//! the reduce phase feeds them to the aggregator in index order. Because
//! every patient's random stream is seeded from its own id, the map phase
//! can run sequentially or across the rayon pool with identical results.

use rayon::prelude::*;
use tracing::{debug, info};

use super::outcomes::CohortOutcomes;
use super::patient::{Patient, PatientOutcome};
use crate::error::{Result, SimulationError};
use crate::rates::TransitionRateMatrix;

/// A cohort of independently simulated patients.
pub struct Cohort {
    id: u64,
    pop_size: usize,
    outcomes: CohortOutcomes,
}

impl Cohort {
    /// Create a cohort with its id and population size.
    pub fn new(id: u64, pop_size: usize) -> Self {
        Self {
            id,
            pop_size,
            outcomes: CohortOutcomes::new(),
        }
    }

    /// Cohort id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Population size.
    #[inline]
    pub fn pop_size(&self) -> usize {
        self.pop_size
    }

    /// Aggregated outcomes, finalized once simulation completes.
    pub fn outcomes(&self) -> &CohortOutcomes {
        &self.outcomes
    }

    /// Boundary validation, before any patient is simulated.
    fn check_arguments(&self, sim_length: f64) -> Result<()> {
        if !sim_length.is_finite() || sim_length <= 0.0 {
            return Err(SimulationError::NonPositiveHorizon(sim_length));
        }
        if self.pop_size == 0 {
            return Err(SimulationError::EmptyPopulation);
        }
        Ok(())
    }

    /// Patient id for slot `i`: globally unique across cohorts as long
    /// as cohort ids and sizes are chosen to avoid collision.
    fn patient_id(&self, i: usize) -> u64 {
        self.id * self.pop_size as u64 + i as u64
    }

    fn run_patient(
        &self,
        i: usize,
        rates: &TransitionRateMatrix,
        sim_length: f64,
    ) -> PatientOutcome {
        let mut patient = Patient::new(self.patient_id(i));
        patient.simulate(rates, sim_length);
        patient.monitor().outcome()
    }

    /// Simulate every patient sequentially and aggregate the outcomes.
    pub fn simulate(&mut self, rates: &TransitionRateMatrix, sim_length: f64) -> Result<()> {
        self.check_arguments(sim_length)?;
        debug!(
            cohort = self.id,
            pop_size = self.pop_size,
            sim_length,
            "simulating cohort"
        );

        let outcomes: Vec<PatientOutcome> = (0..self.pop_size)
            .map(|i| self.run_patient(i, rates, sim_length))
            .collect();
        self.reduce(outcomes)
    }

    /// Simulate patients across the rayon thread pool.
    ///
    /// Produces the same outcomes as [`simulate`](Cohort::simulate): the
    /// shared rate matrix is read-only, each patient owns its seeded
    /// stream, and collection preserves patient order.
    pub fn simulate_parallel(
        &mut self,
        rates: &TransitionRateMatrix,
        sim_length: f64,
    ) -> Result<()> {
        self.check_arguments(sim_length)?;
        debug!(
            cohort = self.id,
            pop_size = self.pop_size,
            sim_length,
            "simulating cohort in parallel"
        );

        let outcomes: Vec<PatientOutcome> = (0..self.pop_size)
            .into_par_iter()
            .map(|i| self.run_patient(i, rates, sim_length))
            .collect();
        self.reduce(outcomes)
    }

    /// Reduce per-patient outcomes into the cohort aggregate.
    fn reduce(&mut self, outcomes: Vec<PatientOutcome>) -> Result<()> {
        for outcome in &outcomes {
            self.outcomes.extract_outcome(outcome);
        }
        self.outcomes.calculate(self.pop_size)?;

        info!(
            cohort = self.id,
            deaths = self.outcomes.survival_times().len(),
            "cohort aggregation complete"
        );
        Ok(())
    }
}
