//! Cohort outcome aggregation and the population survival curve.

use serde::{Deserialize, Serialize};

use super::patient::PatientOutcome;
use crate::error::{Result, SimulationError};

/// Right-continuous step function of the living-population count.
///
/// Breakpoints are ordered by time. The first is `(0.0, initial_size)`;
/// each recorded death time lowers the count by one, with simultaneous
/// deaths coalesced at their shared timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    breakpoints: Vec<(f64, usize)>,
}

impl SurvivalCurve {
    /// Build the curve from an initial population and its death times.
    ///
    /// Death times may arrive in any order; they are sorted once here.
    pub fn from_death_times(initial_size: usize, death_times: &[f64]) -> Self {
        let mut sorted = death_times.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut breakpoints = vec![(0.0, initial_size)];
        let mut living = initial_size;
        for &time in &sorted {
            living = living.saturating_sub(1);
            match breakpoints.last_mut() {
                Some(last) if last.0 == time => last.1 = living,
                _ => breakpoints.push((time, living)),
            }
        }

        Self { breakpoints }
    }

    /// Number of patients still alive at `t` (right-continuous lookup).
    pub fn living_at(&self, t: f64) -> usize {
        let idx = self.breakpoints.partition_point(|&(time, _)| time <= t);
        if idx == 0 {
            self.breakpoints[0].1
        } else {
            self.breakpoints[idx - 1].1
        }
    }

    /// Population size at time zero.
    #[inline]
    pub fn initial_size(&self) -> usize {
        self.breakpoints[0].1
    }

    /// Ordered `(time, living_count)` breakpoints.
    #[inline]
    pub fn breakpoints(&self) -> &[(f64, usize)] {
        &self.breakpoints
    }
}

/// Accumulated outcomes across one cohort.
///
/// Populated one patient at a time via [`extract_outcome`], finalized
/// once with [`calculate`].
///
/// [`extract_outcome`]: CohortOutcomes::extract_outcome
/// [`calculate`]: CohortOutcomes::calculate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortOutcomes {
    survival_times: Vec<f64>,
    stroke_counts: Vec<u32>,
    mean_survival_time: Option<f64>,
    mean_stroke_count: Option<f64>,
    survival_curve: Option<SurvivalCurve>,
}

impl CohortOutcomes {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one simulated patient's terminal outcome.
    ///
    /// A patient alive at the horizon contributes no survival time but
    /// always contributes a stroke count, so `stroke_counts` ends up with
    /// one entry per patient.
    pub fn extract_outcome(&mut self, outcome: &PatientOutcome) {
        if let Some(time) = outcome.survival_time {
            self.survival_times.push(time);
        }
        self.stroke_counts.push(outcome.n_strokes);
    }

    /// Finalize summary statistics and the survival curve.
    ///
    /// Fails with [`SimulationError::NoDeathsObserved`] when no patient
    /// died before the horizon; the mean survival time is undefined in
    /// that case and must be reported, not defaulted. Idempotent over the
    /// same accumulated data.
    pub fn calculate(&mut self, initial_pop_size: usize) -> Result<()> {
        if initial_pop_size == 0 {
            return Err(SimulationError::EmptyPopulation);
        }
        if self.survival_times.is_empty() {
            return Err(SimulationError::NoDeathsObserved);
        }

        let n_deaths = self.survival_times.len() as f64;
        self.mean_survival_time = Some(self.survival_times.iter().sum::<f64>() / n_deaths);

        let n_patients = self.stroke_counts.len() as f64;
        self.mean_stroke_count =
            Some(self.stroke_counts.iter().map(|&n| n as f64).sum::<f64>() / n_patients);

        self.survival_curve = Some(SurvivalCurve::from_death_times(
            initial_pop_size,
            &self.survival_times,
        ));
        Ok(())
    }

    /// Observed death times, in extraction order.
    #[inline]
    pub fn survival_times(&self) -> &[f64] {
        &self.survival_times
    }

    /// Per-patient stroke counts, one entry per patient.
    #[inline]
    pub fn stroke_counts(&self) -> &[u32] {
        &self.stroke_counts
    }

    /// Mean survival time over the patients who died. Set by `calculate`.
    #[inline]
    pub fn mean_survival_time(&self) -> Option<f64> {
        self.mean_survival_time
    }

    /// Mean stroke count over all patients. Set by `calculate`.
    #[inline]
    pub fn mean_stroke_count(&self) -> Option<f64> {
        self.mean_stroke_count
    }

    /// Population survival curve. Set by `calculate`.
    pub fn survival_curve(&self) -> Option<&SurvivalCurve> {
        self.survival_curve.as_ref()
    }
}
