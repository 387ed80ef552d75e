//! Per-patient trajectory simulation and outcome bookkeeping.
//!
//! A patient walks the CTMC from its initial state until it is absorbed
//! or the simulation horizon is reached. The state monitor tracks the
//! current state and the derived outcomes (survival time, stroke count)
//! as transitions are applied.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::gillespie::Gillespie;
use crate::rates::TransitionRateMatrix;
use crate::states::HealthState;

/// Terminal outcome of one simulated patient.
///
/// `survival_time` is `None` for a patient still alive at the horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientOutcome {
    pub final_state: HealthState,
    pub survival_time: Option<f64>,
    pub n_strokes: u32,
}

/// Tracks one patient's current state and derived outcome counters.
#[derive(Clone, Debug)]
pub struct PatientStateMonitor {
    current_state: HealthState,
    survival_time: Option<f64>,
    n_strokes: u32,
}

impl PatientStateMonitor {
    /// Start monitoring from an initial state.
    ///
    /// A patient created directly in a death-type state is dead at time
    /// zero.
    pub fn new(initial_state: HealthState) -> Self {
        Self {
            current_state: initial_state,
            survival_time: initial_state.is_death().then_some(0.0),
            n_strokes: 0,
        }
    }

    /// Apply an observed `(time, new_state)` update.
    ///
    /// The death and stroke checks are independent: a fatal stroke sets
    /// the survival time and counts as a stroke in the same update.
    /// Re-reporting the held state at the horizon clamp is not a new
    /// stroke, so the stroke counter only moves on an actual change of
    /// state.
    pub fn update(&mut self, time: f64, new_state: HealthState) {
        if new_state.is_death() {
            self.survival_time = Some(time);
        }
        if new_state.is_stroke_event() && new_state != self.current_state {
            self.n_strokes += 1;
        }
        self.current_state = new_state;
    }

    /// State the patient currently holds.
    #[inline]
    pub fn current_state(&self) -> HealthState {
        self.current_state
    }

    /// Time of death, if a death-type state was entered.
    #[inline]
    pub fn survival_time(&self) -> Option<f64> {
        self.survival_time
    }

    /// Number of stroke events applied so far.
    #[inline]
    pub fn n_strokes(&self) -> u32 {
        self.n_strokes
    }

    /// Extract the terminal outcome tuple.
    pub fn outcome(&self) -> PatientOutcome {
        PatientOutcome {
            final_state: self.current_state,
            survival_time: self.survival_time,
            n_strokes: self.n_strokes,
        }
    }
}

/// A single simulated patient.
///
/// Owns its state monitor exclusively; the rate matrix is shared
/// read-only across the cohort.
pub struct Patient {
    id: u64,
    monitor: PatientStateMonitor,
}

impl Patient {
    /// Create a patient starting in the WELL state.
    pub fn new(id: u64) -> Self {
        Self::with_initial_state(id, HealthState::Well)
    }

    /// Create a patient starting in an arbitrary state.
    pub fn with_initial_state(id: u64, initial_state: HealthState) -> Self {
        Self {
            id,
            monitor: PatientStateMonitor::new(initial_state),
        }
    }

    /// Patient id, which also seeds its private random stream.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Read access to the state monitor.
    #[inline]
    pub fn monitor(&self) -> &PatientStateMonitor {
        &self.monitor
    }

    /// Simulate this patient's trajectory up to `sim_length`.
    ///
    /// The random stream is seeded from the patient id, so the same id
    /// against the same rate matrix reproduces the same trajectory
    /// regardless of any other patient.
    pub fn simulate(&mut self, rates: &TransitionRateMatrix, sim_length: f64) {
        let mut rng = StdRng::seed_from_u64(self.id);
        let gillespie = Gillespie::new(rates);

        let mut t = 0.0;
        loop {
            let current = self.monitor.current_state().index();
            // Absorbing state: stop, the monitor is already up to date.
            let Some((dt, target)) = gillespie.next_transition(current, &mut rng) else {
                break;
            };

            if t + dt > sim_length {
                // Right-censor at the horizon: the sampled destination is
                // discarded and the patient holds the current state
                // through sim_length.
                self.monitor.update(sim_length, self.monitor.current_state());
                break;
            }

            t += dt;
            let Some(new_state) = HealthState::from_index(target) else {
                break;
            };
            self.monitor.update(t, new_state);
        }
    }
}
