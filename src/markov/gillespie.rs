//! One-step Gillespie sampler for the health-state CTMC.
//!
//! Draws a single transition at a time from the rate matrix: an
//! exponential holding time followed by a categorical destination draw.

use rand::rngs::StdRng;
use rand::Rng;

use crate::rates::TransitionRateMatrix;

/// One-step transition sampler over a validated rate matrix.
pub struct Gillespie<'a> {
    rates: &'a TransitionRateMatrix,
}

impl<'a> Gillespie<'a> {
    /// Create a sampler borrowing the cohort's shared rate matrix.
    pub fn new(rates: &'a TransitionRateMatrix) -> Self {
        Self { rates }
    }

    /// Draw the holding time and destination index for one transition
    /// out of `current`.
    ///
    /// Returns `None` when `current` has no positive outgoing rate, i.e.
    /// the chain is absorbed and cannot leave. Otherwise makes exactly
    /// two draws from `rng` in a fixed order (holding time first, then
    /// destination) so that a seeded generator reproduces the same
    /// transition.
    pub fn next_transition(&self, current: usize, rng: &mut StdRng) -> Option<(f64, usize)> {
        let total_rate = self.rates.total_outgoing_rate(current);
        if total_rate <= 0.0 {
            return None;
        }

        // Draw 1: exponential holding time at the total outgoing rate.
        let dt = -rng.gen::<f64>().ln() / total_rate;

        // Draw 2: destination weighted by the individual outgoing rates.
        let u: f64 = rng.gen::<f64>() * total_rate;
        let mut cumsum = 0.0;
        let mut target = current;
        for (to, &rate) in self.rates.row(current).iter().enumerate() {
            if to == current || rate <= 0.0 {
                continue;
            }
            cumsum += rate;
            target = to;
            if u <= cumsum {
                break;
            }
        }

        Some((dt, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn stroke_model() -> TransitionRateMatrix {
        TransitionRateMatrix::from_rows(vec![
            vec![0.0, 0.15, 0.0, 0.02],
            vec![0.3, 0.0, 0.1, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_absorbing_state_returns_none() {
        let rates = stroke_model();
        let gillespie = Gillespie::new(&rates);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(gillespie.next_transition(2, &mut rng), None);
        assert_eq!(gillespie.next_transition(3, &mut rng), None);
    }

    #[test]
    fn test_same_seed_reproduces_transition() {
        let rates = stroke_model();
        let gillespie = Gillespie::new(&rates);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let step_a = gillespie.next_transition(0, &mut rng_a);
        let step_b = gillespie.next_transition(0, &mut rng_b);
        assert_eq!(step_a, step_b);
    }

    #[test]
    fn test_holding_times_positive() {
        let rates = stroke_model();
        let gillespie = Gillespie::new(&rates);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..1000 {
            let (dt, _) = gillespie.next_transition(0, &mut rng).unwrap();
            assert!(dt > 0.0);
        }
    }

    #[test]
    fn test_destination_has_positive_rate() {
        let rates = stroke_model();
        let gillespie = Gillespie::new(&rates);
        let mut rng = StdRng::seed_from_u64(23);

        // WELL only flows to STROKE (1) and NATURAL_DEATH (3).
        for _ in 0..1000 {
            let (_, target) = gillespie.next_transition(0, &mut rng).unwrap();
            assert!(target == 1 || target == 3);
        }
    }

    #[test]
    fn test_single_exit_always_taken() {
        let rates = TransitionRateMatrix::from_rows(vec![
            vec![0.0, 0.0, 0.0, 0.08],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let gillespie = Gillespie::new(&rates);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let (_, target) = gillespie.next_transition(0, &mut rng).unwrap();
            assert_eq!(target, 3);
        }
    }

    #[test]
    fn test_holding_time_mean_matches_rate() {
        let rates = stroke_model();
        let gillespie = Gillespie::new(&rates);
        let mut rng = StdRng::seed_from_u64(99);

        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let (dt, _) = gillespie.next_transition(0, &mut rng).unwrap();
            sum += dt;
        }
        // Exponential with total rate 0.17 has mean ~5.88.
        let mean = sum / n as f64;
        assert!((mean - 1.0 / 0.17).abs() < 0.2);
    }
}
