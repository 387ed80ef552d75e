//! Transition rate matrix for the health-state CTMC.
//!
//! A square, non-negative matrix indexed by [`HealthState`] indices.
//! The diagonal is unused. Rows of absorbing states carry no outgoing
//! rate. Validated once at construction and immutable afterwards, so it
//! can be shared read-only across all patients in a cohort.

use ndarray::{Array2, ArrayView1};

use crate::error::{Result, SimulationError};
use crate::states::HealthState;

/// Validated transition rate matrix.
///
/// Entry `(i, j)` is the rate of the `i -> j` transition in events per
/// unit time. Construction fails if the matrix cannot drive a well-formed
/// chain, so simulation code never re-checks it.
#[derive(Clone, Debug)]
pub struct TransitionRateMatrix {
    rates: Array2<f64>,
}

impl TransitionRateMatrix {
    /// Build from an ndarray matrix, validating against the state set.
    pub fn from_matrix(rates: Array2<f64>) -> Result<Self> {
        let (rows, cols) = rates.dim();
        if rows != HealthState::COUNT || cols != HealthState::COUNT {
            return Err(SimulationError::DimensionMismatch {
                expected: HealthState::COUNT,
                rows,
                cols,
            });
        }

        let matrix = Self { rates };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Build from per-state rows of rates.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n != HealthState::COUNT || rows.iter().any(|row| row.len() != n) {
            let cols = rows.iter().map(|row| row.len()).max().unwrap_or(0);
            return Err(SimulationError::DimensionMismatch {
                expected: HealthState::COUNT,
                rows: n,
                cols,
            });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let rates = Array2::from_shape_vec((n, n), flat)
            .map_err(|_| SimulationError::DimensionMismatch {
                expected: HealthState::COUNT,
                rows: n,
                cols: n,
            })?;
        Self::from_matrix(rates)
    }

    /// Check non-negativity and absorbing-row consistency.
    fn validate(&self) -> Result<()> {
        for from in HealthState::ALL {
            for to in HealthState::ALL {
                if to != from && self.rate(from.index(), to.index()) < 0.0 {
                    return Err(SimulationError::NegativeRate {
                        from,
                        to,
                        rate: self.rate(from.index(), to.index()),
                    });
                }
            }

            let total = self.total_outgoing_rate(from.index());
            if from.is_absorbing() && total > 0.0 {
                return Err(SimulationError::AbsorbingOutflow { state: from });
            }
            if !from.is_absorbing() && total <= 0.0 {
                return Err(SimulationError::DeadEndState { state: from });
            }
        }
        Ok(())
    }

    /// Matrix dimension (number of states).
    #[inline]
    pub fn n_states(&self) -> usize {
        self.rates.nrows()
    }

    /// Rate of the `from -> to` transition.
    #[inline]
    pub fn rate(&self, from: usize, to: usize) -> f64 {
        self.rates[[from, to]]
    }

    /// Outgoing rate row for a state.
    #[inline]
    pub fn row(&self, from: usize) -> ArrayView1<'_, f64> {
        self.rates.row(from)
    }

    /// Sum of off-diagonal rates out of a state.
    pub fn total_outgoing_rate(&self, from: usize) -> f64 {
        self.row(from)
            .iter()
            .enumerate()
            .filter(|(to, _)| *to != from)
            .map(|(_, rate)| rate)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_valid_model_accepted() {
        let matrix = stroke_model();
        assert_eq!(matrix.n_states(), HealthState::COUNT);
        assert!((matrix.total_outgoing_rate(0) - 0.17).abs() < 1e-12);
        assert_eq!(matrix.total_outgoing_rate(2), 0.0);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = TransitionRateMatrix::from_rows(vec![
            vec![0.0, -0.1, 0.0, 0.02],
            vec![0.3, 0.0, 0.1, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        assert!(matches!(
            result,
            Err(SimulationError::NegativeRate {
                from: HealthState::Well,
                to: HealthState::Stroke,
                ..
            })
        ));
    }

    #[test]
    fn test_dead_end_transient_state_rejected() {
        let result = TransitionRateMatrix::from_rows(vec![
            vec![0.0, 0.15, 0.0, 0.02],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        assert_eq!(
            result.unwrap_err(),
            SimulationError::DeadEndState {
                state: HealthState::Stroke
            }
        );
    }

    #[test]
    fn test_absorbing_outflow_rejected() {
        let result = TransitionRateMatrix::from_rows(vec![
            vec![0.0, 0.15, 0.0, 0.02],
            vec![0.3, 0.0, 0.1, 0.0],
            vec![0.5, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        assert_eq!(
            result.unwrap_err(),
            SimulationError::AbsorbingOutflow {
                state: HealthState::StrokeDead
            }
        );
    }

    #[test]
    fn test_wrong_dimensions_rejected() {
        let result = TransitionRateMatrix::from_rows(vec![vec![0.0, 0.1], vec![0.0, 0.0]]);
        assert!(matches!(
            result,
            Err(SimulationError::DimensionMismatch { rows: 2, .. })
        ));
    }

    #[test]
    fn test_diagonal_ignored() {
        // A negative diagonal entry is unused and must not fail validation.
        let matrix = TransitionRateMatrix::from_rows(vec![
            vec![-1.0, 0.15, 0.0, 0.02],
            vec![0.3, -2.0, 0.1, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert!((matrix.total_outgoing_rate(0) - 0.17).abs() < 1e-12);
    }
}
