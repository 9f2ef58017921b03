//! Error metrics between density profiles
//!
//! Gantree: L6_Engine → ComparisonMetric

use qlbm_core::{QlbmError, QlbmResult};
use serde::{Deserialize, Serialize};
use std::fmt;

fn check_lengths(a: &[f64], b: &[f64]) -> QlbmResult<()> {
    if a.len() != b.len() {
        return Err(QlbmError::ShapeMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Mean squared error; zero for empty profiles
pub fn mean_squared_error(a: &[f64], b: &[f64]) -> QlbmResult<f64> {
    check_lengths(a, b)?;
    if a.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Ok(sum / a.len() as f64)
}

/// Root mean squared error
/// Gantree: root_mean_squared_error(a, b) -> Result<f64> // RMSE
pub fn root_mean_squared_error(a: &[f64], b: &[f64]) -> QlbmResult<f64> {
    Ok(mean_squared_error(a, b)?.sqrt())
}

/// Quantum versus classical comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetric {
    /// Root mean squared error
    pub rmse: f64,

    /// Mean squared error
    pub mse: f64,

    /// Largest pointwise deviation
    pub max_abs_error: f64,
}

impl ComparisonMetric {
    /// Compare two profiles of equal length
    pub fn compare(a: &[f64], b: &[f64]) -> QlbmResult<Self> {
        let mse = mean_squared_error(a, b)?;
        let max_abs_error = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max);
        Ok(Self {
            rmse: mse.sqrt(),
            mse,
            max_abs_error,
        })
    }

    /// RMSE at or below `tolerance`
    pub fn within(&self, tolerance: f64) -> bool {
        self.rmse <= tolerance
    }
}

impl fmt::Display for ComparisonMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rmse={:.6}, mse={:.3e}, max_abs={:.6}",
            self.rmse, self.mse, self.max_abs_error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identical_profiles() {
        let a = [0.5, 0.6, 0.7];
        assert_eq!(root_mean_squared_error(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_known_value() {
        let a = [0.0, 0.0, 0.0, 0.0];
        let b = [1.0, -1.0, 1.0, -1.0];
        assert_abs_diff_eq!(mean_squared_error(&a, &b).unwrap(), 1.0);
        assert_abs_diff_eq!(root_mean_squared_error(&a, &b).unwrap(), 1.0);

        let metric = ComparisonMetric::compare(&[0.1, 0.2], &[0.1, 0.5]).unwrap();
        assert_abs_diff_eq!(metric.max_abs_error, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(metric.mse, 0.045, epsilon = 1e-12);
        assert!(metric.within(0.25));
        assert!(!metric.within(0.2));
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            root_mean_squared_error(&[0.1, 0.2], &[0.1]).unwrap_err(),
            QlbmError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_profiles() {
        assert_eq!(mean_squared_error(&[], &[]).unwrap(), 0.0);
    }
}
