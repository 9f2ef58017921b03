//! Lattice and distribution function
//!
//! Gantree: L1_Lattice → Lattice, DistributionFunction
//!
//! The D1Q2 lattice holds `M` sites. Each site carries two occupation
//! probabilities, one per velocity direction, stored as a 2×M array.
//! Entry `(i, k)` is carried by qubit `i + 2k` on the quantum path.

use crate::constants::d1q2::{self, NUM_VELOCITIES};
use crate::error::{QlbmError, QlbmResult};
use crate::types::{DensityProfile, Probability};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Lattice
// ============================================================================

/// One-dimensional lattice of `M` sites indexed `0..M`
/// Gantree: Lattice // 격자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    num_sites: usize,
}

impl Lattice {
    /// Create a lattice with the given number of sites
    pub fn new(num_sites: usize) -> Self {
        Self { num_sites }
    }

    /// Lattice covering a domain of length `L`: sites `0..=L`
    pub fn from_length(length: usize) -> Self {
        Self::new(length + 1)
    }

    /// Number of sites `M`
    pub fn num_sites(&self) -> usize {
        self.num_sites
    }

    /// Number of qubits `n = 2M`
    pub fn num_qubits(&self) -> usize {
        NUM_VELOCITIES * self.num_sites
    }

    /// Site coordinates `x_k = k`
    pub fn positions(&self) -> Vec<f64> {
        (0..self.num_sites).map(|k| k as f64).collect()
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lattice(D1Q2, {} sites, {} qubits)", self.num_sites, self.num_qubits())
    }
}

// ============================================================================
// Gaussian Seed Profile
// ============================================================================

/// Gaussian seed density `rho(x) = 1/4 * exp(-(x - mu0)^2 / sigma0^2) + 1/2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianProfile {
    /// Center of the bump
    pub mu0: f64,

    /// Width of the bump
    pub sigma0: f64,
}

impl GaussianProfile {
    /// Create a new profile
    pub fn new(mu0: f64, sigma0: f64) -> Self {
        Self { mu0, sigma0 }
    }

    /// Density at coordinate `x`
    pub fn density_at(&self, x: f64) -> f64 {
        0.25 * (-(x - self.mu0).powi(2) / self.sigma0.powi(2)).exp() + 0.5
    }

    /// Density sampled on every lattice site
    pub fn density(&self, lattice: &Lattice) -> DensityProfile {
        lattice
            .positions()
            .into_iter()
            .map(|x| self.density_at(x))
            .collect()
    }
}

// ============================================================================
// Distribution Function
// ============================================================================

/// Occupation probabilities `f[i][k]` for velocity `i` at site `k`
/// Gantree: DistributionFunction // 분포 함수 (2×M)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionFunction {
    rows: [Vec<f64>; NUM_VELOCITIES],
}

impl DistributionFunction {
    /// All-zero distribution over `num_sites` sites
    pub fn zeros(num_sites: usize) -> Self {
        Self {
            rows: [vec![0.0; num_sites], vec![0.0; num_sites]],
        }
    }

    /// Build from the two velocity rows, validating every entry
    pub fn from_rows(right: Vec<f64>, left: Vec<f64>) -> QlbmResult<Self> {
        if right.len() != left.len() {
            return Err(QlbmError::ShapeMismatch {
                expected: right.len(),
                actual: left.len(),
            });
        }
        let f = Self { rows: [right, left] };
        f.validate()?;
        Ok(f)
    }

    /// Equilibrium distribution for a density profile:
    /// `f_eq[i] = w_i * (1 + c_i * u_x / c_s^2) * rho`
    pub fn equilibrium(density: &[f64]) -> QlbmResult<Self> {
        let mut f = Self::zeros(density.len());
        for i in 0..NUM_VELOCITIES {
            let factor = d1q2::WEIGHTS[i]
                * (1.0 + d1q2::VELOCITIES[i] * d1q2::ADVECTION_VELOCITY / d1q2::SOUND_SPEED_SQ);
            for (k, rho) in density.iter().enumerate() {
                f.rows[i][k] = factor * rho;
            }
        }
        f.validate()?;
        Ok(f)
    }

    /// Number of lattice sites
    pub fn num_sites(&self) -> usize {
        self.rows[0].len()
    }

    /// Entry `f[velocity][site]`
    ///
    /// # Panics
    /// Panics if `velocity >= 2` or `site >= num_sites()`.
    #[inline]
    pub fn get(&self, velocity: usize, site: usize) -> f64 {
        self.rows[velocity][site]
    }

    /// Set entry `f[velocity][site]`
    ///
    /// # Panics
    /// Panics if `velocity >= 2` or `site >= num_sites()`.
    #[inline]
    pub fn set(&mut self, velocity: usize, site: usize, value: f64) {
        self.rows[velocity][site] = value;
    }

    /// Row of one velocity direction
    pub fn row(&self, velocity: usize) -> &[f64] {
        &self.rows[velocity]
    }

    /// Iterate entries as `(velocity, site, value)` in qubit order `i + 2k`
    pub fn iter_qubit_order(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.num_sites())
            .flat_map(move |k| (0..NUM_VELOCITIES).map(move |i| (i, k, self.rows[i][k])))
    }

    /// Density `rho[k] = f[0][k] + f[1][k]`
    pub fn density(&self) -> DensityProfile {
        self.rows[0]
            .iter()
            .zip(&self.rows[1])
            .map(|(a, b)| a + b)
            .collect()
    }

    /// Check every entry is a probability
    pub fn validate(&self) -> QlbmResult<()> {
        for (velocity, site, value) in self.iter_qubit_order() {
            Probability::new(value).map_err(|_| QlbmError::Encoding {
                velocity,
                site,
                value,
            })?;
        }
        Ok(())
    }

    /// Reapply the periodic boundary:
    /// `f[0][0] <- f[0][M-1]` and `f[1][M-1] <- f[1][0]`
    /// Gantree: apply_periodic_boundary(&mut) // 주기 경계
    pub fn apply_periodic_boundary(&mut self) {
        let m = self.num_sites();
        if m == 0 {
            return;
        }
        self.rows[0][0] = self.rows[0][m - 1];
        self.rows[1][m - 1] = self.rows[1][0];
    }
}

impl fmt::Display for DistributionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DistributionFunction({} sites)", self.num_sites())?;
        for (i, row) in self.rows.iter().enumerate() {
            let values: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            writeln!(f, "  f[{}] = [{}]", i, values.join(", "))?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
