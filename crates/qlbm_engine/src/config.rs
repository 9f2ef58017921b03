//! Simulation configuration
//!
//! Gantree: L6_Engine → SimulationConfig
//!
//! Lattice size, sampling budget, run length and Gaussian seed parameters
//! for one diffusion run.

use qlbm_core::execution::{DEFAULT_RMSE_TOLERANCE, DEFAULT_SHOTS, MAX_SHOTS, MIN_SHOTS};
use qlbm_core::{GaussianProfile, Lattice, QlbmError, QlbmResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diffusion run configuration
/// Gantree: SimulationConfig // 시뮬레이션 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    // ========================================================================
    // Lattice Parameters
    // ========================================================================
    /// Lattice length `L`; the lattice has `L + 1` sites
    pub lattice_length: usize,

    /// Gaussian centre
    pub mu0: f64,

    /// Gaussian width
    pub sigma0: f64,

    // ========================================================================
    // Execution Parameters
    // ========================================================================
    /// Number of shots per quantum step
    pub shots: u64,

    /// Number of time steps
    pub time_steps: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// RMSE above which the run is reported as diverged
    pub rmse_tolerance: f64,
}

impl SimulationConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Configuration for a lattice of length `L`
    ///
    /// `sigma0 = L / 10` and `mu0 = ceil(L / 2)`.
    pub fn new(lattice_length: usize) -> Self {
        Self {
            lattice_length,
            mu0: ((lattice_length + 1) / 2) as f64,
            sigma0: lattice_length as f64 / 10.0,
            shots: DEFAULT_SHOTS,
            time_steps: 1,
            seed: None,
            rmse_tolerance: DEFAULT_RMSE_TOLERANCE,
        }
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QlbmResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QlbmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set number of time steps
    pub fn with_time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = time_steps;
        self
    }

    /// Set Gaussian parameters
    pub fn with_gaussian(mut self, mu0: f64, sigma0: f64) -> Self {
        self.mu0 = mu0;
        self.sigma0 = sigma0;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set RMSE tolerance
    pub fn with_rmse_tolerance(mut self, tolerance: f64) -> Self {
        self.rmse_tolerance = tolerance;
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Lattice described by this configuration
    pub fn lattice(&self) -> Lattice {
        Lattice::from_length(self.lattice_length)
    }

    /// Number of sites `M = L + 1`
    pub fn num_sites(&self) -> usize {
        self.lattice().num_sites()
    }

    /// Number of qubits `n = 2M`
    pub fn num_qubits(&self) -> usize {
        self.lattice().num_qubits()
    }

    /// Gaussian seed profile
    pub fn gaussian(&self) -> GaussianProfile {
        GaussianProfile::new(self.mu0, self.sigma0)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QlbmResult<()> {
        if self.shots < MIN_SHOTS || self.shots > MAX_SHOTS {
            return Err(QlbmError::Config(format!(
                "shots must be in [{}, {}], got {}",
                MIN_SHOTS, MAX_SHOTS, self.shots
            )));
        }

        if self.time_steps == 0 {
            return Err(QlbmError::Config("time_steps must be >= 1".to_string()));
        }

        if !self.sigma0.is_finite() || self.sigma0 <= 0.0 {
            return Err(QlbmError::Config(format!(
                "sigma0 must be positive and finite, got {}",
                self.sigma0
            )));
        }

        if !self.mu0.is_finite() {
            return Err(QlbmError::Config(format!("mu0 must be finite, got {}", self.mu0)));
        }

        if !self.rmse_tolerance.is_finite() || self.rmse_tolerance <= 0.0 {
            return Err(QlbmError::Config(format!(
                "rmse_tolerance must be positive, got {}",
                self.rmse_tolerance
            )));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimulationConfig(L={}, M={}, n={}, shots={}, steps={}, mu0={:.3}, sigma0={:.3})",
            self.lattice_length,
            self.num_sites(),
            self.num_qubits(),
            self.shots,
            self.time_steps,
            self.mu0,
            self.sigma0
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
