//! Simulation driver
//!
//! Gantree: L6_Engine → SimulationDriver
//!
//! Owns the quantum-path and classical-path distributions, advances both by
//! one time step at a time, and compares their density profiles.
//!
//! State machine: `Initialized → Stepping → Done`, or `Failed` once a step
//! error aborts the run.

use crate::config::SimulationConfig;
use crate::metrics::ComparisonMetric;
use crate::path::{advance, ClassicalPath, QuantumPath};
use qlbm_backend::{Backend, SimulatorBackend};
use qlbm_core::{DensityProfile, DistributionFunction, QlbmError, QlbmResult, SwapNetwork};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// State
// ============================================================================

/// Driver lifecycle
/// Gantree: DriverState // 드라이버 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    /// No step taken yet
    Initialized,
    /// Some steps completed, more remain
    Stepping {
        /// Steps completed so far
        completed: usize,
    },
    /// All configured steps completed
    Done,
    /// Aborted by an error in step `step` (1-based)
    Failed {
        /// Step that failed
        step: usize,
    },
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverState::Initialized => write!(f, "initialized"),
            DriverState::Stepping { completed } => write!(f, "stepping ({} done)", completed),
            DriverState::Done => write!(f, "done"),
            DriverState::Failed { step } => write!(f, "failed at step {}", step),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Outcome of one time step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number (1-based)
    pub step: usize,

    /// Quantum-path density after the step
    pub quantum_density: DensityProfile,

    /// Classical-path density after the step
    pub classical_density: DensityProfile,

    /// Comparison between the two
    pub metric: ComparisonMetric,
}

/// Final run report
/// Gantree: SimulationReport // 결과 보고
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Configuration used
    pub config: SimulationConfig,

    /// Backend name
    pub backend: String,

    /// Number of qubits
    pub num_qubits: usize,

    /// Number of streaming swaps per step
    pub swap_count: usize,

    /// Steps completed
    pub steps_completed: usize,

    /// Final quantum density profile
    pub quantum_density: DensityProfile,

    /// Final classical density profile
    pub classical_density: DensityProfile,

    /// Final comparison
    pub metric: ComparisonMetric,

    /// Whether the final RMSE is within tolerance
    pub within_tolerance: bool,

    /// Per-step history
    pub history: Vec<StepRecord>,
}

impl SimulationReport {
    /// Final RMSE
    pub fn rmse(&self) -> f64 {
        self.metric.rmse
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QlbmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== QLBM D1Q2 Diffusion ===")?;
        writeln!(f, "{}", self.config)?;
        writeln!(f, "Backend:   {}", self.backend)?;
        writeln!(f, "Swaps:     {}", self.swap_count)?;
        writeln!(f, "Steps:     {}", self.steps_completed)?;
        writeln!(f, "Quantum:   {}", format_profile(&self.quantum_density))?;
        writeln!(f, "Classical: {}", format_profile(&self.classical_density))?;
        writeln!(f, "Metric:    {}", self.metric)?;
        write!(
            f,
            "Status:    {}",
            if self.within_tolerance {
                "within tolerance"
            } else {
                "exceeds tolerance"
            }
        )
    }
}

fn format_profile(profile: &[f64]) -> String {
    let values: Vec<String> = profile.iter().map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", values.join(", "))
}

// ============================================================================
// Driver
// ============================================================================

/// Time-stepping driver comparing quantum and classical paths
/// Gantree: SimulationDriver // 시뮬레이션 드라이버
pub struct SimulationDriver<B: Backend> {
    config: SimulationConfig,
    quantum: QuantumPath<B>,
    classical: ClassicalPath,
    f_quantum: DistributionFunction,
    f_classical: DistributionFunction,
    state: DriverState,
    history: Vec<StepRecord>,
}

impl SimulationDriver<SimulatorBackend> {
    /// Driver on an ideal simulator sized for the lattice, seeded from the config
    ///
    /// Fails with an execution error when the lattice needs more qubits than
    /// the simulator can hold.
    pub fn with_simulator(config: SimulationConfig) -> QlbmResult<Self> {
        config.validate()?;
        let mut backend = SimulatorBackend::try_ideal(config.num_qubits())?;
        if let Some(seed) = config.seed {
            backend = backend.with_seed(seed);
        }
        Self::new(config, backend)
    }
}

impl<B: Backend> SimulationDriver<B> {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Validate the configuration and seed both paths with the Gaussian
    /// equilibrium distribution
    pub fn new(config: SimulationConfig, backend: B) -> QlbmResult<Self> {
        config.validate()?;

        let lattice = config.lattice();
        let density = config.gaussian().density(&lattice);
        let f0 = DistributionFunction::equilibrium(&density)?;
        let quantum = QuantumPath::new(backend, lattice.num_sites(), config.shots)?;

        log::info!("{} on backend '{}'", config, quantum.backend().name());

        Ok(Self {
            config,
            quantum,
            classical: ClassicalPath::new(),
            f_quantum: f0.clone(),
            f_classical: f0,
            state: DriverState::Initialized,
            history: Vec::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Quantum-path distribution
    pub fn quantum_distribution(&self) -> &DistributionFunction {
        &self.f_quantum
    }

    /// Classical-path distribution
    pub fn classical_distribution(&self) -> &DistributionFunction {
        &self.f_classical
    }

    /// Cached streaming swap network
    pub fn swap_network(&self) -> &SwapNetwork {
        self.quantum.swap_network()
    }

    /// Per-step history
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    /// Steps completed so far
    pub fn steps_completed(&self) -> usize {
        self.history.len()
    }

    /// True once every configured step has completed
    pub fn is_done(&self) -> bool {
        self.state == DriverState::Done
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Advance both paths by one time step
    /// Gantree: step(&mut) -> Result<&StepRecord> // 한 스텝
    pub fn step(&mut self) -> QlbmResult<&StepRecord> {
        let step = match self.state {
            DriverState::Done => {
                return Err(QlbmError::SimulationFinished {
                    steps: self.history.len(),
                })
            }
            DriverState::Failed { step } => return Err(QlbmError::SimulationAborted { step }),
            DriverState::Initialized => 1,
            DriverState::Stepping { completed } => completed + 1,
        };

        let f_quantum = match advance(&mut self.quantum, &self.f_quantum) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("step {} failed: {}", step, e);
                self.state = DriverState::Failed { step };
                return Err(e);
            }
        };
        let f_classical = advance(&mut self.classical, &self.f_classical)?;

        let quantum_density = f_quantum.density();
        let classical_density = f_classical.density();
        let metric = ComparisonMetric::compare(&quantum_density, &classical_density)?;
        log::debug!("step {}: {}", step, metric);

        self.f_quantum = f_quantum;
        self.f_classical = f_classical;
        self.state = if step >= self.config.time_steps {
            DriverState::Done
        } else {
            DriverState::Stepping { completed: step }
        };

        let index = self.history.len();
        self.history.push(StepRecord {
            step,
            quantum_density,
            classical_density,
            metric,
        });
        Ok(&self.history[index])
    }

    /// Run every remaining step and report
    /// Gantree: run(&mut) -> Result<SimulationReport> // 전체 실행
    pub fn run(&mut self) -> QlbmResult<SimulationReport> {
        while !self.is_done() {
            self.step()?;
        }

        let report = self.report()?;
        log::info!(
            "finished {} steps, rmse = {:.6}",
            report.steps_completed,
            report.rmse()
        );
        if !report.within_tolerance {
            log::warn!(
                "rmse {:.6} exceeds tolerance {}",
                report.rmse(),
                self.config.rmse_tolerance
            );
        }
        Ok(report)
    }

    /// Report on the current distributions
    pub fn report(&self) -> QlbmResult<SimulationReport> {
        let quantum_density = self.f_quantum.density();
        let classical_density = self.f_classical.density();
        let metric = ComparisonMetric::compare(&quantum_density, &classical_density)?;

        Ok(SimulationReport {
            config: self.config.clone(),
            backend: self.quantum.backend().name().to_string(),
            num_qubits: self.config.num_qubits(),
            swap_count: self.quantum.swap_network().len(),
            steps_completed: self.history.len(),
            quantum_density,
            classical_density,
            within_tolerance: metric.within(self.config.rmse_tolerance),
            metric,
            history: self.history.clone(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(steps: usize) -> SimulationDriver<SimulatorBackend> {
        let config = SimulationConfig::default()
            .with_seed(42)
            .with_time_steps(steps);
        SimulationDriver::with_simulator(config).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let driver = seeded(1);
        assert_eq!(driver.state(), DriverState::Initialized);
        assert_eq!(driver.quantum_distribution(), driver.classical_distribution());
        assert_eq!(driver.swap_network().len(), 8);
        assert_eq!(driver.report().unwrap().rmse(), 0.0);
    }

    #[test]
    fn test_state_transitions() {
        let mut driver = seeded(2);
        driver.step().unwrap();
        assert_eq!(driver.state(), DriverState::Stepping { completed: 1 });
        let record = driver.step().unwrap();
        assert_eq!(record.step, 2);
        assert_eq!(driver.state(), DriverState::Done);

        assert_eq!(
            driver.step().unwrap_err(),
            QlbmError::SimulationFinished { steps: 2 }
        );
    }

    #[test]
    fn test_boundary_holds_after_each_step() {
        let mut driver = seeded(3);
        while !driver.is_done() {
            driver.step().unwrap();
            for f in [driver.quantum_distribution(), driver.classical_distribution()] {
                let m = f.num_sites();
                assert_eq!(f.get(0, 0), f.get(0, m - 1));
                assert_eq!(f.get(1, m - 1), f.get(1, 0));
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig::default().with_time_steps(0);
        assert!(matches!(
            SimulationDriver::with_simulator(config),
            Err(QlbmError::Config(_))
        ));
    }

    #[test]
    fn test_lattice_too_large_for_simulator() {
        // 13 sites need 26 qubits
        let config = SimulationConfig::new(12).with_seed(1);
        let err = SimulationDriver::with_simulator(config).err().unwrap();
        assert!(err.is_execution_error());
        assert!(matches!(err, QlbmError::Execution(ref msg) if msg.contains("26 qubits")));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(DriverState::Stepping { completed: 2 }.to_string(), "stepping (2 done)");
        assert_eq!(DriverState::Failed { step: 1 }.to_string(), "failed at step 1");
    }
}
