//! # QLBM Engine
//!
//! Time-stepping driver for the D1Q2 diffusion problem. Runs the quantum
//! path (encode, execute, decode) next to the classical reference and
//! reports how far apart their density profiles end up.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlbm_engine // L6: Engine (완료)
//!     SimulationConfig // 실행 설정 (완료)
//!         lattice_length, shots, time_steps
//!         mu0, sigma0, seed, rmse_tolerance
//!     StepPath // 스텝 경로 (완료)
//!         QuantumPath - 인코딩 → 실행 → 디코딩
//!         ClassicalPath - 고전 기준해
//!         advance() - 주기 경계 한 번 적용
//!     ComparisonMetric // RMSE/MSE/최대 오차 (완료)
//!     SimulationDriver // 드라이버 (완료)
//!         Initialized → Stepping → Done | Failed
//!         step(), run(), report()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlbm_engine::prelude::*;
//!
//! let config = SimulationConfig::new(4).with_seed(42);
//! let mut driver = SimulationDriver::with_simulator(config).unwrap();
//! let report = driver.run().unwrap();
//!
//! assert_eq!(report.quantum_density.len(), 5);
//! println!("RMSE: {:.4}", report.rmse());
//! ```
//!
//! ## Custom Backend
//!
//! ```rust
//! use qlbm_engine::prelude::*;
//!
//! let backend = SimulatorBackend::ideal(10).with_seed(7).with_readout_error(0.01);
//! let config = SimulationConfig::new(4).with_shots(4096).with_time_steps(2);
//!
//! let mut driver = SimulationDriver::new(config, backend).unwrap();
//! driver.step().unwrap();
//! assert_eq!(driver.state(), DriverState::Stepping { completed: 1 });
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L6_Engine → SimulationConfig)
pub mod config;

/// Density comparison metrics (Gantree: L6_Engine → ComparisonMetric)
pub mod metrics;

/// Quantum and classical step paths (Gantree: L6_Engine → StepPath)
pub mod path;

/// Simulation driver (Gantree: L6_Engine → SimulationDriver)
pub mod driver;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SimulationConfig;
pub use driver::{DriverState, SimulationDriver, SimulationReport, StepRecord};
pub use metrics::{mean_squared_error, root_mean_squared_error, ComparisonMetric};
pub use path::{advance, ClassicalPath, QuantumPath, StepPath};

// Re-export lower layers
pub use qlbm_backend;
pub use qlbm_core;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qlbm_engine::prelude::*;
    //! ```

    pub use crate::config::SimulationConfig;
    pub use crate::driver::{DriverState, SimulationDriver, SimulationReport, StepRecord};
    pub use crate::metrics::{root_mean_squared_error, ComparisonMetric};
    pub use crate::path::{advance, ClassicalPath, QuantumPath, StepPath};

    pub use qlbm_backend::{Backend, ExecutionRequest, ExecutionResult, SimulatorBackend};
    pub use qlbm_core::{DistributionFunction, QlbmError, QlbmResult};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
