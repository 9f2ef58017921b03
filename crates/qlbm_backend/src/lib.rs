//! # QLBM Backend
//!
//! Execution substrate abstraction and a state-vector simulator for the
//! one-step QLBM kernel.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlbm_backend // L5: Backend (완료)
//!     BackendTrait // 실행 인터페이스 (완료)
//!         ExecutionRequest // 각도 + 스왑 네트워크 + 샷 (완료)
//!         ExecutionResult // 측정 카운트 (완료)
//!     SimulatorBackend // 상태 벡터 시뮬레이터 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlbm_backend::prelude::*;
//! use qlbm_core::prelude::*;
//!
//! let f = DistributionFunction::from_rows(vec![0.25, 0.5], vec![0.5, 0.25]).unwrap();
//! let angles = DistributionEncoder::new().encode(&f).unwrap();
//! let network = StreamingPermutationBuilder::new(4).swap_network().unwrap();
//!
//! let backend = SimulatorBackend::ideal(4).with_seed(42);
//! let result = backend
//!     .execute(&ExecutionRequest::new(angles, network, 1000))
//!     .unwrap();
//! assert_eq!(result.total_counts(), 1000);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (Gantree: L5_Backend)
pub mod execution;

/// Simulator backend (Gantree: L5_Backend → SimulatorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionRequest, ExecutionResult};
pub use simulator::SimulatorBackend;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qlbm_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionRequest, ExecutionResult};
    pub use crate::simulator::SimulatorBackend;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qlbm_core::prelude::*;

    /// Exact post-step occupations from the state vector, before sampling
    fn exact_occupations(backend: &SimulatorBackend, f: &DistributionFunction) -> Vec<f64> {
        let n = 2 * f.num_sites();
        let angles = DistributionEncoder::new().encode(f).unwrap();
        let network = StreamingPermutationBuilder::new(n).swap_network().unwrap();
        let circuit = CircuitBuilder::new(n)
            .qlbm_step(&angles, &network)
            .build()
            .unwrap();
        let state = backend.statevector(&circuit).unwrap();

        (0..n)
            .map(|q| {
                state
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| (index >> q) & 1 == 1)
                    .map(|(_, a)| a.norm_sqr())
                    .sum()
            })
            .collect()
    }

    /// Occupations in lattice layout with the periodic boundary applied
    fn with_boundary(occupations: &[f64]) -> DistributionFunction {
        let m = occupations.len() / 2;
        let row = |i: usize| -> Vec<f64> {
            (0..m).map(|k| occupations[d1q2::qubit_index(i, k)]).collect()
        };
        let mut f = DistributionFunction::from_rows(row(0), row(1)).unwrap();
        f.apply_periodic_boundary();
        f
    }

    #[test]
    fn test_kernel_matches_classical_in_expectation() {
        let lattice = Lattice::from_length(4);
        let density = GaussianProfile::new(2.0, 0.4).density(&lattice);
        let f = DistributionFunction::equilibrium(&density).unwrap();
        let backend = SimulatorBackend::ideal(10);

        let quantum = with_boundary(&exact_occupations(&backend, &f));
        let classical = ClassicalReferenceSolver::new().step(&f);

        for (i, k, value) in classical.iter_qubit_order() {
            assert_abs_diff_eq!(quantum.get(i, k), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kernel_moves_right_mover() {
        // Right mover at site 0 only; after collision half moves to site 1
        let f = DistributionFunction::from_rows(vec![1.0, 0.0], vec![0.0, 0.0]).unwrap();
        let backend = SimulatorBackend::ideal(4);
        let occupations = exact_occupations(&backend, &f);

        // f[0][1] receives post-collision f[0][0] = 0.5, f[1][0] receives f[1][1] = 0
        assert_abs_diff_eq!(occupations[d1q2::qubit_index(0, 1)], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(occupations[d1q2::qubit_index(1, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sampled_decode_close_to_exact() {
        let f = DistributionFunction::from_rows(vec![0.2, 0.7, 0.4], vec![0.9, 0.1, 0.6]).unwrap();
        let angles = DistributionEncoder::new().encode(&f).unwrap();
        let network = StreamingPermutationBuilder::new(6).swap_network().unwrap();

        let backend = SimulatorBackend::ideal(6).with_seed(2024);
        let shots = 20_000;
        let result = backend
            .execute(&ExecutionRequest::new(angles, network, shots))
            .unwrap();
        let mut decoded = MeasurementDecoder::new(6).decode(&result.counts, shots).unwrap();
        decoded.apply_periodic_boundary();

        let expected = ClassicalReferenceSolver::new().step(&f);
        for (i, k, value) in expected.iter_qubit_order() {
            assert_abs_diff_eq!(decoded.get(i, k), value, epsilon = 0.03);
        }
    }

    #[test]
    fn test_boxed_backend() {
        let backend: Box<dyn Backend> = Box::new(SimulatorBackend::ideal(4).with_name("boxed"));
        assert_eq!(backend.name(), "boxed");
        assert_eq!(backend.num_qubits(), 4);
        assert!(backend.is_simulator());
    }
}
