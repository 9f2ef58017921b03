//! # QLBM Core
//!
//! Lattice model, encoding, streaming and decoding for a Quantum Lattice
//! Boltzmann (D1Q2) diffusion solver, plus the classical reference update.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qlbm_core // L0-L4: Foundation + Lattice + Codec + Reference + Kernel (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // D1Q2 격자 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Lattice // 격자/분포 함수 (완료)
//!     L2_Codec // 인코딩/스트리밍/디코딩 (완료)
//!         DistributionEncoder // 확률→각도 (완료)
//!         StreamingPermutationBuilder // 최소 스왑 네트워크 (완료)
//!         MeasurementDecoder // 측정→확률 (완료)
//!     L3_Reference // 고전 기준해 (완료)
//!     L4_Kernel // 한 스텝 회로 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qlbm_core::prelude::*;
//!
//! // Gaussian seed on a 5-site lattice
//! let lattice = Lattice::from_length(4);
//! let density = GaussianProfile::new(2.0, 0.4).density(&lattice);
//! let f = DistributionFunction::equilibrium(&density).unwrap();
//!
//! // One rotation angle per qubit
//! let angles = DistributionEncoder::new().encode(&f).unwrap();
//! assert_eq!(angles.len(), lattice.num_qubits());
//!
//! // Classical reference step
//! let next = ClassicalReferenceSolver::new().step(&f);
//! assert_eq!(next.num_sites(), 5);
//! ```
//!
//! ## Streaming Swap Network
//!
//! ```rust
//! use qlbm_core::prelude::*;
//!
//! let builder = StreamingPermutationBuilder::new(10);
//! let permutation = builder.permutation().unwrap();
//! let network = builder.swap_network().unwrap();
//!
//! // Minimal: n - cycles(P) transpositions
//! assert_eq!(network.len(), permutation.len() - permutation.cycle_count());
//! assert_eq!(network.apply_to_identity(10).unwrap(), permutation.as_slice());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Lattice and distribution function (Gantree: L1_Lattice)
pub mod lattice;

/// Distribution encoding (Gantree: L2_Codec → DistributionEncoder)
pub mod encoding;

/// Streaming permutation (Gantree: L2_Streaming → StreamingPermutationBuilder)
pub mod streaming;

/// Measurement decoding (Gantree: L2_Codec → MeasurementDecoder)
pub mod decoding;

/// Classical reference solver (Gantree: L3_Reference)
pub mod classical;

/// Quantum gates (Gantree: L4_Kernel → Gate)
pub mod gate;

/// Circuit structure (Gantree: L4_Kernel → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L4_Kernel → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use classical::ClassicalReferenceSolver;
pub use constants::{d1q2, execution};
pub use decoding::{MeasurementDecoder, QubitMarginal};
pub use encoding::DistributionEncoder;
pub use error::{QlbmError, QlbmResult};
pub use gate::Gate;
pub use lattice::{DistributionFunction, GaussianProfile, Lattice};
pub use streaming::{Permutation, StreamingPermutationBuilder, SwapNetwork};
pub use types::{Angle, Bitstring, Counts, DensityProfile, Probability, QubitId, SwapPair};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qlbm_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::classical::ClassicalReferenceSolver;
    pub use crate::constants::{d1q2, execution};
    pub use crate::decoding::{MeasurementDecoder, QubitMarginal};
    pub use crate::encoding::DistributionEncoder;
    pub use crate::error::{QlbmError, QlbmResult};
    pub use crate::gate::Gate;
    pub use crate::lattice::{DistributionFunction, GaussianProfile, Lattice};
    pub use crate::streaming::{Permutation, StreamingPermutationBuilder, SwapNetwork};
    pub use crate::types::{
        Angle, Bitstring, Counts, DensityProfile, Probability, QubitId, SwapPair,
    };
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

#[cfg(test)]
mod tests {
    use super::encoding::excitation_probability;
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use std::collections::HashMap;

    /// Noise-free counts: every shot pattern weighted by its exact probability.
    /// Only valid for product states, which is what the encoder prepares.
    fn exact_product_counts(probabilities: &[f64], shots: u64) -> Counts {
        let n = probabilities.len();
        let mut counts = HashMap::new();
        for index in 0..(1usize << n) {
            let p: f64 = (0..n)
                .map(|q| {
                    if (index >> q) & 1 == 1 {
                        probabilities[q]
                    } else {
                        1.0 - probabilities[q]
                    }
                })
                .product();
            let count = (p * shots as f64).round() as u64;
            if count > 0 {
                counts.insert(Bitstring::from_index(index, n).to_string(), count);
            }
        }
        counts
    }

    #[test]
    fn test_encode_decode_round_trip() {
        // Probabilities are multiples of 1/4 so rounded counts are exact
        let f = DistributionFunction::from_rows(vec![0.25, 0.5], vec![0.75, 1.0]).unwrap();
        let angles = DistributionEncoder::new().encode(&f).unwrap();
        let probabilities: Vec<f64> = angles.iter().map(|&t| excitation_probability(t)).collect();

        let shots = 1024;
        let counts = exact_product_counts(&probabilities, shots);
        let total: u64 = counts.values().sum();
        assert_eq!(total, shots);

        let decoded = MeasurementDecoder::new(4).decode(&counts, shots).unwrap();
        for (i, k, value) in f.iter_qubit_order() {
            assert_abs_diff_eq!(decoded.get(i, k), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kernel_for_minimum_lattice() {
        let lattice = Lattice::from_length(1);
        assert_eq!(lattice.num_qubits(), 4);

        let network = StreamingPermutationBuilder::new(lattice.num_qubits())
            .swap_network()
            .unwrap();
        assert!(!network.is_empty());

        let circuit = CircuitBuilder::new(4)
            .qlbm_step(&[0.1, 0.2, 0.3, 0.4], &network)
            .build()
            .unwrap();
        assert_eq!(circuit.count_named("swap"), 2);
    }

    #[test]
    fn test_degenerate_lattice_has_no_streaming() {
        let lattice = Lattice::from_length(0);
        let network = StreamingPermutationBuilder::new(lattice.num_qubits())
            .swap_network()
            .unwrap();
        assert!(network.is_empty());
    }
}
