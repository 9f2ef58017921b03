//! Circuit builder for QLBM
//!
//! Gantree: L4_Kernel → CircuitBuilder
//!
//! Fluent builder for the one-step QLBM kernel:
//! `Ry(theta_q)` on every qubit, the collision on each site pair,
//! the streaming swap network, and a final measurement.

use crate::circuit::Circuit;
use crate::constants::d1q2::{qubit_index, NUM_VELOCITIES};
use crate::error::{QlbmError, QlbmResult};
use crate::gate::Gate;
use crate::streaming::SwapNetwork;
use crate::types::{Angle, QubitId};

/// Fluent circuit builder (consuming self pattern)
///
/// The first invalid gate is remembered and reported by [`build`](Self::build).
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First error encountered
    error: Option<QlbmError>,
}

impl CircuitBuilder {
    /// Create a new circuit builder
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    fn push(mut self, gate: Gate) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.add_gate(gate) {
                self.error = Some(e);
            }
        }
        self
    }

    // ========================================================================
    // Gates
    // ========================================================================

    /// Add Ry rotation
    pub fn ry(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Gate::Ry(qubit, angle))
    }

    /// Add SWAP
    pub fn swap(self, a: QubitId, b: QubitId) -> Self {
        self.push(Gate::Swap(a, b))
    }

    /// Add square-root-of-SWAP
    pub fn sqrt_swap(self, a: QubitId, b: QubitId) -> Self {
        self.push(Gate::SqrtSwap(a, b))
    }

    /// Add barrier across all qubits
    pub fn barrier(self) -> Self {
        self.push(Gate::Barrier(Vec::new()))
    }

    /// Add measurement of all qubits
    pub fn measure_all(self) -> Self {
        self.push(Gate::MeasureAll)
    }

    // ========================================================================
    // QLBM Layers
    // ========================================================================

    /// Ry layer, `angles[q]` on qubit `q`
    /// Gantree: ry_layer(self, &angles) -> Self // 인코딩 층
    pub fn ry_layer(self, angles: &[Angle]) -> Self {
        angles
            .iter()
            .enumerate()
            .fold(self, |builder, (q, &theta)| builder.ry(q, theta))
    }

    /// Collision on qubits `(2k, 2k+1)` of every site
    /// Gantree: collision_layer(self, m) -> Self // 충돌 층
    pub fn collision_layer(self, num_sites: usize) -> Self {
        (0..num_sites).fold(self, |builder, k| {
            builder.sqrt_swap(qubit_index(0, k), qubit_index(1, k))
        })
    }

    /// Streaming swaps in network order
    pub fn swap_network(self, network: &SwapNetwork) -> Self {
        network
            .iter()
            .fold(self, |builder, &(a, b)| builder.swap(a, b))
    }

    /// Complete one-step kernel
    /// Gantree: qlbm_step(self, &angles, &network) -> Self // 한 스텝 회로
    pub fn qlbm_step(self, angles: &[Angle], network: &SwapNetwork) -> Self {
        let num_sites = angles.len() / NUM_VELOCITIES;
        self.ry_layer(angles)
            .barrier()
            .collision_layer(num_sites)
            .barrier()
            .swap_network(network)
            .measure_all()
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Finish building
    pub fn build(self) -> QlbmResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::StreamingPermutationBuilder;

    #[test]
    fn test_basic_builder() {
        let circuit = CircuitBuilder::new(2)
            .ry(0, 0.3)
            .sqrt_swap(0, 1)
            .measure_all()
            .build()
            .unwrap();
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.count_1q(), 1);
        assert_eq!(circuit.count_2q(), 1);
    }

    #[test]
    fn test_builder_reports_first_error() {
        let result = CircuitBuilder::new(2).ry(0, 0.2).ry(5, 0.1).swap(1, 1).build();
        assert_eq!(
            result.unwrap_err(),
            QlbmError::GateQubitMismatch {
                qubit: 5,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_qlbm_step_structure() {
        let network = StreamingPermutationBuilder::new(10).swap_network().unwrap();
        let angles = vec![0.5; 10];
        let circuit = CircuitBuilder::with_name(10, "qlbm_step")
            .qlbm_step(&angles, &network)
            .build()
            .unwrap();

        assert_eq!(circuit.count_named("ry"), 10);
        assert_eq!(circuit.count_named("sqrt_swap"), 5);
        assert_eq!(circuit.count_named("swap"), network.len());
        assert_eq!(circuit.count_named("measure"), 1);
    }

    #[test]
    fn test_collision_pairs() {
        let circuit = CircuitBuilder::new(6).collision_layer(3).build().unwrap();
        assert_eq!(
            circuit.gates(),
            &[Gate::SqrtSwap(0, 1), Gate::SqrtSwap(2, 3), Gate::SqrtSwap(4, 5)]
        );
    }
}
