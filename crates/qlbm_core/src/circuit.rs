//! Quantum circuit structure for QLBM
//!
//! Gantree: L4_Kernel → Circuit
//!
//! An ordered gate list over a fixed qubit register, as handed to an
//! execution substrate.

use crate::error::{QlbmError, QlbmResult};
use crate::gate::Gate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    /// Gantree: add_gate(&mut, Gate) -> Result // 게이트 추가
    pub fn add_gate(&mut self, gate: Gate) -> QlbmResult<()> {
        for &qubit in &gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(QlbmError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if let Some((a, b)) = gate.pair() {
            if a == b {
                return Err(QlbmError::InvalidSwap(a, b));
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for gate in &self.gates {
            let qubits = gate.qubits();
            if qubits.is_empty() {
                // MeasureAll or global barrier
                let max_depth = qubit_depths.iter().copied().max().unwrap_or(0);
                qubit_depths.iter_mut().for_each(|d| *d = max_depth + 1);
            } else {
                let max_depth = qubits
                    .iter()
                    .filter_map(|&q| qubit_depths.get(q))
                    .copied()
                    .max()
                    .unwrap_or(0);
                for &q in &qubits {
                    qubit_depths[q] = max_depth + 1;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count rotations
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| matches!(g, Gate::Ry(..))).count()
    }

    /// Count swaps and collisions
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.pair().is_some()).count()
    }

    /// Count gates with the given name
    pub fn count_named(&self, name: &str) -> usize {
        self.gates.iter().filter(|g| g.name() == name).count()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} gates)",
            self.num_qubits,
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_new() {
        let circuit = Circuit::with_name(4, "step");
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.name(), Some("step"));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_gate_out_of_range() {
        let mut circuit = Circuit::new(3);
        assert!(circuit.add_gate(Gate::Ry(2, 0.1)).is_ok());
        assert_eq!(
            circuit.add_gate(Gate::Swap(0, 3)).unwrap_err(),
            QlbmError::GateQubitMismatch {
                qubit: 3,
                num_qubits: 3
            }
        );
    }

    #[test]
    fn test_add_gate_same_qubit() {
        let mut circuit = Circuit::new(3);
        assert_eq!(
            circuit.add_gate(Gate::Swap(1, 1)).unwrap_err(),
            QlbmError::InvalidSwap(1, 1)
        );
        assert_eq!(
            circuit.add_gate(Gate::SqrtSwap(2, 2)).unwrap_err(),
            QlbmError::InvalidSwap(2, 2)
        );
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_depth() {
        let mut circuit = Circuit::new(4);
        for q in 0..4 {
            circuit.add_gate(Gate::Ry(q, 0.3)).unwrap();
        }
        circuit.add_gate(Gate::SqrtSwap(0, 1)).unwrap();
        circuit.add_gate(Gate::SqrtSwap(2, 3)).unwrap();
        circuit.add_gate(Gate::Swap(1, 2)).unwrap();
        circuit.add_gate(Gate::MeasureAll).unwrap();

        // Ry layer, collision layer, swap, measure
        assert_eq!(circuit.depth(), 4);
        assert_eq!(circuit.count_1q(), 4);
        assert_eq!(circuit.count_2q(), 3);
        assert_eq!(circuit.count_named("sqrt_swap"), 2);
    }
}
