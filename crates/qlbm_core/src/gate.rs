//! Kernel operations
//!
//! Gantree: L4_Kernel → Gate
//!
//! One QLBM time step uses exactly these: an occupation rotation per qubit,
//! the per-site collision, streaming transpositions, and a final readout.

use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kernel operation
/// Gantree: Gate // 커널 연산
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Rotation around Y; prepares occupation `sin²(θ/2)`
    /// Gantree: Ry(QubitId, Angle) // Y 회전
    Ry(QubitId, Angle),

    /// Streaming transposition
    /// Gantree: Swap(QubitId, QubitId) // 스왑
    Swap(QubitId, QubitId),

    /// Square root of SWAP on `(dir0, dir1)` of one site
    /// Gantree: SqrtSwap(QubitId, QubitId) // 충돌 연산자
    SqrtSwap(QubitId, QubitId),

    /// Layer separator; empty means every qubit
    Barrier(Vec<QubitId>),

    /// Read out the whole register
    MeasureAll,
}

impl Gate {
    /// Qubits the operation acts on; empty for register-wide operations
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Ry(q, _) => vec![*q],
            Gate::Swap(a, b) | Gate::SqrtSwap(a, b) => vec![*a, *b],
            Gate::Barrier(qs) => qs.clone(),
            Gate::MeasureAll => Vec::new(),
        }
    }

    /// Pair operation whose two qubits must differ
    pub fn pair(&self) -> Option<(QubitId, QubitId)> {
        match self {
            Gate::Swap(a, b) | Gate::SqrtSwap(a, b) => Some((*a, *b)),
            _ => None,
        }
    }

    /// Lowercase mnemonic
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Ry(..) => "ry",
            Gate::Swap(..) => "swap",
            Gate::SqrtSwap(..) => "sqrt_swap",
            Gate::Barrier(_) => "barrier",
            Gate::MeasureAll => "measure",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Ry(q, theta) => write!(f, "ry({:.6}) q[{}]", theta, q),
            Gate::Swap(a, b) | Gate::SqrtSwap(a, b) => {
                write!(f, "{} q[{}],q[{}]", self.name(), a, b)
            }
            Gate::Barrier(qs) if qs.is_empty() => write!(f, "barrier q"),
            Gate::Barrier(qs) => {
                let list: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                write!(f, "barrier {}", list.join(","))
            }
            Gate::MeasureAll => write!(f, "measure q"),
        }
    }
}
