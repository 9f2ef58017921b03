//! Backend execution types and traits
//!
//! Gantree: L5_Backend → BackendTrait
//!
//! The execution substrate receives the qubit count, one rotation angle per
//! qubit, the streaming swap network and a shot count, runs the one-step
//! kernel, and answers with measurement counts.

use qlbm_core::{Angle, Counts, QlbmError, QlbmResult, SwapNetwork};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Request
// ============================================================================

/// One kernel execution request
/// Gantree: ExecutionRequest // 실행 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Number of qubits `n = 2M`
    pub num_qubits: usize,

    /// Rotation angle per qubit
    pub angles: Vec<Angle>,

    /// Streaming swap network
    pub swap_network: SwapNetwork,

    /// Number of shots
    pub shots: u64,
}

impl ExecutionRequest {
    /// Create a request; the qubit count is taken from the angle vector
    pub fn new(angles: Vec<Angle>, swap_network: SwapNetwork, shots: u64) -> Self {
        Self {
            num_qubits: angles.len(),
            angles,
            swap_network,
            shots,
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> QlbmResult<()> {
        if self.angles.len() != self.num_qubits {
            return Err(QlbmError::ShapeMismatch {
                expected: self.num_qubits,
                actual: self.angles.len(),
            });
        }
        if let Some(&theta) = self.angles.iter().find(|a| !a.is_finite()) {
            return Err(QlbmError::Execution(format!("non-finite angle {}", theta)));
        }
        if let Some(&(a, b)) = self.swap_network.iter().find(|(a, b)| a == b) {
            return Err(QlbmError::InvalidSwap(a, b));
        }
        if let Some(max) = self.swap_network.max_qubit() {
            if max >= self.num_qubits {
                return Err(QlbmError::QubitOutOfRange {
                    qubit: max,
                    max: self.num_qubits,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Result of a kernel execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count), character `q` is qubit `q`
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Additional info
    pub extra: HashMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={})",
            self.metadata.backend,
            self.shots,
            self.counts.len()
        )
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Quantum execution substrate
/// Gantree: BackendTrait // 백엔드 인터페이스
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Get number of qubits available
    fn num_qubits(&self) -> usize;

    /// Run the one-step kernel for `request`
    ///
    /// A failure is reported as [`QlbmError::Execution`]; callers do not retry.
    /// Gantree: execute(request) -> Result<ExecutionResult>
    fn execute(&self, request: &ExecutionRequest) -> QlbmResult<ExecutionResult>;

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        qlbm_core::execution::MAX_SHOTS
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn num_qubits(&self) -> usize {
        (**self).num_qubits()
    }

    fn execute(&self, request: &ExecutionRequest) -> QlbmResult<ExecutionResult> {
        (**self).execute(request)
    }

    fn is_simulator(&self) -> bool {
        (**self).is_simulator()
    }

    fn max_shots(&self) -> u64 {
        (**self).max_shots()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_counts() -> Counts {
        let mut counts = HashMap::new();
        counts.insert("0000".to_string(), 600);
        counts.insert("1000".to_string(), 250);
        counts.insert("1010".to_string(), 150);
        counts
    }

    #[test]
    fn test_execution_result_new() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert_eq!(result.shots, 1000);
        assert_eq!(result.metadata.backend, "test");
        assert!(result.metadata.simulated);
    }

    #[test]
    fn test_total_counts() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert_eq!(result.total_counts(), 1000);
    }

    #[test]
    fn test_request_validation() {
        let network = SwapNetwork::from_pairs(vec![(1, 3), (0, 2)]).unwrap();
        let request = ExecutionRequest::new(vec![0.1; 4], network.clone(), 100);
        assert_eq!(request.num_qubits, 4);
        assert!(request.validate().is_ok());

        // Swap beyond the register
        let request = ExecutionRequest::new(vec![0.1; 3], network, 100);
        assert_eq!(
            request.validate().unwrap_err(),
            QlbmError::QubitOutOfRange { qubit: 3, max: 3 }
        );

        // Angle count disagrees with qubit count
        let mut request = ExecutionRequest::new(vec![0.1; 4], SwapNetwork::empty(), 100);
        request.num_qubits = 6;
        assert!(request.validate().is_err());

        let request = ExecutionRequest::new(vec![f64::NAN; 2], SwapNetwork::empty(), 100);
        assert!(matches!(request.validate(), Err(QlbmError::Execution(_))));
    }
}
