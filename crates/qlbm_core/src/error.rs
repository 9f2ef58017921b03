//! Error types for QLBM
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every fallible operation in the workspace reports through [`QlbmError`].

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QLBM
/// Gantree: QlbmError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QlbmError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Occupation probability that cannot be encoded as a rotation angle
    /// Gantree: Encoding{{i,k,v}} // 인코딩 실패
    #[error("Cannot encode f[{velocity}][{site}] = {value}: must be a finite value in [0, 1]")]
    Encoding {
        velocity: usize,
        site: usize,
        value: f64,
    },

    /// Distribution arrays of inconsistent size
    #[error("Shape mismatch: expected {expected} entries, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    // ========================================================================
    // Streaming Errors
    // ========================================================================
    /// Sequence is not a bijection over 0..len
    /// Gantree: InvalidPermutation(String) // 순열 아님
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    /// Swap of a qubit with itself
    #[error("Invalid swap ({0}, {1}): qubits must be different")]
    InvalidSwap(usize, usize),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    // ========================================================================
    // Decoding Errors
    // ========================================================================
    /// Measured bitstring has the wrong number of bits
    /// Gantree: Decoding{{bs,n}} // 디코딩 실패
    #[error("Bitstring '{bitstring}' has {actual} bits, expected {expected}")]
    Decoding {
        bitstring: String,
        expected: usize,
        actual: usize,
    },

    /// Counts do not add up to the number of shots
    #[error("Counts total {total} does not match shots {shots}")]
    CountsMismatch { total: u64, shots: u64 },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Substrate failed to return shot statistics
    /// Gantree: Execution(String) // 실행 실패
    #[error("Execution error: {0}")]
    Execution(String),

    /// Shots out of range
    #[error("Shots {0} out of range [{1}, {2}]")]
    ShotsOutOfRange(u64, u64, u64),

    // ========================================================================
    // Configuration / Driver Errors
    // ========================================================================
    /// Invalid simulation configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Driver was stepped after it finished
    #[error("Simulation already finished after {steps} steps")]
    SimulationFinished { steps: usize },

    /// Driver was stepped after a fatal error
    #[error("Simulation aborted at step {step}")]
    SimulationAborted { step: usize },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for QLBM operations
/// Gantree: QlbmResult<T> // type alias
pub type QlbmResult<T> = Result<T, QlbmError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QlbmError {
    fn from(err: serde_json::Error) -> Self {
        QlbmError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QlbmError {
    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QlbmError::InvalidProbability(_)
                | QlbmError::Encoding { .. }
                | QlbmError::ShapeMismatch { .. }
                | QlbmError::QubitOutOfRange { .. }
                | QlbmError::InvalidBitstring(_)
                | QlbmError::InvalidPermutation(_)
                | QlbmError::InvalidSwap(_, _)
                | QlbmError::Config(_)
        )
    }

    /// Check if error came from the execution substrate
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            QlbmError::Execution(_)
                | QlbmError::ShotsOutOfRange(_, _, _)
                | QlbmError::GateQubitMismatch { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
