//! Constants for QLBM
//!
//! Gantree: L0_Foundation → Constants
//!
//! Lattice constants of the D1Q2 diffusion scheme and execution defaults.

// ============================================================================
// D1Q2 Lattice Constants
// Gantree: d1q2 // 격자 상수
// ============================================================================

pub mod d1q2 {
    //! D1Q2 lattice: one dimension, two discrete velocities per site

    /// Number of discrete velocity directions
    pub const NUM_VELOCITIES: usize = 2;

    /// Equilibrium weight per velocity direction
    pub const WEIGHTS: [f64; NUM_VELOCITIES] = [0.5, 0.5];

    /// Lattice velocities (direction 0 moves right, direction 1 moves left)
    pub const VELOCITIES: [f64; NUM_VELOCITIES] = [1.0, -1.0];

    /// Square of the lattice sound speed
    pub const SOUND_SPEED_SQ: f64 = 1.0;

    /// Advection velocity (pure diffusion)
    pub const ADVECTION_VELOCITY: f64 = 0.0;

    /// Qubit index for velocity `i` at site `k`
    #[inline]
    pub const fn qubit_index(velocity: usize, site: usize) -> usize {
        velocity + NUM_VELOCITIES * site
    }
}

// ============================================================================
// Streaming Constants
// ============================================================================

pub mod streaming {
    //! Swap-network streaming limits

    /// Minimum qubit count with streaming behavior (two lattice sites)
    pub const MIN_STREAMING_QUBITS: usize = 4;
}

// ============================================================================
// Execution Constants
// Gantree: execution // 실행 기본값
// ============================================================================

pub mod execution {
    //! Shot and comparison defaults

    /// Default number of measurement shots
    pub const DEFAULT_SHOTS: u64 = 8192;

    /// Minimum shots per execution
    pub const MIN_SHOTS: u64 = 1;

    /// Maximum shots per execution
    pub const MAX_SHOTS: u64 = 1_000_000;

    /// Default RMSE tolerance between quantum and classical densities
    pub const DEFAULT_RMSE_TOLERANCE: f64 = 0.05;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d1q2_weights_sum_to_one() {
        let sum: f64 = d1q2::WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocities_opposite() {
        assert_eq!(d1q2::VELOCITIES[0], -d1q2::VELOCITIES[1]);
    }

    #[test]
    fn test_qubit_index() {
        assert_eq!(d1q2::qubit_index(0, 0), 0);
        assert_eq!(d1q2::qubit_index(1, 0), 1);
        assert_eq!(d1q2::qubit_index(0, 3), 6);
        assert_eq!(d1q2::qubit_index(1, 4), 9);
    }
}
