//! Distribution encoding
//!
//! Gantree: L2_Codec → DistributionEncoder
//!
//! Maps each occupation probability `f` to the Ry angle
//! `theta = 2 * arccos(sqrt(1 - f))`, so that `Ry(theta)|0⟩` is measured as
//! `1` with probability `sin²(theta / 2) = f`.

use crate::error::{QlbmError, QlbmResult};
use crate::lattice::DistributionFunction;
use crate::types::{Angle, Probability};

/// Rotation angle for one occupation probability
pub fn encode_probability(p: Probability) -> Angle {
    2.0 * p.complement().sqrt().acos()
}

/// Probability of measuring `1` after `Ry(theta)` on `|0⟩`
pub fn excitation_probability(theta: Angle) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Converts a distribution function into one rotation angle per qubit
/// Gantree: DistributionEncoder // 확률→각도
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionEncoder;

impl DistributionEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self
    }

    /// Encode `f` into `2M` angles, `theta[i + 2k]` for entry `f[i][k]`
    /// Gantree: encode(&f) -> Result<Vec<Angle>> // 인코딩
    pub fn encode(&self, f: &DistributionFunction) -> QlbmResult<Vec<Angle>> {
        f.iter_qubit_order()
            .map(|(velocity, site, value)| {
                Probability::new(value)
                    .map(encode_probability)
                    .map_err(|_| QlbmError::Encoding {
                        velocity,
                        site,
                        value,
                    })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
