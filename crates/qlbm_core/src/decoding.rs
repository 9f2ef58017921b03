//! Measurement decoding
//!
//! Gantree: L2_Codec → MeasurementDecoder
//!
//! Turns shot counts back into occupation probabilities. Each qubit's
//! marginal `P(bit q = 1)` is read as the occupation of its (velocity, site)
//! pair.
//!
//! Reading marginals independently is a modeling assumption: the kernel
//! prepares a product state and only entangles the two qubits of each site,
//! so the marginal of qubit `q` carries the post-collision occupation of that
//! pair. Hardware noise or entanglement leaking across sites would break this
//! and is not detected here.

use crate::constants::d1q2::{qubit_index, NUM_VELOCITIES};
use crate::error::{QlbmError, QlbmResult};
use crate::lattice::DistributionFunction;
use crate::types::{Bitstring, Counts};
use serde::{Deserialize, Serialize};

/// Outcome counts of a single qubit, indexed by bit value
/// Gantree: QubitMarginal // 단일 큐비트 주변분포
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMarginal {
    counts: [u64; 2],
}

impl QubitMarginal {
    /// Count of outcome `bit`
    pub fn count(&self, bit: bool) -> u64 {
        self.counts[bit as usize]
    }

    /// Probability of outcome `bit`; zero when it was never observed
    pub fn probability(&self, bit: bool, shots: u64) -> f64 {
        self.count(bit) as f64 / shots as f64
    }

    fn record(&mut self, bit: bool, count: u64) {
        self.counts[bit as usize] += count;
    }
}

/// Decodes shot counts over `2M` qubits into a distribution function
/// Gantree: MeasurementDecoder // 측정→확률
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementDecoder {
    num_qubits: usize,
}

impl MeasurementDecoder {
    /// Create a decoder for `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits }
    }

    /// Number of qubits expected in every bitstring
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Per-qubit outcome counts
    ///
    /// Separators (spaces, underscores) are stripped before bit `q` is read
    /// at character offset `q`.
    /// Gantree: marginals(&counts) -> Result<Vec<QubitMarginal>> // 주변 카운트
    pub fn marginals(&self, counts: &Counts) -> QlbmResult<Vec<QubitMarginal>> {
        let mut marginals = vec![QubitMarginal::default(); self.num_qubits];
        for (key, &count) in counts {
            let bits = Bitstring::parse_stripped(key)?;
            if bits.len() != self.num_qubits {
                return Err(QlbmError::Decoding {
                    bitstring: key.clone(),
                    expected: self.num_qubits,
                    actual: bits.len(),
                });
            }
            for (q, marginal) in marginals.iter_mut().enumerate() {
                if let Some(bit) = bits.get(q) {
                    marginal.record(bit, count);
                }
            }
        }
        Ok(marginals)
    }

    /// Per-qubit probability of measuring `1`
    pub fn excitation_probabilities(&self, counts: &Counts, shots: u64) -> QlbmResult<Vec<f64>> {
        check_shots(counts, shots)?;
        Ok(self
            .marginals(counts)?
            .iter()
            .map(|m| m.probability(true, shots))
            .collect())
    }

    /// Reconstruct `f[i][k] = P(qubit i + 2k = 1)`
    /// Gantree: decode(&counts, shots) -> Result<DistributionFunction> // 디코딩
    pub fn decode(&self, counts: &Counts, shots: u64) -> QlbmResult<DistributionFunction> {
        let probabilities = self.excitation_probabilities(counts, shots)?;
        let num_sites = self.num_qubits / NUM_VELOCITIES;

        let mut f = DistributionFunction::zeros(num_sites);
        for k in 0..num_sites {
            for i in 0..NUM_VELOCITIES {
                f.set(i, k, probabilities[qubit_index(i, k)]);
            }
        }
        Ok(f)
    }
}

fn check_shots(counts: &Counts, shots: u64) -> QlbmResult<()> {
    if shots == 0 {
        return Err(QlbmError::CountsMismatch { total: 0, shots });
    }
    let total: u64 = counts.values().sum();
    if total != shots {
        return Err(QlbmError::CountsMismatch { total, shots });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
