//! Streaming permutation and swap networks
//!
//! Gantree: L2_Streaming → StreamingPermutationBuilder
//!
//! Streaming moves direction-0 occupations one site right and direction-1
//! occupations one site left, wrapping around the lattice. On the quantum
//! path this is a qubit permutation, realized as a network of SWAP gates
//! with the fewest possible transpositions.

use crate::constants::streaming::MIN_STREAMING_QUBITS;
use crate::error::{QlbmError, QlbmResult};
use crate::types::{QubitId, SwapPair};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Permutation
// ============================================================================

/// Bijection over `0..len`; position `p` receives the content of `P[p]`
/// Gantree: Permutation // 순열
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    targets: Vec<usize>,
}

impl Permutation {
    /// Validate that `targets` is a bijection over `0..targets.len()`
    pub fn new(targets: Vec<usize>) -> QlbmResult<Self> {
        let mut seen = vec![false; targets.len()];
        for (position, &value) in targets.iter().enumerate() {
            if value >= targets.len() {
                return Err(QlbmError::InvalidPermutation(format!(
                    "value {} at position {} out of range for length {}",
                    value,
                    position,
                    targets.len()
                )));
            }
            if std::mem::replace(&mut seen[value], true) {
                return Err(QlbmError::InvalidPermutation(format!(
                    "value {} appears more than once",
                    value
                )));
            }
        }
        Ok(Self { targets })
    }

    /// Identity permutation of the given length
    pub fn identity(len: usize) -> Self {
        Self {
            targets: (0..len).collect(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check if every element is fixed
    pub fn is_identity(&self) -> bool {
        self.targets.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// Target positions
    pub fn as_slice(&self) -> &[usize] {
        &self.targets
    }

    /// Number of cycles, fixed points included
    pub fn cycle_count(&self) -> usize {
        let mut visited = vec![false; self.targets.len()];
        let mut cycles = 0;
        for start in 0..self.targets.len() {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut current = start;
            while !visited[current] {
                visited[current] = true;
                current = self.targets[current];
            }
        }
        cycles
    }

    /// Minimal swap decomposition of this permutation
    ///
    /// Scans positions left to right on a working copy. Whenever position `i`
    /// does not hold `i`, the position `j` holding `i` is swapped into place
    /// and `(i, j)` is recorded. The recorded list is reversed so that
    /// replaying it on the identity arrangement produces this permutation.
    /// Gantree: ordered_swaps() -> SwapNetwork // 최소 스왑 분해
    pub fn ordered_swaps(&self) -> SwapNetwork {
        let mut working = self.targets.clone();
        let mut position_of = vec![0; working.len()];
        for (position, &value) in working.iter().enumerate() {
            position_of[value] = position;
        }

        let mut swaps = Vec::with_capacity(working.len().saturating_sub(self.cycle_count()));
        for i in 0..working.len() {
            if working[i] == i {
                continue;
            }
            let j = position_of[i];
            swaps.push((i, j));

            let displaced = working[i];
            working.swap(i, j);
            position_of[displaced] = j;
            position_of[i] = i;
        }

        swaps.reverse();
        SwapNetwork { swaps }
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.targets)
    }
}

// ============================================================================
// Swap Network
// ============================================================================

/// Ordered sequence of transpositions
/// Gantree: SwapNetwork // 스왑 네트워크
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapNetwork {
    swaps: Vec<SwapPair>,
}

impl SwapNetwork {
    /// Build from explicit pairs, rejecting self-swaps
    pub fn from_pairs(swaps: Vec<SwapPair>) -> QlbmResult<Self> {
        if let Some(&(a, b)) = swaps.iter().find(|(a, b)| a == b) {
            return Err(QlbmError::InvalidSwap(a, b));
        }
        Ok(Self { swaps })
    }

    /// Empty network
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of swaps
    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    /// Swap pairs in application order
    pub fn pairs(&self) -> &[SwapPair] {
        &self.swaps
    }

    /// Iterate swaps in application order
    pub fn iter(&self) -> impl Iterator<Item = &SwapPair> {
        self.swaps.iter()
    }

    /// Highest qubit index touched, if any
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.swaps.iter().map(|&(a, b)| a.max(b)).max()
    }

    /// Replay the swaps on the identity arrangement of `len` elements
    pub fn apply_to_identity(&self, len: usize) -> QlbmResult<Vec<usize>> {
        let mut arrangement: Vec<usize> = (0..len).collect();
        for &(a, b) in &self.swaps {
            let max = a.max(b);
            if max >= len {
                return Err(QlbmError::QubitOutOfRange { qubit: max, max: len });
            }
            arrangement.swap(a, b);
        }
        Ok(arrangement)
    }
}

impl fmt::Display for SwapNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .swaps
            .iter()
            .map(|(a, b)| format!("({}, {})", a, b))
            .collect();
        write!(f, "SwapNetwork[{}]", pairs.join(", "))
    }
}

// ============================================================================
// Streaming Pattern
// ============================================================================

/// Raw streaming pattern for `n` qubits; empty when `n < 4`
///
/// The first pair maps to `(n-2, 3)`, every even `i` in `2..n-3` adds
/// `(i-2, i+3)`, and the last pair is `(n-4, 1)`.
pub fn streaming_pattern(num_qubits: usize) -> Vec<usize> {
    if num_qubits < MIN_STREAMING_QUBITS {
        return Vec::new();
    }
    let n = num_qubits;
    let mut pattern = Vec::with_capacity(n);
    pattern.extend([n - 2, 3]);
    for i in (2..n - 3).step_by(2) {
        pattern.extend([i - 2, i + 3]);
    }
    pattern.extend([n - 4, 1]);
    pattern
}

/// Builds the streaming permutation and its swap network for a qubit count
/// Gantree: StreamingPermutationBuilder // 스트리밍 순열
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingPermutationBuilder {
    num_qubits: usize,
}

impl StreamingPermutationBuilder {
    /// Create a builder for `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// True when the lattice is too small to stream
    pub fn is_degenerate(&self) -> bool {
        self.num_qubits < MIN_STREAMING_QUBITS
    }

    /// Streaming permutation; empty for a degenerate lattice
    pub fn permutation(&self) -> QlbmResult<Permutation> {
        Permutation::new(streaming_pattern(self.num_qubits))
    }

    /// Minimal swap network realizing the streaming permutation
    /// Gantree: swap_network() -> Result<SwapNetwork> // 스왑 목록
    pub fn swap_network(&self) -> QlbmResult<SwapNetwork> {
        Ok(self.permutation()?.ordered_swaps())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn test_pattern_five_sites() {
        assert_eq!(streaming_pattern(10), vec![8, 3, 0, 5, 2, 7, 4, 9, 6, 1]);
    }

    #[test]
    fn test_pattern_two_sites() {
        assert_eq!(streaming_pattern(4), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_pattern_degenerate() {
        for n in 0..4 {
            assert!(streaming_pattern(n).is_empty());
            let builder = StreamingPermutationBuilder::new(n);
            assert!(builder.is_degenerate());
            assert!(builder.permutation().unwrap().is_empty());
            assert!(builder.swap_network().unwrap().is_empty());
        }
    }

    #[test]
    fn test_pattern_is_permutation_for_even_counts() {
        for sites in 2..12 {
            let n = 2 * sites;
            let perm = Permutation::new(streaming_pattern(n)).unwrap();
            assert_eq!(perm.len(), n);
        }
    }

    #[test]
    fn test_odd_count_rejected() {
        assert!(StreamingPermutationBuilder::new(5).permutation().is_err());
    }

    #[test]
    fn test_streaming_moves_directions_apart() {
        // Position p receives the content of P[p]
        let n = 10;
        let perm = StreamingPermutationBuilder::new(n).permutation().unwrap();
        let sites = n / 2;
        for site in 0..sites {
            // Direction 0 arrives from the left neighbor
            let src = perm.as_slice()[2 * site];
            assert_eq!(src % 2, 0);
            assert_eq!(src / 2, (site + sites - 1) % sites);
            // Direction 1 arrives from the right neighbor
            let src = perm.as_slice()[2 * site + 1];
            assert_eq!(src % 2, 1);
            assert_eq!(src / 2, (site + 1) % sites);
        }
    }

    #[test]
    fn test_minimal_network_two_sites() {
        let network = StreamingPermutationBuilder::new(4).swap_network().unwrap();
        assert!(!network.is_empty());
        assert_eq!(network.pairs(), &[(1, 3), (0, 2)]);
        assert_eq!(network.apply_to_identity(4).unwrap(), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_network_five_sites() {
        let builder = StreamingPermutationBuilder::new(10);
        let perm = builder.permutation().unwrap();
        let network = builder.swap_network().unwrap();

        assert_eq!(perm.cycle_count(), 2);
        assert_eq!(network.len(), 8);
        assert_eq!(network.apply_to_identity(10).unwrap(), perm.as_slice());
    }

    #[test]
    fn test_random_permutations_minimal_and_correct() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..40 {
            let mut targets: Vec<usize> = (0..len).collect();
            targets.shuffle(&mut rng);
            let perm = Permutation::new(targets).unwrap();

            let network = perm.ordered_swaps();
            assert_eq!(network.len(), len - perm.cycle_count());
            assert!(network.iter().all(|(a, b)| a != b));
            assert_eq!(network.apply_to_identity(len).unwrap(), perm.as_slice());
        }
    }

    #[test]
    fn test_identity_needs_no_swaps() {
        let perm = Permutation::identity(6);
        assert!(perm.is_identity());
        assert_eq!(perm.cycle_count(), 6);
        assert!(perm.ordered_swaps().is_empty());
    }

    #[test]
    fn test_invalid_permutations() {
        assert!(Permutation::new(vec![0, 0, 1]).is_err());
        assert!(Permutation::new(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_swap_network_validation() {
        assert!(SwapNetwork::from_pairs(vec![(0, 1), (2, 3)]).is_ok());
        assert_eq!(
            SwapNetwork::from_pairs(vec![(0, 1), (2, 2)]).unwrap_err(),
            QlbmError::InvalidSwap(2, 2)
        );

        let network = SwapNetwork::from_pairs(vec![(0, 5)]).unwrap();
        assert_eq!(network.max_qubit(), Some(5));
        assert!(network.apply_to_identity(4).is_err());
    }
}
