//! Core types for QLBM
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Provides fundamental type aliases and validated wrapper types
//! used throughout the QLBM workspace.

use crate::error::{QlbmError, QlbmResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Rotation angle in radians
/// Gantree: Angle // pub type Angle = f64
pub type Angle = f64;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

/// A single transposition of two qubit positions
pub type SwapPair = (QubitId, QubitId);

/// Density per lattice site
pub type DensityProfile = Vec<f64>;

// ============================================================================
// Probability (Validated Wrapper)
// ============================================================================

/// Probability value in range [0, 1]
/// Gantree: Probability // 범위 검증 구조체
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability(f64);

impl Probability {
    /// Create a new Probability with validation
    pub fn new(value: f64) -> QlbmResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(QlbmError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Get the probability value
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the complement (1 - p)
    #[inline]
    pub fn complement(&self) -> f64 {
        1.0 - self.0
    }

    /// Zero probability
    pub const ZERO: Self = Self(0.0);

    /// Certainty (p = 1)
    pub const ONE: Self = Self(1.0);
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = QlbmError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Measured bitstring. Position `q` holds the outcome of qubit `q`.
/// Gantree: Bitstring // 비트열 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    pub fn parse(s: &str) -> QlbmResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QlbmError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Parse after removing register separators (spaces and underscores)
    pub fn parse_stripped(s: &str) -> QlbmResult<Self> {
        Self::parse(&strip_separators(s))
    }

    /// Build the bitstring of a basis-state index, qubit `q` taken from bit `q`
    pub fn from_index(index: usize, num_bits: usize) -> Self {
        Self {
            bits: (0..num_bits).map(|q| (index >> q) & 1 == 1).collect(),
        }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get bit at position
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Remove spaces and underscores that some substrates use to group registers
pub fn strip_separators(s: &str) -> String {
    s.chars().filter(|&c| c != ' ' && c != '_').collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_valid() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(0.5).is_ok());
        assert!(Probability::new(1.0).is_ok());
    }

    #[test]
    fn test_probability_invalid() {
        assert!(Probability::new(-0.1).is_err());
        assert!(Probability::new(1.1).is_err());
        assert!(Probability::new(f64::NAN).is_err());
    }

    #[test]
    fn test_probability_complement() {
        let p = Probability::new(0.3).unwrap();
        assert!((p.complement() - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_bitstring_parse() {
        let bs = Bitstring::parse("01101").unwrap();
        assert_eq!(bs.len(), 5);
        assert_eq!(bs.get(0), Some(false));
        assert_eq!(bs.get(1), Some(true));
        assert_eq!(bs.get(5), None);
        assert!(Bitstring::parse("01x").is_err());
    }

    #[test]
    fn test_bitstring_stripped() {
        let bs = Bitstring::parse_stripped("01 10_11").unwrap();
        assert_eq!(bs.to_string(), "011011");
    }

    #[test]
    fn test_bitstring_from_index() {
        // index 0b0110 -> qubits 1 and 2 set
        let bs = Bitstring::from_index(6, 4);
        assert_eq!(bs.to_string(), "0110");

        let bs = Bitstring::from_index(1, 3);
        assert_eq!(bs.to_string(), "100");
    }
}
