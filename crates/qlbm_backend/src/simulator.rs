//! State-vector simulator backend
//!
//! Gantree: L5_Backend → SimulatorBackend
//!
//! Builds the one-step kernel circuit, evolves the full state vector once,
//! then draws every shot from the final distribution. Amplitude index bit `q`
//! is qubit `q`, and emitted bitstrings put qubit `q` at character `q`.

use crate::execution::{Backend, ExecutionMetadata, ExecutionRequest, ExecutionResult};
use num_complex::Complex64;
use qlbm_core::classical::{collision_operator, SiteOperator};
use qlbm_core::execution::{MAX_SHOTS, MIN_SHOTS};
use qlbm_core::{Bitstring, Circuit, CircuitBuilder, Counts, Gate, QlbmError, QlbmResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

/// Largest register the dense simulator accepts
pub const MAX_SIMULATED_QUBITS: usize = 24;

/// Ideal state-vector simulator with optional readout error
/// Gantree: SimulatorBackend // 시뮬레이터 구현
#[derive(Debug)]
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Number of qubits
    num_qubits: usize,

    /// Per-bit readout flip probability
    readout_error: f64,

    /// Random seed
    seed: Option<u64>,

    /// Sampling stream, shared by successive executions
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create ideal (noiseless) simulator
    ///
    /// Registers wider than [`MAX_SIMULATED_QUBITS`] are clamped; use
    /// [`try_ideal`](Self::try_ideal) to reject them instead.
    pub fn ideal(num_qubits: usize) -> Self {
        if num_qubits > MAX_SIMULATED_QUBITS {
            log::warn!(
                "requested {} qubits, simulator clamped to {}",
                num_qubits,
                MAX_SIMULATED_QUBITS
            );
        }
        Self {
            name: "qlbm_simulator".to_string(),
            num_qubits: num_qubits.min(MAX_SIMULATED_QUBITS),
            readout_error: 0.0,
            seed: None,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create ideal simulator, failing if the register does not fit
    /// Gantree: try_ideal(n) -> Result<Self> // 용량 확인 생성
    pub fn try_ideal(num_qubits: usize) -> QlbmResult<Self> {
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(capacity_error(num_qubits));
        }
        Ok(Self::ideal(num_qubits))
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Set readout flip probability, clamped into `[0, 1]`
    pub fn with_readout_error(mut self, probability: f64) -> Self {
        self.readout_error = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Readout flip probability
    pub fn readout_error(&self) -> f64 {
        self.readout_error
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final amplitudes of a circuit started from `|0...0⟩`
    pub fn statevector(&self, circuit: &Circuit) -> QlbmResult<Vec<Complex64>> {
        let n = circuit.num_qubits();
        if n > MAX_SIMULATED_QUBITS {
            return Err(capacity_error(n));
        }

        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        let collision = collision_operator();
        for gate in circuit.gates() {
            apply_gate(&mut state, gate, &collision);
        }
        Ok(state)
    }

    /// Sample `shots` outcomes from the final state
    fn sample(&self, state: &[Complex64], n: usize, shots: u64) -> QlbmResult<Counts> {
        let probabilities: Vec<f64> = state.iter().map(|a| a.norm_sqr()).collect();
        let distribution = WeightedIndex::new(&probabilities)
            .map_err(|e| QlbmError::Execution(format!("invalid output distribution: {}", e)))?;

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| QlbmError::Execution("sampler lock poisoned".to_string()))?;

        let mut outcomes: HashMap<usize, u64> = HashMap::new();
        for _ in 0..shots {
            let mut outcome = distribution.sample(&mut *rng);
            if self.readout_error > 0.0 {
                for bit in 0..n {
                    if rng.gen::<f64>() < self.readout_error {
                        outcome ^= 1 << bit;
                    }
                }
            }
            *outcomes.entry(outcome).or_insert(0) += 1;
        }

        Ok(outcomes
            .into_iter()
            .map(|(index, count)| (Bitstring::from_index(index, n).to_string(), count))
            .collect())
    }
}

fn capacity_error(num_qubits: usize) -> QlbmError {
    QlbmError::Execution(format!(
        "cannot allocate {} qubits, simulator supports at most {}",
        num_qubits, MAX_SIMULATED_QUBITS
    ))
}

// ============================================================================
// Gate Application
// ============================================================================

fn apply_gate(state: &mut [Complex64], gate: &Gate, collision: &SiteOperator) {
    match gate {
        Gate::Ry(q, angle) => {
            let c = (angle / 2.0).cos();
            let s = (angle / 2.0).sin();
            apply_single_qubit(state, *q, |a, b| (a * c - b * s, a * s + b * c));
        }
        Gate::Swap(a, b) => {
            let (ma, mb) = (1usize << *a, 1usize << *b);
            for i in 0..state.len() {
                if i & ma != 0 && i & mb == 0 {
                    state.swap(i, i ^ ma ^ mb);
                }
            }
        }
        Gate::SqrtSwap(a, b) => apply_two_qubit(state, *a, *b, collision),
        // Measurement happens when sampling
        Gate::MeasureAll | Gate::Barrier(_) => {}
    }
}

fn apply_single_qubit<F>(state: &mut [Complex64], q: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1usize << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

/// Apply a 4×4 operator whose basis index is `bit(a) + 2*bit(b)`
fn apply_two_qubit(state: &mut [Complex64], a: usize, b: usize, op: &SiteOperator) {
    let (ma, mb) = (1usize << a, 1usize << b);
    for base in 0..state.len() {
        if base & (ma | mb) != 0 {
            continue;
        }
        let indices = [base, base | ma, base | mb, base | ma | mb];
        let input = indices.map(|i| state[i]);
        for (row, &target) in op.iter().zip(&indices) {
            state[target] = row.iter().zip(&input).map(|(m, x)| m * x).sum();
        }
    }
}

// ============================================================================
// Backend Implementation
// ============================================================================

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, request: &ExecutionRequest) -> QlbmResult<ExecutionResult> {
        request.validate()?;

        if request.num_qubits > self.num_qubits {
            return Err(QlbmError::Execution(format!(
                "cannot allocate {} qubits, backend has {}",
                request.num_qubits, self.num_qubits
            )));
        }
        if request.shots < MIN_SHOTS || request.shots > self.max_shots() {
            return Err(QlbmError::ShotsOutOfRange(
                request.shots,
                MIN_SHOTS,
                self.max_shots(),
            ));
        }

        let start = Instant::now();
        let circuit = CircuitBuilder::with_name(request.num_qubits, "qlbm_step")
            .qlbm_step(&request.angles, &request.swap_network)
            .build()?;

        log::debug!(
            "{}: {} qubits, {} gates, depth {}, {} shots",
            self.name,
            circuit.num_qubits(),
            circuit.gate_count(),
            circuit.depth(),
            request.shots
        );

        let state = self.statevector(&circuit)?;
        let counts = self.sample(&state, request.num_qubits, request.shots)?;

        let mut extra = HashMap::new();
        extra.insert("gates".to_string(), circuit.gate_count().to_string());
        extra.insert("swaps".to_string(), request.swap_network.len().to_string());

        Ok(ExecutionResult {
            counts,
            shots: request.shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                execution_time_ms: Some(start.elapsed().as_millis() as u64),
                simulated: true,
                seed: self.seed,
                extra,
            },
        })
    }

    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qlbm_core::SwapNetwork;
    use std::f64::consts::PI;

    fn probabilities(state: &[Complex64]) -> Vec<f64> {
        state.iter().map(|a| a.norm_sqr()).collect()
    }

    #[test]
    fn test_ry_pi_excites_qubit() {
        let backend = SimulatorBackend::ideal(3);
        let circuit = CircuitBuilder::new(3).ry(1, PI).build().unwrap();
        let p = probabilities(&backend.statevector(&circuit).unwrap());
        assert_abs_diff_eq!(p[0b010], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_swap_moves_excitation() {
        let backend = SimulatorBackend::ideal(4);
        let circuit = CircuitBuilder::new(4).ry(0, PI).swap(0, 3).build().unwrap();
        let p = probabilities(&backend.statevector(&circuit).unwrap());
        assert_abs_diff_eq!(p[0b1000], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sqrt_swap_splits_excitation() {
        let backend = SimulatorBackend::ideal(2);
        let circuit = CircuitBuilder::new(2).ry(0, PI).sqrt_swap(0, 1).build().unwrap();
        let p = probabilities(&backend.statevector(&circuit).unwrap());
        assert_abs_diff_eq!(p[0b01], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0b10], 0.5, epsilon = 1e-12);

        // Applied twice it is a full swap
        let circuit = CircuitBuilder::new(2)
            .ry(0, PI)
            .sqrt_swap(0, 1)
            .sqrt_swap(0, 1)
            .build()
            .unwrap();
        let p = probabilities(&backend.statevector(&circuit).unwrap());
        assert_abs_diff_eq!(p[0b10], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bitstring_character_is_qubit() {
        let backend = SimulatorBackend::ideal(4).with_seed(7);
        let request = ExecutionRequest::new(vec![PI, 0.0, 0.0, 0.0], SwapNetwork::empty(), 50);
        let result = backend.execute(&request).unwrap();

        // Collision spreads qubit 0 over qubits 0 and 1; site 1 stays empty
        for bitstring in result.counts.keys() {
            assert_eq!(bitstring.len(), 4);
            assert_eq!(&bitstring[2..], "00");
        }
        assert_eq!(result.total_counts(), 50);
    }

    #[test]
    fn test_seeded_reproducibility() {
        let request = ExecutionRequest::new(vec![1.0, 2.0, 0.5, 1.5], SwapNetwork::empty(), 500);
        let a = SimulatorBackend::ideal(4).with_seed(11).execute(&request).unwrap();
        let b = SimulatorBackend::ideal(4).with_seed(11).execute(&request).unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.metadata.seed, Some(11));
    }

    #[test]
    fn test_request_too_large() {
        let backend = SimulatorBackend::ideal(2);
        let request = ExecutionRequest::new(vec![0.1; 4], SwapNetwork::empty(), 10);
        let err = backend.execute(&request).unwrap_err();
        assert!(err.is_execution_error());
        assert_eq!(
            err,
            QlbmError::Execution("cannot allocate 4 qubits, backend has 2".to_string())
        );
    }

    #[test]
    fn test_capacity_is_checked() {
        // 26 qubits is the register of a 12-cell lattice
        let err = SimulatorBackend::try_ideal(26).unwrap_err();
        assert!(err.is_execution_error());
        assert_eq!(
            SimulatorBackend::try_ideal(MAX_SIMULATED_QUBITS).unwrap().num_qubits(),
            MAX_SIMULATED_QUBITS
        );

        let clamped = SimulatorBackend::ideal(26);
        assert_eq!(clamped.num_qubits(), MAX_SIMULATED_QUBITS);
        let request = ExecutionRequest::new(vec![0.1; 26], SwapNetwork::empty(), 10);
        assert!(clamped.execute(&request).unwrap_err().is_execution_error());
    }

    #[test]
    fn test_statevector_rejects_oversized_circuit() {
        let backend = SimulatorBackend::ideal(4);
        let circuit = Circuit::new(MAX_SIMULATED_QUBITS + 6);
        assert!(backend.statevector(&circuit).unwrap_err().is_execution_error());
    }

    #[test]
    fn test_shots_out_of_range() {
        let backend = SimulatorBackend::ideal(2);
        let request = ExecutionRequest::new(vec![0.1; 2], SwapNetwork::empty(), 0);
        let err = backend.execute(&request).unwrap_err();
        assert!(err.is_execution_error());
    }

    #[test]
    fn test_readout_error_flips_bits() {
        let backend = SimulatorBackend::ideal(2)
            .with_seed(3)
            .with_readout_error(1.0);
        let request = ExecutionRequest::new(vec![0.0, 0.0], SwapNetwork::empty(), 20);
        let result = backend.execute(&request).unwrap();
        assert_eq!(result.counts.get("11"), Some(&20));
    }
}
