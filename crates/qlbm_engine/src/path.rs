//! Step paths: the quantum round trip and the classical reference
//!
//! Gantree: L6_Engine → StepPath
//!
//! Both paths implement "collide and stream". The periodic boundary is applied
//! once, by [`advance`], so neither path repeats it.

use qlbm_backend::{Backend, ExecutionRequest};
use qlbm_core::{
    ClassicalReferenceSolver, DistributionEncoder, DistributionFunction, MeasurementDecoder,
    QlbmResult, StreamingPermutationBuilder, SwapNetwork,
};

// ============================================================================
// Step Path Trait
// ============================================================================

/// One way of computing collision followed by streaming
/// Gantree: StepPath // 스텝 경로
pub trait StepPath {
    /// Path name for logging
    fn name(&self) -> &str;

    /// Post-streaming distribution, boundary entries not yet reapplied
    fn collide_and_stream(&mut self, f: &DistributionFunction) -> QlbmResult<DistributionFunction>;
}

/// Full time step along `path`: collide, stream, reapply the periodic boundary
/// Gantree: advance(path, f) -> Result<DistributionFunction> // 한 스텝 진행
pub fn advance<P: StepPath + ?Sized>(
    path: &mut P,
    f: &DistributionFunction,
) -> QlbmResult<DistributionFunction> {
    let mut next = path.collide_and_stream(f)?;
    next.apply_periodic_boundary();
    Ok(next)
}

// ============================================================================
// Quantum Path
// ============================================================================

/// Encode, execute on a backend, decode
/// Gantree: QuantumPath // 양자 경로
pub struct QuantumPath<B: Backend> {
    backend: B,
    encoder: DistributionEncoder,
    decoder: MeasurementDecoder,

    /// Computed once per lattice size
    swap_network: SwapNetwork,

    shots: u64,
    executions: usize,
}

impl<B: Backend> QuantumPath<B> {
    /// Create a path for a lattice of `num_sites` sites
    pub fn new(backend: B, num_sites: usize, shots: u64) -> QlbmResult<Self> {
        let num_qubits = 2 * num_sites;
        let swap_network = StreamingPermutationBuilder::new(num_qubits).swap_network()?;

        log::debug!(
            "quantum path on '{}': {} qubits, {} streaming swaps",
            backend.name(),
            num_qubits,
            swap_network.len()
        );

        Ok(Self {
            backend,
            encoder: DistributionEncoder::new(),
            decoder: MeasurementDecoder::new(num_qubits),
            swap_network,
            shots,
            executions: 0,
        })
    }

    /// Backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Cached streaming swap network
    pub fn swap_network(&self) -> &SwapNetwork {
        &self.swap_network
    }

    /// Shots per execution
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Number of successful backend round trips
    pub fn executions(&self) -> usize {
        self.executions
    }
}

impl<B: Backend> StepPath for QuantumPath<B> {
    fn name(&self) -> &str {
        "quantum"
    }

    fn collide_and_stream(&mut self, f: &DistributionFunction) -> QlbmResult<DistributionFunction> {
        let angles = self.encoder.encode(f)?;
        log::debug!("encoded angles: {:?}", angles);

        let request = ExecutionRequest::new(angles, self.swap_network.clone(), self.shots);
        let result = self.backend.execute(&request)?;
        log::debug!("{}", result);

        let next = self.decoder.decode(&result.counts, request.shots)?;
        self.executions += 1;
        Ok(next)
    }
}

// ============================================================================
// Classical Path
// ============================================================================

/// Dense reference update
/// Gantree: ClassicalPath // 고전 경로
#[derive(Debug, Clone, Default)]
pub struct ClassicalPath {
    solver: ClassicalReferenceSolver,
}

impl ClassicalPath {
    /// Create a classical path
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepPath for ClassicalPath {
    fn name(&self) -> &str {
        "classical"
    }

    fn collide_and_stream(&mut self, f: &DistributionFunction) -> QlbmResult<DistributionFunction> {
        Ok(self.solver.collide_and_stream(f))
    }
}

// ============================================================================
// Tests
// ============================================================================
