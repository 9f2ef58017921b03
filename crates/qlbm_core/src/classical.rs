//! Classical reference solver
//!
//! Gantree: L3_Reference → ClassicalReferenceSolver
//!
//! Performs the same collision, streaming and periodic boundary update as the
//! quantum kernel, but with dense linear algebra on each site's two-qubit
//! amplitude vector instead of sampling.
//!
//! Site basis order is `b0 + 2*b1`: `|00⟩`, direction 0 only, direction 1
//! only, both occupied.

use crate::constants::d1q2::NUM_VELOCITIES;
use crate::lattice::DistributionFunction;
use num_complex::Complex64;

/// Two-qubit amplitude vector of one site
pub type SiteAmplitudes = [Complex64; 4];

/// 4×4 complex operator
pub type SiteOperator = [[Complex64; 4]; 4];

/// D1Q2 diffusion collision operator (square root of SWAP)
pub fn collision_operator() -> SiteOperator {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let a = Complex64::new(0.5, 0.5);
    let b = Complex64::new(0.5, -0.5);
    [
        [one, zero, zero, zero],
        [zero, a, b, zero],
        [zero, b, a, zero],
        [zero, zero, zero, one],
    ]
}

/// Number operators counting occupation of direction 0 and direction 1
pub const NUMBER_OPERATORS: [[f64; 4]; NUM_VELOCITIES] = [
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
];

/// Product-state amplitudes of site `k`:
/// `amp(b0, b1) = sqrt(P(dir0 = b0) * P(dir1 = b1))`
pub fn site_amplitudes(f: &DistributionFunction, site: usize) -> SiteAmplitudes {
    let p0 = [1.0 - f.get(0, site), f.get(0, site)];
    let p1 = [1.0 - f.get(1, site), f.get(1, site)];
    let mut amps = [Complex64::new(0.0, 0.0); 4];
    for (index, amp) in amps.iter_mut().enumerate() {
        let (b0, b1) = (index & 1, index >> 1);
        *amp = Complex64::new((p0[b0] * p1[b1]).sqrt(), 0.0);
    }
    amps
}

/// Apply a site operator to an amplitude vector
pub fn apply_operator(op: &SiteOperator, amps: &SiteAmplitudes) -> SiteAmplitudes {
    let mut out = [Complex64::new(0.0, 0.0); 4];
    for (row, value) in op.iter().zip(out.iter_mut()) {
        *value = row.iter().zip(amps).map(|(m, a)| m * a).sum();
    }
    out
}

/// Expectation `⟨ψ|N|ψ⟩` of a diagonal number operator
pub fn expected_occupation(diagonal: &[f64; 4], amps: &SiteAmplitudes) -> f64 {
    diagonal
        .iter()
        .zip(amps)
        .map(|(n, a)| n * a.norm_sqr())
        .sum()
}

/// Noise-free D1Q2 update used as ground truth
/// Gantree: ClassicalReferenceSolver // 고전 기준해
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicalReferenceSolver {
    collision: SiteOperator,
}

impl ClassicalReferenceSolver {
    /// Create a solver with the diffusion collision operator
    pub fn new() -> Self {
        Self {
            collision: collision_operator(),
        }
    }

    /// Collision operator in use
    pub fn collision(&self) -> &SiteOperator {
        &self.collision
    }

    /// Occupations after collision at every site
    /// Gantree: collide(&f) -> DistributionFunction // 충돌
    pub fn collide(&self, f: &DistributionFunction) -> DistributionFunction {
        let mut post = DistributionFunction::zeros(f.num_sites());
        for k in 0..f.num_sites() {
            let amps = apply_operator(&self.collision, &site_amplitudes(f, k));
            for (i, diagonal) in NUMBER_OPERATORS.iter().enumerate() {
                post.set(i, k, expected_occupation(diagonal, &amps));
            }
        }
        post
    }

    /// Shift direction 0 one site right and direction 1 one site left
    ///
    /// Boundary entries not reached by the shift keep their value from
    /// `previous`; the periodic boundary overwrites them afterwards.
    /// Gantree: stream(&prev, &post) -> DistributionFunction // 스트리밍
    pub fn stream(
        &self,
        previous: &DistributionFunction,
        post_collision: &DistributionFunction,
    ) -> DistributionFunction {
        let mut next = previous.clone();
        let m = post_collision.num_sites();
        for k in 0..m.saturating_sub(1) {
            next.set(0, k + 1, post_collision.get(0, k));
            next.set(1, k, post_collision.get(1, k + 1));
        }
        next
    }

    /// Collision followed by streaming, without the boundary step
    pub fn collide_and_stream(&self, f: &DistributionFunction) -> DistributionFunction {
        let post = self.collide(f);
        self.stream(f, &post)
    }

    /// Full time step: collision, streaming, periodic boundary
    /// Gantree: step(&f) -> DistributionFunction // 한 스텝
    pub fn step(&self, f: &DistributionFunction) -> DistributionFunction {
        let mut next = self.collide_and_stream(f);
        next.apply_periodic_boundary();
        next
    }
}

impl Default for ClassicalReferenceSolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
