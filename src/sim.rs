// src/sim.rs
//
// Single-trajectory simulation engine.
//
// The process is an explicit-Euler discretization of a mean-reverting
// control signal pulled toward a fixed ceiling, with fresh Gaussian noise
// each step and a hard floor/ceiling clamp applied strictly after the
// update. Randomness is injected by the caller so trajectories are
// reproducible under a seeded RNG.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::{SimConstants, SimParams};
use crate::stats::OnlineStats;

/// Summary of one trajectory's distance from the target ceiling.
/// Immutable once produced; the trajectory itself is discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreResult {
    /// max(|psi - ceiling|) over the trajectory.
    pub max_deviation: f64,
    /// Population variance of the trajectory.
    pub variance: f64,
}

impl CoreResult {
    /// Result of a zero-length trajectory: both fields are undefined.
    pub fn empty() -> Self {
        Self {
            max_deviation: f64::NAN,
            variance: f64::NAN,
        }
    }
}

/// Advances one bounded stochastic trajectory for a fixed number of steps.
#[derive(Debug, Clone, Copy)]
pub struct SimulationEngine {
    constants: SimConstants,
    sample_rate: f64,
    noise_std: f64,
    num_points: usize,
}

impl SimulationEngine {
    pub fn new(constants: SimConstants, params: &SimParams) -> Self {
        Self {
            constants,
            sample_rate: params.sample_rate,
            noise_std: params.noise_std,
            num_points: params.num_points(),
        }
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Produce the full trajectory. Exposed for property tests; production
    /// callers go through `run` and never retain the trajectory.
    pub fn simulate_trajectory<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        let c = &self.constants;
        let mut psi = vec![c.ceiling; self.num_points];

        for t in 1..self.num_points {
            let z: f64 = rng.sample(StandardNormal);
            let noise = z * self.noise_std;
            let drift = -c.gain * (c.ceiling - psi[t - 1]) + noise;
            let candidate = psi[t - 1] + drift / self.sample_rate;
            // Clamp after the update, never before.
            psi[t] = candidate.clamp(c.floor_bound, 1.0);
        }

        psi
    }

    /// Run one trajectory and extract its summary statistics.
    pub fn run<R: Rng>(&self, rng: &mut R) -> CoreResult {
        if self.num_points == 0 {
            return CoreResult::empty();
        }

        let psi = self.simulate_trajectory(rng);

        let mut max_deviation: f64 = 0.0;
        let mut stats = OnlineStats::default();
        for &x in &psi {
            max_deviation = max_deviation.max((x - self.constants.ceiling).abs());
            stats.add(x);
        }

        CoreResult {
            max_deviation,
            variance: stats.variance_population(),
        }
    }
}
