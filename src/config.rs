// src/config.rs
//
// Central configuration for the veriphi validation harness.
// All numeric constants of the simulated process live here as an explicit
// immutable value passed into the simulation and aggregation components,
// never as process-wide mutable state.

use std::env;

/// Physical constants of the simulated control process.
///
/// These define the dynamics and the pass/fail bound. Note that the
/// theoretical bound depends only on these constants, never on the run
/// parameters: a run configured with large noise is still judged against
/// the same fixed bound.
#[derive(Debug, Clone, Copy)]
pub struct SimConstants {
    /// Target asymptotic value the process is pulled toward.
    pub ceiling: f64,
    /// Restoring-force gain. Also the divisor of the theoretical bound.
    pub gain: f64,
    /// Hard floor of the clamped process.
    pub floor_bound: f64,
    /// Entropy floor; numerator of the theoretical bound.
    pub entropy_floor: f64,
}

impl Default for SimConstants {
    fn default() -> Self {
        Self {
            ceiling: 0.9973,
            gain: 10.0,
            floor_bound: 0.82,
            entropy_floor: 0.0027,
        }
    }
}

impl SimConstants {
    /// Maximum allowed deviation for the validation to report pass.
    ///
    /// Fixed at entropy_floor / gain (= 0.00027 with defaults), independent
    /// of noise_std by design.
    pub fn theoretical_bound(&self) -> f64 {
        self.entropy_floor / self.gain
    }
}

/// Per-run simulation parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    /// Steps per second.
    pub sample_rate: f64,
    /// Seconds per trajectory.
    pub duration: f64,
    /// Standard deviation of the zero-mean Gaussian perturbation.
    pub noise_std: f64,
    /// Number of independent trajectories to aggregate.
    pub num_cores: usize,
    /// Base seed. Run i uses seed + i; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimParams {
    /// Number of points per trajectory.
    pub fn num_points(&self) -> usize {
        let n = (self.duration * self.sample_rate).round();
        if n <= 0.0 {
            0
        } else {
            n as usize
        }
    }

    /// Quick preset: one core, 1000 points, moderate noise.
    pub fn quick() -> Self {
        Self {
            sample_rate: 100.0,
            duration: 10.0,
            noise_std: 0.0001,
            num_cores: 1,
            seed: None,
        }
    }

    /// Full-suite preset: 1000 cores at 100 Hz for 10 s each.
    pub fn full() -> Self {
        Self {
            sample_rate: 100.0,
            duration: 10.0,
            noise_std: 0.00001,
            num_cores: 1000,
            seed: None,
        }
    }

    /// Apply environment overrides on top of `self`.
    ///
    /// Designed for research / batch runs:
    ///
    ///   - VERIPHI_NUM_CORES    (usize, >= 1)
    ///   - VERIPHI_SAMPLE_RATE  (f64, steps per second)
    ///   - VERIPHI_DURATION     (f64, seconds)
    ///   - VERIPHI_NOISE_STD    (f64, >= 0)
    ///   - VERIPHI_SEED         (u64)
    ///
    /// Any variable that fails to parse is ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = env::var("VERIPHI_NUM_CORES") {
            match raw.parse::<usize>() {
                Ok(v) if v >= 1 => {
                    self.num_cores = v;
                    eprintln!("[config] VERIPHI_NUM_CORES = {v} (overrode default)");
                }
                _ => {
                    eprintln!(
                        "[config] WARN: could not parse VERIPHI_NUM_CORES = {:?} as usize >= 1; using {}",
                        raw, self.num_cores
                    );
                }
            }
        }

        if let Ok(raw) = env::var("VERIPHI_SAMPLE_RATE") {
            match raw.parse::<f64>() {
                Ok(v) if v > 0.0 => {
                    self.sample_rate = v;
                    eprintln!("[config] VERIPHI_SAMPLE_RATE = {v} (overrode default)");
                }
                _ => {
                    eprintln!(
                        "[config] WARN: could not parse VERIPHI_SAMPLE_RATE = {:?} as f64 > 0; using {}",
                        raw, self.sample_rate
                    );
                }
            }
        }

        if let Ok(raw) = env::var("VERIPHI_DURATION") {
            match raw.parse::<f64>() {
                Ok(v) if v >= 0.0 => {
                    self.duration = v;
                    eprintln!("[config] VERIPHI_DURATION = {v} (overrode default)");
                }
                _ => {
                    eprintln!(
                        "[config] WARN: could not parse VERIPHI_DURATION = {:?} as f64 >= 0; using {}",
                        raw, self.duration
                    );
                }
            }
        }

        if let Ok(raw) = env::var("VERIPHI_NOISE_STD") {
            match raw.parse::<f64>() {
                Ok(v) if v >= 0.0 => {
                    self.noise_std = v;
                    eprintln!("[config] VERIPHI_NOISE_STD = {v} (overrode default)");
                }
                _ => {
                    eprintln!(
                        "[config] WARN: could not parse VERIPHI_NOISE_STD = {:?} as f64 >= 0; using {}",
                        raw, self.noise_std
                    );
                }
            }
        }

        if let Ok(raw) = env::var("VERIPHI_SEED") {
            match raw.parse::<u64>() {
                Ok(v) => {
                    self.seed = Some(v);
                    eprintln!("[config] VERIPHI_SEED = {v} (overrode default)");
                }
                Err(_) => {
                    eprintln!(
                        "[config] WARN: could not parse VERIPHI_SEED = {:?} as u64; leaving unseeded",
                        raw
                    );
                }
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theoretical_bound_matches_constants() {
        let c = SimConstants::default();
        assert!((c.theoretical_bound() - 0.00027).abs() < 1e-15);
    }

    #[test]
    fn num_points_rounds() {
        let mut p = SimParams::quick();
        assert_eq!(p.num_points(), 1000);

        p.sample_rate = 3.0;
        p.duration = 0.5; // 1.5 rounds to 2
        assert_eq!(p.num_points(), 2);

        p.duration = 0.0;
        assert_eq!(p.num_points(), 0);
    }
}
