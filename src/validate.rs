// src/validate.rs
//
// Validation aggregator: runs many independent trajectories and folds the
// per-core summaries into a single pass/fail report against the fixed
// theoretical bound.
//
// Runs have no data dependency on one another and the fold statistics
// (max/mean) are order-independent, so correctness never depends on
// execution order.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{SimConstants, SimParams};
use crate::logging::RunSink;
use crate::sim::{CoreResult, SimulationEngine};
use crate::stats::OnlineStats;

/// Aggregate outcome of one validation run.
///
/// Invariant: `passed == (max_deviation <= theoretical_bound)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Total simulated points across all cores.
    pub sample_count: u64,
    /// Maximum per-core max deviation.
    pub max_deviation: f64,
    /// Mean of per-core max deviations.
    pub mean_deviation: f64,
    /// Mean of per-core trajectory variances.
    pub mean_variance: f64,
    /// Fixed bound the run is judged against (entropy_floor / gain).
    pub theoretical_bound: f64,
    pub passed: bool,
    pub elapsed_seconds: f64,
}

/// Pure fold over per-core results, exposed separately so order
/// invariance is testable without running simulations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldStats {
    pub max_deviation: f64,
    pub mean_deviation: f64,
    pub mean_variance: f64,
}

pub fn fold_core_results(results: &[CoreResult]) -> FoldStats {
    // Zero-length trajectories carry NaN summaries; they must poison the
    // fold so the run reports FAILED (NaN <= bound is false), not vanish
    // from it.
    if results
        .iter()
        .any(|r| r.max_deviation.is_nan() || r.variance.is_nan())
    {
        return FoldStats {
            max_deviation: f64::NAN,
            mean_deviation: f64::NAN,
            mean_variance: f64::NAN,
        };
    }

    let mut deviations = OnlineStats::default();
    let mut variances = OnlineStats::default();

    for r in results {
        deviations.add(r.max_deviation);
        variances.add(r.variance);
    }

    FoldStats {
        max_deviation: deviations.max(),
        mean_deviation: deviations.mean(),
        mean_variance: variances.mean(),
    }
}

/// Run `params.num_cores` independent simulations and fold the results.
///
/// Run i is seeded with `base_seed + i` when a base seed is configured,
/// otherwise each run draws its RNG from OS entropy.
pub fn run_validation(
    constants: SimConstants,
    params: &SimParams,
    sink: &mut dyn RunSink,
) -> ValidationReport {
    let start = Instant::now();
    let engine = SimulationEngine::new(constants, params);

    let mut results = Vec::with_capacity(params.num_cores);
    for i in 0..params.num_cores {
        let mut rng = match params.seed {
            Some(base) => ChaCha8Rng::seed_from_u64(base.wrapping_add(i as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        let result = engine.run(&mut rng);
        sink.log_run(i, params.num_cores, &result);
        results.push(result);
    }

    let folded = fold_core_results(&results);
    let theoretical_bound = constants.theoretical_bound();

    ValidationReport {
        sample_count: (params.num_cores as u64) * (engine.num_points() as u64),
        max_deviation: folded.max_deviation,
        mean_deviation: folded.mean_deviation,
        mean_variance: folded.mean_variance,
        theoretical_bound,
        passed: folded.max_deviation <= theoretical_bound,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    }
}

/// Human-readable results block shared by the validation binaries.
pub fn print_console_report(report: &ValidationReport) {
    println!("Samples: {}", report.sample_count);
    println!("Max deviation: {:.6}", report.max_deviation);
    println!("Mean deviation: {:.6}", report.mean_deviation);
    println!("Variance: {:.6}", report.mean_variance);
    println!("Theoretical bound: {:.6}", report.theoretical_bound);
    println!("Time: {:.2}s", report.elapsed_seconds);

    if report.passed {
        println!("\nVALIDATION: PASSED");
    } else {
        println!("\nVALIDATION: FAILED");
    }
}
