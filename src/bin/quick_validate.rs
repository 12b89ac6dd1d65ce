// src/bin/quick_validate.rs
//
// Quick validation entry point: one core, quick preset, no required
// arguments. Prints a human-readable results block ending in PASSED/FAILED;
// the exit code mirrors the verdict.
//
// Run:
//   cargo run --bin quick_validate

use std::env;

use veriphi::config::{SimConstants, SimParams};
use veriphi::logging::NoopSink;
use veriphi::validate::{print_console_report, run_validation};

fn main() {
    if env::args().skip(1).any(|a| a == "--help" || a == "-h") {
        println!(
            "quick_validate - single-core quick validation run\n\n\
             USAGE:\n  quick_validate\n\n\
             Environment overrides: VERIPHI_NOISE_STD, VERIPHI_SEED,\n\
             VERIPHI_DURATION, VERIPHI_SAMPLE_RATE."
        );
        return;
    }

    let constants = SimConstants::default();
    let mut params = SimParams::quick().with_env_overrides();
    // Quick mode is always a single core.
    params.num_cores = 1;

    println!("VERIPHI - QUICK VALIDATION");
    println!("{}", "=".repeat(50));

    let report = run_validation(constants, &params, &mut NoopSink);
    print_console_report(&report);

    std::process::exit(if report.passed { 0 } else { 1 });
}
