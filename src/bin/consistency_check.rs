// src/bin/consistency_check.rs
//
// Cross-format metric reconciliation entry point.
//
// Takes three positional report paths (structured/JSON, tabular/CSV,
// markup/HTML) and exits 0 if all canonical metrics agree, 1 if any
// disagree, 2 on incorrect invocation. Unreadable files are hard failures.
//
// Run:
//   cargo run --bin consistency_check -- results.json results.csv results.html

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use veriphi::verify::{print_console_report, run_consistency_check};

fn usage() -> &'static str {
    "Usage: consistency_check <results.json> <results.csv> <results.html>"
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", usage());
        return ExitCode::SUCCESS;
    }

    if args.len() != 3 {
        eprintln!("{}", usage());
        return ExitCode::from(2);
    }

    let structured = PathBuf::from(&args[0]);
    let tabular = PathBuf::from(&args[1]);
    let markup = PathBuf::from(&args[2]);

    let report = match run_consistency_check(&structured, &tabular, &markup) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("consistency_check: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    print_console_report(&report);

    if report.all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
