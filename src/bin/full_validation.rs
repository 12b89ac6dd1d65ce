// src/bin/full_validation.rs
//
// Full validation suite runner.
//
// Runs the full preset (1000 cores by default), prints the results block,
// persists a timestamped JSON report, and appends its SHA-256 to the
// append-only manifest in the output directory.
//
// Run examples:
//   cargo run --bin full_validation
//   cargo run --bin full_validation -- --cores 200 --noise-std 1e-4 --seed 7
//   VERIPHI_NUM_CORES=50 cargo run --bin full_validation -- --quiet

use std::env;
use std::path::PathBuf;

use veriphi::config::{SimConstants, SimParams};
use veriphi::logging::{ConsoleProgress, JsonlSink, NoopSink, RunSink, TeeSink};
use veriphi::report::persist_report;
use veriphi::validate::{print_console_report, run_validation};

const DEFAULT_PRINT_EVERY: usize = 100;

#[derive(Debug, Clone)]
struct Args {
    params: SimParams,
    out_dir: PathBuf,
    print_every: usize,
    per_run_jsonl: bool,
    quiet: bool,
}

fn usage() -> &'static str {
    "\
full_validation - full validation suite runner

USAGE:
  full_validation [FLAGS]

FLAGS:
  --cores N          Number of independent cores (default: 1000)
  --duration SECS    Seconds per trajectory (default: 10)
  --sample-rate HZ   Steps per second (default: 100)
  --noise-std STD    Gaussian noise standard deviation (default: 1e-5)
  --seed U64         Base seed; run i uses seed + i (default: unseeded)
  --out DIR          Output directory for reports (default: runs)
  --print-every N    Progress line every N cores (default: 100)
  --jsonl            Also write per-run results.jsonl into the output dir
  --quiet            Suppress progress lines
  --help             Show this help

Environment overrides (applied before flags): VERIPHI_NUM_CORES,
VERIPHI_DURATION, VERIPHI_SAMPLE_RATE, VERIPHI_NOISE_STD, VERIPHI_SEED.

EXAMPLES:
  full_validation --cores 200 --seed 42
  full_validation --noise-std 1e-4 --out results/ --jsonl
"
}

fn parse_or_exit() -> Args {
    match parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n\n{}", usage());
            std::process::exit(2);
        }
    }
}

fn parse() -> Result<Args, String> {
    let mut out = Args {
        params: SimParams::full().with_env_overrides(),
        out_dir: PathBuf::from("runs"),
        print_every: DEFAULT_PRINT_EVERY,
        per_run_jsonl: false,
        quiet: false,
    };

    let mut it = env::args().skip(1);

    while let Some(arg) = it.next() {
        // Accept both `--flag value` and `--flag=value`.
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) => (f.to_string(), Some(v.to_string())),
            None => (arg, None),
        };

        let mut value = |name: &str| -> Result<String, String> {
            match &inline {
                Some(v) => Ok(v.clone()),
                None => it.next().ok_or_else(|| format!("Missing value for {name}")),
            }
        };

        match flag.as_str() {
            "--help" | "-h" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            "--quiet" => out.quiet = true,
            "--jsonl" => out.per_run_jsonl = true,
            "--cores" => {
                let v = value("--cores")?;
                out.params.num_cores = v
                    .parse::<usize>()
                    .map_err(|_| "Invalid --cores (expected integer)".to_string())?;
                if out.params.num_cores == 0 {
                    return Err("--cores must be >= 1".to_string());
                }
            }
            "--duration" => {
                let v = value("--duration")?;
                out.params.duration = v
                    .parse::<f64>()
                    .map_err(|_| "Invalid --duration (expected seconds)".to_string())?;
                if out.params.duration < 0.0 {
                    return Err("--duration must be >= 0".to_string());
                }
            }
            "--sample-rate" => {
                let v = value("--sample-rate")?;
                out.params.sample_rate = v
                    .parse::<f64>()
                    .map_err(|_| "Invalid --sample-rate (expected Hz)".to_string())?;
                if out.params.sample_rate <= 0.0 {
                    return Err("--sample-rate must be > 0".to_string());
                }
            }
            "--noise-std" => {
                let v = value("--noise-std")?;
                out.params.noise_std = v
                    .parse::<f64>()
                    .map_err(|_| "Invalid --noise-std (expected f64)".to_string())?;
                if out.params.noise_std < 0.0 {
                    return Err("--noise-std must be >= 0".to_string());
                }
            }
            "--seed" => {
                let v = value("--seed")?;
                out.params.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| "Invalid --seed (expected u64)".to_string())?,
                );
            }
            "--out" => {
                out.out_dir = PathBuf::from(value("--out")?);
            }
            "--print-every" => {
                let v = value("--print-every")?;
                out.print_every = v
                    .parse::<usize>()
                    .map_err(|_| "Invalid --print-every (expected integer)".to_string())?;
                if out.print_every == 0 {
                    return Err("--print-every must be >= 1".to_string());
                }
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(out)
}

fn main() {
    let args = parse_or_exit();
    let constants = SimConstants::default();

    println!("VERIPHI - FULL VALIDATION SUITE");
    println!("{}", "=".repeat(60));
    println!(
        "Running {} cores for {}s each...",
        args.params.num_cores, args.params.duration
    );

    let mut jsonl: Option<JsonlSink> = if args.per_run_jsonl {
        if let Err(e) = std::fs::create_dir_all(&args.out_dir) {
            eprintln!("Failed to create output dir {:?}: {e}", args.out_dir);
            std::process::exit(2);
        }
        let path = args.out_dir.join("results.jsonl");
        match JsonlSink::create(&path) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("Failed to create {:?}: {e}", path);
                std::process::exit(2);
            }
        }
    } else {
        None
    };

    let report = {
        let mut progress = ConsoleProgress::new(args.print_every);
        match (&mut jsonl, args.quiet) {
            (Some(sink), true) => run_validation(constants, &args.params, sink),
            (Some(sink), false) => {
                let mut tee = TeeSink(progress, sink);
                run_validation(constants, &args.params, &mut tee)
            }
            (None, true) => run_validation(constants, &args.params, &mut NoopSink),
            (None, false) => run_validation(constants, &args.params, &mut progress),
        }
    };

    println!("\n{}", "=".repeat(60));
    println!("VALIDATION RESULTS");
    println!("{}", "=".repeat(60));
    print_console_report(&report);

    match persist_report(&report, &args.out_dir) {
        Ok(persisted) => {
            println!("\nResults saved to: {}", persisted.path.display());
            println!("SHA256: {}", persisted.sha256);
        }
        Err(e) => {
            eprintln!("Failed to persist report: {e:#}");
            std::process::exit(2);
        }
    }

    std::process::exit(if report.passed { 0 } else { 1 });
}
