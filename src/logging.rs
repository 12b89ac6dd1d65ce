// src/logging.rs
//
// Per-run telemetry sinks for the validation aggregator.
// - RunSink:         trait used by the aggregator
// - NoopSink:        discards all events
// - ConsoleProgress: prints a progress line every Kth run
// - JsonlSink:       writes one JSON line per run for offline analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sim::CoreResult;

/// Abstract sink for per-run telemetry. Presentation concern only;
/// the aggregation contract does not depend on what a sink does.
pub trait RunSink {
    fn log_run(&mut self, run_index: usize, total_runs: usize, result: &CoreResult);
}

impl<T: RunSink + ?Sized> RunSink for &mut T {
    fn log_run(&mut self, run_index: usize, total_runs: usize, result: &CoreResult) {
        (**self).log_run(run_index, total_runs, result);
    }
}

/// Sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl RunSink for NoopSink {
    fn log_run(&mut self, _run_index: usize, _total_runs: usize, _result: &CoreResult) {
        // intentionally no-op
    }
}

/// Prints `Progress: i/n` every Kth run.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    every: usize,
}

impl ConsoleProgress {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl RunSink for ConsoleProgress {
    fn log_run(&mut self, run_index: usize, total_runs: usize, _result: &CoreResult) {
        if run_index % self.every == 0 {
            println!("  Progress: {}/{} cores", run_index, total_runs);
        }
    }
}

/// JSONL file sink.
///
/// Each run is written as a single JSON object on its own line. The payload
/// is small and encoded manually to avoid pulling serialization into the
/// hot path.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink writing to `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RunSink for JsonlSink {
    fn log_run(&mut self, run_index: usize, _total_runs: usize, result: &CoreResult) {
        let line = format!(
            "{{\"run\":{},\"max_deviation\":{},\"variance\":{}}}\n",
            run_index, result.max_deviation, result.variance,
        );

        // If logging fails we don't want to abort the run,
        // so we deliberately ignore I/O errors.
        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.flush();
    }
}

/// Fan-out to two sinks.
pub struct TeeSink<A, B>(pub A, pub B);

impl<A: RunSink, B: RunSink> RunSink for TeeSink<A, B> {
    fn log_run(&mut self, run_index: usize, total_runs: usize, result: &CoreResult) {
        self.0.log_run(run_index, total_runs, result);
        self.1.log_run(run_index, total_runs, result);
    }
}
