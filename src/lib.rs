//! Veriphi core library.
//!
//! Two independent pipelines around a shared metrics vocabulary:
//!
//! - **Simulation pipeline** (`config`, `sim`, `validate`): simulate many
//!   independent bounded stochastic trajectories of a control signal pulled
//!   toward a fixed ceiling, aggregate per-run statistics, and classify
//!   pass/fail against a closed-form theoretical bound.
//!
//! - **Reconciliation pipeline** (`extract`, `verify`): pull the same
//!   canonical metrics out of three differently shaped report formats
//!   (JSON, CSV, HTML), normalize aliases, and flag divergence between
//!   report generators with tolerance-based comparison.
//!
//! The binaries (`src/bin/`) are thin entry points around these components;
//! all computation produces structured results that are testable without
//! capturing console output.

pub mod config;
pub mod extract;
pub mod logging;
pub mod report;
pub mod sim;
pub mod stats;
pub mod validate;
pub mod verify;

// --- Re-exports for ergonomic external use ---------------------------------

pub use config::{SimConstants, SimParams};
pub use extract::{
    read_markup_metrics, read_structured_metrics, read_tabular_metrics, MetricKey, RawMetrics,
};
pub use logging::{ConsoleProgress, JsonlSink, NoopSink, RunSink, TeeSink};
pub use report::{persist_report, persist_report_as, sha256_of_file, PersistedReport};
pub use sim::{CoreResult, SimulationEngine};
pub use stats::OnlineStats;
pub use validate::{fold_core_results, run_validation, FoldStats, ValidationReport};
pub use verify::{
    compare, normalize_aliases, run_consistency_check, to_float_or_null, verify_metrics,
    ConsistencyReport, KeyComparison, TOLERANCE,
};
