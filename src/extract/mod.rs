// src/extract/mod.rs
//
// Metric extraction adapters.
//
// Three independent adapters pull the same canonical set of named metrics
// out of differently shaped report formats:
// - structured: nested JSON document with a top-level "metrics" object
// - tabular:    delimited table with a header row and one METRICS data row
// - markup:     HTML-like text with repeated value/label metric blocks
//
// Each adapter returns *raw* label -> value pairs before canonicalization;
// coercion and alias resolution happen in the verifier.

pub mod markup;
pub mod structured;
pub mod tabular;

use std::collections::BTreeMap;

pub use markup::{markup_metrics_from_str, read_markup_metrics};
pub use structured::{read_structured_metrics, structured_metrics_from_value};
pub use tabular::{read_tabular_metrics, tabular_metrics_from_str};

/// Raw adapter output: label -> raw value string. Absence of a key is the
/// only "null" at this stage; unparseable values are coerced later.
pub type RawMetrics = BTreeMap<String, String>;

/// Canonical, format-independent metric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    AlphaObserved,
    TimingJitterMsP95,
    TimingJitterMsP99,
    PerturbationNorm,
}

impl MetricKey {
    /// All canonical keys, in report order.
    pub const ALL: [MetricKey; 4] = [
        MetricKey::AlphaObserved,
        MetricKey::TimingJitterMsP95,
        MetricKey::TimingJitterMsP99,
        MetricKey::PerturbationNorm,
    ];

    /// The key string used by the structured and tabular formats.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::AlphaObserved => "alpha_observed",
            MetricKey::TimingJitterMsP95 => "timing_jitter_ms_p95",
            MetricKey::TimingJitterMsP99 => "timing_jitter_ms_p99",
            MetricKey::PerturbationNorm => "perturbation_norm",
        }
    }

    /// Human-readable label for console diagnostics.
    pub fn display_label(&self) -> &'static str {
        match self {
            MetricKey::AlphaObserved => "Alpha (observed)",
            MetricKey::TimingJitterMsP95 => "Jitter P95",
            MetricKey::TimingJitterMsP99 => "Jitter P99",
            MetricKey::PerturbationNorm => "Perturbation Norm",
        }
    }
}

/// Strip one layer of surrounding double quotes, after trimming.
pub(crate) fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
