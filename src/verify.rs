// src/verify.rs
//
// Consistency verifier: normalizes the three raw metric mappings (alias
// resolution), coerces values to optional floats, and performs pairwise
// tolerance comparison across the three sources.
//
// Agreement is strict pairwise-unanimous: per key, the AND of the three
// pairwise comparisons, not a majority vote or a canonical-reference check.

use std::path::Path;

use anyhow::Result;

use crate::extract::{
    read_markup_metrics, read_structured_metrics, read_tabular_metrics, MetricKey, RawMetrics,
};

/// Absolute tolerance for float comparison between sources.
pub const TOLERANCE: f64 = 1e-9;

const GENERIC_JITTER_KEY: &str = "timing_jitter_ms";

/// Coerce a raw value to an optional float. The literal tokens "", "-" and
/// "null" mean null, and any other non-numeric string also coerces to null
/// silently; once coerced, missing and garbage are indistinguishable.
pub fn to_float_or_null(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() || s == "-" || s == "null" {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Tolerance comparison of two optional floats: equal if both null, unequal
/// if exactly one is null, else `|a - b| <= TOLERANCE`. Symmetric.
pub fn compare(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => (a - b).abs() <= TOLERANCE,
        _ => false,
    }
}

/// Alias normalization, applied independently to each source mapping.
///
/// Older report formats did not distinguish percentiles: when the P95 slot
/// is missing or unparseable but the generic jitter key exists, the generic
/// value is aliased into the P95 slot. P99 is never back-filled.
pub fn normalize_aliases(metrics: &mut RawMetrics) {
    let p95_key = MetricKey::TimingJitterMsP95.as_str();

    let p95_resolved = to_float_or_null(metrics.get(p95_key).map(String::as_str));
    if p95_resolved.is_none() {
        if let Some(generic) = metrics.get(GENERIC_JITTER_KEY).cloned() {
            metrics.insert(p95_key.to_string(), generic);
        }
    }
}

/// Per-key comparison outcome: the three resolved values plus the pairwise
/// flags and their conjunction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyComparison {
    pub key: MetricKey,
    pub structured: Option<f64>,
    pub tabular: Option<f64>,
    pub markup: Option<f64>,
    pub ok: bool,
}

/// Full diagnostic report over the four canonical keys.
#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    pub rows: Vec<KeyComparison>,
    pub all_ok: bool,
}

/// Compare normalized mappings across the three sources.
pub fn verify_metrics(
    structured: &RawMetrics,
    tabular: &RawMetrics,
    markup: &RawMetrics,
) -> ConsistencyReport {
    let mut rows = Vec::with_capacity(MetricKey::ALL.len());
    let mut all_ok = true;

    for key in MetricKey::ALL {
        let k = key.as_str();
        let sv = to_float_or_null(structured.get(k).map(String::as_str));
        let tv = to_float_or_null(tabular.get(k).map(String::as_str));
        let mv = to_float_or_null(markup.get(k).map(String::as_str));

        let ok = compare(sv, tv) && compare(sv, mv) && compare(tv, mv);
        all_ok = all_ok && ok;

        rows.push(KeyComparison {
            key,
            structured: sv,
            tabular: tv,
            markup: mv,
            ok,
        });
    }

    ConsistencyReport { rows, all_ok }
}

/// End-to-end reconciliation over three report files.
///
/// File-level failures (missing path, unparseable structured document) are
/// hard errors; absent content inside readable files degrades to nulls.
pub fn run_consistency_check(
    structured_path: &Path,
    tabular_path: &Path,
    markup_path: &Path,
) -> Result<ConsistencyReport> {
    let mut structured = read_structured_metrics(structured_path)?;
    let mut tabular = read_tabular_metrics(tabular_path)?;
    let mut markup = read_markup_metrics(markup_path)?;

    for metrics in [&mut structured, &mut tabular, &mut markup] {
        normalize_aliases(metrics);
    }

    Ok(verify_metrics(&structured, &tabular, &markup))
}

fn fmt_value(v: Option<f64>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => "null".to_string(),
    }
}

/// Console presentation, separated from the pure computation.
pub fn print_console_report(report: &ConsistencyReport) {
    println!("[CONSISTENCY CHECK]");
    for row in &report.rows {
        println!(" - {} ({}):", row.key.display_label(), row.key.as_str());
        println!(
            "    JSON={} | CSV={} | HTML={} | OK={}",
            fmt_value(row.structured),
            fmt_value(row.tabular),
            fmt_value(row.markup),
            row.ok
        );
    }

    if report.all_ok {
        println!("[RESULT] All metrics agree across JSON, CSV, and HTML.");
    } else {
        println!("[RESULT] Disagreement detected. See above lines for differences.");
    }
}
