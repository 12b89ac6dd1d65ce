// src/extract/markup.rs
//
// Markup (HTML) report adapter.
//
// Scans free text for repeated metric blocks of the shape
//
//   <div class="metric">
//     <div class="metric-value">VALUE</div>
//     <div class="metric-label">LABEL</div>
//   </div>
//
// and maps each lower-cased label onto a canonical key through an ordered
// rule table: first match wins, more specific rules before the generic
// fallback, and unmatched labels (totals, pass-rate cards and the like)
// are discarded.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::RawMetrics;

const METRIC_OPEN: &str = "<div class=\"metric\">";
const VALUE_OPEN: &str = "<div class=\"metric-value\">";
const LABEL_OPEN: &str = "<div class=\"metric-label\">";
const DIV_CLOSE: &str = "</div>";

/// One extracted (value, label) block, pre-canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBlock {
    pub value: String,
    pub label: String,
}

/// Ordered label -> canonical-key rules. Order is load-bearing: the p99/p95
/// rules must precede the generic timing_jitter_ms fallback.
type LabelRule = (fn(&str) -> bool, &'static str);

fn is_alpha_observed(label: &str) -> bool {
    label.contains("alpha_min_observed")
}

fn is_perturbation_norm(label: &str) -> bool {
    label.contains("perturb") && label.contains("norm")
}

fn is_jitter_p99(label: &str) -> bool {
    label.contains("timing_jitter_ms") && label.contains("p99")
}

fn is_jitter_p95(label: &str) -> bool {
    label.contains("timing_jitter_ms") && label.contains("p95")
}

fn is_jitter_generic(label: &str) -> bool {
    label.starts_with("timing_jitter_ms")
}

const LABEL_RULES: &[LabelRule] = &[
    (is_alpha_observed, "alpha_observed"),
    (is_perturbation_norm, "perturbation_norm"),
    (is_jitter_p99, "timing_jitter_ms_p99"),
    (is_jitter_p95, "timing_jitter_ms_p95"),
    (is_jitter_generic, "timing_jitter_ms"),
];

/// Map a lower-cased label onto its canonical key, or `None` to discard.
pub fn canonical_key_for_label(label: &str) -> Option<&'static str> {
    LABEL_RULES
        .iter()
        .find(|(matches, _)| matches(label))
        .map(|&(_, key)| key)
}

/// Capture the text between `open` and the next `</div>`, requiring `open`
/// to follow `from` after nothing but whitespace. Returns the captured text
/// and the position just past the close tag.
fn capture_div(text: &str, from: usize, open: &str) -> Option<(String, usize)> {
    let rest = &text[from..];
    let trimmed = rest.trim_start();
    if !trimmed.starts_with(open) {
        return None;
    }

    let start = from + (rest.len() - trimmed.len()) + open.len();
    let end = start + text[start..].find(DIV_CLOSE)?;
    Some((text[start..end].trim().to_string(), end + DIV_CLOSE.len()))
}

/// Tokenize markup text into (value, label) blocks.
///
/// A block only counts when its value and label divs follow the metric open
/// tag separated by nothing but whitespace; a malformed block is skipped
/// without consuming the divs of the block after it.
pub fn parse_metric_blocks(text: &str) -> Vec<MetricBlock> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(METRIC_OPEN) {
        let block_start = pos + found + METRIC_OPEN.len();
        // Resume scanning here if this block turns out malformed.
        pos = block_start;

        let Some((value, after_value)) = capture_div(text, block_start, VALUE_OPEN) else {
            continue;
        };
        let Some((label, after_label)) = capture_div(text, after_value, LABEL_OPEN) else {
            continue;
        };

        blocks.push(MetricBlock { value, label });
        pos = after_label;
    }

    blocks
}

/// Extract raw metrics from markup report text.
pub fn markup_metrics_from_str(text: &str) -> RawMetrics {
    let mut out = RawMetrics::new();

    for block in parse_metric_blocks(text) {
        let label = block.label.to_lowercase();
        if let Some(key) = canonical_key_for_label(&label) {
            out.insert(key.to_string(), block.value);
        }
    }

    out
}

/// Read and parse a markup report file. Unreadable files are hard failures.
pub fn read_markup_metrics(path: &Path) -> Result<RawMetrics> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read markup report {}", path.display()))?;
    Ok(markup_metrics_from_str(&text))
}
