// src/extract/structured.rs
//
// Structured (JSON) report adapter: returns the top-level "metrics" object
// as raw label -> value pairs, defaulting to an empty mapping when absent.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::RawMetrics;

/// Extract raw metrics from a parsed JSON document.
///
/// Numbers are stringified so the verifier's coercion sees one input shape;
/// strings pass through; anything else (objects, arrays, booleans, nulls)
/// is dropped and will surface as an absent key downstream.
pub fn structured_metrics_from_value(doc: &Value) -> RawMetrics {
    let mut out = RawMetrics::new();

    let Some(metrics) = doc.get("metrics").and_then(|m| m.as_object()) else {
        return out;
    };

    for (key, value) in metrics {
        match value {
            Value::Number(n) => {
                out.insert(key.clone(), n.to_string());
            }
            Value::String(s) => {
                out.insert(key.clone(), s.clone());
            }
            _ => {}
        }
    }

    out
}

/// Read and parse a structured report file.
///
/// An unreadable or non-JSON file is a hard failure; a readable document
/// without a "metrics" object yields an empty mapping.
pub fn read_structured_metrics(path: &Path) -> Result<RawMetrics> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read structured report {}", path.display()))?;
    let doc: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse structured report {}", path.display()))?;
    Ok(structured_metrics_from_value(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_metrics_sub_record() {
        let doc = json!({
            "metrics": {
                "alpha_observed": "0.5",
                "perturbation_norm": 0.125,
            },
            "other": {"ignored": 1}
        });

        let m = structured_metrics_from_value(&doc);
        assert_eq!(m.get("alpha_observed").map(String::as_str), Some("0.5"));
        assert_eq!(m.get("perturbation_norm").map(String::as_str), Some("0.125"));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn missing_metrics_section_is_empty_not_error() {
        let doc = json!({"results": {"final": 1.0}});
        assert!(structured_metrics_from_value(&doc).is_empty());
    }

    #[test]
    fn non_scalar_values_are_dropped() {
        let doc = json!({"metrics": {"alpha_observed": [1, 2], "timing_jitter_ms": 1.5}});
        let m = structured_metrics_from_value(&doc);
        assert!(!m.contains_key("alpha_observed"));
        assert_eq!(m.get("timing_jitter_ms").map(String::as_str), Some("1.5"));
    }
}
