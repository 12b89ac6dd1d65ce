// src/extract/tabular.rs
//
// Tabular (CSV) report adapter: the first row is a header naming columns;
// exactly one data row's first cell is METRICS (case-insensitive, optionally
// quoted) and that row holds the metric values, positionally aligned to the
// header. No METRICS row is an absent-case, not an error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::{strip_quotes, RawMetrics};

/// Split one delimited line into cells, honoring double-quoted cells
/// (including `""` escapes inside them). Quotes are kept in the output;
/// callers strip them alongside whitespace.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                cell.push('"');
            }
            '"' => {
                in_quotes = !in_quotes;
                cell.push('"');
            }
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut cell));
            }
            _ => cell.push(ch),
        }
    }
    cells.push(cell);

    cells
}

/// Extract raw metrics from tabular report text.
pub fn tabular_metrics_from_str(contents: &str) -> RawMetrics {
    let mut out = RawMetrics::new();

    let mut rows = contents
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(split_row);

    let Some(header) = rows.next() else {
        return out;
    };

    let metrics_row = rows.find(|row| {
        row.first()
            .map(|cell| strip_quotes(cell).eq_ignore_ascii_case("METRICS"))
            .unwrap_or(false)
    });

    let Some(row) = metrics_row else {
        return out;
    };

    for (i, key) in header.iter().enumerate() {
        let value = row.get(i).map(|c| strip_quotes(c)).unwrap_or("");
        out.insert(strip_quotes(key).to_string(), value.to_string());
    }

    out
}

/// Read and parse a tabular report file. Unreadable files are hard failures.
pub fn read_tabular_metrics(path: &Path) -> Result<RawMetrics> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tabular report {}", path.display()))?;
    Ok(tabular_metrics_from_str(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_metrics_row_by_header() {
        let csv = "\
SECTION,alpha_observed,timing_jitter_ms_p95
SUMMARY,ignored,ignored
METRICS,0.5,1.25
";
        let m = tabular_metrics_from_str(csv);
        assert_eq!(m.get("alpha_observed").map(String::as_str), Some("0.5"));
        assert_eq!(m.get("timing_jitter_ms_p95").map(String::as_str), Some("1.25"));
        assert_eq!(m.get("SECTION").map(String::as_str), Some("METRICS"));
    }

    #[test]
    fn metrics_marker_is_case_insensitive_and_may_be_quoted() {
        let csv = "SECTION,alpha_observed\n\"metrics\",0.75\n";
        let m = tabular_metrics_from_str(csv);
        assert_eq!(m.get("alpha_observed").map(String::as_str), Some("0.75"));
    }

    #[test]
    fn quoted_cells_are_stripped_and_trimmed() {
        let csv = "SECTION, alpha_observed \nMETRICS, \"0.5\" \n";
        let m = tabular_metrics_from_str(csv);
        assert_eq!(m.get("alpha_observed").map(String::as_str), Some("0.5"));
    }

    #[test]
    fn quoted_cell_may_contain_comma() {
        let csv = "SECTION,note,alpha_observed\nMETRICS,\"a, b\",0.5\n";
        let m = tabular_metrics_from_str(csv);
        assert_eq!(m.get("note").map(String::as_str), Some("a, b"));
        assert_eq!(m.get("alpha_observed").map(String::as_str), Some("0.5"));
    }

    #[test]
    fn missing_metrics_row_yields_empty_map() {
        let csv = "SECTION,alpha_observed\nSUMMARY,0.5\n";
        assert!(tabular_metrics_from_str(csv).is_empty());
        assert!(tabular_metrics_from_str("").is_empty());
    }

    #[test]
    fn short_metrics_row_pads_with_empty_values() {
        let csv = "SECTION,alpha_observed,perturbation_norm\nMETRICS,0.5\n";
        let m = tabular_metrics_from_str(csv);
        assert_eq!(m.get("perturbation_norm").map(String::as_str), Some(""));
    }
}
