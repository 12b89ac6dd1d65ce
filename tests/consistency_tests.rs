// tests/consistency_tests.rs
//
// End-to-end reconciliation tests: write the three report formats to a
// temp directory, run the verifier over real files, and assert on the
// structured result (no console capture).

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use veriphi::extract::MetricKey;
use veriphi::verify::run_consistency_check;

struct Fixture {
    structured: PathBuf,
    tabular: PathBuf,
    markup: PathBuf,
}

fn write_fixture(dir: &Path, json: &str, csv: &str, html: &str) -> Fixture {
    let structured = dir.join("results.json");
    let tabular = dir.join("results.csv");
    let markup = dir.join("results.html");
    fs::write(&structured, json).unwrap();
    fs::write(&tabular, csv).unwrap();
    fs::write(&markup, html).unwrap();
    Fixture {
        structured,
        tabular,
        markup,
    }
}

fn html_metric(value: &str, label: &str) -> String {
    format!(
        "<div class=\"metric\">\n  <div class=\"metric-value\">{}</div>\n  <div class=\"metric-label\">{}</div>\n</div>",
        value, label
    )
}

/// Scenario A: the same alpha value in all three formats, every other key
/// absent everywhere. Everything agrees.
#[test]
fn scenario_a_all_sources_agree() {
    let dir = tempdir().unwrap();
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{"alpha_observed":"0.5"}}"#,
        "METRICS,alpha_observed\nMETRICS,0.5\n",
        &format!(
            "<html><body>{}</body></html>",
            html_metric("0.5", "alpha_min_observed")
        ),
    );

    let report = run_consistency_check(&fx.structured, &fx.tabular, &fx.markup).unwrap();

    assert!(report.all_ok);
    for row in &report.rows {
        assert!(row.ok, "key {:?} should agree", row.key);
        if row.key == MetricKey::AlphaObserved {
            assert_eq!(row.structured, Some(0.5));
            assert_eq!(row.tabular, Some(0.5));
            assert_eq!(row.markup, Some(0.5));
        } else {
            // Absent everywhere: null == null across all pairs.
            assert_eq!(row.structured, None);
            assert_eq!(row.tabular, None);
            assert_eq!(row.markup, None);
        }
    }
}

/// Scenario B: the tabular value diverges beyond tolerance.
#[test]
fn scenario_b_tabular_divergence_flags_disagreement() {
    let dir = tempdir().unwrap();
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{"alpha_observed":"0.5"}}"#,
        "METRICS,alpha_observed\nMETRICS,0.50001\n",
        &format!(
            "<html><body>{}</body></html>",
            html_metric("0.5", "alpha_min_observed")
        ),
    );

    let report = run_consistency_check(&fx.structured, &fx.tabular, &fx.markup).unwrap();

    assert!(!report.all_ok);
    let alpha = report
        .rows
        .iter()
        .find(|r| r.key == MetricKey::AlphaObserved)
        .unwrap();
    assert!(!alpha.ok);
    assert_eq!(alpha.tabular, Some(0.50001));
}

/// Scenario C: tabular report has no METRICS row at all; every key with a
/// non-null value elsewhere is flagged as disagreement.
#[test]
fn scenario_c_missing_metrics_row_disagrees() {
    let dir = tempdir().unwrap();
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{"alpha_observed":"0.5"}}"#,
        "SECTION,alpha_observed\nSUMMARY,0.5\n",
        &format!(
            "<html><body>{}</body></html>",
            html_metric("0.5", "alpha_min_observed")
        ),
    );

    let report = run_consistency_check(&fx.structured, &fx.tabular, &fx.markup).unwrap();

    assert!(!report.all_ok);
    let alpha = report
        .rows
        .iter()
        .find(|r| r.key == MetricKey::AlphaObserved)
        .unwrap();
    assert!(!alpha.ok);
    assert_eq!(alpha.tabular, None);
    assert_eq!(alpha.structured, Some(0.5));
}

/// Alias normalization end to end: a source carrying only the generic
/// jitter key agrees with sources carrying an explicit P95.
#[test]
fn generic_jitter_aliases_into_p95_across_formats() {
    let dir = tempdir().unwrap();
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{"timing_jitter_ms":"1.5"}}"#,
        "METRICS,timing_jitter_ms_p95\nMETRICS,1.5\n",
        &format!(
            "<html><body>{}</body></html>",
            html_metric("1.5", "timing_jitter_ms (p95)")
        ),
    );

    let report = run_consistency_check(&fx.structured, &fx.tabular, &fx.markup).unwrap();

    let p95 = report
        .rows
        .iter()
        .find(|r| r.key == MetricKey::TimingJitterMsP95)
        .unwrap();
    assert!(p95.ok);
    assert_eq!(p95.structured, Some(1.5));

    // P99 is never back-filled: absent everywhere, so it still agrees.
    let p99 = report
        .rows
        .iter()
        .find(|r| r.key == MetricKey::TimingJitterMsP99)
        .unwrap();
    assert!(p99.ok);
    assert_eq!(p99.structured, None);

    assert!(report.all_ok);
}

/// Unrelated markup summary cards (totals, pass rate) must not leak into
/// the comparison.
#[test]
fn markup_summary_cards_are_ignored() {
    let dir = tempdir().unwrap();
    let html = format!(
        "<html><body>{}{}{}</body></html>",
        html_metric("1000", "Total Cores"),
        html_metric("99.8%", "Pass Rate"),
        html_metric("0.5", "alpha_min_observed"),
    );
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{"alpha_observed":"0.5"}}"#,
        "METRICS,alpha_observed\nMETRICS,0.5\n",
        &html,
    );

    let report = run_consistency_check(&fx.structured, &fx.tabular, &fx.markup).unwrap();
    assert!(report.all_ok);
}

/// A missing file is a hard failure for the invocation, not a partial
/// result.
#[test]
fn unreadable_file_is_a_hard_error() {
    let dir = tempdir().unwrap();
    let fx = write_fixture(
        dir.path(),
        r#"{"metrics":{}}"#,
        "METRICS\nMETRICS\n",
        "<html></html>",
    );

    let missing = dir.path().join("nope.json");
    let err = run_consistency_check(&missing, &fx.tabular, &fx.markup);
    assert!(err.is_err());
}
