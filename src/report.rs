// src/report.rs
//
// On-disk persistence for validation reports.
//
// Each full-suite run writes one timestamped JSON report and appends its
// content hash to an append-only manifest (one line per report, in
// sha256sum's two-space format).

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::validate::ValidationReport;

const MANIFEST_NAME: &str = "sha256_manifest.txt";

/// Where a persisted report landed and what it hashes to.
#[derive(Debug, Clone)]
pub struct PersistedReport {
    pub path: PathBuf,
    pub sha256: String,
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Compute the SHA-256 of a file's contents.
pub fn sha256_of_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read back {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex_encode(&hasher.finalize()))
}

/// Write a report as pretty JSON to `path`.
pub fn write_report_file(report: &ValidationReport, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)
        .with_context(|| format!("failed to serialize report to {}", path.display()))?;
    Ok(())
}

/// Append one `<hex>  <filename>` line to the manifest in `out_dir`.
pub fn append_manifest_entry(out_dir: &Path, file_name: &str, sha256: &str) -> Result<()> {
    let manifest_path = out_dir.join(MANIFEST_NAME);
    let mut manifest = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&manifest_path)
        .with_context(|| format!("failed to open manifest {}", manifest_path.display()))?;
    writeln!(manifest, "{}  {}", sha256, file_name)
        .with_context(|| format!("failed to append to manifest {}", manifest_path.display()))?;
    Ok(())
}

/// Persist a validation report under `out_dir` (created if missing):
/// write `validation_report_<UTC timestamp>.json`, hash it, and append the
/// hash to the manifest.
pub fn persist_report(report: &ValidationReport, out_dir: &Path) -> Result<PersistedReport> {
    let file_name = format!(
        "validation_report_{}.json",
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    persist_report_as(report, out_dir, &file_name)
}

/// Persist under an explicit file name. Split out so tests control naming.
pub fn persist_report_as(
    report: &ValidationReport,
    out_dir: &Path,
    file_name: &str,
) -> Result<PersistedReport> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let path = out_dir.join(file_name);
    write_report_file(report, &path)?;

    let sha256 = sha256_of_file(&path)?;
    append_manifest_entry(out_dir, file_name, &sha256)?;

    Ok(PersistedReport { path, sha256 })
}
