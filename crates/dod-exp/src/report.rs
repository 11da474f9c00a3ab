use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use dod_core::errors::{DodError, ErrorInfo};
use dod_core::RunResult;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Column order of the persisted table.
pub const COLUMNS: [&str; 6] = [
    "num_points",
    "num_components",
    "soa_time",
    "aos_time",
    "static",
    "aos/soa",
];

/// Finalized row: clamped timings plus the derived `aos/soa` ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub num_points: u64,
    pub num_components: u64,
    pub soa_time: u64,
    pub aos_time: u64,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "aos/soa")]
    pub aos_soa: f64,
}

/// Replaces a zero in either timing column with 1. Idempotent.
pub fn clamp_timings(row: &RunResult) -> RunResult {
    RunResult {
        soa_time: row.soa_time.max(1),
        aos_time: row.aos_time.max(1),
        ..*row
    }
}

impl ReportRow {
    pub fn from_result(row: &RunResult) -> Self {
        if row.soa_time == 0 || row.aos_time == 0 {
            warn!(
                num_points = row.num_points,
                num_components = row.num_components,
                r#static = row.is_static,
                "clamping zero timing to 1us"
            );
        }
        let clamped = clamp_timings(row);
        Self {
            num_points: clamped.num_points,
            num_components: clamped.num_components,
            soa_time: clamped.soa_time,
            aos_time: clamped.aos_time,
            is_static: clamped.is_static,
            aos_soa: clamped.aos_time as f64 / clamped.soa_time as f64,
        }
    }
}

/// Ordered result table written once at the end of a sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    pub rows: Vec<ReportRow>,
}

impl ResultTable {
    /// Clamps zero timings and derives `aos/soa` for every row, keeping order.
    pub fn finalize(results: &[RunResult]) -> Self {
        Self {
            rows: results.iter().map(ReportRow::from_result).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table as CSV, replacing any previous file at `path`.
    pub fn persist(&self, path: &Path) -> Result<(), DodError> {
        ensure_parent(path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|err| wrap_csv("persist-open", path, err))?;
        writer
            .write_record(COLUMNS)
            .map_err(|err| wrap_csv("persist-write-header", path, err))?;
        for row in &self.rows {
            writer
                .serialize(row)
                .map_err(|err| wrap_csv("persist-write-row", path, err))?;
        }
        writer
            .flush()
            .map_err(|err| wrap_csv("persist-flush", path, err.into()))?;
        info!(path = %path.display(), rows = self.rows.len(), "result table written");
        Ok(())
    }

    /// Reads a table previously written by [`ResultTable::persist`].
    pub fn load(path: &Path) -> Result<Self, DodError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|err| wrap_csv("load-open", path, err))?;
        let headers = reader
            .headers()
            .map_err(|err| wrap_csv("load-header", path, err))?;
        if headers.iter().ne(COLUMNS) {
            return Err(DodError::Persist(
                ErrorInfo::new("load-columns", "unexpected result table columns")
                    .with_context("path", path.display().to_string())
                    .with_context("found", headers.iter().collect::<Vec<_>>().join(",")),
            ));
        }
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: ReportRow = record.map_err(|err| wrap_csv("load-record", path, err))?;
            rows.push(row);
        }
        Ok(Self { rows })
    }
}

fn ensure_parent(path: &Path) -> Result<(), DodError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                DodError::Persist(
                    ErrorInfo::new("persist-mkdir", "failed to create output directory")
                        .with_context("path", parent.display().to_string())
                        .with_hint(err.to_string()),
                )
            })?;
        }
    }
    Ok(())
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> DodError {
    DodError::Persist(
        ErrorInfo::new(code, "csv failure")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}
