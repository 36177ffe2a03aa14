//! Persist assembled reports

use super::assemble::assemble_report;
use super::types::{FlowRun, OutputReport};
use crate::config::{AppDescriptor, ReportConfig};
use crate::coverage::CoverageLog;
use crate::error::{ReportError, ReportResult};
use crate::interceptor::{InterceptorTable, TaskInterceptor};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Assembles and writes one report per finished flow instance.
pub struct ReportGenerator<A: AppDescriptor> {
    config: ReportConfig,
    app: A,
}

impl<A: AppDescriptor> ReportGenerator<A> {
    pub fn new(config: ReportConfig, app: A) -> Self {
        Self { config, app }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn report_path(&self, run: &FlowRun<'_>) -> PathBuf {
        self.config.report_path(
            &self.app.name(),
            &run.descriptor.flow_name,
            run.instance_id,
        )
    }

    /// Assemble and write the report for `run`.
    ///
    /// Best effort: failures are logged and reported as `None`, never as an
    /// error, so they cannot influence the outcome of the test that produced
    /// the run.
    pub fn generate(
        &self,
        run: &FlowRun<'_>,
        interceptors: &[TaskInterceptor],
        coverage: &CoverageLog,
    ) -> Option<PathBuf> {
        let report = assemble_report(&self.app, run, interceptors, coverage);
        let path = self.report_path(run);

        match write_report(&report, &path) {
            Ok(()) => {
                info!(
                    "Wrote execution report for instance {} to {:?}",
                    run.instance_id, path
                );
                Some(path)
            }
            Err(e) => {
                warn!(
                    "Execution report for instance {} not written: {}",
                    run.instance_id, e
                );
                None
            }
        }
    }

    /// [`generate`](Self::generate) from a finished interceptor table.
    pub fn generate_for_table(&self, run: &FlowRun<'_>, table: &InterceptorTable) -> Option<PathBuf> {
        self.generate(run, table.tasks(), table.coverage())
    }
}

/// Write `report` to `path`, creating parent directories and replacing any
/// existing file.
///
/// The JSON is written to a temporary file in the target directory first and
/// then moved into place.
pub fn write_report(report: &OutputReport, path: &Path) -> ReportResult<()> {
    let dir = path
        .parent()
        .ok_or_else(|| ReportError::InvalidPath(path.to_path_buf()))?;

    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = serde_json::to_vec_pretty(report)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    temp.write_all(&json)
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    temp.persist(path).map_err(|e| ReportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Read a previously written report.
pub fn load_report(path: &Path) -> Result<OutputReport> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse report {}", path.display()))
}
