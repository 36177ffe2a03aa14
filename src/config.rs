//! Report location and application identity

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the report root directory.
pub const OUTPUT_ROOT_ENV: &str = "FLOW_EXECUTION_FILES";

/// Directory created under the root to hold all reports.
pub const REPORT_DIR: &str = "flow-executions";

/// Where execution reports are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Root directory; `None` means the OS temp directory.
    pub output_root: Option<PathBuf>,
}

impl ReportConfig {
    /// Read the root override from `FLOW_EXECUTION_FILES`.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var_os(OUTPUT_ROOT_ENV))
    }

    /// Build from a raw variable value. An empty value counts as unset.
    pub fn from_env_value(value: Option<OsString>) -> Self {
        Self {
            output_root: value.filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }

    pub fn with_output_root(root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: Some(root.into()),
        }
    }

    pub fn resolve_root(&self) -> PathBuf {
        self.output_root.clone().unwrap_or_else(env::temp_dir)
    }

    pub fn report_path(&self, app_name: &str, flow_name: &str, instance_id: &str) -> PathBuf {
        report_path(&self.resolve_root(), app_name, flow_name, instance_id)
    }
}

/// `{root}/flow-executions/{app}/{flow}-{instance}.json`
pub fn report_path(root: &Path, app_name: &str, flow_name: &str, instance_id: &str) -> PathBuf {
    root.join(REPORT_DIR)
        .join(app_name)
        .join(format!("{flow_name}-{instance_id}.json"))
}

/// Process-wide application identity stamped on every report.
pub trait AppDescriptor {
    fn name(&self) -> String;
    fn version(&self) -> String;
}

/// Fixed name and version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAppDescriptor {
    pub name: String,
    pub version: String,
}

impl StaticAppDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl AppDescriptor for StaticAppDescriptor {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn version(&self) -> String {
        self.version.clone()
    }
}
