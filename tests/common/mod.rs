//! Common test utilities and helpers

#![allow(dead_code)]

use flow_coverage::config::{ReportConfig, StaticAppDescriptor};
use flow_coverage::report::ReportGenerator;
use flow_coverage::ValueMap;
use serde_json::Value;
use tempfile::TempDir;

pub const APP_NAME: &str = "orders";
pub const APP_VERSION: &str = "2.4.1";

/// Report generator rooted in a fresh temporary directory
pub struct TestReportRoot {
    pub temp_dir: TempDir,
    pub generator: ReportGenerator<StaticAppDescriptor>,
}

impl TestReportRoot {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let generator = ReportGenerator::new(
            ReportConfig::with_output_root(temp_dir.path()),
            StaticAppDescriptor::new(APP_NAME, APP_VERSION),
        );
        Self {
            temp_dir,
            generator,
        }
    }
}

/// Build a value map from a JSON object literal
pub fn values(value: Value) -> ValueMap {
    serde_json::from_value(value).unwrap()
}
