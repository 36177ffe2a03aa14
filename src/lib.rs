//! # flow-coverage
//!
//! Test interception and coverage reporting for flow-based workflow runs.
//!
//! An external flow runner drives execution. This crate gives it three things:
//!
//! - `interceptor` - a table of per-task overrides (skip, mock, assert) that the
//!   runner consults before each task, plus the coverage writers it calls as
//!   tasks and transitions complete
//! - `coverage` - the append-only log of what actually ran during one flow
//!   instance
//! - `report` - the post-run assembler that rebuilds the flat log into a nested
//!   per-flow report tree and writes it to disk
//!
//! ## Usage
//!
//! ```no_run
//! use flow_coverage::config::{ReportConfig, StaticAppDescriptor};
//! use flow_coverage::coverage::ActivityCoverage;
//! use flow_coverage::interceptor::InterceptorTable;
//! use flow_coverage::report::{FlowDescriptor, FlowRun, ReportGenerator};
//! use flow_coverage::ValueMap;
//!
//! let mut table = InterceptorTable::new(Vec::new(), true);
//! table.init();
//! table.add_to_activity_coverage(ActivityCoverage::new("OrderFlow", "validate"));
//!
//! let descriptor = FlowDescriptor::new("OrderFlow", "rest-trigger");
//! let inputs = ValueMap::new();
//! let outputs = ValueMap::new();
//! let run = FlowRun::new(&descriptor, "instance-1", &inputs, &outputs);
//!
//! let generator = ReportGenerator::new(
//!     ReportConfig::from_env(),
//!     StaticAppDescriptor::new("orders", "1.0.0"),
//! );
//! let written = generator.generate_for_table(&run, &table);
//! println!("report written to {:?}", written);
//! ```

use std::collections::BTreeMap;

pub mod config;
pub mod coverage;
pub mod error;
pub mod interceptor;
pub mod report;

pub use error::{ReportError, ReportResult};

/// Ordered string-keyed JSON values used for inputs, outputs and settings.
///
/// A `BTreeMap` keeps serialized reports byte-stable across runs.
pub type ValueMap = BTreeMap<String, serde_json::Value>;
