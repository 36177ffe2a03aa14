//! Post-run execution reports
//!
//! After an instance finishes, its interceptor definitions and coverage log
//! are assembled into one [`OutputReport`] and written as JSON to
//! `{root}/flow-executions/{app}/{flow}-{instance}.json`. The root is
//! `FLOW_EXECUTION_FILES` when set, otherwise the OS temp directory.
//!
//! Reports are diagnostic output. Writing one never fails the caller.

pub mod assemble;
pub mod types;
mod writer;

pub use assemble::{assemble_flow_tree, assemble_report};
pub use types::{
    ErrorHandlerReport, FlowDescriptor, FlowReport, FlowRun, HandlerReport, OutputReport,
    RunReport, TriggerReport, FLOW_OUTPUT_ACTIVITY,
};
pub use writer::{load_report, write_report, ReportGenerator};
