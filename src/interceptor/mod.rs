//! Test-time task interception
//!
//! A test author describes, per task, whether the runner should skip it, feed
//! it mocked inputs or outputs, or check assertions against it. The runner
//! queries the [`InterceptorTable`] before executing each task and reports
//! back through the table's coverage writers.
//!
//! Result values on tasks and assertions are stored exactly as the runner sets
//! them; pass/fail decisions are made elsewhere.

pub mod key;
mod table;
pub mod types;

pub use key::TaskId;
pub use table::InterceptorTable;
pub use types::{
    Assertion, AssertionSummary, AssertionType, InterceptorType, TaskInterceptor, TaskResult,
    FLOW_OUTPUT_TASK,
};
