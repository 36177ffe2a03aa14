//! Coverage log of what ran during a flow instance
//!
//! The runner appends one record per executed activity, evaluated transition
//! and started sub-flow. Call order is preserved and later becomes the
//! encounter order inside each flow of the report. Every activity and
//! transition record names exactly one owning flow and is either on that
//! flow's main path or in its error handler (`is_main_flow`).
//!
//! Appends are not synchronized. A runner that executes branches of one
//! instance in parallel must funnel its appends through a single owner.

mod captured;
mod log;
mod records;

pub use captured::Captured;
pub use log::CoverageLog;
pub use records::{ActivityCoverage, SubFlowCoverage, TransitionCoverage};
