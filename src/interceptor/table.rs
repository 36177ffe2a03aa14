//! Interceptor table consulted by the runner before each task

use super::key::TaskId;
use super::types::{AssertionSummary, TaskInterceptor};
use crate::coverage::{ActivityCoverage, CoverageLog, SubFlowCoverage, TransitionCoverage};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Per-instance override table plus the coverage log it feeds.
///
/// Lifecycle: build or deserialize the table, call [`init`](Self::init), then
/// let the runner query it and append coverage while the instance runs. The
/// table and its log are handed to the report assembler once the run ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorTable {
    #[serde(default)]
    tasks: Vec<TaskInterceptor>,
    #[serde(default, rename = "collectIO")]
    collect_io: bool,
    #[serde(skip)]
    coverage: CoverageLog,
    #[serde(skip)]
    index: Option<HashMap<TaskId, usize>>,
}

impl InterceptorTable {
    pub fn new(tasks: Vec<TaskInterceptor>, collect_io: bool) -> Self {
        Self {
            tasks,
            collect_io,
            coverage: CoverageLog::new(),
            index: None,
        }
    }

    /// Parse a test definition and initialize it.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut table: Self =
            serde_json::from_str(json).context("Failed to parse interceptor definitions")?;
        table.init();
        Ok(table)
    }

    /// Build the id index. Must run before any lookup.
    ///
    /// Ids are expected to be unique; if one repeats, the first definition is
    /// kept and the rest are ignored for lookups.
    pub fn init(&mut self) {
        let mut index = HashMap::with_capacity(self.tasks.len());
        for (position, task) in self.tasks.iter().enumerate() {
            if index.contains_key(&task.id) {
                warn!("Duplicate task interceptor id {}, keeping first", task.id);
                continue;
            }
            index.insert(task.id.clone(), position);
        }
        debug!("Initialized {} task interceptors", index.len());
        self.index = Some(index);
    }

    pub fn is_initialized(&self) -> bool {
        self.index.is_some()
    }

    fn position(&self, flow: &str, activity: &str) -> Option<usize> {
        let index = self.index.as_ref()?;
        let scoped = TaskId::scoped(flow, activity);
        index
            .get(&scoped)
            .or_else(|| index.get(&TaskId::namespaced(scoped.to_namespaced())))
            .copied()
    }

    /// Interceptor for `activity` in `flow`, if any.
    ///
    /// Scoped definitions win over legacy namespaced ones. Returns `None`
    /// before [`init`](Self::init).
    pub fn get_task_interceptor(&self, flow: &str, activity: &str) -> Option<&TaskInterceptor> {
        self.position(flow, activity)
            .and_then(|position| self.tasks.get(position))
    }

    pub fn get_task_interceptor_mut(
        &mut self,
        flow: &str,
        activity: &str,
    ) -> Option<&mut TaskInterceptor> {
        let position = self.position(flow, activity)?;
        self.tasks.get_mut(position)
    }

    /// Lookup by raw legacy id string, e.g. `"OrderFlow-validate"`.
    pub fn get_task_interceptor_by_id(&self, id: &str) -> Option<&TaskInterceptor> {
        let index = self.index.as_ref()?;
        if let Some(&position) = index.get(&TaskId::namespaced(id)) {
            return self.tasks.get(position);
        }
        self.tasks
            .iter()
            .find(|task| matches!(task.id, TaskId::Scoped { .. }) && task.id.to_namespaced() == id)
    }

    pub fn tasks(&self) -> &[TaskInterceptor] {
        &self.tasks
    }

    pub fn collect_io(&self) -> bool {
        self.collect_io
    }

    pub fn coverage(&self) -> &CoverageLog {
        &self.coverage
    }

    /// Append an executed activity. Inputs and outputs are dropped unless
    /// I/O collection is enabled.
    pub fn add_to_activity_coverage(&mut self, activity: ActivityCoverage) {
        let activity = if self.collect_io {
            activity
        } else {
            activity.without_io()
        };
        self.coverage.record_activity(activity);
    }

    pub fn add_to_link_coverage(&mut self, transition: TransitionCoverage) {
        self.coverage.record_transition(transition);
    }

    pub fn add_to_sub_flow_coverage(&mut self, sub_flow: SubFlowCoverage) {
        let sub_flow = self.gate_io(sub_flow);
        self.coverage.record_sub_flow(sub_flow);
    }

    /// Append a sub-flow invocation and make it reachable by `instance_id`.
    pub fn add_to_sub_flow_coverage_map(
        &mut self,
        instance_id: impl Into<String>,
        sub_flow: SubFlowCoverage,
    ) {
        let sub_flow = self.gate_io(sub_flow);
        self.coverage.record_sub_flow_instance(instance_id, sub_flow);
    }

    fn gate_io(&self, sub_flow: SubFlowCoverage) -> SubFlowCoverage {
        if self.collect_io {
            sub_flow
        } else {
            sub_flow.without_io()
        }
    }

    pub fn assertion_summary(&self) -> AssertionSummary {
        self.tasks
            .iter()
            .flat_map(|task| task.assertions.iter())
            .fold(AssertionSummary::default(), |mut summary, assertion| {
                summary.record(assertion.result);
                summary
            })
    }

    /// Release the definitions and the finished coverage log.
    pub fn into_parts(self) -> (Vec<TaskInterceptor>, CoverageLog) {
        (self.tasks, self.coverage)
    }
}
