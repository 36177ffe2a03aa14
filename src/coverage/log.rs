//! Append-only coverage log for one flow instance

use super::records::{ActivityCoverage, SubFlowCoverage, TransitionCoverage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Everything that executed during one flow-instance run, in call order.
///
/// Records are never modified once appended. Sub-flow invocations live in a
/// single list; the per-instance lookup is derived from it and can always be
/// rebuilt with [`CoverageLog::rebuild_indices`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CoverageRecords")]
pub struct CoverageLog {
    #[serde(rename = "activityCoverage")]
    activities: Vec<ActivityCoverage>,
    #[serde(rename = "transitionCoverage")]
    transitions: Vec<TransitionCoverage>,
    #[serde(rename = "subFlowCoverage")]
    sub_flows: Vec<SubFlowCoverage>,
    #[serde(skip)]
    by_instance: HashMap<String, usize>,
}

/// Wire shape of the log; the instance index is rebuilt on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoverageRecords {
    #[serde(default)]
    activity_coverage: Vec<ActivityCoverage>,
    #[serde(default)]
    transition_coverage: Vec<TransitionCoverage>,
    #[serde(default)]
    sub_flow_coverage: Vec<SubFlowCoverage>,
}

impl From<CoverageRecords> for CoverageLog {
    fn from(records: CoverageRecords) -> Self {
        let mut log = Self {
            activities: records.activity_coverage,
            transitions: records.transition_coverage,
            sub_flows: records.sub_flow_coverage,
            by_instance: HashMap::new(),
        };
        log.rebuild_indices();
        log
    }
}

impl CoverageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_activity(&mut self, activity: ActivityCoverage) {
        self.activities.push(activity);
    }

    pub fn record_transition(&mut self, transition: TransitionCoverage) {
        self.transitions.push(transition);
    }

    pub fn record_sub_flow(&mut self, sub_flow: SubFlowCoverage) {
        if !sub_flow.sub_flow_id.is_empty() {
            self.by_instance
                .insert(sub_flow.sub_flow_id.clone(), self.sub_flows.len());
        }
        self.sub_flows.push(sub_flow);
    }

    /// Record a sub-flow invocation under an explicit instance id.
    ///
    /// `instance_id` is written into the record's `sub_flow_id`, replacing
    /// any id it carried, so the lookup key always lives on the record.
    pub fn record_sub_flow_instance(
        &mut self,
        instance_id: impl Into<String>,
        mut sub_flow: SubFlowCoverage,
    ) {
        let instance_id = instance_id.into();
        if !sub_flow.sub_flow_id.is_empty() && sub_flow.sub_flow_id != instance_id {
            debug!(
                "Sub-flow record {} re-keyed to instance {}",
                sub_flow.sub_flow_id, instance_id
            );
        }
        sub_flow.sub_flow_id = instance_id;
        self.record_sub_flow(sub_flow);
    }

    /// Latest sub-flow record for a running instance.
    pub fn sub_flow_by_instance(&self, instance_id: &str) -> Option<&SubFlowCoverage> {
        self.by_instance
            .get(instance_id)
            .and_then(|&position| self.sub_flows.get(position))
    }

    /// Recompute derived lookups from the authoritative record lists.
    ///
    /// Every indexed key is a record's own `sub_flow_id`, so a rebuild yields
    /// the same lookups as the live log.
    pub fn rebuild_indices(&mut self) {
        self.by_instance = self
            .sub_flows
            .iter()
            .enumerate()
            .filter(|(_, sub_flow)| !sub_flow.sub_flow_id.is_empty())
            .map(|(position, sub_flow)| (sub_flow.sub_flow_id.clone(), position))
            .collect();
    }

    pub fn activities(&self) -> &[ActivityCoverage] {
        &self.activities
    }

    pub fn transitions(&self) -> &[TransitionCoverage] {
        &self.transitions
    }

    pub fn sub_flows(&self) -> &[SubFlowCoverage] {
        &self.sub_flows
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.transitions.is_empty() && self.sub_flows.is_empty()
    }
}
