//! Report schema and run-level inputs

use crate::coverage::{ActivityCoverage, TransitionCoverage};
use crate::ValueMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name given to the placeholder activity that stands for an intercepted
/// flow return value.
pub const FLOW_OUTPUT_ACTIVITY: &str = "FlowReport Output";

/// Handler the runner executed: the main flow and the trigger that fired it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowDescriptor {
    pub flow_name: String,
    pub trigger_id: String,
    pub trigger_settings: ValueMap,
}

impl FlowDescriptor {
    pub fn new(flow_name: impl Into<String>, trigger_id: impl Into<String>) -> Self {
        Self {
            flow_name: flow_name.into(),
            trigger_id: trigger_id.into(),
            trigger_settings: ValueMap::new(),
        }
    }

    pub fn with_settings(mut self, settings: ValueMap) -> Self {
        self.trigger_settings = settings;
        self
    }
}

/// One finished flow instance as seen from outside: which handler ran, under
/// which instance id, and with what top-level inputs and outputs.
#[derive(Debug, Clone, Copy)]
pub struct FlowRun<'a> {
    pub descriptor: &'a FlowDescriptor,
    pub instance_id: &'a str,
    pub inputs: &'a ValueMap,
    pub outputs: &'a ValueMap,
}

impl<'a> FlowRun<'a> {
    pub fn new(
        descriptor: &'a FlowDescriptor,
        instance_id: &'a str,
        inputs: &'a ValueMap,
        outputs: &'a ValueMap,
    ) -> Self {
        Self {
            descriptor,
            instance_id,
            inputs,
            outputs,
        }
    }
}

/// Top-level document written for each flow instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputReport {
    pub app_name: String,
    pub app_version: String,
    pub instance_id: String,
    pub report: RunReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub trigger: TriggerReport,
    pub flows: FlowReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerReport {
    pub id: String,
    #[serde(default)]
    pub settings: ValueMap,
    pub handler: HandlerReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerReport {
    pub flow_name: String,
    #[serde(default)]
    pub input: ValueMap,
    #[serde(default)]
    pub output: ValueMap,
}

/// Coverage of one flow, with the reports of the sub-flows it invoked keyed by
/// the invoking activity's id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
    #[serde(rename = "flowName")]
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ActivityCoverage>,
    #[serde(default)]
    pub links: Vec<TransitionCoverage>,
    #[serde(default)]
    pub error_handler: ErrorHandlerReport,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_flow: BTreeMap<String, FlowReport>,
}

impl FlowReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// File an activity under the main path or the error handler.
    pub fn push_activity(&mut self, activity: ActivityCoverage) {
        if activity.is_main_flow {
            self.activities.push(activity);
        } else {
            self.error_handler.activities.push(activity);
        }
    }

    pub fn push_link(&mut self, link: TransitionCoverage) {
        if link.is_main_flow {
            self.links.push(link);
        } else {
            self.error_handler.links.push(link);
        }
    }

    /// Number of flows in this subtree, including this one.
    pub fn flow_count(&self) -> usize {
        1 + self.sub_flow.values().map(FlowReport::flow_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlerReport {
    #[serde(default)]
    pub activities: Vec<ActivityCoverage>,
    #[serde(default)]
    pub links: Vec<TransitionCoverage>,
}
