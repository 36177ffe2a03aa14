//! Record types appended to the coverage log

use super::captured::Captured;
use crate::ValueMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn main_path() -> bool {
    true
}

/// One executed activity.
///
/// `is_main_flow` is `false` for activities run by the flow's error handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCoverage {
    pub activity_name: String,
    #[serde(default)]
    pub link_from: Vec<String>,
    #[serde(default)]
    pub link_to: Vec<String>,
    #[serde(default)]
    pub inputs: ValueMap,
    #[serde(default, skip_serializing_if = "Captured::is_absent")]
    pub outputs: Captured<ValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    pub flow_name: String,
    #[serde(default = "main_path")]
    pub is_main_flow: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flow_id: String,
}

impl ActivityCoverage {
    pub fn new(flow_name: impl Into<String>, activity_name: impl Into<String>) -> Self {
        Self {
            activity_name: activity_name.into(),
            link_from: Vec::new(),
            link_to: Vec::new(),
            inputs: ValueMap::new(),
            outputs: Captured::Absent,
            error: None,
            flow_name: flow_name.into(),
            is_main_flow: true,
            flow_id: String::new(),
        }
    }

    pub fn in_error_handler(mut self) -> Self {
        self.is_main_flow = false;
        self
    }

    pub fn with_flow_id(mut self, flow_id: impl Into<String>) -> Self {
        self.flow_id = flow_id.into();
        self
    }

    pub fn with_links(mut self, from: Vec<String>, to: Vec<String>) -> Self {
        self.link_from = from;
        self.link_to = to;
        self
    }

    pub fn with_inputs(mut self, inputs: ValueMap) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: ValueMap) -> Self {
        self.outputs = Captured::Value(outputs);
        self
    }

    /// Mark outputs as produced but empty (`null`), as opposed to never produced.
    pub fn with_null_outputs(mut self) -> Self {
        self.outputs = Captured::Null;
        self
    }

    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }

    /// Drop captured data, keeping only the execution facts.
    pub(crate) fn without_io(mut self) -> Self {
        self.inputs.clear();
        self.outputs = Captured::Absent;
        self
    }
}

/// One evaluated transition between activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionCoverage {
    pub transition_name: String,
    #[serde(default)]
    pub transition_type: String,
    #[serde(default)]
    pub transition_from: String,
    #[serde(default)]
    pub transition_to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transition_expression: String,
    pub flow_name: String,
    #[serde(default = "main_path")]
    pub is_main_flow: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flow_id: String,
}

impl TransitionCoverage {
    pub fn new(
        flow_name: impl Into<String>,
        transition_name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            transition_name: transition_name.into(),
            transition_type: String::new(),
            transition_from: from.into(),
            transition_to: to.into(),
            transition_expression: String::new(),
            flow_name: flow_name.into(),
            is_main_flow: true,
            flow_id: String::new(),
        }
    }

    pub fn in_error_handler(mut self) -> Self {
        self.is_main_flow = false;
        self
    }

    pub fn with_type(mut self, transition_type: impl Into<String>) -> Self {
        self.transition_type = transition_type.into();
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.transition_expression = expression.into();
        self
    }

    pub fn with_flow_id(mut self, flow_id: impl Into<String>) -> Self {
        self.flow_id = flow_id.into();
        self
    }
}

/// One sub-flow invocation: `sub_flow_activity` in `host_flow` started an
/// instance of `sub_flow_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFlowCoverage {
    pub host_flow: String,
    pub sub_flow_activity: String,
    pub sub_flow_name: String,
    #[serde(rename = "hostFlowID", default)]
    pub host_flow_id: String,
    #[serde(rename = "subFlowID", default)]
    pub sub_flow_id: String,
    #[serde(default)]
    pub inputs: ValueMap,
    #[serde(default, skip_serializing_if = "Captured::is_absent")]
    pub outputs: Captured<ValueMap>,
}

impl SubFlowCoverage {
    pub fn new(
        host_flow: impl Into<String>,
        sub_flow_activity: impl Into<String>,
        sub_flow_name: impl Into<String>,
    ) -> Self {
        Self {
            host_flow: host_flow.into(),
            sub_flow_activity: sub_flow_activity.into(),
            sub_flow_name: sub_flow_name.into(),
            host_flow_id: String::new(),
            sub_flow_id: String::new(),
            inputs: ValueMap::new(),
            outputs: Captured::Absent,
        }
    }

    pub fn with_instance_ids(
        mut self,
        host_flow_id: impl Into<String>,
        sub_flow_id: impl Into<String>,
    ) -> Self {
        self.host_flow_id = host_flow_id.into();
        self.sub_flow_id = sub_flow_id.into();
        self
    }

    pub fn with_inputs(mut self, inputs: ValueMap) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: ValueMap) -> Self {
        self.outputs = Captured::Value(outputs);
        self
    }

    pub(crate) fn without_io(mut self) -> Self {
        self.inputs.clear();
        self.outputs = Captured::Absent;
        self
    }
}
