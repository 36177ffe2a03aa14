//! Interceptor and assertion definitions

use super::key::TaskId;
use crate::ValueMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bare activity id that intercepts a flow's own return value.
pub const FLOW_OUTPUT_TASK: &str = "_flowOutput";

/// Outcome recorded against a task or an assertion.
///
/// `NotExecuted` is the starting value. The runner moves it to one terminal
/// value; nothing here enforces the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskResult {
    #[default]
    NotExecuted,
    Pass,
    Fail,
    Mocked,
    AssertionNotExecuted,
}

impl TaskResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::NotExecuted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssertionType {
    AssertionActivity,
    AssertionException,
    SkipActivity,
    MockActivity,
    MockException,
}

impl AssertionType {
    /// Mock assertions replace the task's outputs or error instead of checking them.
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::MockActivity | Self::MockException)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::SkipActivity)
    }
}

/// Kind of task an interceptor targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterceptorType {
    #[default]
    Primitive,
    Activity,
}

/// One check, skip or mock attached to a task.
///
/// `expression` and `eval_result` are opaque; expressions are evaluated by the
/// runner, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub assertion_type: AssertionType,
    #[serde(default)]
    pub expression: Value,
    #[serde(default)]
    pub eval_result: Value,
    #[serde(default)]
    pub result: TaskResult,
}

impl Assertion {
    pub fn new(id: impl Into<String>, assertion_type: AssertionType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            assertion_type,
            expression: Value::Null,
            eval_result: Value::Null,
            result: TaskResult::NotExecuted,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_expression(mut self, expression: Value) -> Self {
        self.expression = expression;
        self
    }
}

/// Override definition for a single task.
///
/// `skip` and `skip_execution` are independent flags and are stored as given.
/// The runner owns their meaning; see DESIGN.md for the current reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInterceptor {
    pub id: TaskId,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub skip_execution: bool,
    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub inputs: ValueMap,
    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub outputs: ValueMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
    #[serde(rename = "type", default)]
    pub interceptor_type: InterceptorType,
    #[serde(default)]
    pub result: TaskResult,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl TaskInterceptor {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            skip: false,
            skip_execution: false,
            inputs: ValueMap::new(),
            outputs: ValueMap::new(),
            assertions: Vec::new(),
            interceptor_type: InterceptorType::default(),
            result: TaskResult::NotExecuted,
            message: String::new(),
        }
    }

    pub fn with_type(mut self, interceptor_type: InterceptorType) -> Self {
        self.interceptor_type = interceptor_type;
        self
    }

    pub fn with_inputs(mut self, inputs: ValueMap) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: ValueMap) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Record the runner's verdict for this task.
    pub fn record_result(&mut self, result: TaskResult, message: impl Into<String>) {
        self.result = result;
        self.message = message.into();
    }
}

/// Tally of assertion outcomes across an interceptor table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub mocked: usize,
    pub not_executed: usize,
    pub assertion_not_executed: usize,
}

impl AssertionSummary {
    pub fn record(&mut self, result: TaskResult) {
        self.total += 1;
        match result {
            TaskResult::NotExecuted => self.not_executed += 1,
            TaskResult::Pass => self.passed += 1,
            TaskResult::Fail => self.failed += 1,
            TaskResult::Mocked => self.mocked += 1,
            TaskResult::AssertionNotExecuted => self.assertion_not_executed += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
