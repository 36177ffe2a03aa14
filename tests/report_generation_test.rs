//! End-to-end tests: a simulated runner drives an interceptor table through
//! one flow instance and the finished run is written as a report.

mod common;

use common::{values, TestReportRoot, APP_NAME, APP_VERSION};
use flow_coverage::coverage::{ActivityCoverage, SubFlowCoverage, TransitionCoverage};
use flow_coverage::interceptor::{InterceptorTable, TaskResult};
use flow_coverage::report::{load_report, FlowDescriptor, FlowRun, FLOW_OUTPUT_ACTIVITY};
use serde_json::json;
use std::fs;

const DEFINITIONS: &str = r#"{
    "collectIO": true,
    "tasks": [
        {"id": "OrderFlow-charge", "type": "activity", "outputs": {"charged": true},
         "assertions": [{"id": "m1", "type": "mockActivity"}]},
        {"id": "OrderFlow-_flowOutput",
         "assertions": [{"id": "o1", "type": "assertionActivity", "expression": "$.status == 'ok'"}]}
    ]
}"#;

/// Runner stand-in: executes OrderFlow, which calls SubFlow from `callSub`.
fn run_order_flow(table: &mut InterceptorTable) {
    table.add_to_activity_coverage(
        ActivityCoverage::new("OrderFlow", "validate")
            .with_inputs(values(json!({"orderId": "o-1"})))
            .with_outputs(values(json!({"valid": true}))),
    );
    table.add_to_link_coverage(TransitionCoverage::new("OrderFlow", "t1", "validate", "charge"));

    let mocked = table
        .get_task_interceptor("OrderFlow", "charge")
        .map(|task| task.outputs.clone())
        .unwrap();
    table.add_to_activity_coverage(
        ActivityCoverage::new("OrderFlow", "charge").with_outputs(mocked),
    );
    if let Some(task) = table.get_task_interceptor_mut("OrderFlow", "charge") {
        task.assertions[0].result = TaskResult::Mocked;
        task.record_result(TaskResult::Mocked, "outputs replaced");
    }

    table.add_to_sub_flow_coverage_map(
        "sub-inst-1",
        SubFlowCoverage::new("OrderFlow", "callSub", "SubFlow")
            .with_instance_ids("inst-1", "")
            .with_inputs(values(json!({"sku": "A-1"}))),
    );
    table.add_to_activity_coverage(ActivityCoverage::new("SubFlow", "lookup"));
    table.add_to_activity_coverage(ActivityCoverage::new("OrderFlow", "callSub"));

    if let Some(task) = table.get_task_interceptor_mut("OrderFlow", "_flowOutput") {
        task.assertions[0].result = TaskResult::Pass;
    }
}

#[test]
fn test_full_run_report() {
    let root = TestReportRoot::new();
    let mut table = InterceptorTable::from_json(DEFINITIONS).unwrap();
    run_order_flow(&mut table);

    let summary = table.assertion_summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.mocked, 1);
    assert_eq!(summary.passed, 1);
    assert!(!summary.has_failures());

    let descriptor = FlowDescriptor::new("OrderFlow", "rest");
    let inputs = values(json!({"orderId": "o-1"}));
    let outputs = values(json!({"status": "ok"}));
    let run = FlowRun::new(&descriptor, "inst-1", &inputs, &outputs);

    let path = root.generator.generate_for_table(&run, &table).unwrap();
    assert_eq!(
        path,
        root.temp_dir
            .path()
            .join("flow-executions")
            .join(APP_NAME)
            .join("OrderFlow-inst-1.json")
    );

    let report = load_report(&path).unwrap();
    assert_eq!(report.app_name, APP_NAME);
    assert_eq!(report.app_version, APP_VERSION);
    assert_eq!(report.instance_id, "inst-1");
    assert_eq!(report.report.trigger.handler.output, outputs);

    let flows = &report.report.flows;
    let names: Vec<_> = flows
        .activities
        .iter()
        .map(|a| a.activity_name.as_str())
        .collect();
    assert_eq!(names, vec!["validate", "charge", "callSub", FLOW_OUTPUT_ACTIVITY]);
    assert_eq!(flows.links.len(), 1);
    assert_eq!(flows.sub_flow["callSub"].activities.len(), 1);
    assert_eq!(flows.sub_flow["callSub"].name, "SubFlow");
}

#[test]
fn test_report_json_shape() {
    let root = TestReportRoot::new();
    let mut table = InterceptorTable::from_json(DEFINITIONS).unwrap();
    run_order_flow(&mut table);

    let descriptor = FlowDescriptor::new("OrderFlow", "rest");
    let empty = values(json!({}));
    let run = FlowRun::new(&descriptor, "inst-2", &empty, &empty);
    let path = root.generator.generate_for_table(&run, &table).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let flows = &json["report"]["flows"];

    // Produced outputs are written, never-produced outputs are omitted
    assert_eq!(flows["activities"][0]["outputs"], json!({"valid": true}));
    assert!(flows["activities"][2].get("outputs").is_none());
    assert!(flows["activities"][3].get("outputs").is_none());
    assert_eq!(flows["activities"][3]["activityName"], json!("FlowReport Output"));

    assert_eq!(flows["links"][0]["transitionFrom"], json!("validate"));
    assert!(flows["subFlow"]["callSub"].get("subFlow").is_none());
}

#[test]
fn test_io_collection_disabled_strips_payloads() {
    let root = TestReportRoot::new();
    let definitions = DEFINITIONS.replacen("\"collectIO\": true", "\"collectIO\": false", 1);
    let mut table = InterceptorTable::from_json(&definitions).unwrap();
    assert!(!table.collect_io());
    run_order_flow(&mut table);

    let descriptor = FlowDescriptor::new("OrderFlow", "rest");
    let empty = values(json!({}));
    let run = FlowRun::new(&descriptor, "inst-3", &empty, &empty);
    let report = load_report(&root.generator.generate_for_table(&run, &table).unwrap()).unwrap();

    let validate = &report.report.flows.activities[0];
    assert!(validate.inputs.is_empty());
    assert!(validate.outputs.is_absent());
}

#[test]
fn test_sub_flow_instance_lookup_during_run() {
    let mut table = InterceptorTable::from_json(DEFINITIONS).unwrap();
    run_order_flow(&mut table);

    let sub = table.coverage().sub_flow_by_instance("sub-inst-1").unwrap();
    assert_eq!(sub.host_flow, "OrderFlow");
    assert_eq!(sub.host_flow_id, "inst-1");
    assert_eq!(sub.sub_flow_id, "sub-inst-1");
}
