//! Rebuild the flat coverage log into a nested report tree
//!
//! The log holds activities and transitions from every flow the instance
//! touched, interleaved in execution order. Assembly:
//!
//! 1. buckets entries of every flow other than the main flow into one partial
//!    report per flow name
//! 2. indexes sub-flow invocations as `host flow -> {activity -> sub-flow}`
//! 3. resolves interceptor ids against the main flow to find a `_flowOutput`
//!    interception
//! 4. splits the main flow's own entries into main path and error handler
//! 5. appends the [`FLOW_OUTPUT_ACTIVITY`] placeholder when the flow output was
//!    intercepted
//! 6. attaches each sub-flow report under the activity that invoked it,
//!    recursively
//!
//! A sub-flow that left no activity or transition entries has no bucket and is
//! therefore not attached; its invocation record alone cannot produce a report.
//! Nothing here mutates the log.

use super::types::{
    FlowReport, FlowRun, HandlerReport, OutputReport, RunReport, TriggerReport,
    FLOW_OUTPUT_ACTIVITY,
};
use crate::config::AppDescriptor;
use crate::coverage::{ActivityCoverage, CoverageLog, SubFlowCoverage};
use crate::interceptor::{TaskInterceptor, FLOW_OUTPUT_TASK};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// `host flow -> {invoking activity -> sub-flow name}`
pub type SubFlowIndex = BTreeMap<String, BTreeMap<String, String>>;

/// Assemble the full report document for one finished run.
pub fn assemble_report<A: AppDescriptor + ?Sized>(
    app: &A,
    run: &FlowRun<'_>,
    interceptors: &[TaskInterceptor],
    coverage: &CoverageLog,
) -> OutputReport {
    let descriptor = run.descriptor;
    let flows = assemble_flow_tree(&descriptor.flow_name, interceptors, coverage);

    OutputReport {
        app_name: app.name(),
        app_version: app.version(),
        instance_id: run.instance_id.to_string(),
        report: RunReport {
            trigger: TriggerReport {
                id: descriptor.trigger_id.clone(),
                settings: descriptor.trigger_settings.clone(),
                handler: HandlerReport {
                    flow_name: descriptor.flow_name.clone(),
                    input: run.inputs.clone(),
                    output: run.outputs.clone(),
                },
            },
            flows,
        },
    }
}

/// Build the report tree rooted at `main_flow`.
pub fn assemble_flow_tree(
    main_flow: &str,
    interceptors: &[TaskInterceptor],
    coverage: &CoverageLog,
) -> FlowReport {
    let buckets = bucket_sub_flows(main_flow, coverage);
    let index = index_sub_flows(coverage.sub_flows());
    let intercepted = intercepted_activities(main_flow, interceptors);

    let mut root = partition_main_flow(main_flow, coverage);
    if intercepted.contains_key(FLOW_OUTPUT_TASK) {
        debug!("Flow output of {} was intercepted", main_flow);
        root.activities
            .push(ActivityCoverage::new(main_flow, FLOW_OUTPUT_ACTIVITY));
    }

    let mut path = vec![main_flow.to_string()];
    attach_sub_flows(&mut root, &buckets, &index, &mut path);
    root
}

/// One partial report per non-main flow that produced at least one activity or
/// transition entry. Created lazily, in first-seen order per record kind.
pub fn bucket_sub_flows(main_flow: &str, coverage: &CoverageLog) -> BTreeMap<String, FlowReport> {
    let mut buckets: BTreeMap<String, FlowReport> = BTreeMap::new();

    for activity in coverage
        .activities()
        .iter()
        .filter(|a| a.flow_name != main_flow)
    {
        bucket_for(&mut buckets, &activity.flow_name).push_activity(activity.clone());
    }

    for link in coverage
        .transitions()
        .iter()
        .filter(|t| t.flow_name != main_flow)
    {
        bucket_for(&mut buckets, &link.flow_name).push_link(link.clone());
    }

    buckets
}

fn bucket_for<'a>(buckets: &'a mut BTreeMap<String, FlowReport>, flow: &str) -> &'a mut FlowReport {
    buckets.entry(flow.to_string()).or_insert_with(|| {
        debug!("Discovered sub-flow {} in coverage", flow);
        FlowReport::new(flow)
    })
}

/// Index invocations by host flow. A host may invoke several sub-flows from
/// different activities; a repeated `(host, activity)` pair keeps the latest
/// sub-flow name.
pub fn index_sub_flows(sub_flows: &[SubFlowCoverage]) -> SubFlowIndex {
    let mut index = SubFlowIndex::new();
    for sub_flow in sub_flows {
        index
            .entry(sub_flow.host_flow.clone())
            .or_default()
            .insert(
                sub_flow.sub_flow_activity.clone(),
                sub_flow.sub_flow_name.clone(),
            );
    }
    index
}

/// Interceptors that target `main_flow`, keyed by bare activity id. Ids from
/// other flows, or legacy ids without the `"{main_flow}-"` prefix, are left out.
pub fn intercepted_activities<'a>(
    main_flow: &str,
    interceptors: &'a [TaskInterceptor],
) -> HashMap<&'a str, &'a TaskInterceptor> {
    interceptors
        .iter()
        .filter_map(|task| task.id.activity_in(main_flow).map(|id| (id, task)))
        .collect()
}

/// The main flow's own entries, split into main path and error handler with
/// encounter order preserved in each.
pub fn partition_main_flow(main_flow: &str, coverage: &CoverageLog) -> FlowReport {
    let mut report = FlowReport::new(main_flow);

    for activity in coverage
        .activities()
        .iter()
        .filter(|a| a.flow_name == main_flow)
    {
        report.push_activity(activity.clone());
    }

    for link in coverage
        .transitions()
        .iter()
        .filter(|t| t.flow_name == main_flow)
    {
        report.push_link(link.clone());
    }

    report
}

/// Attach child reports under the activities that invoked them.
///
/// `path` holds the flows from the root down to `report`; a child already on
/// the path is a recursive invocation and is not nested again.
fn attach_sub_flows(
    report: &mut FlowReport,
    buckets: &BTreeMap<String, FlowReport>,
    index: &SubFlowIndex,
    path: &mut Vec<String>,
) {
    let Some(children) = index.get(&report.name) else {
        return;
    };

    for (activity, child_name) in children {
        if path.iter().any(|flow| flow == child_name) {
            debug!(
                "Skipping recursive sub-flow {} invoked from {} in {}",
                child_name, activity, report.name
            );
            continue;
        }

        let Some(bucket) = buckets.get(child_name) else {
            debug!(
                "Sub-flow {} invoked from {} in {} left no coverage entries",
                child_name, activity, report.name
            );
            continue;
        };

        let mut child = bucket.clone();
        path.push(child_name.clone());
        attach_sub_flows(&mut child, buckets, index, path);
        path.pop();

        report.sub_flow.insert(activity.clone(), child);
    }
}
