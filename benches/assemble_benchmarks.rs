//! Performance benchmarks for report assembly over large coverage logs

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flow_coverage::coverage::{ActivityCoverage, CoverageLog, SubFlowCoverage, TransitionCoverage};
use flow_coverage::interceptor::TaskInterceptor;
use flow_coverage::report::assemble_flow_tree;
use std::hint::black_box;

/// Main flow with `depth` levels of nested sub-flows, `per_flow` activities each
fn create_nested_log(depth: usize, per_flow: usize) -> CoverageLog {
    let mut log = CoverageLog::new();
    let mut host = "MainFlow".to_string();

    for level in 0..=depth {
        let flow = if level == 0 {
            host.clone()
        } else {
            format!("Sub{level}")
        };
        if level > 0 {
            log.record_sub_flow(SubFlowCoverage::new(&host, format!("call{level}"), &flow));
        }
        for i in 0..per_flow {
            log.record_activity(ActivityCoverage::new(&flow, format!("act_{i}")));
            log.record_transition(TransitionCoverage::new(
                &flow,
                format!("t_{i}"),
                format!("act_{i}"),
                format!("act_{}", i + 1),
            ));
        }
        log.record_activity(ActivityCoverage::new(&flow, "recover").in_error_handler());
        host = flow;
    }

    log
}

fn bench_assemble(c: &mut Criterion) {
    let interceptors = vec![TaskInterceptor::new("MainFlow-_flowOutput")];
    let mut group = c.benchmark_group("assemble_flow_tree");

    for (depth, per_flow) in [(1, 10), (5, 100), (20, 500)] {
        let log = create_nested_log(depth, per_flow);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{depth}x{per_flow}")),
            &log,
            |b, log| b.iter(|| assemble_flow_tree(black_box("MainFlow"), &interceptors, log)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
