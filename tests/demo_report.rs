mod common;

use matspeed::telemetry::{MemorySink, TelemetryRecorder};
use matspeed::{run_demo, run_demo_with_telemetry, DemoConfig, MatrixError};

use common::assert_relative_eq;

fn small_config() -> DemoConfig {
    DemoConfig {
        large_size: 64,
        reduction_size: 48,
        ..DemoConfig::default()
    }
    .with_seed(7)
}

#[test]
fn demo_verifies_equal_outputs() {
    let report = run_demo(&small_config()).expect("demo should run");
    assert!(report.example.sums_equal());
    assert!(report.example.products_equal());
    assert_eq!(
        report.example.baseline_product.data(),
        &[0.0, 2.0, 6.0, 12.0, 20.0, 30.0]
    );
    assert!(report.timing.repeat_identical);
    assert_eq!(report.timing.size, 64);
    assert!(report.timing.baseline.seconds >= 0.0);
    assert_relative_eq(report.reduction.library_sum, report.reduction.loop_sum, 1e-9);
}

#[test]
fn demo_is_reproducible_with_seed() {
    let first = run_demo(&small_config()).unwrap();
    let second = run_demo(&small_config()).unwrap();
    assert_eq!(first.reduction.loop_sum, second.reduction.loop_sum);
}

#[test]
fn demo_rejects_invalid_config() {
    let config = DemoConfig {
        reduction_size: 0,
        ..DemoConfig::default()
    };
    let err = run_demo(&config).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidArgument { .. }));
}

#[test]
fn demo_rejects_sizes_whose_square_overflows() {
    let config = DemoConfig {
        large_size: 1 << 32,
        ..DemoConfig::default()
    };
    let err = run_demo(&config).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidArgument { .. }));
    assert!(err.to_string().contains("overflows"));
}

#[test]
fn rendered_report_contains_every_section() {
    let report = run_demo(&small_config()).unwrap();
    let mut buf = Vec::new();
    report.render(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("Matrix A:\n[[0. 1. 2.]\n [3. 4. 5.]]"));
    assert!(text.contains("Matrix B:\n[[1. 2. 3.]\n [4. 5. 6.]]"));
    assert!(text.contains("[[ 0.  2.  6.]\n [12. 20. 30.]]"));
    assert!(text.contains("Sums equal: true"));
    assert!(text.contains("Products equal: true"));
    assert!(text.contains("Matrices of 64x64 elements"));
    assert!(text.contains("Accelerated time (2nd call): "));
    assert!(text.contains("Speedup: "));
    assert!(text.contains("Nested loop sum: "));
    assert!(text.contains("Difference: "));
    assert!(text.contains(&"=".repeat(40)));
}

#[test]
fn telemetry_receives_every_timing_sample() {
    let sink = MemorySink::new();
    let view = sink.clone();
    {
        let recorder = TelemetryRecorder::new(sink);
        run_demo_with_telemetry(&small_config(), Some(&recorder)).unwrap();
    }
    let names: Vec<String> = view.events().into_iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        vec![
            "elementwise_baseline",
            "elementwise_accelerated_first",
            "elementwise_accelerated_second",
            "sum_reduce",
            "sum_nested_loop",
        ]
    );
    let sizes: Vec<String> = view
        .events()
        .into_iter()
        .filter_map(|e| e.tags.get("size").cloned())
        .collect();
    assert_eq!(sizes, vec!["64", "64", "64", "48", "48"]);
}
