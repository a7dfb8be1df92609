//! The demonstration run: small worked example, timing comparison on large
//! random matrices, and the full-reduction comparison.

use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DemoConfig;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::ops::{self, try_elementwise_accelerated, try_elementwise_baseline};
use crate::telemetry::{TelemetryEvent, TelemetryRecorder, TelemetrySink};
use crate::timing::{speedup, timed, TimingSample};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone)]
pub struct ExampleSection {
    pub a: Matrix,
    pub b: Matrix,
    pub baseline_sum: Matrix,
    pub baseline_product: Matrix,
    pub accelerated_sum: Matrix,
    pub accelerated_product: Matrix,
}

impl ExampleSection {
    pub fn sums_equal(&self) -> bool {
        self.baseline_sum.array_equal(&self.accelerated_sum)
    }

    pub fn products_equal(&self) -> bool {
        self.baseline_product.array_equal(&self.accelerated_product)
    }
}

#[derive(Debug, Clone)]
pub struct TimingSection {
    pub size: usize,
    pub baseline: TimingSample,
    /// First timed parallel call on the large inputs. The pool is already up
    /// from the small example, so this mostly differs from the second call by
    /// cold caches.
    pub accelerated_first: TimingSample,
    pub accelerated_second: TimingSample,
    /// Both accelerated calls produced identical outputs.
    pub repeat_identical: bool,
}

impl TimingSection {
    pub fn speedup(&self) -> f64 {
        speedup(&self.baseline, &self.accelerated_second)
    }
}

#[derive(Debug, Clone)]
pub struct ReductionSection {
    pub size: usize,
    pub library_sum: f64,
    pub library: TimingSample,
    pub loop_sum: f64,
    pub nested_loop: TimingSample,
}

impl ReductionSection {
    pub fn abs_diff(&self) -> f64 {
        (self.library_sum - self.loop_sum).abs()
    }
}

#[derive(Debug, Clone)]
pub struct DemoReport {
    pub config: DemoConfig,
    pub example: ExampleSection,
    pub timing: TimingSection,
    pub reduction: ReductionSection,
}

pub fn run_demo(config: &DemoConfig) -> Result<DemoReport> {
    run_demo_with_telemetry::<crate::telemetry::MemorySink>(config, None)
}

pub fn run_demo_with_telemetry<S: TelemetrySink>(
    config: &DemoConfig,
    telemetry: Option<&TelemetryRecorder<S>>,
) -> Result<DemoReport> {
    config.validate()?;
    info!(
        "demo: example={}x{}, large={}, reduction={}, seed={:?}",
        config.example_rows,
        config.example_cols,
        config.large_size,
        config.reduction_size,
        config.seed
    );
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let example = run_example(config)?;
    let timing = run_timing(config.large_size, &mut rng)?;
    let reduction = run_reduction(config.reduction_size, &mut rng);

    if let Some(recorder) = telemetry {
        record_samples(recorder, &timing, &reduction)?;
    }

    Ok(DemoReport {
        config: config.clone(),
        example,
        timing,
        reduction,
    })
}

fn run_example(config: &DemoConfig) -> Result<ExampleSection> {
    let a = Matrix::example(config.example_rows, config.example_cols);
    let b = a.offset(1.0);
    let (baseline_sum, baseline_product) = try_elementwise_baseline(&a, &b)?;
    let (accelerated_sum, accelerated_product) = try_elementwise_accelerated(&a, &b)?;
    Ok(ExampleSection {
        a,
        b,
        baseline_sum,
        baseline_product,
        accelerated_sum,
        accelerated_product,
    })
}

fn run_timing(size: usize, rng: &mut StdRng) -> Result<TimingSection> {
    let a = Matrix::random(size, size, rng);
    let b = Matrix::random(size, size, rng);

    let (baseline_out, baseline) = timed("elementwise_baseline", || {
        try_elementwise_baseline(&a, &b)
    });
    baseline_out?;
    let (first_out, accelerated_first) = timed("elementwise_accelerated_first", || {
        try_elementwise_accelerated(&a, &b)
    });
    let first_out = first_out?;
    let (second_out, accelerated_second) = timed("elementwise_accelerated_second", || {
        try_elementwise_accelerated(&a, &b)
    });
    let second_out = second_out?;

    let repeat_identical =
        first_out.0.array_equal(&second_out.0) && first_out.1.array_equal(&second_out.1);
    if !repeat_identical {
        warn!("accelerated elementwise outputs differ between repeated calls");
    }
    if accelerated_second.seconds > accelerated_first.seconds {
        info!(
            "steady-state call ({:.4}s) slower than first call ({:.4}s)",
            accelerated_second.seconds, accelerated_first.seconds
        );
    }

    Ok(TimingSection {
        size,
        baseline,
        accelerated_first,
        accelerated_second,
        repeat_identical,
    })
}

fn run_reduction(size: usize, rng: &mut StdRng) -> ReductionSection {
    let m = Matrix::random(size, size, rng);
    let (library_sum, library) = timed("sum_reduce", || ops::sum_reduce(&m));
    let (loop_sum, nested_loop) = timed("sum_nested_loop", || ops::sum_nested_loop(&m));
    ReductionSection {
        size,
        library_sum,
        library,
        loop_sum,
        nested_loop,
    }
}

fn record_samples<S: TelemetrySink>(
    recorder: &TelemetryRecorder<S>,
    timing: &TimingSection,
    reduction: &ReductionSection,
) -> Result<()> {
    let timing_samples = [
        &timing.baseline,
        &timing.accelerated_first,
        &timing.accelerated_second,
    ];
    let reduction_samples = [&reduction.library, &reduction.nested_loop];
    let events = timing_samples
        .iter()
        .map(|sample| TelemetryEvent::from(*sample).with_tag("size", timing.size.to_string()))
        .chain(reduction_samples.iter().map(|sample| {
            TelemetryEvent::from(*sample).with_tag("size", reduction.size.to_string())
        }));
    for event in events {
        recorder
            .record(event)
            .map_err(|err| MatrixError::Telemetry {
                msg: err.to_string(),
            })?;
    }
    Ok(())
}

impl DemoReport {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let example = &self.example;

        writeln!(out, "ELEMENTWISE SPEEDUP DEMO")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Matrix A:")?;
        writeln!(out, "{}", example.a)?;
        writeln!(out, "\nMatrix B:")?;
        writeln!(out, "{}", example.b)?;

        writeln!(out, "\n-> BASELINE (sequential):")?;
        render_pair(out, &example.baseline_sum, &example.baseline_product)?;
        writeln!(out, "\n-> ACCELERATED (parallel):")?;
        render_pair(out, &example.accelerated_sum, &example.accelerated_product)?;

        writeln!(out, "\nVerification:")?;
        writeln!(out, "Sums equal: {}", example.sums_equal())?;
        writeln!(out, "Products equal: {}", example.products_equal())?;

        let timing = &self.timing;
        writeln!(out, "\n{rule}")?;
        writeln!(out, "PERFORMANCE COMPARISON:")?;
        writeln!(out, "Matrices of {0}x{0} elements", timing.size)?;
        writeln!(out, "\nBaseline time: {:.4} seconds", timing.baseline.seconds)?;
        writeln!(
            out,
            "Accelerated time (1st call): {:.4} seconds",
            timing.accelerated_first.seconds
        )?;
        writeln!(
            out,
            "Accelerated time (2nd call): {:.4} seconds",
            timing.accelerated_second.seconds
        )?;
        writeln!(out, "Repeated calls identical: {}", timing.repeat_identical)?;
        writeln!(out, "Speedup: {}", format_speedup(timing.speedup()))?;

        let reduction = &self.reduction;
        writeln!(out, "\n{rule}")?;
        writeln!(out, "SUM OF ALL ELEMENTS:")?;
        writeln!(
            out,
            "Library sum: {:.6} ({:.6} seconds)",
            reduction.library_sum, reduction.library.seconds
        )?;
        writeln!(
            out,
            "Nested loop sum: {:.6} ({:.6} seconds)",
            reduction.loop_sum, reduction.nested_loop.seconds
        )?;
        writeln!(out, "Difference: {:.10e}", reduction.abs_diff())?;
        Ok(())
    }
}

fn format_speedup(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{ratio:.1}x faster!")
    } else {
        "n/a (accelerated call below clock resolution)".to_string()
    }
}

fn render_pair<W: Write>(out: &mut W, sum: &Matrix, product: &Matrix) -> io::Result<()> {
    writeln!(out, "Sum A + B:")?;
    writeln!(out, "{sum}")?;
    writeln!(out, "\nElementwise product A * B:")?;
    writeln!(out, "{product}")
}
