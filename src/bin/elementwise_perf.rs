use std::time::Instant;

use anyhow::{anyhow, Result};
use matspeed::{try_elementwise_accelerated, try_elementwise_baseline, Matrix};

fn main() -> Result<()> {
    let size: usize = std::env::var("ELEMENTWISE_PERF_SIZE")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(2000);
    let seed: u64 = std::env::var("ELEMENTWISE_PERF_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(2025);

    let a = Matrix::random_seeded(size, size, Some(seed));
    let b = Matrix::random_seeded(size, size, Some(seed.wrapping_add(1)));

    // Start the pool outside the measured region.
    try_elementwise_accelerated(&a, &b).map_err(|err| anyhow!("warm-up failed: {err}"))?;

    let start = Instant::now();
    let baseline = try_elementwise_baseline(&a, &b)
        .map_err(|err| anyhow!("baseline failed: {err}"))?;
    let baseline_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let accelerated = try_elementwise_accelerated(&a, &b)
        .map_err(|err| anyhow!("accelerated failed: {err}"))?;
    let accelerated_ms = start.elapsed().as_secs_f64() * 1000.0;

    if !baseline.0.array_equal(&accelerated.0) || !baseline.1.array_equal(&accelerated.1) {
        return Err(anyhow!("accelerated output diverged from baseline"));
    }

    println!(
        "size={} threads={} baseline_ms={:.3} accelerated_ms={:.3} speedup={:.2}",
        size,
        rayon::current_num_threads(),
        baseline_ms,
        accelerated_ms,
        baseline_ms / accelerated_ms
    );

    Ok(())
}
