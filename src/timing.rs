use std::time::Instant;

/// Wall-clock duration of a single call, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSample {
    pub label: String,
    pub seconds: f64,
}

impl TimingSample {
    pub fn new(label: impl Into<String>, seconds: f64) -> Self {
        Self {
            label: label.into(),
            seconds,
        }
    }

    pub fn millis(&self) -> f64 {
        self.seconds * 1000.0
    }
}

/// Runs `f` once between two monotonic clock readings.
pub fn timed<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> (T, TimingSample) {
    let start = Instant::now();
    let value = f();
    let seconds = start.elapsed().as_secs_f64();
    (value, TimingSample::new(label, seconds))
}

/// `baseline / candidate`. Not finite when the candidate was too fast for the
/// clock: infinite if only the candidate read zero, NaN if both did.
pub fn speedup(baseline: &TimingSample, candidate: &TimingSample) -> f64 {
    baseline.seconds / candidate.seconds
}
