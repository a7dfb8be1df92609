#![allow(dead_code)]

use matspeed::Matrix;

pub fn assert_approx_eq(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (*a - *e).abs() <= tol,
            "Mismatch at index {}: actual={} expected={} with tol={}",
            i,
            a,
            e,
            tol
        );
    }
}

pub fn assert_relative_eq(actual: f64, expected: f64, rel_tol: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    let rel = (actual - expected).abs() / scale;
    assert!(
        rel <= rel_tol,
        "actual={} expected={} relative error {} exceeds {}",
        actual,
        expected,
        rel,
        rel_tol
    );
}

pub fn clone_data(matrix: &Matrix) -> Vec<f64> {
    matrix.data().to_vec()
}
