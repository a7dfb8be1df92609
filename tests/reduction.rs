mod common;

use matspeed::{sum_nested_loop, sum_reduce, Matrix};

use common::assert_relative_eq;

#[test]
fn sums_of_example_are_exact() {
    let m = Matrix::example(2, 3);
    assert_eq!(sum_reduce(&m), 15.0);
    assert_eq!(sum_nested_loop(&m), 15.0);
}

#[test]
fn library_and_loop_sums_agree_on_large_random_matrix() {
    let m = Matrix::random_seeded(500, 500, Some(2024));
    let library = sum_reduce(&m);
    let looped = sum_nested_loop(&m);
    assert_relative_eq(library, looped, 1e-9);
    // Mean of U[0, 1) over 250k samples.
    assert!((library / m.numel() as f64 - 0.5).abs() < 0.01);
}

#[test]
fn loop_sum_follows_row_major_order() {
    let data: Vec<f64> = (0..12).map(|i| 1.0 / (i as f64 + 1.0)).collect();
    let expected = data.iter().fold(0.0, |acc, v| acc + v);
    let m = Matrix::new(data, 3, 4);
    assert_eq!(sum_nested_loop(&m), expected);
}
