use matspeed::{
    elementwise_accelerated, elementwise_baseline, sum_nested_loop, sum_reduce, Matrix,
};

#[test]
fn zero_row_matrices_yield_empty_results() {
    let a = Matrix::example(0, 4);
    let b = a.offset(1.0);

    let (sum, product) = elementwise_baseline(&a, &b);
    assert_eq!(sum.shape(), (0, 4));
    assert_eq!(product.shape(), (0, 4));
    let (sum, product) = elementwise_accelerated(&a, &b);
    assert_eq!(sum.shape(), (0, 4));
    assert!(product.is_empty());
    assert_eq!(sum_reduce(&a), 0.0);
    assert_eq!(sum_nested_loop(&a), 0.0);
}

#[test]
fn zero_column_matrices_yield_empty_results() {
    let a = Matrix::zeros(3, 0);
    let b = Matrix::random_seeded(3, 0, Some(1));

    let (sum, product) = elementwise_accelerated(&a, &b);
    assert_eq!(sum.shape(), (3, 0));
    assert_eq!(product.shape(), (3, 0));
    assert!(sum.array_equal(&elementwise_baseline(&a, &b).0));
    assert_eq!(sum_reduce(&a), 0.0);
    assert_eq!(sum_nested_loop(&a), 0.0);
    assert_eq!(sum.to_string(), "[]");
}
