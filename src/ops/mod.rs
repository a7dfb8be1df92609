pub mod kernels;

use log::debug;

use kernels::{add_kernel, mul_kernel, par_add_mul_kernel, par_sum_kernel};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

fn check_same_shape(a: &Matrix, b: &Matrix, op: &'static str) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(MatrixError::ShapeMismatch {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

pub fn add(a: &Matrix, b: &Matrix) -> Matrix {
    try_add(a, b).expect("add: shapes must match")
}

pub fn try_add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_same_shape(a, b, "add")?;
    Matrix::try_new(add_kernel(a.data(), b.data()), a.rows(), a.cols())
}

pub fn mul(a: &Matrix, b: &Matrix) -> Matrix {
    try_mul(a, b).expect("mul: shapes must match")
}

pub fn try_mul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_same_shape(a, b, "mul")?;
    Matrix::try_new(mul_kernel(a.data(), b.data()), a.rows(), a.cols())
}

/// Elementwise `(a + b, a * b)` computed by two sequential passes.
pub fn elementwise_baseline(a: &Matrix, b: &Matrix) -> (Matrix, Matrix) {
    try_elementwise_baseline(a, b).expect("elementwise_baseline: shapes must match")
}

pub fn try_elementwise_baseline(a: &Matrix, b: &Matrix) -> Result<(Matrix, Matrix)> {
    check_same_shape(a, b, "elementwise_baseline")?;
    Ok((try_add(a, b)?, try_mul(a, b)?))
}

/// Elementwise `(a + b, a * b)` computed in one fused pass on the rayon pool.
///
/// Results are exactly equal to [`elementwise_baseline`]. Whichever parallel
/// call comes first in a process also pays for starting the global thread pool.
pub fn elementwise_accelerated(a: &Matrix, b: &Matrix) -> (Matrix, Matrix) {
    try_elementwise_accelerated(a, b).expect("elementwise_accelerated: shapes must match")
}

pub fn try_elementwise_accelerated(a: &Matrix, b: &Matrix) -> Result<(Matrix, Matrix)> {
    check_same_shape(a, b, "elementwise_accelerated")?;
    debug!(
        "elementwise_accelerated: {}x{} on {} threads",
        a.rows(),
        a.cols(),
        rayon::current_num_threads()
    );
    let (sum, product) = par_add_mul_kernel(a.data(), b.data());
    Ok((
        Matrix::try_new(sum, a.rows(), a.cols())?,
        Matrix::try_new(product, a.rows(), a.cols())?,
    ))
}

/// Full reduction through the library's parallel sum.
pub fn sum_reduce(m: &Matrix) -> f64 {
    par_sum_kernel(m.data())
}

/// Full reduction by an explicit row/column loop in row-major order.
pub fn sum_nested_loop(m: &Matrix) -> f64 {
    let mut total = 0.0;
    for i in 0..m.rows() {
        for j in 0..m.cols() {
            total += m[(i, j)];
        }
    }
    total
}
