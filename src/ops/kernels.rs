use rayon::prelude::*;

/// Elements handed to one rayon task. Large enough that scheduling stays
/// cheap next to the arithmetic.
pub const PAR_CHUNK: usize = 16 * 1024;

pub fn add_kernel(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn mul_kernel(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

/// Sum and product in one parallel pass over both inputs.
///
/// Each output entry depends on exactly one pair of inputs, so the result is
/// bit-identical to [`add_kernel`] and [`mul_kernel`] regardless of how the
/// chunks are scheduled.
pub fn par_add_mul_kernel(a: &[f64], b: &[f64]) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let mut sum = vec![0.0f64; n];
    let mut product = vec![0.0f64; n];
    sum.par_chunks_mut(PAR_CHUNK)
        .zip(product.par_chunks_mut(PAR_CHUNK))
        .zip(a.par_chunks(PAR_CHUNK))
        .zip(b.par_chunks(PAR_CHUNK))
        .for_each(|(((sum_out, product_out), lhs), rhs)| {
            for i in 0..lhs.len() {
                sum_out[i] = lhs[i] + rhs[i];
                product_out[i] = lhs[i] * rhs[i];
            }
        });
    (sum, product)
}

pub fn par_sum_kernel(data: &[f64]) -> f64 {
    data.par_iter().sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_kernel_matches_sequential_across_chunk_boundaries() {
        let n = PAR_CHUNK * 3 + 17;
        let a: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..n).map(|i| (i as f64 * 0.11).cos()).collect();

        let (sum, product) = par_add_mul_kernel(&a, &b);
        assert_eq!(sum, add_kernel(&a, &b));
        assert_eq!(product, mul_kernel(&a, &b));
    }

    #[test]
    fn kernels_accept_empty_input() {
        let (sum, product) = par_add_mul_kernel(&[], &[]);
        assert!(sum.is_empty());
        assert!(product.is_empty());
        assert_eq!(par_sum_kernel(&[]), 0.0);
    }
}
